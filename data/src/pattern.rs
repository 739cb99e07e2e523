//! Initial grid contents

use crate::{buffers::Grid, Precision};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Initial value pattern of a grid
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Pattern {
    /// Top row and left column set to 1, everything else set to 0
    #[default]
    Edges,

    /// Alternating 1 and 0 values, with 1 in the top-left corner
    Checkerboard,
}
//
impl Pattern {
    /// All supported patterns
    pub const ALL: [Self; 2] = [Self::Edges, Self::Checkerboard];

    /// Value of the cell at `[row, col]`
    pub fn value(self, [row, col]: [usize; 2]) -> Precision {
        let one = match self {
            Self::Edges => row == 0 || col == 0,
            Self::Checkerboard => (row + col) % 2 == 0,
        };
        if one {
            1.0
        } else {
            0.0
        }
    }

    /// Generate a `dimension x dimension` grid following this pattern
    pub fn make_grid(self, dimension: usize) -> Grid {
        Grid::from_shape_fn((dimension, dimension), |(row, col)| {
            self.value([row, col])
        })
    }

    /// Name used when parsing and displaying this pattern
    pub fn name(self) -> &'static str {
        match self {
            Self::Edges => "edges",
            Self::Checkerboard => "checkerboard",
        }
    }
}
//
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
//
impl FromStr for Pattern {
    type Err = UnknownPattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPattern(s.to_owned()))
    }
}

/// Attempted to parse a pattern name that does not exist
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("unknown grid pattern {0:?}, expected one of \"edges\" or \"checkerboard\"")]
pub struct UnknownPattern(String);
