//! Distribution of interior rows across workers

use compute::{config::interior_rows, ConfigError};
use data::FIRST_INTERIOR;
use std::ops::Range;

/// Contiguous band of interior rows owned by one worker
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct RowBand {
    /// First row of the band
    pub start: usize,

    /// Row past the end of the band
    pub end: usize,
}
//
impl RowBand {
    /// Number of rows in the band
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Truth that the band contains no row
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Rows of the band as a range
    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Truth that this band begins at the first interior row
    pub fn is_first(&self) -> bool {
        self.start == FIRST_INTERIOR
    }
}

/// Split of the interior rows of a grid into one band per worker
///
/// Rows are split as evenly as possible. When the number of rows is not a
/// multiple of the number of bands, the first few bands get one extra row.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Partition {
    /// Number of bands
    num_bands: usize,

    /// Number of rows of the shortest bands
    base_len: usize,

    /// Number of leading bands that get one extra row
    num_widened: usize,
}
//
impl Partition {
    /// Split the interior rows of a `dimension x dimension` grid across
    /// `num_workers` workers
    pub fn new(dimension: usize, num_workers: usize) -> Result<Self, ConfigError> {
        compute::config::check_dimension(dimension)?;
        let rows = interior_rows(dimension);
        if num_workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if num_workers > rows {
            return Err(ConfigError::TooManyWorkers {
                workers: num_workers,
                rows,
            });
        }
        Ok(Self {
            num_bands: num_workers,
            base_len: rows / num_workers,
            num_widened: rows % num_workers,
        })
    }

    /// Number of bands
    pub fn num_bands(&self) -> usize {
        self.num_bands
    }

    /// Rows of band number `index`
    ///
    /// This only depends on `index`, so each worker can compute its own band
    /// without knowing about the others.
    pub fn band(&self, index: usize) -> RowBand {
        assert!(index < self.num_bands, "band index {index} is out of range");
        let widened = index < self.num_widened;
        let shift = if widened { index } else { self.num_widened };
        let start = FIRST_INTERIOR + index * self.base_len + shift;
        RowBand {
            start,
            end: start + self.base_len + usize::from(widened),
        }
    }

    /// Iterate over all bands, in row order
    pub fn bands(&self) -> impl Iterator<Item = RowBand> + '_ {
        (0..self.num_bands).map(|index| self.band(index))
    }
}
