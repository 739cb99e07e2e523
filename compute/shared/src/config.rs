//! Run configuration checks
//!
//! Everything in here runs before any worker thread is started, so that an
//! invalid configuration is rejected instead of being discovered mid-run.

use data::{buffers::BufferPair, parameters::Parameters, Precision, MIN_DIMENSION};
use thiserror::Error;

/// Rejected run configuration
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Grid has no interior
    #[error("grid dimension {dimension} is too small, need at least {MIN_DIMENSION}")]
    GridTooSmall { dimension: usize },

    /// Grid is not square
    #[error("grid is {rows}x{cols}, but it must be square")]
    NotSquare { rows: usize, cols: usize },

    /// The two buffers of a pair have different shapes
    #[error("buffer shapes {a:?} and {b:?} differ")]
    ShapeMismatch { a: [usize; 2], b: [usize; 2] },

    /// Asked for a run without any worker
    #[error("at least one worker is needed")]
    NoWorkers,

    /// More workers than interior rows to share between them
    #[error("{workers} workers is more than the {rows} interior rows of the grid")]
    TooManyWorkers { workers: usize, rows: usize },

    /// Convergence threshold that is not a positive number
    #[error("minimal difference must be positive, got {value}")]
    InvalidThreshold { value: Precision },
}

/// Check that a grid dimension leaves room for interior cells
pub fn check_dimension(dimension: usize) -> Result<(), ConfigError> {
    if dimension < MIN_DIMENSION {
        return Err(ConfigError::GridTooSmall { dimension });
    }
    Ok(())
}

/// Check computation parameters
pub fn check_parameters(params: &Parameters) -> Result<(), ConfigError> {
    let value = params.minimal_difference;
    // Written this way so that NaN is rejected too
    if !(value > 0.0) {
        return Err(ConfigError::InvalidThreshold { value });
    }
    Ok(())
}

/// Check that a buffer pair is made of two square grids of the same valid
/// dimension, and return that dimension
pub fn check_buffers(buffers: &BufferPair) -> Result<usize, ConfigError> {
    let [a, b] = buffers.shapes();
    if a != b {
        return Err(ConfigError::ShapeMismatch { a, b });
    }
    let [rows, cols] = a;
    if rows != cols {
        return Err(ConfigError::NotSquare { rows, cols });
    }
    check_dimension(rows)?;
    Ok(rows)
}

/// Number of interior rows of a grid of a given dimension
pub fn interior_rows(dimension: usize) -> usize {
    dimension.saturating_sub(2)
}
