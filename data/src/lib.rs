//! Data format used by the Jacobi relaxation

pub mod buffers;
pub mod parameters;
pub mod pattern;

/// Computation precision
pub type Precision = f64;

/// Index of the first row (and column) that is not part of the fixed boundary
pub const FIRST_INTERIOR: usize = 1;

/// Smallest grid dimension that still has an interior
pub const MIN_DIMENSION: usize = 3;
