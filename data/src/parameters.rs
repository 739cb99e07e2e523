//! Computation parameters

use crate::Precision;
use std::num::NonZeroUsize;

/// Computation parameters
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Parameters {
    /// Largest per-cell change below which the grid is considered converged
    pub minimal_difference: Precision,

    /// Give up after this many iterations, even if not converged
    ///
    /// `None` means that the relaxation runs until it converges.
    pub max_iterations: Option<NonZeroUsize>,
}
//
impl Default for Parameters {
    fn default() -> Self {
        Self {
            minimal_difference: 0.0001,
            max_iterations: None,
        }
    }
}
//
impl Parameters {
    /// Truth that an iteration whose largest change was `largest_difference`
    /// has converged
    pub fn is_converged(&self, largest_difference: Precision) -> bool {
        largest_difference <= self.minimal_difference
    }

    /// Truth that the iteration budget is used up after `iterations` iterations
    pub fn is_exhausted(&self, iterations: usize) -> bool {
        self.max_iterations
            .is_some_and(|max_iterations| iterations >= max_iterations.get())
    }
}
