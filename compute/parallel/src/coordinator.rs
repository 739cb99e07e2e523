//! Global convergence decision
//!
//! Workers publish the largest change that they observed during an iteration,
//! then a single designated worker aggregates these values and decides whether
//! the run should go on.
//!
//! All accesses below use relaxed atomics: the barriers that separate the
//! publication, decision and observation phases order them.

use compute::Outcome;
use data::{buffers::BufferId, parameters::Parameters, Precision};
use log::trace;
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    OnceLock,
};

/// Convergence state shared by all workers of a run
#[derive(Debug)]
pub(crate) struct Coordination {
    /// Largest change seen by each worker during the current iteration,
    /// stored as the bits of a [`Precision`]
    largest_differences: Box<[AtomicU64]>,

    /// Truth that workers should exit instead of starting a new iteration
    stop: AtomicBool,

    /// How the run ended, recorded at the same time as `stop` is raised
    outcome: OnceLock<Outcome>,
}
//
impl Coordination {
    /// Set up convergence state for `num_workers` workers
    pub fn new(num_workers: usize) -> Self {
        let zero = Precision::to_bits(0.0);
        Self {
            largest_differences: (0..num_workers).map(|_| AtomicU64::new(zero)).collect(),
            stop: AtomicBool::new(false),
            outcome: OnceLock::new(),
        }
    }

    /// Truth that the run is over
    ///
    /// Only meaningful before an iteration starts, when every worker observes
    /// the same value.
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Record a change observed by worker `worker` during this iteration
    ///
    /// Keeps the largest value published since the last decision.
    pub fn publish(&self, worker: usize, difference: Precision) {
        let slot = &self.largest_differences[worker];
        let current = Precision::from_bits(slot.load(Ordering::Relaxed));
        if difference > current {
            slot.store(difference.to_bits(), Ordering::Relaxed);
        }
    }

    /// Decide whether the run should stop after iteration number `iteration`
    /// (counting from 0)
    ///
    /// Must be called by exactly one worker, while all the other workers are
    /// waiting between the compute and decision barriers.
    pub fn decide(&self, iteration: usize, params: &Parameters) {
        // Every slot is reset, even once the verdict is known
        let mut converged = true;
        let mut largest: Precision = 0.0;
        for slot in self.largest_differences.iter() {
            let difference = Precision::from_bits(slot.swap(0.0f64.to_bits(), Ordering::Relaxed));
            converged &= params.is_converged(difference);
            largest = largest.max(difference);
        }
        trace!("Iteration {iteration} changed cells by at most {largest}");

        let iterations = iteration + 1;
        if converged || params.is_exhausted(iterations) {
            let outcome = Outcome {
                final_buffer: BufferId::written_at(iteration),
                iterations,
                converged,
                num_workers: self.largest_differences.len(),
            };
            if self.outcome.set(outcome).is_ok() {
                self.stop.store(true, Ordering::Relaxed);
            }
        }
    }

    /// How the run ended, if it did
    pub fn into_outcome(self) -> Option<Outcome> {
        self.outcome.into_inner()
    }
}
