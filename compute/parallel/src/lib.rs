//! Parallel implementation of Jacobi relaxation
//!
//! This crate implements a parallel version of the relaxation based on domain
//! decomposition. A fixed pool of worker threads is spawned for the whole run.
//! Each worker owns a band of interior rows, and all workers move from one
//! iteration to the next in lockstep, as follows:
//!
//! 1. Wait on a barrier, so that nobody writes the new destination buffer
//!    while it is still being read as the previous iteration's source.
//! 2. Relax the worker's band into the destination buffer.
//! 3. Wait on a barrier, so that every worker's largest change is known.
//! 4. The worker owning the first band decides whether the run is over.
//! 5. Wait on a barrier, so that everyone sees the same decision.

mod args;
mod coordinator;
pub mod partition;
pub mod policy;
mod shared;
mod worker;

pub use args::ParallelArgs;

use compute::{
    config::{check_buffers, check_parameters, interior_rows},
    ConfigError, Outcome, Relax, RelaxBase, RelaxCreate,
};
use data::{buffers::BufferPair, parameters::Parameters};
use log::{debug, info};
use partition::Partition;
use shared::SharedBuffers;
use std::{io, num::NonZeroUsize, thread};
use thiserror::Error;
use worker::{RunState, Worker};

/// Jacobi relaxation
#[derive(Debug)]
pub struct Relaxation {
    /// Computation parameters
    params: Parameters,

    /// Number of worker threads, if set by the user
    num_threads: Option<NonZeroUsize>,
}
//
impl RelaxBase for Relaxation {
    type CliArgs = ParallelArgs;

    type Error = Error;
}
//
impl RelaxCreate for Relaxation {
    fn new(params: Parameters, args: ParallelArgs) -> Result<Self, Error> {
        check_parameters(&params)?;
        Ok(Self {
            params,
            num_threads: args.num_threads,
        })
    }
}
//
impl Relax for Relaxation {
    fn relax(&self, buffers: &mut BufferPair) -> Result<Outcome, Error> {
        // Reject invalid configurations before any thread is started
        let dimension = check_buffers(buffers)?;
        let num_workers = self.num_workers(dimension);
        let partition = Partition::new(dimension, num_workers)?;
        debug!("Relaxing a {dimension}x{dimension} grid with {num_workers} workers");

        let state = RunState::new(
            SharedBuffers::new(buffers, dimension),
            partition,
            self.params,
        );
        run_workers(&state)?;

        let outcome = state
            .coordination
            .into_outcome()
            .expect("workers only exit once the coordinator has recorded an outcome");
        info!(
            "Relaxation stopped after {} iterations (converged: {})",
            outcome.iterations, outcome.converged
        );
        Ok(outcome)
    }
}
//
impl Relaxation {
    /// Number of workers that will relax a `dimension x dimension` grid
    pub fn num_workers(&self, dimension: usize) -> usize {
        self.num_threads.map_or_else(
            || policy::automatic_num_workers(interior_rows(dimension)),
            NonZeroUsize::get,
        )
    }
}

/// Spawn one thread per band of `state`'s partition, wait for them to finish
fn run_workers(state: &RunState<'_>) -> Result<(), Error> {
    let num_workers = state.partition.num_bands();

    // Workers are held back until the whole pool is up, so that a failure to
    // spawn one of them does not leave the others stuck on a barrier
    let (start, gate) = crossbeam_channel::bounded::<()>(num_workers);
    thread::scope(move |scope| {
        let mut handles = Vec::with_capacity(num_workers);
        for thread_idx in 0..num_workers {
            let gate = gate.clone();
            let spawned = thread::Builder::new()
                .name(format!("relax-worker-{thread_idx}"))
                .spawn_scoped(scope, move || {
                    if gate.recv().is_ok() {
                        Worker::claim(state).run(state);
                    }
                });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(error) => {
                    // Closing the gate sends the spawned workers home
                    drop(start);
                    return Err(Error::SpawnWorker(error));
                }
            }
        }
        for _ in 0..num_workers {
            if start.send(()).is_err() {
                break;
            }
        }
        drop(start);

        let mut result = Ok(());
        for (thread_idx, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() && result.is_ok() {
                result = Err(Error::WorkerPanicked { thread_idx });
            }
        }
        result
    })
}

/// Things that can go wrong when performing parallel relaxation
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid run configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failed to start a worker thread
    #[error("failed to spawn a worker thread")]
    SpawnWorker(#[source] io::Error),

    /// A worker thread panicked
    ///
    /// In general, the other workers will then wait forever for it on the
    /// next barrier, so this is only reported when the run can still finish.
    #[error("worker thread {thread_idx} panicked")]
    WorkerPanicked { thread_idx: usize },
}
