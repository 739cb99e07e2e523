//! Worker threads of the relaxation engine

use crate::{
    coordinator::Coordination,
    partition::{Partition, RowBand},
    shared::SharedBuffers,
};
use data::{buffers::BufferId, parameters::Parameters};
use log::debug;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Barrier,
};

/// State shared by all workers of a run
pub(crate) struct RunState<'buffers> {
    /// Grids being relaxed
    pub buffers: SharedBuffers<'buffers>,

    /// Split of the grid's interior rows across workers
    pub partition: Partition,

    /// Next band index to be claimed by a starting worker
    pub next_band: AtomicUsize,

    /// Rendezvous point of the per-iteration protocol
    pub barrier: Barrier,

    /// Convergence evidence and stop decision
    pub coordination: Coordination,

    /// Computation parameters
    pub params: Parameters,
}
//
impl<'buffers> RunState<'buffers> {
    /// Prepare the shared state of a run
    pub fn new(buffers: SharedBuffers<'buffers>, partition: Partition, params: Parameters) -> Self {
        let num_workers = partition.num_bands();
        Self {
            buffers,
            partition,
            next_band: AtomicUsize::new(0),
            barrier: Barrier::new(num_workers),
            coordination: Coordination::new(num_workers),
            params,
        }
    }
}

/// Per-thread state of a worker
#[derive(Debug)]
pub(crate) struct Worker {
    /// Index of this worker's band, also used to identify the worker
    index: usize,

    /// Rows owned by this worker for the whole run
    band: RowBand,

    /// Truth that this worker takes the convergence decisions
    is_coordinator: bool,
}
//
impl Worker {
    /// Claim the next free band of the run
    ///
    /// Must be called exactly once by each of the run's worker threads.
    pub fn claim(state: &RunState<'_>) -> Self {
        let index = state.next_band.fetch_add(1, Ordering::Relaxed);
        let band = state.partition.band(index);
        let is_coordinator = band.is_first();
        debug!(
            "Worker {index} owns rows {:?}{}",
            band.rows(),
            if is_coordinator { " and coordinates" } else { "" }
        );
        Self {
            index,
            band,
            is_coordinator,
        }
    }

    /// Take part in iterations until the coordinator stops the run
    pub fn run(self, state: &RunState<'_>) {
        let mut iteration = 0;
        while !state.coordination.should_stop() {
            // Nobody may write the new destination until everyone is done
            // reading it as the previous iteration's source
            state.barrier.wait();
            let destination = BufferId::written_at(iteration);
            // SAFETY: Bands are disjoint, and every worker relaxes into the
            //         same destination buffer between these two barriers.
            let largest_difference = unsafe { state.buffers.relax_band(destination, self.band) };
            state.coordination.publish(self.index, largest_difference);

            // Every contribution must be in before the decision
            state.barrier.wait();
            if self.is_coordinator {
                state.coordination.decide(iteration, &state.params);
            }
            iteration += 1;

            // The decision must be visible before anyone checks it
            state.barrier.wait();
        }
        debug!("Worker {} exits after {iteration} iterations", self.index);
    }
}
