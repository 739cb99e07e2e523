//! Worker count policy of the multicore computation

use std::{num::NonZeroUsize, thread};

/// Number of interior rows that the automatic policy gives to each worker
pub const ROWS_PER_WORKER: usize = 100;

/// Number of workers to use when the user did not specify one
///
/// Spawns one worker per [`ROWS_PER_WORKER`] interior rows (rounding up), but
/// no more than there are CPU cores left over by the thread that drives the
/// run, and no more than there are interior rows.
pub fn automatic_num_workers(interior_rows: usize) -> usize {
    let available_cores = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    num_workers_for(interior_rows, available_cores)
}

/// Like [`automatic_num_workers()`], with a known number of CPU cores
pub(crate) fn num_workers_for(interior_rows: usize, available_cores: usize) -> usize {
    let wanted = interior_rows.div_ceil(ROWS_PER_WORKER);
    let spare_cores = available_cores.saturating_sub(1).max(1);
    wanted.min(spare_cores).min(interior_rows).max(1)
}
