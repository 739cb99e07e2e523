//! CLI arguments

use clap::Args;
use std::num::NonZeroUsize;

/// CLI parameters for the multithreaded implementation
#[derive(Args, Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ParallelArgs {
    /// Number of worker threads
    ///
    /// Each worker owns a band of consecutive interior rows of the grid, so
    /// this cannot exceed the number of interior rows (grid size - 2).
    ///
    /// By default, one worker is spawned per 100 interior rows, within the
    /// limit of the CPU cores that are left over by the main thread.
    #[arg(short = 'j', long, env)]
    pub num_threads: Option<NonZeroUsize>,
}
