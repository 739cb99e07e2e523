//! Common facilities shared by all relaxation backends

#[cfg(feature = "criterion")]
pub mod benchmark;
pub mod config;
pub mod cpu;

pub use config::ConfigError;

use clap::Args;
use data::{
    buffers::{BufferId, BufferPair},
    parameters::Parameters,
    pattern::Pattern,
};

/// Commonalities between all ways to set up a relaxation backend
pub trait RelaxBase: Sized {
    /// Supplementary CLI arguments allowing fine-tuning of this backend
    ///
    /// To honor the principle of least surprise and make criterion
    /// microbenchmarks work smoothly, any argument you add must have a default
    /// value and should also be configurable through environment variables.
    type CliArgs: Args;

    /// Things that can go wrong while setting up or running the relaxation
    type Error: std::error::Error + From<ConfigError> + Send + Sync + 'static;

    /// Set up a pair of `dimension x dimension` buffers following `pattern`
    ///
    /// Grids that are too small to have an interior are rejected here, before
    /// any computation gets started.
    fn make_buffers(&self, dimension: usize, pattern: Pattern) -> Result<BufferPair, Self::Error> {
        config::check_dimension(dimension)?;
        Ok(BufferPair::new(pattern.make_grid(dimension)))
    }
}

/// Relaxation backend creation
pub trait RelaxCreate: RelaxBase {
    /// Set up the backend, validating `params` in the process
    fn new(params: Parameters, args: Self::CliArgs) -> Result<Self, Self::Error>;
}

/// Run a relaxation to completion
pub trait Relax: RelaxBase + RelaxCreate {
    /// Relax `buffers` until they converge or the iteration budget runs out
    ///
    /// Both buffers must initially hold the same values. Upon return, the
    /// buffer designated by [`Outcome::final_buffer`] holds the result.
    fn relax(&self, buffers: &mut BufferPair) -> Result<Outcome, Self::Error>;
}

/// What a finished relaxation run reports back
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Outcome {
    /// Buffer that was written by the last iteration
    pub final_buffer: BufferId,

    /// Number of iterations that were performed
    pub iterations: usize,

    /// Truth that the run stopped because the grid converged, as opposed to
    /// because the iteration budget ran out
    pub converged: bool,

    /// Number of worker threads that took part in the run
    pub num_workers: usize,
}

/// Placeholder for backends that have no CLI arguments
#[derive(Args, Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct NoArgs {}

/// Macro that generates a complete criterion benchmark harness for you
#[macro_export]
#[cfg(feature = "criterion")]
macro_rules! criterion_benchmark {
    ($backend:ident) => {
        fn criterion_benchmark(c: &mut $crate::benchmark::criterion::Criterion) {
            $crate::benchmark::criterion_benchmark::<$backend::Relaxation>(
                c,
                stringify!($backend),
            )
        }
        $crate::benchmark::criterion::criterion_group!(benches, criterion_benchmark);
        $crate::benchmark::criterion::criterion_main!(benches);
    };
}
