//! Benchmarking utilities
//!
//! Please consider using the macros provided by this crate instead of calling
//! these implementation details directly.

use crate::{Relax, RelaxBase, RelaxCreate};
use clap::{Args, Command, FromArgMatches};
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput};
use data::{parameters::Parameters, pattern::Pattern};
use std::{hint::black_box, num::NonZeroUsize, sync::Once};

/// Re-export criterion for the criterion_benchmark macro
pub use criterion;

/// Number of iterations performed by each benchmarked run
///
/// Runs are capped because the number of iterations needed to converge grows
/// quadratically with the grid dimension.
const ITERATIONS: usize = 64;

// Make sure env_logger is only initialized once
fn init_logger() {
    static INIT_LOGGER: Once = Once::new();
    INIT_LOGGER.call_once(env_logger::init);
}

/// Common criterion benchmark for all relaxation backends
/// Use via the criterion_benchmark macro
pub fn criterion_benchmark<Relaxation: Relax>(c: &mut Criterion, backend_name: &str) {
    init_logger();

    let args = Relaxation::CliArgs::from_arg_matches(
        &Relaxation::CliArgs::augment_args(Command::default().no_binary_name(true))
            .get_matches_from(None::<&str>),
    )
    .expect("Failed to parse arguments from defaults & environment");

    let params = Parameters {
        max_iterations: NonZeroUsize::new(ITERATIONS),
        ..Default::default()
    };
    let relaxation = Relaxation::new(black_box(params), black_box(args)).unwrap();
    let mut group = c.benchmark_group(backend_name.to_owned());
    for size_pow2 in 4..=10 {
        let interior = 2usize.pow(size_pow2);
        let dimension = interior + 2;
        let num_elems = (interior * interior * ITERATIONS) as u64;

        let buffers = relaxation
            .make_buffers(black_box(dimension), Pattern::Edges)
            .unwrap();

        group.throughput(Throughput::Elements(num_elems));
        group.bench_function(
            BenchmarkId::from_parameter(format!("{dimension}x{dimension}cells")),
            |b| {
                b.iter_batched_ref(
                    || buffers.clone(),
                    |buffers| relaxation.relax(buffers).unwrap(),
                    BatchSize::LargeInput,
                );
            },
        );
    }
    group.finish();
}
