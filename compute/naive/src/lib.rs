//! Naive implementation of Jacobi relaxation
//!
//! This version performs the whole relaxation on the calling thread. It is
//! slow on large grids, but its simplicity makes it the reference that other
//! backends are checked against.

use compute::{
    config::{check_buffers, check_parameters},
    cpu::relax_grid,
    ConfigError, NoArgs, Outcome, Relax, RelaxBase, RelaxCreate,
};
use data::{
    buffers::{BufferId, BufferPair},
    parameters::Parameters,
};
use log::{debug, info};

/// Jacobi relaxation
#[derive(Debug)]
pub struct Relaxation {
    /// Computation parameters
    params: Parameters,
}
//
impl RelaxBase for Relaxation {
    type CliArgs = NoArgs;

    type Error = ConfigError;
}
//
impl RelaxCreate for Relaxation {
    fn new(params: Parameters, _args: NoArgs) -> Result<Self, ConfigError> {
        check_parameters(&params)?;
        Ok(Self { params })
    }
}
//
impl Relax for Relaxation {
    fn relax(&self, buffers: &mut BufferPair) -> Result<Outcome, ConfigError> {
        let dimension = check_buffers(buffers)?;
        debug!("Relaxing a {dimension}x{dimension} grid sequentially");

        let mut iteration = 0;
        loop {
            let destination = BufferId::written_at(iteration);
            let (source, output) = buffers.source_and_destination(destination);
            let largest_difference = relax_grid(source, output);
            iteration += 1;

            let converged = self.params.is_converged(largest_difference);
            if converged || self.params.is_exhausted(iteration) {
                info!(
                    "Relaxation stopped after {iteration} iterations (converged: {converged})"
                );
                return Ok(Outcome {
                    final_buffer: destination,
                    iterations: iteration,
                    converged,
                    num_workers: 1,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::{buffers::Grid, pattern::Pattern, Precision};
    use ndarray::s;
    use std::num::NonZeroUsize;

    fn relaxation(params: Parameters) -> Relaxation {
        Relaxation::new(params, NoArgs {}).unwrap()
    }

    #[test]
    fn small_edges_grid_converges_to_harmonic_solution() {
        let relaxation = relaxation(Parameters::default());
        let mut buffers = relaxation.make_buffers(5, Pattern::Edges).unwrap();
        let outcome = relaxation.relax(&mut buffers).unwrap();
        assert!(outcome.converged);
        assert_eq!(outcome.num_workers, 1);
        assert_eq!(outcome.final_buffer, BufferId::written_at(outcome.iterations - 1));

        // By symmetry, the four single-edge solutions sum up to 1 and are
        // equal at the center, so two hot edges give 1/2 there.
        let result = buffers.get(outcome.final_buffer);
        assert!((result[[2, 2]] - 0.5).abs() < 1e-3);

        // Hot edges are symmetric with respect to the main diagonal
        for row in 1..4 {
            for col in 1..4 {
                assert!((result[[row, col]] - result[[col, row]]).abs() < 1e-12);
            }
        }

        // Interior cells are (nearly) the mean of their neighbors
        for row in 1..4 {
            for col in 1..4 {
                let mean = (result[[row + 1, col]]
                    + result[[row - 1, col]]
                    + result[[row, col + 1]]
                    + result[[row, col - 1]])
                    / 4.0;
                assert!((result[[row, col]] - mean).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn iteration_count_is_reproducible() {
        let relaxation = relaxation(Parameters::default());
        let run = || {
            let mut buffers = relaxation.make_buffers(5, Pattern::Edges).unwrap();
            let outcome = relaxation.relax(&mut buffers).unwrap();
            (outcome, buffers.into_grid(outcome.final_buffer))
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn boundary_is_preserved() {
        let relaxation = relaxation(Parameters::default());
        let initial = Pattern::Checkerboard.make_grid(9);
        let mut buffers = BufferPair::new(initial.clone());
        relaxation.relax(&mut buffers).unwrap();
        for id in [BufferId::A, BufferId::B] {
            let grid = buffers.get(id);
            for edge in [s![0, ..], s![8, ..], s![.., 0], s![.., 8]] {
                assert_eq!(grid.slice(edge), initial.slice(edge));
            }
        }
    }

    #[test]
    fn converged_grid_stays_converged() {
        let params = Parameters::default();
        let relaxation = relaxation(params);
        let mut buffers = relaxation.make_buffers(12, Pattern::Checkerboard).unwrap();
        let outcome = relaxation.relax(&mut buffers).unwrap();
        assert!(outcome.converged);

        let result = buffers.get(outcome.final_buffer);
        let mut next = Grid::zeros(result.raw_dim());
        let largest: Precision = relax_grid(result, &mut next);
        assert!(params.is_converged(largest));
    }

    #[test]
    fn iteration_budget_is_honored() {
        let relaxation = relaxation(Parameters {
            max_iterations: NonZeroUsize::new(3),
            ..Default::default()
        });
        let mut buffers = relaxation.make_buffers(50, Pattern::Edges).unwrap();
        let outcome = relaxation.relax(&mut buffers).unwrap();
        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, 3);
        assert_eq!(outcome.final_buffer, BufferId::A);
    }

    #[test]
    fn invalid_configurations_are_rejected() {
        let relaxation = relaxation(Parameters::default());
        assert_eq!(
            relaxation.make_buffers(2, Pattern::Edges),
            Err(ConfigError::GridTooSmall { dimension: 2 })
        );
        let mut tiny = BufferPair::new(Grid::zeros((2, 2)));
        assert_eq!(
            relaxation.relax(&mut tiny),
            Err(ConfigError::GridTooSmall { dimension: 2 })
        );
        assert!(Relaxation::new(
            Parameters {
                minimal_difference: 0.0,
                ..Default::default()
            },
            NoArgs {}
        )
        .is_err());
    }
}
