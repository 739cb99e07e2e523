//! This crate collects elements that are shared between the command-line
//! programs of this project.

#[cfg(feature = "relaxation")]
use clap::Args;
#[cfg(feature = "relaxation")]
use compute::RelaxBase;
use data::buffers::Grid;
#[cfg(feature = "relaxation")]
use data::{parameters::Parameters, pattern::Pattern, Precision};
#[cfg(feature = "tui")]
use indicatif::{ProgressBar, ProgressFinish, ProgressStyle};
#[cfg(feature = "tui")]
use log::LevelFilter;
#[cfg(feature = "relaxation")]
use std::num::NonZeroUsize;
#[cfg(feature = "tui")]
use std::time::Duration;
#[cfg(feature = "tui")]
use syslog::Facility;

/// CLI arguments shared by the relaxation programs
#[cfg(feature = "relaxation")]
#[derive(Args)]
pub struct SharedArgs<Relaxation: RelaxBase> {
    /// Number of rows and columns of the grid, boundary included
    #[arg(short, long, default_value_t = 100)]
    pub size: usize,

    /// Stop once no cell changes by more than this in one iteration
    #[arg(short = 'd', long)]
    pub min_diff: Option<Precision>,

    /// Initial grid contents (edges or checkerboard)
    #[arg(short, long, default_value_t = Pattern::Edges)]
    pub pattern: Pattern,

    /// Give up after this many iterations, even if not converged
    #[arg(long)]
    pub max_iterations: Option<NonZeroUsize>,

    /// Backend-specific CLI arguments
    #[command(flatten)]
    pub backend: Relaxation::CliArgs,
}

/// Computation parameters, with defaults for what was not specified
#[cfg(feature = "relaxation")]
pub fn parameters(args: &SharedArgs<impl RelaxBase>) -> Parameters {
    let default_params = Parameters::default();
    Parameters {
        minimal_difference: args.min_diff.unwrap_or(default_params.minimal_difference),
        max_iterations: args.max_iterations,
    }
}

/// Enable logging to syslog, or to stderr if syslog is not reachable
#[cfg(feature = "tui")]
pub fn init_logging() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(error) = syslog::init(Facility::default(), level, None) {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .init();
        log::warn!("Failed to initialize syslog, logging to stderr instead: {error}");
    }
}

/// Spinner that keeps the user company while a computation is running
///
/// The spinner disappears once dropped.
#[cfg(feature = "tui")]
pub fn init_progress_reporting(message: &'static str) -> ProgressBar {
    let progress = ProgressBar::new_spinner()
        .with_message(message)
        .with_style(
            ProgressStyle::with_template("{spinner} {msg} {elapsed}")
                .expect("Failed to parse style"),
        )
        .with_finish(ProgressFinish::AndClear);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

/// Render a grid as text, one line per row
pub fn format_grid(grid: &Grid) -> String {
    let mut output = format!("{} x {} Matrix\n", grid.nrows(), grid.ncols());
    for row in grid.rows() {
        for value in row {
            output += &format!("{value:.6} ");
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn grid_text() {
        let grid = array![[1.0, 0.5], [0.0, 0.125]];
        assert_eq!(
            format_grid(&grid),
            "2 x 2 Matrix\n1.000000 0.500000 \n0.000000 0.125000 \n"
        );
    }

    #[cfg(feature = "relaxation")]
    mod args {
        use super::*;
        use clap::Parser;

        #[derive(Parser)]
        struct Cli {
            #[command(flatten)]
            shared: SharedArgs<compute_naive::Relaxation>,
        }

        #[test]
        fn defaults() {
            let cli = Cli::try_parse_from(["relax"]).unwrap();
            assert_eq!(cli.shared.size, 100);
            assert_eq!(cli.shared.pattern, Pattern::Edges);
            assert_eq!(parameters(&cli.shared), Parameters::default());
        }

        #[test]
        fn overrides() {
            let cli = Cli::try_parse_from([
                "relax",
                "-s",
                "5",
                "-p",
                "checkerboard",
                "-d",
                "0.5",
                "--max-iterations",
                "3",
            ])
            .unwrap();
            assert_eq!(cli.shared.size, 5);
            assert_eq!(cli.shared.pattern, Pattern::Checkerboard);
            assert_eq!(
                parameters(&cli.shared),
                Parameters {
                    minimal_difference: 0.5,
                    max_iterations: NonZeroUsize::new(3),
                }
            );
        }

        #[test]
        fn unknown_pattern() {
            assert!(Cli::try_parse_from(["relax", "--pattern", "stripes"]).is_err());
        }
    }
}
