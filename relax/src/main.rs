use clap::Parser;
use compute::{Relax, RelaxBase, RelaxCreate};
use compute_selector::Relaxation;
use data::buffers::BufferId;
use eyre::Result;
use log::info;
use std::time::Instant;
use ui::SharedArgs;

/// Relax a square grid until it reaches a steady state
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CLI arguments shared with other relaxation programs
    #[command(flatten)]
    shared: SharedArgs<Relaxation>,

    /// Print the initial and final grids
    #[arg(long)]
    print: bool,
}

fn main() -> Result<()> {
    // Enable logging to syslog
    ui::init_logging();

    // Parse CLI arguments and handle clap-incompatible defaults
    let args = Args::parse();
    let params = ui::parameters(&args.shared);

    // Set up the relaxation
    let start = Instant::now();
    let relaxation = Relaxation::new(params, args.shared.backend)?;
    let mut buffers = relaxation.make_buffers(args.shared.size, args.shared.pattern)?;
    if args.print {
        println!("Initial matrix...");
        print!("{}", ui::format_grid(buffers.get(BufferId::A)));
    }

    // Run it to completion
    let outcome = {
        let _progress = ui::init_progress_reporting("Relaxing grid");
        relaxation.relax(&mut buffers)?
    };
    let elapsed = start.elapsed();
    info!("Relaxation finished: {outcome:?}");

    // Report results
    if args.print {
        println!("Final matrix...");
        print!("{}", ui::format_grid(buffers.get(outcome.final_buffer)));
    }
    println!("Result took... {:.6} seconds", elapsed.as_secs_f64());
    println!("Total threads: {}", outcome.num_workers);
    println!(
        "Iterations: {} ({})",
        outcome.iterations,
        if outcome.converged {
            "converged"
        } else {
            "iteration budget exhausted"
        }
    );
    Ok(())
}
