//! Run the reference particle workload and print the wall-clock runtime.
//!
//! Usage: `cargo run --release -p platter-sim --example particles -- N`
//! where `N` is the number of steps between pool compactions.

use std::process::ExitCode;

use platter_sim::{SimConfig, Simulation};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} N", args[0]);
        return ExitCode::FAILURE;
    }
    let erase_interval: u32 = match args[1].parse() {
        Ok(n) => n,
        Err(err) => {
            eprintln!("invalid N '{}': {err}", args[1]);
            return ExitCode::FAILURE;
        }
    };

    let config = SimConfig {
        erase_interval,
        ..SimConfig::default()
    };
    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    match sim.run() {
        Ok(run) => {
            println!("Simulation Runtime: {} ms", run.runtime_ms());
            println!(
                "steps={} erased={} wrapped={} compactions={} peak_chunks={} live={}",
                run.steps, run.erased, run.wrapped, run.compactions, run.peak_chunks, run.final_live
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
