// src/bin/verify.rs
use std::io;

use anyhow::Result;
use clap::Parser;

use gatekeeper_core::config::Config;
use gatekeeper_core::exit::GateExit;
use gatekeeper_core::logging;
use gatekeeper_core::verification::{Orchestrator, RunOptions};

#[derive(Parser)]
#[command(name = "verify", version, about = "Run every pre-merge check and report one verdict")]
struct Cli {
    /// Record the production build as skipped instead of running it
    #[arg(long)]
    skip_build: bool,
}

fn main() -> GateExit {
    logging::init();
    match Cli::try_parse() {
        Ok(cli) => GateExit::from(run(&cli)),
        Err(e) => {
            // --help and --version are not errors.
            let _ = e.print();
            GateExit::from_passed(!e.use_stderr())
        }
    }
}

fn run(cli: &Cli) -> Result<GateExit> {
    let options = RunOptions {
        skip_build: cli.skip_build,
    };
    let orchestrator = Orchestrator::system(Config::new())?;
    let stdout = io::stdout();
    let report = orchestrator.run(&options, &mut stdout.lock())?;
    Ok(GateExit::from_passed(report.passed()))
}
