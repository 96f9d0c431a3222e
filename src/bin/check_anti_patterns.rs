// src/bin/check_anti_patterns.rs
//! Standalone anti-pattern guard.
//!
//! Usage: `check-anti-patterns <file1> <file2> ...`

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use gatekeeper_core::exit::GateExit;
use gatekeeper_core::logging;
use gatekeeper_core::scanner::Scanner;

#[derive(Parser)]
#[command(
    name = "check-anti-patterns",
    version,
    about = "Block files containing forbidden patterns"
)]
struct Cli {
    /// Files to scan; test files and scripts/ are skipped
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,
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
    let cwd = std::env::current_dir()?;
    let result = Scanner::builtin()?.with_root(cwd).scan(&cli.files)?;
    Ok(GateExit::from_passed(result.passed()))
}
