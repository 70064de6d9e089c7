//! ## pktpool-cli
//! **Operational driver for packet pools**
//!
//! Builds a pool from configuration and exercises it: a short demo cycle, a
//! seeded stress run with backpressure, or a configuration check.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

mod commands;
mod error;

use commands::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match commands::run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "pktpool command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
