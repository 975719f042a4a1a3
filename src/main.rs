//! Main application entry point (CLI binary).
//!
//! Parses options, initializes logging, runs the check suite and exits
//! non-zero when any check failed. All checking lives in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use bouncer_e2e::initialization::init_logger_with;
use bouncer_e2e::{print_report, run_suite, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_suite(&config).await {
        Ok(report) => {
            print_report(&report);
            if !report.is_success() {
                process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("bouncer_e2e error: {:#}", e);
            process::exit(1);
        }
    }
}
