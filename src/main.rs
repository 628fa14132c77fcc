//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_mail_status` library that handles:
//! - Command-line argument parsing
//! - Logger initialization (stderr or `--log` file, silent unless `--verbose`)
//! - Exit status
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use domain_mail_status::initialization::{init_logger_to_file, init_logger_with};
use domain_mail_status::{run_check, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let level = config.effective_log_level();
    let format = config.log_format.clone();
    let logger = match &config.log {
        Some(path) => init_logger_to_file(level, format, path),
        None => init_logger_with(level, format),
    };
    if let Err(e) = logger.context("Failed to initialize logger") {
        eprintln!("domain_mail_status error: {:#}", e);
        process::exit(1);
    }

    match run_check(config).await {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("domain_mail_status error: {:#}", e);
            process::exit(1);
        }
    }
}
