//! Binary crate for the `airly` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive onboarding and installation selection
//! - Human-friendly output formatting

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod output;
mod prompt;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("AIRLY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cmd = cli::Cli::parse_from(cli::normalize_args(std::env::args()));
    let result = cmd.run().await;

    if let Err(err) = &result {
        output::print_failure(err);
    }

    ExitCode::from(cli::exit_status(&result))
}
