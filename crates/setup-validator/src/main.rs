//! CLI entry point for the setup validator.

use anyhow::Result;
use clap::Parser;
use setup_validator::{SetupValidator, ValidatorConfig};
use std::process::ExitCode;

/// Checks the current directory for everything the preprocessing workflow needs.
///
/// Exits with 0 when every check passes and 1 otherwise.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {}

/// Initialize the tracing subscriber for logging.
///
/// Logging stays at `warn` unless `RUST_LOG` says otherwise, so the report
/// is the only regular output.
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let _args = Args::parse();
    init_logging();

    let base_dir = std::env::current_dir()?;
    let report = SetupValidator::new(ValidatorConfig::for_base_dir(base_dir)).run();

    println!("{}", report);
    Ok(ExitCode::from(report.exit_code()))
}
