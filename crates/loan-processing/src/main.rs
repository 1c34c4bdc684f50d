//! CLI entry point for the loan approval preprocessing pipeline.

use anyhow::{Result, anyhow};
use clap::Parser;
use loan_processing::{
    DatasetOverview, PipelineResult, Preprocessor, PreprocessorConfig, PreprocessingSummary,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Loan Approval Dataset Preprocessing",
    long_about = "Turns the raw loan approval CSV into a model-ready table.\n\n\
                  Stages: load, explore, drop identifier, standardize numeric features,\n\
                  remove IQR outliers, label-encode categorical features, save.\n\n\
                  EXAMPLES:\n  \
                  # Default paths\n  \
                  loan-processing\n\n  \
                  # Explicit input and output\n  \
                  loan-processing -i data/loanapproval_raw.csv -o out/preprocessed.csv\n\n  \
                  # Machine-readable summary\n  \
                  loan-processing --json | jq .summary.rows_after"
)]
struct Args {
    /// Path to the raw CSV file
    #[arg(short, long, default_value = "../loanapproval_raw.csv")]
    input: PathBuf,

    /// Path of the preprocessed CSV to write
    #[arg(short, long, default_value = "loanapproval_preprocessing.csv")]
    output: PathBuf,

    /// Identifier column to drop before processing
    #[arg(long, default_value = loan_processing::config::DEFAULT_IDENTIFIER_COLUMN)]
    identifier: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings, errors and the final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all logs; only outputs the final JSON summary.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// JSON document printed with `--json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    input_file: String,
    overview: &'a DatasetOverview,
    summary: &'a PreprocessingSummary,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = PreprocessorConfig::builder()
        .identifier_column(&args.identifier)
        .build()?;

    let mut builder = Preprocessor::builder().config(config);
    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }
    let mut preprocessor = builder.build()?;

    let result = preprocessor
        .preprocess(&args.input, Some(args.output.as_path()))
        .map_err(|e| anyhow!("Preprocessing failed: {}", e))?;

    if args.json {
        let report = JsonReport {
            input_file: args.input.display().to_string(),
            overview: &result.overview,
            summary: &result.summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_human_readable_summary(&result, &args);
    Ok(())
}

/// Print a human-readable summary of the preprocessing results.
///
/// Uses `println!` rather than logging so the summary stays visible with
/// `--quiet`.
fn print_human_readable_summary(result: &PipelineResult, args: &Args) {
    let summary = &result.summary;

    println!();
    println!("{}", "=".repeat(80));
    println!("PREPROCESSING COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input:  {} ({} rows x {} columns)",
        args.input.display(),
        summary.rows_before,
        summary.columns_before
    );
    println!(
        "Output: {} ({} rows x {} columns)",
        args.output.display(),
        summary.rows_after,
        summary.columns_after
    );
    println!();

    println!("Processing Summary:");
    println!("  Duration: {}ms", summary.duration_ms);
    match &summary.dropped_identifier {
        Some(column) => println!("  Identifier dropped: {}", column),
        None => println!("  Identifier dropped: none"),
    }
    println!("  Numeric features: {:?}", summary.feature_types.numeric);
    println!("  Categorical features: {:?}", summary.feature_types.categorical);
    println!(
        "  Outlier rows removed: {}",
        summary.outlier_rows_removed()
    );
    for pass in &summary.outlier_passes {
        println!(
            "    {:<24} {} -> {} rows",
            pass.column, pass.rows_before, pass.rows_after
        );
    }
    println!();

    if !summary.encodings.is_empty() {
        println!("Encodings:");
        for (column, classes) in &summary.encodings {
            let mapping: Vec<String> = classes
                .iter()
                .enumerate()
                .map(|(code, class)| format!("{}={}", class, code))
                .collect();
            println!("  {}: {}", column, mapping.join(", "));
        }
        println!();
    }

    println!("{}", "=".repeat(80));
}
