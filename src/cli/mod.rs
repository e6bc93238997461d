//! Command line interface for signapk.
//!
//! Parses arguments, loads the toolchain configuration, runs the
//! [`Pipeline`] and reports the signed artifact.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::error::Result;
use crate::signer::{Pipeline, PipelineReport, discover, load_config};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    execute(Args::parse_args()).await
}

/// Runs the pipeline for already-parsed arguments.
///
/// Status lines are decorative: failures writing them are ignored so a
/// closed stdout never turns a successful signing into an error.
pub async fn execute(args: Args) -> Result<i32> {
    let output = OutputManager::new(true, args.json);

    let working_dir = std::env::current_dir()?;
    let config_path = discover(args.config.as_deref(), &working_dir)?;
    let _ = output.progress(&format!("Loading toolchain from {}", config_path.display()));
    let config = load_config(&config_path)?;

    let _ = output.progress(&format!("Packaging {}", args.source_dir.display()));
    let mut pipeline = Pipeline::new(config);
    let report = pipeline.run(&args.source_dir).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&output, &report);
    }

    Ok(0)
}

fn print_report(output: &OutputManager, report: &PipelineReport) {
    let _ = output.success("APK signed");
    let _ = output.indent(&report.signed_artifact.display().to_string());
    let _ = output.verbose(&format!("unsigned: {}", report.intermediate_artifact.display()));
    let _ = output.verbose(&format!("size: {} bytes", report.size));
    let _ = output.verbose(&format!("sha256: {}", report.checksum));
}
