//! Process command - reconcile a directory and write the report pair.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use reimb_core::{
    process_directory, CsvSummaryGenerator, FilenameParser, LatexLayoutGenerator, ProcessOutcome,
    ReportGenerator, ReportStatus, Validator,
};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Directory holding the invoices and their screenshots
    #[arg(short, long, required = true)]
    directory: PathBuf,

    /// Output directory for the reports
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// LaTeX template containing the %%PAGES%% marker
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Output format for the run summary
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human readable summary
    Table,
    /// JSON with every record and skipped file
    Json,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.directory.is_dir() {
        anyhow::bail!("Input directory not found: {}", args.directory.display());
    }

    info!("Input directory: {}", args.directory.display());
    info!("Output directory: {}", args.output.display());

    let parser = FilenameParser::new().with_extension(config.scan.invoice_extension.as_str());
    let validator =
        Validator::new().with_extensions(config.validation.screenshot_extensions.clone());

    let mut layout = LatexLayoutGenerator::new(config.layout_path(&args.output))
        .with_resource_prefix(config.report.resource_prefix.as_str());
    if let Some(template) = &args.template {
        layout = layout.with_template_file(template)?;
    }
    let summary = CsvSummaryGenerator::new(config.summary_path(&args.output));

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Scanning {}", args.directory.display()));

    let outcome = process_directory(&args.directory, &parser, &validator);
    pb.finish_and_clear();
    let outcome = outcome?;

    fs::create_dir_all(&args.output)?;
    let summary_status = summary.generate(&outcome.records)?;
    let layout_status = layout.generate(&outcome.records)?;

    match args.format {
        OutputFormat::Table => {
            print_outcome(&outcome);
            print_status("Summary", &summary_status);
            print_status("Layout", &layout_status);
            println!();
            println!(
                "{} Processed {} invoice(s) in {:?}",
                style("✓").green(),
                outcome.records.len(),
                start.elapsed()
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome_json(&outcome))?);
        }
    }

    Ok(())
}

fn print_outcome(outcome: &ProcessOutcome) {
    for record in outcome.valid() {
        println!(
            "{} {} ({} screenshot(s))",
            style("✓").green(),
            record.original_filename,
            record.screenshot_count()
        );
    }

    for record in outcome.invalid() {
        println!(
            "{} {}: {}",
            style("✗").red(),
            record.original_filename,
            record.validation_errors().join(", ")
        );
    }

    for skipped in &outcome.skipped {
        println!(
            "{} {}: {}, skipped",
            style("!").yellow(),
            skipped.filename,
            skipped.reason
        );
    }

    println!();
    println!(
        "   {} valid, {} invalid, {} skipped, total {}",
        style(outcome.valid().count()).green(),
        style(outcome.invalid().count()).red(),
        style(outcome.skipped.len()).yellow(),
        outcome.total_valid_amount()
    );
}

fn print_status(label: &str, status: &ReportStatus) {
    match status {
        ReportStatus::Written(path) => {
            println!("{} {} written to {}", style("✓").green(), label, path.display())
        }
        ReportStatus::Skipped => println!(
            "{} {} not written: no valid invoices",
            style("ℹ").blue(),
            label
        ),
    }
}

fn outcome_json(outcome: &ProcessOutcome) -> serde_json::Value {
    let skipped: Vec<serde_json::Value> = outcome
        .skipped
        .iter()
        .map(|s| {
            serde_json::json!({
                "filename": s.filename,
                "reason": s.reason.to_string(),
            })
        })
        .collect();

    serde_json::json!({
        "records": outcome.records,
        "skipped": skipped,
        "total_valid_amount": outcome.total_valid_amount(),
    })
}
