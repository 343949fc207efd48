//! Check command - parse invoice filenames without touching the reports.

use std::path::PathBuf;

use clap::Args;
use console::style;

use reimb_core::{DirectoryListing, FilenameParser, Validator};

use super::load_config;

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Invoice filenames to parse
    #[arg(required = true)]
    filenames: Vec<String>,

    /// Also look for screenshots in this directory
    #[arg(short, long)]
    directory: Option<PathBuf>,
}

pub fn run(args: CheckArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let parser = FilenameParser::new().with_extension(config.scan.invoice_extension.as_str());
    let validator =
        Validator::new().with_extensions(config.validation.screenshot_extensions.clone());
    let listing = match &args.directory {
        Some(dir) => Some(DirectoryListing::read(dir)?),
        None => None,
    };

    let mut failures = 0;
    for filename in &args.filenames {
        match parser.parse(filename) {
            Ok(record) => {
                let record = match &listing {
                    Some(listing) => validator.validate(record, listing),
                    None => record,
                };
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {}", style("✗").red(), filename, e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} filename(s) did not parse", failures, args.filenames.len());
    }

    Ok(())
}
