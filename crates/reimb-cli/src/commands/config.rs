//! Config command - inspect and edit the reimb settings file.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use reimb_core::ReimbConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective settings
    Show,

    /// Write a settings file filled with defaults
    Init(InitArgs),

    /// Print one setting
    Get {
        /// Dotted setting name, such as "report.resource_prefix"
        key: String,
    },

    /// Change one setting and save the file
    Set {
        /// Dotted setting name
        key: String,
        /// JSON value, or plain text taken as a string
        value: String,
    },

    /// Print where the settings file lives
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Where to write the settings file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Replace a settings file that is already there
    #[arg(long)]
    force: bool,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(),
        ConfigCommand::Init(init_args) => init_config(init_args),
        ConfigCommand::Get { key } => get_config(&key),
        ConfigCommand::Set { key, value } => set_config(&key, &value),
        ConfigCommand::Path => show_path(),
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reimb")
        .join("config.json")
}

fn load_or_default() -> anyhow::Result<ReimbConfig> {
    let config_path = default_config_path();
    if config_path.exists() {
        Ok(ReimbConfig::from_file(&config_path)?)
    } else {
        Ok(ReimbConfig::default())
    }
}

fn show_config() -> anyhow::Result<()> {
    if !default_config_path().exists() {
        println!(
            "{} No settings file yet, these are the built-in defaults.",
            style("ℹ").blue()
        );
    }

    let config = load_or_default()?;
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(default_config_path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "{} already holds settings, pass --force to replace them",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    ReimbConfig::default().save(&output_path)?;

    println!(
        "{} Default settings written to {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(key: &str) -> anyhow::Result<()> {
    let config = load_or_default()?;
    let json = serde_json::to_value(&config)?;

    let mut current = &json;
    for part in key.split('.') {
        current = current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Unknown setting: {}", key))?;
    }

    println!("{}", serde_json::to_string_pretty(current)?);

    Ok(())
}

fn set_config(key: &str, value: &str) -> anyhow::Result<()> {
    let config_path = default_config_path();
    let config = load_or_default()?;

    // Non-JSON input is taken as a plain string
    let parsed_value: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    let mut json = serde_json::to_value(&config)?;
    let parts: Vec<&str> = key.split('.').collect();
    let (last, parents) = parts
        .split_last()
        .ok_or_else(|| anyhow::anyhow!("Setting name is empty"))?;

    let mut current = &mut json;
    for part in parents {
        current = current
            .get_mut(*part)
            .ok_or_else(|| anyhow::anyhow!("Unknown setting section in {}", key))?;
    }

    match current.as_object_mut() {
        Some(obj) if obj.contains_key(*last) => {
            obj.insert((*last).to_string(), parsed_value.clone());
        }
        Some(_) => anyhow::bail!("Unknown setting: {}", key),
        None => anyhow::bail!("{} is not inside a settings section", key),
    }

    let config: ReimbConfig = serde_json::from_value(json)?;
    config.check()?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(&config_path)?;

    println!(
        "{} {} is now {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed_value)?
    );

    Ok(())
}

fn show_path() -> anyhow::Result<()> {
    let config_path = default_config_path();

    println!("Settings file: {}", config_path.display());

    if config_path.exists() {
        println!("State: {}", style("present").green());
    } else {
        println!("State: {}", style("missing").yellow());
        println!();
        println!("Defaults apply until 'reimb config init' writes the file.");
    }

    Ok(())
}
