//! CLI subcommands.

pub mod check;
pub mod config;
pub mod process;

use std::path::Path;

use tracing::debug;

use reimb_core::ReimbConfig;

/// Load the configuration from an explicit path, else from the default
/// location if a file exists there, else use defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ReimbConfig> {
    if let Some(path) = config_path {
        return Ok(ReimbConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(ReimbConfig::from_file(&default_path)?)
    } else {
        Ok(ReimbConfig::default())
    }
}
