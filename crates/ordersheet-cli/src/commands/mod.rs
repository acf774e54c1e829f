//! CLI commands.

pub mod batch;
pub mod config;
pub mod parse;
pub mod report;

use std::path::{Path, PathBuf};

use ordersheet_core::SheetConfig;
use tracing::debug;

/// Per-user configuration file, used when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ordersheet")
        .join("config.json")
}

/// Load the configuration named by `--config`.
///
/// Without `--config`, the per-user file is used if it exists, else the
/// defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<SheetConfig> {
    if let Some(path) = config_path {
        return Ok(SheetConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using config file {}", path.display());
        Ok(SheetConfig::from_file(&path)?)
    } else {
        Ok(SheetConfig::default())
    }
}

/// Fail early with a readable message when an input file is missing.
pub fn require_input(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    Ok(())
}
