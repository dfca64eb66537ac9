//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;
pub mod stats;

use std::path::{Path, PathBuf};

use upa_core::UpaConfig;

/// Load the config file given with `--config`, else the user config file if
/// one exists, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<UpaConfig> {
    if let Some(path) = config_path {
        return Ok(UpaConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(UpaConfig::from_file(&default_path)?)
    } else {
        Ok(UpaConfig::default())
    }
}

/// Resolve a CLI path override against the configured default.
pub fn path_or(arg: Option<PathBuf>, configured: &Path) -> PathBuf {
    arg.unwrap_or_else(|| configured.to_path_buf())
}
