//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod output;
pub mod process;

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use nfse_core::models::config::NfseConfig;

/// Per-user configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nfse")
        .join("config.json")
}

/// The `--config` path if given, otherwise the per-user location.
pub fn config_file(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path)
}

/// Load configuration for a processing command.
///
/// An explicit path must exist; the per-user file is optional.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<NfseConfig> {
    let path = config_file(explicit);
    if explicit.is_none() && !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(NfseConfig::default());
    }

    NfseConfig::from_file(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}
