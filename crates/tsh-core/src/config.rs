//! Per-installation configuration.
//!
//! An optional `tsh.yaml` file sits next to the installed executable. It is
//! read once at startup and never written by the shell. Every key is
//! optional; a missing file yields [`InstallConfig::default()`].
//!
//! ```yaml
//! editorCommand: "code --wait $FILE"
//! generatorCommand: "/opt/generator/bin/generate --quiet"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;

/// File name of the install config, colocated with the executable.
pub const INSTALL_CONFIG_FILE: &str = "tsh.yaml";

/// Settings read from the installation's `tsh.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstallConfig {
    /// Overrides the OS default editor command. `$FILE` is replaced by the
    /// file to edit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_command: Option<String>,

    /// External program that performs template generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_command: Option<String>,
}

impl InstallConfig {
    /// Path of the config file for an executable at `install_location`.
    pub fn path_for(install_location: &Path) -> PathBuf {
        install_location
            .parent()
            .unwrap_or(install_location)
            .join(INSTALL_CONFIG_FILE)
    }
}

/// Full path of the running executable.
///
/// # Errors
///
/// Returns `CoreError::InstallLocation` if the OS cannot report it.
pub fn install_location() -> Result<PathBuf, CoreError> {
    std::env::current_exe().map_err(|e| CoreError::InstallLocation(e.to_string()))
}

/// Load [`InstallConfig`] from `config_path`.
///
/// A missing or blank file returns the default configuration.
///
/// # Errors
///
/// Returns `CoreError::Io` if the file exists but cannot be read.
/// Returns `CoreError::Config` if the file contains invalid YAML.
pub fn load_install_config(config_path: &Path) -> Result<InstallConfig, CoreError> {
    if !config_path.is_file() {
        return Ok(InstallConfig::default());
    }

    let content = std::fs::read_to_string(config_path)?;
    if content.trim().is_empty() {
        return Ok(InstallConfig::default());
    }

    let config: InstallConfig = serde_yaml::from_str(&content)?;
    debug!(path = %config_path.display(), ?config, "install config loaded");
    Ok(config)
}
