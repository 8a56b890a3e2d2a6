//! Session environment shared by every command.
//!
//! The [`Environment`] is the only holder of mutable shell state: working
//! and home directories plus the selected model, bundle and template store.
//! Installation facts (executable location, OS, editor command) are
//! resolved once in [`Environment::new`] and never change afterwards.
//!
//! Setters do not validate their input. A command that later uses a value
//! is responsible for checking it refers to something that exists.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{self, InstallConfig};
use crate::error::CoreError;

/// Template store selected when the session starts.
pub const DEFAULT_GITHUB_STORE: &str = "telosys-templates-v3";

/// Mutable session state plus immutable installation facts.
#[derive(Debug, Clone)]
pub struct Environment {
    install_location: PathBuf,
    os_name: String,
    editor_command: String,
    original_directory: PathBuf,

    home_directory: Option<PathBuf>,
    current_directory: PathBuf,
    current_github_store: String,
    current_model: Option<String>,
    current_bundle: Option<String>,
}

impl Environment {
    /// Create the environment for a session started in `original_directory`.
    ///
    /// The editor command is taken from `config` when it declares one,
    /// otherwise from the OS default.
    pub fn new(
        original_directory: PathBuf,
        install_location: PathBuf,
        os_name: impl Into<String>,
        config: &InstallConfig,
    ) -> Self {
        let os_name = os_name.into();
        let editor_command = config
            .editor_command
            .clone()
            .unwrap_or_else(|| default_editor_command(&os_name).to_owned());

        Self {
            install_location,
            os_name,
            editor_command,
            current_directory: original_directory.clone(),
            original_directory,
            home_directory: None,
            current_github_store: DEFAULT_GITHUB_STORE.to_owned(),
            current_model: None,
            current_bundle: None,
        }
    }

    /// Create the environment for this process: started in the current
    /// working directory, installed where the running executable lives.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InstallLocation` if the executable location
    /// cannot be determined, or `CoreError::Io` if the working directory
    /// cannot be read.
    pub fn detect(config: &InstallConfig) -> Result<Self, CoreError> {
        let original_directory = std::env::current_dir()?;
        let install_location = config::install_location()?;
        debug!(
            directory = %original_directory.display(),
            install = %install_location.display(),
            os = std::env::consts::OS,
            "environment detected"
        );
        Ok(Self::new(
            original_directory,
            install_location,
            std::env::consts::OS,
            config,
        ))
    }

    pub fn install_location(&self) -> &Path {
        &self.install_location
    }

    pub fn os_name(&self) -> &str {
        &self.os_name
    }

    pub fn editor_command(&self) -> &str {
        &self.editor_command
    }

    /// Directory the process was started in.
    pub fn original_directory(&self) -> &Path {
        &self.original_directory
    }

    // ── Home directory ──────────────────────────────────────

    /// Returns the home directory, or `None` if it was never set.
    pub fn home_directory(&self) -> Option<&Path> {
        self.home_directory.as_deref()
    }

    pub fn set_home_directory(&mut self, directory: PathBuf) {
        self.home_directory = Some(directory);
    }

    /// Use the current directory as home directory.
    pub fn set_home_directory_to_current(&mut self) {
        self.home_directory = Some(self.current_directory.clone());
    }

    // ── Current directory ───────────────────────────────────

    pub fn current_directory(&self) -> &Path {
        &self.current_directory
    }

    pub fn set_current_directory(&mut self, directory: PathBuf) {
        self.current_directory = directory;
    }

    /// Move back to the home directory. No-op while home is undefined.
    pub fn reset_current_directory_to_home_if_defined(&mut self) {
        if let Some(home) = &self.home_directory {
            self.current_directory = home.clone();
        }
    }

    /// Directory holding the project's bundles and models: home when
    /// defined, otherwise the current directory.
    pub fn project_directory(&self) -> &Path {
        self.home_directory
            .as_deref()
            .unwrap_or(&self.current_directory)
    }

    // ── Selections ──────────────────────────────────────────

    pub fn current_github_store(&self) -> &str {
        &self.current_github_store
    }

    pub fn set_current_github_store(&mut self, store: impl Into<String>) {
        self.current_github_store = store.into();
    }

    pub fn current_model(&self) -> Option<&str> {
        self.current_model.as_deref()
    }

    pub fn set_current_model(&mut self, model: impl Into<String>) {
        self.current_model = Some(model.into());
    }

    pub fn current_bundle(&self) -> Option<&str> {
        self.current_bundle.as_deref()
    }

    pub fn set_current_bundle(&mut self, bundle: impl Into<String>) {
        self.current_bundle = Some(bundle.into());
    }
}

/// Editor used when the install config does not declare one.
fn default_editor_command(os_name: &str) -> &'static str {
    let os = os_name.to_lowercase();
    if os.contains("windows") {
        "notepad.exe $FILE"
    } else if os.contains("mac") {
        "open -t $FILE"
    } else {
        "vi $FILE"
    }
}
