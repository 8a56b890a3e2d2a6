use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("duplicate command name: {0}")]
    DuplicateCommand(String),

    #[error("cannot determine installation location: {0}")]
    InstallLocation(String),

    #[error("invalid install config: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures reported by a [`GeneratorEngine`](crate::GeneratorEngine).
///
/// Everything except [`EngineError::Generation`] is a tool-level failure
/// (missing or malformed project data, I/O).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    Tool(String),

    #[error("generation failed: {0}")]
    Generation(String),

    #[error(transparent)]
    Bundle(#[from] tsh_bundle::BundleError),

    #[error("malformed generator output: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Whether the failure happened while rendering targets.
    pub fn is_generation(&self) -> bool {
        matches!(self, Self::Generation(_))
    }
}
