use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("bundle catalog not found: {}", .0.display())]
    CatalogNotFound(PathBuf),

    #[error("invalid catalog line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
