//! Unified error handling for relation exports.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Export-level error type.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Reading an input file failed.
    #[error("IO error: {0}")]
    Io(String),

    /// An input file is not valid JSON for its expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias for `ExportError`.
pub type Result<T> = std::result::Result<T, ExportError>;
