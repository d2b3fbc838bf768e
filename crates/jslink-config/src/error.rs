//! Error types for configuration validation and loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Filesystem validation errors (for CLI use)
    #[error("source path not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    // Config parsing/loading errors
    #[error("config not found")]
    NotFound,

    #[error("invalid config value for `{field}`")]
    InvalidValue { field: String, hint: Option<String> },

    // Schema validation errors (no filesystem checks)
    #[error("no sources specified")]
    NoSources,

    #[error("invalid {field}: {message}")]
    InvalidPattern { field: String, message: String },

    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// A suggestion for fixing the error, where one is known.
    pub fn hint(&self) -> Option<String> {
        match self {
            ConfigError::SourceNotFound(_) => {
                Some("Check the `sources` list; paths are relative to the project root".into())
            }
            ConfigError::NotFound => {
                Some("Create a jslink.toml or add a \"jslink\" field to package.json".into())
            }
            ConfigError::InvalidValue { hint, .. } | ConfigError::SchemaValidation { hint, .. } => {
                hint.clone()
            }
            ConfigError::NoSources => {
                Some("Pass source paths on the command line or set `sources`".into())
            }
            ConfigError::InvalidPattern { .. } => {
                Some("Patterns use Rust regex syntax and match file base names".into())
            }
            ConfigError::Io(_) => None,
        }
    }
}
