//! Error handling for the jslink CLI.
//!
//! Library errors (`jslink_bundler::Error`, `jslink_config::ConfigError`)
//! convert into [`CliError`] automatically. At `main` the error is turned
//! into a `miette` report, with a hint attached where one is actionable.
//!
//! # Example
//!
//! ```rust,no_run
//! use jslink_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_map(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_path(path)
//!         .with_hint("Generate it with `jslink build --export-map`")
//! }
//! ```

mod diagnostic;

use std::path::PathBuf;

use jslink_bundler::Error as LinkError;
use jslink_config::ConfigError;
use thiserror::Error;

pub use diagnostic::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration errors (discovery, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors from loading, serializing, planning or writing
    #[error("{0}")]
    Link(#[from] LinkError),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

impl CliError {
    /// A suggestion for resolving the error, where one is known.
    pub fn hint(&self) -> Option<String> {
        match self {
            CliError::Config(err) => err.hint(),
            CliError::Link(err) => link_hint(err).map(str::to_string),
            CliError::FileNotFound(_) => Some("Check the path and try again".to_string()),
            _ => None,
        }
    }
}

fn link_hint(err: &LinkError) -> Option<&'static str> {
    Some(match err {
        LinkError::OrphanModules { .. } => {
            "Define the missing modules with @module, or pass --no-strict to continue without them"
        }
        LinkError::CyclicDependency { .. } => {
            "Break the @requires cycle, or pass --no-strict to skip the affected export"
        }
        LinkError::DuplicateDefinition { .. } => "Each @module name may be declared only once",
        LinkError::DuplicateDependency { .. } => "Remove the repeated @requires line",
        LinkError::ExternalFileNotFound { .. } => {
            "Relative @requires paths resolve against the directory of the requiring file"
        }
        LinkError::OverwriteDisallowed { .. } => "Pass --overwrite to replace existing output",
        LinkError::SelfOverwrite { .. } => {
            "Choose a destination outside the source directories"
        }
        LinkError::DestinationConflict { .. } => "Give each @export a distinct target name",
        LinkError::InvalidTarget { .. } => {
            "@export targets are file names relative to the destination directory"
        }
        LinkError::InvalidPattern { .. } => {
            "Patterns use Rust regex syntax and match file base names"
        }
        _ => return None,
    })
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{err}\n\nHint: {hint}"))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{msg}: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orphans_carry_hint() {
        let err: CliError = LinkError::OrphanModules {
            modules: vec!["Y".to_string()],
        }
        .into();
        assert!(err.to_string().contains('Y'));
        assert!(err.hint().unwrap().contains("--no-strict"));
    }

    #[test]
    fn test_config_error_hint_passes_through() {
        let err: CliError = ConfigError::NoSources.into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.hint().is_some());
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        let err = result.with_path("/test/path.dot").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_result_ext_with_hint_and_context() {
        let result: std::result::Result<(), ConfigError> = Err(ConfigError::NotFound);
        let msg = result.with_hint("Create jslink.toml").unwrap_err().to_string();
        assert!(msg.contains("Hint: Create jslink.toml"));

        let result: std::result::Result<(), ConfigError> = Err(ConfigError::NotFound);
        let msg = result.context("Failed to start").unwrap_err().to_string();
        assert!(msg.starts_with("Failed to start: "));
    }
}
