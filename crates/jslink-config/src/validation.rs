//! Pluggable config validation strategies
//!
//! Schema validation checks the config on its own; filesystem validation
//! additionally checks that sources exist under a project root.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::config::JslinkConfig;
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &JslinkConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use jslink_config::{ConfigValidator, JslinkConfig, SchemaValidator};
///
/// let config = JslinkConfig {
///     sources: vec!["src".into()],
///     ..JslinkConfig::default()
/// };
/// SchemaValidator.validate(&config).unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &JslinkConfig) -> Result<()> {
        if config.sources.is_empty() {
            return Err(ConfigError::NoSources);
        }
        if config.sources.iter().any(|s| s.as_os_str().is_empty()) {
            return Err(ConfigError::SchemaValidation {
                message: "source paths cannot be empty".to_string(),
                hint: Some("Remove empty strings from the 'sources' array".to_string()),
            });
        }

        compile("includePattern", &config.include_pattern)?;
        if let Some(pattern) = &config.exclude_pattern {
            compile("excludePattern", pattern)?;
        }

        if config.destination.to_string_lossy().trim().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "destination cannot be blank".to_string(),
                hint: Some("Set 'destination' to an output directory, e.g. \"out\"".to_string()),
            });
        }
        Ok(())
    }
}

fn compile(field: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Schema validation plus existence checks for every source.
#[derive(Debug, Clone)]
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    /// Relative sources are checked against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &JslinkConfig) -> Result<()> {
        SchemaValidator.validate(config)?;
        for source in &config.sources {
            let path = self.root.join(source);
            if !path.exists() {
                return Err(ConfigError::SourceNotFound(path));
            }
        }
        Ok(())
    }
}

/// Validate against the schema only.
pub fn validate_schema(config: &JslinkConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Validate against the schema and the filesystem under `root`.
pub fn validate_fs(config: &JslinkConfig, root: &Path) -> Result<()> {
    FsValidator::new(root).validate(config)
}

impl JslinkConfig {
    /// Shorthand for [`validate_schema`].
    pub fn validate(&self) -> Result<()> {
        validate_schema(self)
    }
}
