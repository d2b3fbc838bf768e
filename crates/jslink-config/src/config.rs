//! The `JslinkConfig` schema and its defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result as ConfigResult};

/// Default regex for files worth scanning.
pub const DEFAULT_INCLUDE_PATTERN: &str = r".+\.js$";

/// Project configuration, as read from `jslink.toml` or `package.json#jslink`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JslinkConfig {
    /// Files or directories to scan.
    pub sources: Vec<PathBuf>,

    /// Descend into subdirectories.
    pub recursive: bool,

    /// Regex applied to file base names.
    pub include_pattern: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_pattern: Option<String>,

    /// Output directory for bundles.
    pub destination: PathBuf,

    /// Orphan modules and cycles are fatal.
    pub strict: bool,

    pub overwrite: bool,

    /// Where to write the dependency digraph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_map: Option<PathBuf>,

    /// Plan bundles without writing them.
    pub dry_run: bool,
}

impl Default for JslinkConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            recursive: false,
            include_pattern: DEFAULT_INCLUDE_PATTERN.to_string(),
            exclude_pattern: None,
            destination: PathBuf::from("out"),
            strict: true,
            overwrite: false,
            export_map: None,
            dry_run: false,
        }
    }
}

impl JslinkConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use jslink_config::JslinkConfig;
    /// use serde_json::json;
    /// use std::path::PathBuf;
    ///
    /// let config = JslinkConfig::from_value(json!({
    ///     "sources": ["src"],
    ///     "excludePattern": "\\.test\\.js$"
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(config.sources, vec![PathBuf::from("src")]);
    /// assert!(config.strict);
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrongly_typed_value_is_rejected() {
        let err = JslinkConfig::from_value(json!({ "recursive": "yes" })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.hint().is_some());
    }

    #[test]
    fn unset_options_are_not_serialized() {
        let value = JslinkConfig::default().to_value().unwrap();
        assert_eq!(value["destination"], "out");
        assert!(value.get("exportMap").is_none());
        assert!(value.get("excludePattern").is_none());
    }
}
