//! File-based config discovery for CLI use
//!
//! Handles finding and loading jslink configuration files from a project root.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::JslinkConfig;
use crate::error::{ConfigError, Result};

/// Conventional config file name.
pub const CONFIG_FILE: &str = "jslink.toml";

/// Key holding jslink settings inside `package.json`.
pub const PACKAGE_JSON_KEY: &str = "jslink";

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use jslink_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. `jslink.toml`
    /// 2. `package.json` with a non-null `jslink` field
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.is_file() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        match parsed.get(PACKAGE_JSON_KEY) {
            Some(value) if !value.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Load config from the discovered file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<JslinkConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        load_file(&path)
    }
}

/// Load config from a specific file.
///
/// A file named `package.json` is read through its `jslink` field; anything
/// else is parsed as TOML.
pub fn load_file(path: &Path) -> Result<JslinkConfig> {
    tracing::debug!(path = %path.display(), "loading config file");
    JslinkConfig::from_value(read_value(path)?)
}

/// The raw settings object a config file contributes.
pub fn read_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;

    if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
        let parsed: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: "package.json".to_string(),
                hint: Some(format!("Invalid JSON: {e}")),
            })?;
        return match parsed.get(PACKAGE_JSON_KEY) {
            Some(value) if !value.is_null() => Ok(value.clone()),
            Some(_) => Err(ConfigError::InvalidValue {
                field: PACKAGE_JSON_KEY.to_string(),
                hint: Some("The 'jslink' field cannot be null".to_string()),
            }),
            None => Err(ConfigError::InvalidValue {
                field: PACKAGE_JSON_KEY.to_string(),
                hint: Some("Add a 'jslink' field to your package.json".to_string()),
            }),
        };
    }

    let toml_val: toml::Table = toml::from_str(&content).map_err(|e| ConfigError::InvalidValue {
        field: "toml".to_string(),
        hint: Some(format!("Invalid TOML syntax: {e}")),
    })?;
    serde_json::to_value(toml_val).map_err(|e| ConfigError::InvalidValue {
        field: "toml".to_string(),
        hint: Some(format!("TOML to JSON conversion failed: {e}")),
    })
}
