use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use jslink_config::{ConfigDiscovery, ConfigError, ConfigValidator, FsValidator, JslinkConfig};
use serde_json::{Map, Value};

use super::LoadedConfig;
use crate::cli::{BuildArgs, InputArgs};
use crate::error::Result;

/// Prefix of environment variables read into the config.
pub const ENV_PREFIX: &str = "JSLINK_";

/// Load and validate configuration for a command.
///
/// `overrides` holds the camelCase keys the command line set explicitly;
/// anything absent there falls through to the environment, the config
/// file and finally the defaults.
pub fn load(input: &InputArgs, overrides: Map<String, Value>) -> Result<LoadedConfig> {
    let root = match &input.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let file = match &input.config {
        Some(path) => {
            let path = if path.is_absolute() { path.clone() } else { root.join(path) };
            if !path.is_file() {
                return Err(ConfigError::NotFound.into());
            }
            Some(path)
        }
        None => ConfigDiscovery::new(&root).find(),
    };

    let mut figment = JslinkConfig::figment();
    if let Some(path) = &file {
        figment = merge_file(figment, path)?;
    }
    figment = figment
        .merge(Env::prefixed(ENV_PREFIX).map(|key| env_key(key.as_str()).into()))
        .merge(Serialized::defaults(overrides));

    let config: JslinkConfig = figment.extract().map_err(|e| ConfigError::InvalidValue {
        field: "configuration".to_string(),
        hint: Some(e.to_string()),
    })?;
    FsValidator::new(&root).validate(&config)?;

    tracing::debug!(
        root = %root.display(),
        file = ?file,
        sources = config.sources.len(),
        "configuration loaded"
    );
    Ok(LoadedConfig { config, root, file })
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    if path.extension().is_some_and(|ext| ext == "toml") {
        return Ok(figment.merge(Toml::file(path)));
    }
    // package.json contributes only its `jslink` object
    let value = jslink_config::read_value(path)?;
    Ok(figment.merge(Serialized::defaults(value)))
}

/// `INCLUDE_PATTERN` -> `includePattern`
fn env_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

impl InputArgs {
    /// Keys this command line sets explicitly.
    pub fn overrides(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if !self.sources.is_empty() {
            map.insert("sources".into(), paths(&self.sources));
        }
        if self.recursive {
            map.insert("recursive".into(), Value::Bool(true));
        }
        if let Some(include) = &self.include {
            map.insert("includePattern".into(), Value::String(include.clone()));
        }
        if let Some(exclude) = &self.exclude {
            map.insert("excludePattern".into(), Value::String(exclude.clone()));
        }
        if self.no_strict {
            map.insert("strict".into(), Value::Bool(false));
        }
        map
    }
}

impl BuildArgs {
    /// Input overrides plus the build-only flags.
    pub fn overrides(&self) -> Map<String, Value> {
        let mut map = self.input.overrides();
        if let Some(destination) = &self.destination {
            map.insert("destination".into(), path(destination));
        }
        if self.overwrite {
            map.insert("overwrite".into(), Value::Bool(true));
        }
        if let Some(export_map) = &self.export_map {
            map.insert("exportMap".into(), path(export_map));
        }
        if self.dry_run {
            map.insert("dryRun".into(), Value::Bool(true));
        }
        map
    }
}

fn path(path: &Path) -> Value {
    Value::String(path.to_string_lossy().into_owned())
}

fn paths(paths: &[PathBuf]) -> Value {
    Value::Array(paths.iter().map(|p| path(p)).collect())
}
