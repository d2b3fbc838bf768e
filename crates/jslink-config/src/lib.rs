//! # jslink-config
//!
//! The `JslinkConfig` schema shared by the `jslink` binary and library users,
//! plus discovery of `jslink.toml` / `package.json#jslink` and validation.
//!
//! Layering several sources (defaults, file, environment, flags) is left to
//! the caller; the CLI does it with `figment`. [`JslinkConfig::figment`]
//! gives the base layer.

pub mod config;
pub mod discovery;
pub mod error;
pub mod validation;

pub use config::{DEFAULT_INCLUDE_PATTERN, JslinkConfig};
pub use discovery::{CONFIG_FILE, ConfigDiscovery, PACKAGE_JSON_KEY, load_file, read_value};
pub use error::{ConfigError, Result};
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};

use figment::Figment;
use figment::providers::Serialized;

impl JslinkConfig {
    /// A figment seeded with the serialized defaults.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(JslinkConfig::default()))
    }
}
