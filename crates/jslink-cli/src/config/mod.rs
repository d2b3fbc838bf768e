//! Layered configuration for CLI commands.
//!
//! Priority: CLI > Environment (`JSLINK_*`) > File > Defaults

mod conversions;
mod loading;

use std::path::PathBuf;

use jslink_config::JslinkConfig;

pub use conversions::{ledger_mode, link_options};
pub use loading::{ENV_PREFIX, load};

/// A fully layered config plus where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: JslinkConfig,
    /// Directory relative paths are resolved against.
    pub root: PathBuf,
    /// The config file that contributed, if any.
    pub file: Option<PathBuf>,
}
