//! Logging setup for the jslink CLI.
//!
//! The library crates only emit `tracing` events; this installs the
//! subscriber that prints them. Log lines go to stderr so that stdout stays
//! clean for `jslink graph` and `jslink check --json`.
//!
//! # Example
//!
//! ```rust,no_run
//! use jslink_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("linking");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str =
    "jslink=debug,jslink_graph=debug,jslink_bundler=debug,jslink_config=debug,jslink_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str =
    "jslink=info,jslink_graph=info,jslink_bundler=info,jslink_config=info,jslink_cli=info";

/// Pick the filter for the given flags.
///
/// 1. `--verbose`: debug for jslink crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`, if set and valid
/// 4. info for jslink crates
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the global tracing subscriber. Call once, early in `main`.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_parse() {
        assert!(VERBOSE_FILTER.parse::<EnvFilter>().is_ok());
        assert!(DEFAULT_FILTER.parse::<EnvFilter>().is_ok());
        assert!(QUIET_FILTER.parse::<EnvFilter>().is_ok());
    }

    #[test]
    fn test_verbose_wins_over_quiet() {
        assert_eq!(filter_for(true, true).to_string(), EnvFilter::new(VERBOSE_FILTER).to_string());
    }
}
