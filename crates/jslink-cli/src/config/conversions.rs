use std::path::Path;

use jslink_bundler::LinkOptions;
use jslink_bundler::graph::LedgerMode;
use jslink_config::JslinkConfig;

use crate::cli::LedgerArg;

pub fn ledger_mode(arg: LedgerArg) -> LedgerMode {
    match arg {
        LedgerArg::PerRoot => LedgerMode::PerRoot,
        LedgerArg::Shared => LedgerMode::Shared,
    }
}

/// Build linker options from a layered config rooted at `root`.
pub fn link_options(config: &JslinkConfig, root: &Path, ledger: LedgerMode) -> LinkOptions {
    LinkOptions {
        sources: config.sources.clone(),
        recursive: config.recursive,
        include_pattern: config.include_pattern.clone(),
        exclude_pattern: config.exclude_pattern.clone(),
        destination: config.destination.clone(),
        strict: config.strict,
        overwrite: config.overwrite,
        export_map: config.export_map.clone(),
        dry_run: config.dry_run,
        ledger_mode: ledger,
        root: root.to_path_buf(),
    }
}
