//! Build command implementation.

use jslink_bundler::Linker;

use crate::cli::BuildArgs;
use crate::config::{self, ledger_mode, link_options};
use crate::error::Result;
use crate::ui;

/// Execute the build command.
///
/// Loads the layered config, links every source root and prints the run
/// summary on stdout. Bundle lines and skipped roots go to stderr.
pub fn execute(args: BuildArgs) -> Result<()> {
    let loaded = config::load(&args.input, args.overrides())?;
    let options = link_options(&loaded.config, &loaded.root, ledger_mode(args.ledger));
    let dry_run = options.dry_run;

    let report = Linker::new(options).link()?;

    for skipped in &report.skipped {
        ui::warning(&format!("Skipped `{}`: {}", skipped.root, skipped.error));
    }
    if report.analysis.has_orphans() {
        ui::warning(&format!(
            "Orphan modules: {}",
            report.analysis.orphan_modules.join(", ")
        ));
    }
    if let Some(path) = &report.export_map {
        ui::info(&format!("Export map written to {}", path.display()));
    }

    if dry_run {
        ui::info("Dry run, planned bundles:");
    }
    ui::print_bundles(&report, &loaded.root);

    println!("{}", report.summary());
    if !dry_run {
        ui::success(&format!("Wrote {} bundle(s)", report.written.len()));
    }
    Ok(())
}
