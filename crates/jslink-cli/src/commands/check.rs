//! Check command implementation.
//!
//! Loads and analyses sources without planning or writing bundles.

use jslink_bundler::Linker;
use jslink_bundler::graph::LedgerMode;

use crate::cli::CheckArgs;
use crate::config::{self, link_options};
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// In strict mode orphan modules fail the command. The analysis goes to
/// stdout, as JSON with `--json`.
pub fn execute(args: CheckArgs) -> Result<()> {
    let loaded = config::load(&args.input, args.input.overrides())?;
    let options = link_options(&loaded.config, &loaded.root, LedgerMode::default());

    let (graph, analysis, _stats) = Linker::new(options).check()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    ui::print_analysis(&analysis);
    match graph.export_roots().len() {
        0 => ui::warning("No module is exported; `jslink build` would write nothing"),
        _ if analysis.has_orphans() => ui::warning("Check passed with orphan modules"),
        _ => ui::success("All checks passed"),
    }
    Ok(())
}
