//! Graph command implementation.

use jslink_bundler::{DIGRAPH_NAME, Linker};
use jslink_bundler::graph::LedgerMode;

use crate::cli::{GraphArgs, GraphFormat};
use crate::config::{self, link_options};
use crate::error::Result;

/// Execute the graph command: load sources and print the graph on stdout.
///
/// Only the load pass runs, so orphan modules are shown rather than rejected.
pub fn execute(args: GraphArgs) -> Result<()> {
    let loaded = config::load(&args.input, args.input.overrides())?;
    let options = link_options(&loaded.config, &loaded.root, LedgerMode::default());

    let (graph, _stats) = Linker::new(options).load()?;
    match args.format {
        GraphFormat::Dot => println!("{}", graph.to_digraph(DIGRAPH_NAME)),
        GraphFormat::Json => println!("{}", graph.to_json()?),
    }
    Ok(())
}
