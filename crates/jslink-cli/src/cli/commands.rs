use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::enums::*;

/// Available jslink subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Link sources and write one bundle per export target
    ///
    /// Every module marked with @export is written, together with everything
    /// it requires, to the destination directory.
    Build(BuildArgs),

    /// Load and analyse sources without writing bundles
    ///
    /// Reports defined and orphan modules. Fails on orphans unless
    /// --no-strict is given.
    Check(CheckArgs),

    /// Print the module dependency graph
    Graph(GraphArgs),
}

/// Where sources come from and how they are scanned.
///
/// Values given here override the config file and `JSLINK_*` variables.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Files or directories to scan
    ///
    /// Falls back to `sources` from the config file when omitted.
    #[arg(value_name = "SOURCES")]
    pub sources: Vec<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Regex a file's base name must match to be scanned
    #[arg(long, value_name = "REGEX")]
    pub include: Option<String>,

    /// Regex excluding files by base name
    #[arg(long, value_name = "REGEX")]
    pub exclude: Option<String>,

    /// Treat orphan modules and cycles as warnings
    #[arg(long)]
    pub no_strict: bool,

    /// Config file to use instead of discovering jslink.toml / package.json
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Project root; sources and outputs are resolved against it
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the build command
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output directory for bundles
    #[arg(short, long, value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Replace existing bundles and export map
    #[arg(long)]
    pub overwrite: bool,

    /// Also write the dependency digraph to this file
    #[arg(long, value_name = "PATH")]
    pub export_map: Option<PathBuf>,

    /// Plan bundles and report them without writing
    #[arg(long)]
    pub dry_run: bool,

    /// How modules shared between export roots are bundled
    #[arg(long, value_enum, default_value = "per-root")]
    pub ledger: LedgerArg,
}

/// Arguments for the check command
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the analysis report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the graph command
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "dot")]
    pub format: GraphFormat,
}
