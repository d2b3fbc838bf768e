use clap::ValueEnum;

/// Ledger used while serializing export roots
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum LedgerArg {
    /// Every bundle is self-contained
    #[default]
    #[value(name = "per-root")]
    PerRoot,

    /// A module already emitted for an earlier root is left out of later ones
    #[value(name = "shared")]
    Shared,
}

/// Output format of the graph command
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum GraphFormat {
    /// Graphviz digraph
    #[default]
    #[value(name = "dot")]
    Dot,

    /// Modules, sources and export roots as JSON
    #[value(name = "json")]
    Json,
}
