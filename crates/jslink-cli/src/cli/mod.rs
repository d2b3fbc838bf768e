//! Command-line interface definition for jslink.
//!
//! # Command Structure
//!
//! - `jslink build` - Load sources, resolve directives and write bundles
//! - `jslink check` - Load and analyse without writing anything
//! - `jslink graph` - Print the module dependency graph

mod commands;
pub mod enums;
mod tests;

use clap::Parser;

pub use commands::{BuildArgs, CheckArgs, Command, GraphArgs, InputArgs};
pub use enums::*;

/// jslink - link JavaScript files by the directives in their doc comments
#[derive(Parser, Debug)]
#[command(
    name = "jslink",
    version,
    about = "Link JavaScript sources into bundles by their doc-comment directives",
    long_about = "jslink reads @module, @requires and @export directives from /** */ comments,\n\
                  builds the module dependency graph and concatenates each exported module\n\
                  with its dependencies, dependencies first."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
