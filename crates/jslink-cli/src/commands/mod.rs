//! Command implementations for the jslink CLI.
//!
//! - [`build`] - Link sources and write bundles
//! - [`check`] - Load and analyse without writing
//! - [`graph`] - Print the dependency graph
//!
//! Each command provides an `execute` function taking its parsed arguments.

pub mod build;
pub mod check;
pub mod graph;

pub use build::execute as build_execute;
pub use check::execute as check_execute;
pub use graph::execute as graph_execute;
