//! In-memory ModuleGraph implementation.
//!
//! Storage is a pair of dense arenas (modules and sources) plus a name index.
//! Methods are split across files by concern; each file adds an `impl` block
//! to [`ModuleGraph`].

mod construction;
mod graph;
mod mutations;
mod queries;
mod serialization;
mod statistics;
mod traversal;

pub use graph::ModuleGraph;
