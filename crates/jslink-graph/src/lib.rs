//! # jslink-graph
//!
//! Pure data structures for directive-declared module dependency graphs.
//!
//! This crate holds the graph, its invariants and the algorithms that only
//! read it. It performs no I/O: source units are handed in as bytes and
//! comment extraction goes through the [`CommentScanner`] trait.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ModuleGraph                              │
//! │  (&mut during the load pass, shared borrows afterwards)     │
//! └────────────────────┬────────────────────────────────────────┘
//!                      │
//!          ┌───────────┼───────────┐
//!          │           │           │
//!          ▼           ▼           ▼
//!    ┌─────────┐ ┌──────────┐ ┌────────────┐
//!    │ Module  │ │ requires │ │ SourceUnit │
//!    │ (Node)  │ │ (Edge)   │ │ (File)     │
//!    └─────────┘ └──────────┘ └────────────┘
//!                      │
//!          ┌───────────┴───────────┐
//!          ▼                       ▼
//!   ┌──────────────┐      ┌─────────────────┐
//!   │ analyse()    │      │ TopoSerializer  │
//!   │ StatCollector│      │ (per export     │
//!   └──────────────┘      │  root)          │
//!                         └─────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use jslink_graph::{LedgerMode, ModuleGraph};
//!
//! # fn main() -> jslink_graph::Result<()> {
//! let mut graph = ModuleGraph::new();
//!
//! let x = graph.add_source("x.js", b"/** @module X */".to_vec());
//! let y = graph.add_source("y.js", b"/** @module Y */".to_vec());
//! graph.define_module("X", x)?;
//! graph.define_module("Y", y)?;
//! graph.connect("X", "Y")?;
//!
//! let root = graph.get("X")?.expect("declared above");
//! graph.mark_export(root, "bundle.js")?;
//!
//! let sequences = graph.serialize_exports(LedgerMode::PerRoot);
//! let order: Vec<_> = sequences[0]
//!     .as_ref()
//!     .map(|seq| seq.modules.iter().map(|id| graph.name(*id)).collect())
//!     .unwrap_or_default();
//! assert_eq!(order, ["Y", "X"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Method Groups
//!
//! `ModuleGraph` methods are split by concern inside the private `memory`
//! module: construction, mutations (load pass only), queries, statistics,
//! serialization (digraph and JSON) and traversal.

pub mod error;
pub mod module;
pub mod source;
pub mod statistics;
pub mod topo;

mod memory;

pub use error::{Error, Result};
pub use memory::ModuleGraph;
pub use module::{Module, ModuleId, normalize_name};
pub use source::{CommentBlock, CommentScanner, SourceId, SourceUnit};
pub use statistics::{AnalysisReport, DependencyCountCollector, ModuleCountCollector, StatCollector};
pub use topo::{LedgerMode, RootSequence, TopoSerializer};
