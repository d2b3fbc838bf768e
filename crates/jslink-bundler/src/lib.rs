//! # jslink-bundler
//!
//! Directive evaluation, file loading, bundle planning and writing on top of
//! [`jslink_graph`].
//!
//! ## Overview
//!
//! ```text
//!  FileWalker ──paths──▶ Loader ──SourceUnit──▶ DirectiveEngine ──mutations──▶ ModuleGraph
//!                                                   │
//!                                        DirectiveRegistry (anchor + satellites)
//!
//!  ModuleGraph ──analyse()──▶ AnalysisReport
//!       │
//!       └──serialize_all()──▶ RootSequence ──BundlePlanner──▶ Bundle ──BundleWriter──▶ disk
//! ```
//!
//! [`Linker`] runs the whole pipeline from a [`LinkOptions`]:
//!
//! ```rust,no_run
//! use jslink_bundler::{LinkOptions, Linker};
//!
//! # fn main() -> jslink_bundler::Result<()> {
//! let report = Linker::new(LinkOptions {
//!     sources: vec!["src".into()],
//!     destination: "out".into(),
//!     ..LinkOptions::default()
//! })
//! .link()?;
//!
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the application.

pub mod directive;
pub mod linker;
pub mod loader;
pub mod planner;
pub mod runtime;
pub mod scanner;
pub mod writer;

pub use directive::{
    AnchorEvaluator, DirectiveContext, DirectiveEngine, DirectiveEvaluator, DirectivePattern,
    DirectiveRegistry, DirectiveToken, Evaluation,
};
pub use linker::{DIGRAPH_NAME, LinkOptions, LinkReport, Linker, SkippedRoot};
pub use loader::{DEFAULT_INCLUDE_PATTERN, FileWalker, LoadStats, LoadStatsCollector, Loader};
pub use planner::{Bundle, BundlePlanner, DefaultTarget};
pub use runtime::{MemoryRuntime, NativeRuntime, Runtime, RuntimeError, RuntimeResult};
pub use scanner::JsCommentScanner;
pub use writer::BundleWriter;

// Re-export the graph crate so callers need only one dependency.
pub use jslink_graph as graph;
pub use jslink_graph::{Error, Result};
