//! Core ModuleGraph structure.

use std::path::PathBuf;

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap as HashMap};

use crate::module::{EdgeSet, Module, ModuleId};
use crate::source::SourceUnit;
use crate::statistics::StatCollector;

/// Directive-declared module dependency graph.
///
/// Mutation requires `&mut self` and happens during a single load pass.
/// Analysis, serialization and planning only borrow the graph.
#[derive(Debug)]
pub struct ModuleGraph {
    pub(super) modules: Vec<Module>,
    pub(super) names: HashMap<String, ModuleId>,
    pub(super) sources: IndexMap<PathBuf, SourceUnit, FxBuildHasher>,
    pub(super) exports: EdgeSet,
    pub(super) edge_count: usize,
    pub(super) collectors: Vec<Box<dyn StatCollector>>,
}
