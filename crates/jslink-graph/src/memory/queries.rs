//! Query methods for ModuleGraph.

use std::path::Path;

use super::graph::ModuleGraph;
use crate::Result;
use crate::module::{Module, ModuleId, normalize_name};
use crate::source::{SourceId, SourceUnit};

impl ModuleGraph {
    /// Look up a module by name. Surrounding whitespace is ignored.
    pub fn get(&self, name: &str) -> Result<Option<ModuleId>> {
        let name = normalize_name(name)?;
        Ok(self.names.get(name).copied())
    }

    /// Look up a module by name, returning the node itself.
    pub fn find(&self, name: &str) -> Result<Option<&Module>> {
        Ok(self.get(name)?.map(|id| self.module(id)))
    }

    /// Panics if `id` did not come from this graph.
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    pub fn name(&self, id: ModuleId) -> &str {
        &self.modules[id.index()].name
    }

    /// All modules in insertion order.
    pub fn modules(&self) -> impl ExactSizeIterator<Item = &Module> + '_ {
        self.modules.iter()
    }

    /// All source units in registration order.
    pub fn sources(&self) -> impl ExactSizeIterator<Item = &SourceUnit> + '_ {
        self.sources.values()
    }

    pub fn source(&self, id: SourceId) -> &SourceUnit {
        &self.sources[id.index()]
    }

    pub fn source_by_path(&self, path: &Path) -> Option<&SourceUnit> {
        self.sources.get(path)
    }

    /// The source unit defining `module`, if it is defined.
    pub fn source_of(&self, module: ModuleId) -> Option<&SourceUnit> {
        self.module(module).source.map(|id| self.source(id))
    }

    /// Modules with at least one export target, in the order they were first marked.
    pub fn export_roots(&self) -> impl ExactSizeIterator<Item = ModuleId> + '_ {
        self.exports.iter().copied()
    }

    /// Direct requirements of `module`.
    pub fn dependencies(&self, module: ModuleId) -> Vec<ModuleId> {
        self.module(module).requires().collect()
    }

    /// Modules that directly require `module`.
    pub fn dependants(&self, module: ModuleId) -> Vec<ModuleId> {
        self.module(module).dependants().collect()
    }

    /// True when the edge `from -> to` exists.
    pub fn has_edge(&self, from: ModuleId, to: ModuleId) -> bool {
        self.module(from).requires.contains(&to)
    }

    /// Referenced but never defined modules, in insertion order.
    pub fn orphans(&self) -> impl Iterator<Item = &Module> + '_ {
        self.modules.iter().filter(|m| !m.defined())
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
