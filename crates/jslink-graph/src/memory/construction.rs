//! Construction methods for ModuleGraph.

use super::graph::ModuleGraph;
use crate::statistics::{DependencyCountCollector, ModuleCountCollector};

impl ModuleGraph {
    /// Create an empty graph with the default stat collectors installed.
    pub fn new() -> Self {
        let mut graph = Self::bare();
        graph.add_collector(ModuleCountCollector);
        graph.add_collector(DependencyCountCollector);
        graph
    }

    /// Create an empty graph without any stat collectors.
    ///
    /// [`analyse`](Self::analyse) then only reports the core fields.
    pub fn bare() -> Self {
        Self {
            modules: Vec::new(),
            names: Default::default(),
            sources: Default::default(),
            exports: Default::default(),
            edge_count: 0,
            collectors: Vec::new(),
        }
    }
}

impl Default for ModuleGraph {
    fn default() -> Self {
        Self::new()
    }
}
