//! Graph analysis results and pluggable stat collectors.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ModuleGraph;

/// Result of [`ModuleGraph::analyse`].
///
/// The three core fields are always present. Collectors contribute further
/// entries under their own keys, which flatten into the JSON form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Modules referenced as a dependency but never defined.
    pub orphan_modules: Vec<String>,
    /// Modules attached to a source unit.
    pub defined_modules: Vec<String>,
    /// Total export targets declared across the graph.
    pub number_of_exports: usize,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AnalysisReport {
    /// Record a collector value under `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.extra.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Convenience accessor for integer-valued entries.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    pub fn has_orphans(&self) -> bool {
        !self.orphan_modules.is_empty()
    }
}

/// A read-only pass over the graph that adds entries to an [`AnalysisReport`].
///
/// Collectors must not depend on each other's output.
pub trait StatCollector: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn collect(&self, graph: &ModuleGraph, report: &mut AnalysisReport);
}

/// Reports `numberOfModules` and `numberOfSources`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleCountCollector;

impl StatCollector for ModuleCountCollector {
    fn name(&self) -> &'static str {
        "module-count"
    }

    fn collect(&self, graph: &ModuleGraph, report: &mut AnalysisReport) {
        report.insert("numberOfModules", graph.module_count());
        report.insert("numberOfSources", graph.source_count());
    }
}

/// Reports `numberOfDependencies` and the names of export roots.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyCountCollector;

impl StatCollector for DependencyCountCollector {
    fn name(&self) -> &'static str {
        "dependency-count"
    }

    fn collect(&self, graph: &ModuleGraph, report: &mut AnalysisReport) {
        report.insert("numberOfDependencies", graph.edge_count());
        let roots: Vec<Value> = graph
            .export_roots()
            .map(|id| Value::from(graph.name(id)))
            .collect();
        report.insert("exportRoots", roots);
    }
}
