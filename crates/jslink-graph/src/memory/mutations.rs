//! Mutation methods for ModuleGraph.
//!
//! These are only called during the load pass.

use std::path::PathBuf;

use super::graph::ModuleGraph;
use crate::module::{Module, ModuleId, normalize_name};
use crate::source::{SourceId, SourceUnit};
use crate::statistics::StatCollector;
use crate::{Error, Result};

impl ModuleGraph {
    /// Look up `name`, creating an undefined placeholder when absent.
    pub fn get_or_insert(&mut self, name: &str) -> Result<ModuleId> {
        let name = normalize_name(name)?;
        if let Some(&id) = self.names.get(name) {
            return Ok(id);
        }

        let id = ModuleId(self.modules.len() as u32);
        self.modules.push(Module::new(id, name.to_string()));
        self.names.insert(name.to_string(), id);
        Ok(id)
    }

    /// Register a source unit. A path that is already known returns its
    /// existing id and keeps the original content.
    pub fn add_source(&mut self, path: impl Into<PathBuf>, raw: Vec<u8>) -> SourceId {
        let path = path.into();
        if let Some(existing) = self.sources.get(&path) {
            return existing.id;
        }

        let id = SourceId(self.sources.len() as u32);
        self.sources.insert(path.clone(), SourceUnit::new(id, path, raw));
        id
    }

    /// Attach `source` to `module`. A module can only be defined once.
    pub fn define(&mut self, module: ModuleId, source: SourceId) -> Result<()> {
        let target = &self.modules[module.index()];
        if let Some(previous) = target.source {
            return Err(Error::DuplicateDefinition {
                module: target.name.clone(),
                file: Some(self.sources[source.index()].path.clone()),
                previous: Some(self.sources[previous.index()].path.clone()),
            });
        }

        self.modules[module.index()].source = Some(source);
        self.sources[source.index()].modules.push(module);
        Ok(())
    }

    /// Create (or find) `name` and define it by `source`.
    pub fn define_module(&mut self, name: &str, source: SourceId) -> Result<ModuleId> {
        let id = self.get_or_insert(name)?;
        self.define(id, source)?;
        Ok(id)
    }

    /// Declare that `requirer` requires `required`, creating either end on
    /// first reference.
    pub fn connect(&mut self, requirer: &str, required: &str) -> Result<()> {
        let from = normalize_name(requirer)?;
        let to = normalize_name(required)?;
        if from == to {
            return Err(Error::SelfDependency {
                module: from.to_string(),
                file: None,
            });
        }

        let from = self.get_or_insert(from)?;
        let to = self.get_or_insert(to)?;
        self.connect_ids(from, to)
    }

    /// Id-based form of [`connect`](Self::connect).
    pub fn connect_ids(&mut self, from: ModuleId, to: ModuleId) -> Result<()> {
        if from == to {
            return Err(Error::SelfDependency {
                module: self.modules[from.index()].name.clone(),
                file: None,
            });
        }

        if !self.modules[from.index()].requires.insert(to) {
            return Err(Error::DuplicateDependency {
                module: self.modules[from.index()].name.clone(),
                requirement: self.modules[to.index()].name.clone(),
                file: None,
            });
        }
        self.modules[to.index()].dependants.insert(from);
        self.edge_count += 1;
        Ok(())
    }

    /// Append `target` to the module's export targets.
    ///
    /// Returns `false` when the target was already present.
    pub fn mark_export(&mut self, module: ModuleId, target: &str) -> Result<bool> {
        let target = target.trim();
        if target.is_empty() {
            return Err(Error::Structural {
                name: self.modules[module.index()].name.clone(),
                reason: "export target must not be blank".to_string(),
                file: None,
            });
        }

        let entry = &mut self.modules[module.index()];
        if entry.export_targets.iter().any(|t| t == target) {
            return Ok(false);
        }
        entry.export_targets.push(target.to_string());
        self.exports.insert(module);
        Ok(true)
    }

    /// Name-based form of [`mark_export`](Self::mark_export).
    pub fn mark_export_named(&mut self, name: &str, target: &str) -> Result<bool> {
        let id = self.get_or_insert(name)?;
        self.mark_export(id, target)
    }

    /// Flag a source unit as evaluated. Returns `false` if it already was.
    pub fn mark_evaluated(&mut self, source: SourceId) -> bool {
        let unit = &mut self.sources[source.index()];
        !std::mem::replace(&mut unit.evaluated, true)
    }

    /// Append a collector to the [`analyse`](Self::analyse) pipeline.
    pub fn add_collector(&mut self, collector: impl StatCollector + 'static) {
        self.collectors.push(Box::new(collector));
    }
}
