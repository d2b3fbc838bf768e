use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use serde::Serialize;

use crate::source::SourceId;
use crate::{Error, Result};

/// Dense index of a [`Module`] inside its [`ModuleGraph`](crate::ModuleGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleId(pub(crate) u32);

impl ModuleId {
    /// Position of the module in insertion order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

pub(crate) type EdgeSet = IndexSet<ModuleId, FxBuildHasher>;

/// A logical unit declared by a `@module` directive.
///
/// A module is created on first reference, either as a declaration or as the
/// target of a `@requires`. It stays undefined until a source unit is attached
/// through [`ModuleGraph::define`](crate::ModuleGraph::define).
#[derive(Debug, Clone)]
pub struct Module {
    pub(crate) id: ModuleId,
    pub(crate) name: String,
    pub(crate) source: Option<SourceId>,
    pub(crate) requires: EdgeSet,
    pub(crate) dependants: EdgeSet,
    pub(crate) export_targets: Vec<String>,
}

impl Module {
    pub(crate) fn new(id: ModuleId, name: String) -> Self {
        Self {
            id,
            name,
            source: None,
            requires: EdgeSet::default(),
            dependants: EdgeSet::default(),
            export_targets: Vec::new(),
        }
    }

    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The source unit that defines this module, once defined.
    pub fn source(&self) -> Option<SourceId> {
        self.source
    }

    /// True once a source unit has been attached.
    pub fn defined(&self) -> bool {
        self.source.is_some()
    }

    /// Outgoing edges, in declaration order.
    pub fn requires(&self) -> impl ExactSizeIterator<Item = ModuleId> + '_ {
        self.requires.iter().copied()
    }

    /// Incoming edges, in declaration order.
    pub fn dependants(&self) -> impl ExactSizeIterator<Item = ModuleId> + '_ {
        self.dependants.iter().copied()
    }

    pub fn export_targets(&self) -> &[String] {
        &self.export_targets
    }

    /// True when at least one export target was declared.
    pub fn is_export_root(&self) -> bool {
        !self.export_targets.is_empty()
    }
}

/// Trim a module name and reject blank ones.
pub fn normalize_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Structural {
            name: name.to_string(),
            reason: "module names must not be blank".to_string(),
            file: None,
        });
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize_name("  foo \t").unwrap(), "foo");
        assert_eq!(normalize_name("a b").unwrap(), "a b");
    }

    #[test]
    fn test_normalize_rejects_blank() {
        for blank in ["", "   ", "\n\t"] {
            let err = normalize_name(blank).unwrap_err();
            assert!(matches!(err, Error::Structural { .. }));
        }
    }

    #[test]
    fn test_new_module_is_undefined() {
        let module = Module::new(ModuleId(0), "x".to_string());
        assert!(!module.defined());
        assert!(!module.is_export_root());
        assert_eq!(module.requires().len(), 0);
    }
}
