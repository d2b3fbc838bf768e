//! Traversal helpers for ModuleGraph.

use super::graph::ModuleGraph;
use crate::Result;
use crate::module::ModuleId;
use crate::topo::{LedgerMode, RootSequence, TopoSerializer};

impl ModuleGraph {
    /// Dependency-first sequence for a single root.
    pub fn serialize(&self, root: ModuleId) -> Result<RootSequence> {
        TopoSerializer::new(self, LedgerMode::PerRoot).serialize(root)
    }

    /// Serialize several roots with one serializer.
    ///
    /// Each root gets its own result, so a cycle under one root does not
    /// hide the others. Whether to abort is up to the caller.
    pub fn serialize_all<I>(&self, roots: I, mode: LedgerMode) -> Vec<Result<RootSequence>>
    where
        I: IntoIterator<Item = ModuleId>,
    {
        let mut serializer = TopoSerializer::new(self, mode);
        roots
            .into_iter()
            .map(|root| serializer.serialize(root))
            .collect()
    }

    /// Serialize every export root.
    pub fn serialize_exports(&self, mode: LedgerMode) -> Vec<Result<RootSequence>> {
        self.serialize_all(self.export_roots(), mode)
    }
}
