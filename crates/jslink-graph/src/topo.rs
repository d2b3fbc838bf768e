//! Cycle-detecting topological serialization of export roots.
//!
//! Each call walks `requires` edges depth-first and emits modules in
//! post-order, so every module follows all of its dependencies and the root
//! comes last. Visit state lives in a table owned by the call; a failed call
//! leaves nothing behind in the graph.

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use serde::Serialize;

use crate::module::ModuleId;
use crate::{Error, ModuleGraph, Result};

/// How emitted modules are remembered across roots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LedgerMode {
    /// Every root starts with an empty ledger. Each sequence is the full
    /// closure of its root.
    #[default]
    PerRoot,
    /// One ledger spans every root serialized by the same serializer. A
    /// module already emitted for an earlier root is left out of later ones.
    Shared,
}

/// Dependency-first module order for one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSequence {
    pub root: ModuleId,
    /// Defined modules of the root's closure, dependencies first.
    pub modules: Vec<ModuleId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    Visiting,
    Done,
}

struct Frame {
    id: ModuleId,
    next: usize,
}

/// Serializes export roots of a read-only graph.
#[derive(Debug)]
pub struct TopoSerializer<'g> {
    graph: &'g ModuleGraph,
    mode: LedgerMode,
    ledger: HashSet<ModuleId>,
}

impl<'g> TopoSerializer<'g> {
    pub fn new(graph: &'g ModuleGraph, mode: LedgerMode) -> Self {
        Self {
            graph,
            mode,
            ledger: HashSet::default(),
        }
    }

    pub fn mode(&self) -> LedgerMode {
        self.mode
    }

    /// Modules stamped in the current ledger.
    pub fn ledger_len(&self) -> usize {
        self.ledger.len()
    }

    /// Produce the dependency-first sequence for `root`.
    ///
    /// Undefined modules are walked through but never emitted. On a cycle the
    /// error names the module that was re-entered and carries the full path;
    /// in shared mode anything this call stamped is removed from the ledger.
    pub fn serialize(&mut self, root: ModuleId) -> Result<RootSequence> {
        if self.mode == LedgerMode::PerRoot {
            self.ledger.clear();
        }

        let mut stamped = Vec::new();
        match self.walk(root, &mut stamped) {
            Ok(()) => Ok(RootSequence {
                root,
                modules: stamped,
            }),
            Err(err) => {
                for id in &stamped {
                    self.ledger.remove(id);
                }
                Err(err)
            }
        }
    }

    fn walk(&mut self, root: ModuleId, emitted: &mut Vec<ModuleId>) -> Result<()> {
        let graph = self.graph;
        let mut states: HashMap<ModuleId, VisitState> = HashMap::default();
        let mut stack = vec![Frame { id: root, next: 0 }];
        states.insert(root, VisitState::Visiting);

        while let Some(frame) = stack.last_mut() {
            let module = graph.module(frame.id);
            let Some(&child) = module.requires.get_index(frame.next) else {
                let id = frame.id;
                stack.pop();
                states.insert(id, VisitState::Done);
                if module.defined() && self.ledger.insert(id) {
                    emitted.push(id);
                }
                continue;
            };
            frame.next += 1;

            match states.get(&child).copied().unwrap_or(VisitState::Unvisited) {
                VisitState::Done => {}
                VisitState::Unvisited => {
                    states.insert(child, VisitState::Visiting);
                    stack.push(Frame { id: child, next: 0 });
                }
                VisitState::Visiting => {
                    let start = stack.iter().position(|f| f.id == child).unwrap_or(0);
                    let mut cycle: Vec<String> = stack[start..]
                        .iter()
                        .map(|f| graph.name(f.id).to_string())
                        .collect();
                    cycle.push(graph.name(child).to_string());
                    return Err(Error::CyclicDependency {
                        module: graph.name(child).to_string(),
                        cycle,
                        file: graph.source_of(child).map(|s| s.path().to_path_buf()),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defined(graph: &mut ModuleGraph, names: &[&str]) {
        for name in names {
            let source = graph.add_source(format!("{name}.js"), Vec::new());
            graph.define_module(name, source).unwrap();
        }
    }

    fn names(graph: &ModuleGraph, seq: &RootSequence) -> Vec<String> {
        seq.modules
            .iter()
            .map(|id| graph.name(*id).to_string())
            .collect()
    }

    #[test]
    fn test_linear_chain_is_dependency_first() {
        let mut graph = ModuleGraph::new();
        defined(&mut graph, &["a", "b", "c"]);
        graph.connect("a", "b").unwrap();
        graph.connect("b", "c").unwrap();

        let root = graph.get("a").unwrap().unwrap();
        let seq = TopoSerializer::new(&graph, LedgerMode::PerRoot)
            .serialize(root)
            .unwrap();
        assert_eq!(names(&graph, &seq), ["c", "b", "a"]);
    }

    #[test]
    fn test_undefined_glue_is_walked_not_emitted() {
        let mut graph = ModuleGraph::new();
        defined(&mut graph, &["a", "c"]);
        graph.connect("a", "glue").unwrap();
        graph.connect("glue", "c").unwrap();

        let root = graph.get("a").unwrap().unwrap();
        let seq = TopoSerializer::new(&graph, LedgerMode::PerRoot)
            .serialize(root)
            .unwrap();
        assert_eq!(names(&graph, &seq), ["c", "a"]);
    }

    #[test]
    fn test_cycle_reports_path_and_file() {
        let mut graph = ModuleGraph::new();
        defined(&mut graph, &["a", "b", "c"]);
        graph.connect("a", "b").unwrap();
        graph.connect("b", "c").unwrap();
        graph.connect("c", "a").unwrap();

        let root = graph.get("a").unwrap().unwrap();
        let err = TopoSerializer::new(&graph, LedgerMode::PerRoot)
            .serialize(root)
            .unwrap_err();
        match err {
            Error::CyclicDependency {
                module,
                cycle,
                file,
            } => {
                assert_eq!(module, "a");
                assert_eq!(cycle, ["a", "b", "c", "a"]);
                assert_eq!(file.as_deref(), Some(std::path::Path::new("a.js")));
            }
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_shared_ledger_rolls_back_failed_root() {
        let mut graph = ModuleGraph::new();
        defined(&mut graph, &["ok", "shared", "bad", "loop"]);
        graph.connect("bad", "shared").unwrap();
        graph.connect("bad", "loop").unwrap();
        graph.connect("loop", "bad").unwrap();
        graph.connect("ok", "shared").unwrap();

        let mut serializer = TopoSerializer::new(&graph, LedgerMode::Shared);
        let bad = graph.get("bad").unwrap().unwrap();
        assert!(serializer.serialize(bad).unwrap_err().is_cycle());
        assert_eq!(serializer.ledger_len(), 0);

        let ok = graph.get("ok").unwrap().unwrap();
        let seq = serializer.serialize(ok).unwrap();
        assert_eq!(names(&graph, &seq), ["shared", "ok"]);
    }
}
