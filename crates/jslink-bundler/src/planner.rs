//! Bundle planning: sorted module sequences in, destination-tagged source lists out.

use std::path::{Component, Path, PathBuf};

use jslink_graph::{Error, ModuleGraph, Result, RootSequence};
use path_clean::PathClean;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// Naming policy for a root that declares no export target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultTarget {
    /// Base name of the root's own source file.
    #[default]
    SourceFile,
    /// The module name, with `.js` appended when missing.
    ModuleName,
}

/// One output file: ordered source paths plus where they go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bundle {
    /// Name of the export root this bundle was planned for.
    pub root: String,
    /// The export target name, as declared.
    pub target: String,
    /// Distinct source files, dependencies first.
    pub sources: Vec<PathBuf>,
    pub destination: PathBuf,
}

/// Turns root sequences into [`Bundle`]s under one output directory.
#[derive(Debug, Clone)]
pub struct BundlePlanner {
    destination: PathBuf,
    default_target: DefaultTarget,
}

impl BundlePlanner {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            default_target: DefaultTarget::default(),
        }
    }

    pub fn with_default_target(mut self, default_target: DefaultTarget) -> Self {
        self.default_target = default_target;
        self
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Plan every sequence, then check destinations against inputs and each other.
    pub fn plan(&self, graph: &ModuleGraph, sequences: &[RootSequence]) -> Result<Vec<Bundle>> {
        let mut bundles = Vec::new();
        for sequence in sequences {
            bundles.extend(self.plan_root(graph, sequence)?);
        }
        check_destinations(&bundles)?;
        Ok(bundles)
    }

    fn plan_root(&self, graph: &ModuleGraph, sequence: &RootSequence) -> Result<Vec<Bundle>> {
        let root = graph.module(sequence.root);
        let sources = collapse_sources(graph, sequence);
        if sources.is_empty() {
            tracing::debug!(root = %root.name(), "nothing to bundle for root");
            return Ok(Vec::new());
        }

        let targets = if root.is_export_root() {
            root.export_targets().to_vec()
        } else {
            vec![self.default_target_for(graph, sequence)]
        };

        targets
            .into_iter()
            .map(|target| {
                check_target(&target).map_err(|reason| Error::InvalidTarget {
                    module: root.name().to_string(),
                    target: target.clone(),
                    reason,
                    file: graph.source_of(sequence.root).map(|u| u.path().to_path_buf()),
                })?;
                Ok(Bundle {
                    root: root.name().to_string(),
                    destination: self.destination.join(&target).clean(),
                    target,
                    sources: sources.clone(),
                })
            })
            .collect()
    }

    fn default_target_for(&self, graph: &ModuleGraph, sequence: &RootSequence) -> String {
        let name = graph.name(sequence.root);
        let from_source = graph
            .source_of(sequence.root)
            .and_then(|unit| unit.path().file_name())
            .map(|file| file.to_string_lossy().into_owned());

        match (self.default_target, from_source) {
            (DefaultTarget::SourceFile, Some(file)) => file,
            _ if name.ends_with(".js") => name.to_string(),
            _ => format!("{name}.js"),
        }
    }
}

/// A target must stay below the output directory once joined onto it.
fn check_target(target: &str) -> std::result::Result<(), &'static str> {
    for component in Path::new(target).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => return Err("must be a relative path"),
            Component::ParentDir => return Err("must not contain `..`"),
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(())
}

/// Distinct owning source paths of a sequence, in first-seen order.
fn collapse_sources(graph: &ModuleGraph, sequence: &RootSequence) -> Vec<PathBuf> {
    let mut seen = FxHashSet::default();
    sequence
        .modules
        .iter()
        .filter_map(|id| graph.source_of(*id))
        .filter(|unit| seen.insert(unit.id()))
        .map(|unit| unit.path().to_path_buf())
        .collect()
}

fn check_destinations(bundles: &[Bundle]) -> Result<()> {
    let inputs: FxHashSet<PathBuf> = bundles
        .iter()
        .flat_map(|b| b.sources.iter().map(|p| p.clean()))
        .collect();

    let mut claimed: FxHashMap<&Path, &str> = FxHashMap::default();
    for bundle in bundles {
        if inputs.contains(&bundle.destination) {
            return Err(Error::SelfOverwrite {
                module: bundle.root.clone(),
                destination: bundle.destination.clone(),
            });
        }
        if let Some(first) = claimed.insert(bundle.destination.as_path(), bundle.root.as_str()) {
            return Err(Error::DestinationConflict {
                destination: bundle.destination.clone(),
                first: first.to_string(),
                second: bundle.root.clone(),
            });
        }
    }
    Ok(())
}
