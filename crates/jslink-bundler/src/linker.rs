//! End-to-end orchestration of one link run.
//!
//! Phases run in a fixed order: load, analyse, orphan check, export map,
//! serialize, plan, write. Only the load phase borrows the graph mutably.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use jslink_graph::{
    AnalysisReport, CommentScanner, Error, LedgerMode, ModuleGraph, Result, RootSequence,
};
use path_clean::PathClean;

use crate::directive::{DirectiveEngine, DirectiveRegistry};
use crate::loader::{DEFAULT_INCLUDE_PATTERN, FileWalker, LoadStats, LoadStatsCollector, Loader};
use crate::planner::{Bundle, BundlePlanner};
use crate::runtime::{NativeRuntime, Runtime};
use crate::scanner::JsCommentScanner;
use crate::writer::BundleWriter;

/// Name used for the digraph in export maps.
pub const DIGRAPH_NAME: &str = "jslink";

/// Options for a [`Linker`] run.
#[derive(Debug, Clone)]
pub struct LinkOptions {
    /// Files or directories to load.
    pub sources: Vec<PathBuf>,
    pub recursive: bool,
    pub include_pattern: String,
    pub exclude_pattern: Option<String>,
    /// Output directory for bundles.
    pub destination: PathBuf,
    /// Orphan modules and cycles abort the run.
    pub strict: bool,
    pub overwrite: bool,
    /// Where to write the digraph, if anywhere.
    pub export_map: Option<PathBuf>,
    /// Plan bundles without writing them.
    pub dry_run: bool,
    pub ledger_mode: LedgerMode,
    /// Discovered modules are named relative to this directory.
    pub root: PathBuf,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            recursive: false,
            include_pattern: DEFAULT_INCLUDE_PATTERN.to_string(),
            exclude_pattern: None,
            destination: PathBuf::from("out"),
            strict: true,
            overwrite: false,
            export_map: None,
            dry_run: false,
            ledger_mode: LedgerMode::default(),
            root: PathBuf::from("."),
        }
    }
}

/// An export root left out of the run because it could not be serialized.
#[derive(Debug)]
pub struct SkippedRoot {
    pub root: String,
    pub error: Error,
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct LinkReport {
    pub graph: ModuleGraph,
    pub analysis: AnalysisReport,
    pub stats: LoadStats,
    pub bundles: Vec<Bundle>,
    /// Bundle files actually written; empty on a dry run.
    pub written: Vec<PathBuf>,
    pub export_map: Option<PathBuf>,
    pub skipped: Vec<SkippedRoot>,
}

impl LinkReport {
    /// `N files, M modules processed for K export directives.`
    pub fn summary(&self) -> String {
        format!(
            "{}, {} processed for {}.",
            plural(self.stats.files_processed, "file"),
            plural(self.analysis.defined_modules.len(), "module"),
            plural(self.analysis.number_of_exports, "export directive"),
        )
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Runs the load, analyse, serialize, plan and write phases.
pub struct Linker {
    options: LinkOptions,
    runtime: Arc<dyn Runtime>,
    registry: DirectiveRegistry,
    scanner: Box<dyn CommentScanner + Send + Sync>,
}

impl std::fmt::Debug for Linker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Linker")
            .field("options", &self.options)
            .field("runtime", &self.runtime)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Linker {
    /// A linker over the real filesystem with the standard directives.
    pub fn new(options: LinkOptions) -> Self {
        Self {
            options,
            runtime: Arc::new(NativeRuntime),
            registry: DirectiveRegistry::standard(),
            scanner: Box::new(JsCommentScanner::new()),
        }
    }

    pub fn with_runtime(mut self, runtime: Arc<dyn Runtime>) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_registry(mut self, registry: DirectiveRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_scanner(mut self, scanner: impl CommentScanner + Send + Sync + 'static) -> Self {
        self.scanner = Box::new(scanner);
        self
    }

    pub fn options(&self) -> &LinkOptions {
        &self.options
    }

    /// Run the load pass over every source root.
    ///
    /// The returned graph already carries a [`LoadStatsCollector`].
    pub fn load(&self) -> Result<(ModuleGraph, LoadStats)> {
        let walker = FileWalker::from_patterns(
            &self.options.include_pattern,
            self.options.exclude_pattern.as_deref(),
            self.options.recursive,
        )?;
        let root = self.options.root.clean();
        let runtime = self.runtime.as_ref();
        let engine = DirectiveEngine::new(&self.registry, self.scanner.as_ref(), runtime, &root);
        let mut loader = Loader::new(engine, &walker, runtime);

        let mut graph = ModuleGraph::new();
        for source in &self.options.sources {
            let source = resolve_against(&root, source);
            tracing::debug!(path = %source.display(), "loading source root");
            loader.load(&mut graph, &source)?;
        }

        let stats = loader.stats();
        graph.add_collector(LoadStatsCollector(stats));
        Ok((graph, stats))
    }

    /// Load, then analyse and apply the strict orphan check.
    pub fn check(&self) -> Result<(ModuleGraph, AnalysisReport, LoadStats)> {
        let (graph, stats) = self.load()?;
        let analysis = graph.analyse();
        if self.options.strict && analysis.has_orphans() {
            return Err(Error::OrphanModules {
                modules: analysis.orphan_modules.clone(),
            });
        }
        Ok((graph, analysis, stats))
    }

    /// Run every phase.
    pub fn link(&self) -> Result<LinkReport> {
        let (graph, analysis, stats) = self.check()?;
        let root = self.options.root.clean();

        let writer = BundleWriter::new(self.options.overwrite);
        let export_map = match &self.options.export_map {
            Some(path) => Some(writer.write_digraph(
                &graph,
                &resolve_against(&root, path),
                DIGRAPH_NAME,
            )?),
            None => None,
        };

        let (sequences, skipped) = self.serialize(&graph)?;
        let planner = BundlePlanner::new(resolve_against(&root, &self.options.destination));
        let bundles = planner.plan(&graph, &sequences)?;

        let written = if self.options.dry_run {
            tracing::info!(bundles = bundles.len(), "dry run, nothing written");
            Vec::new()
        } else {
            writer.write(&graph, &bundles)?
        };

        Ok(LinkReport {
            graph,
            analysis,
            stats,
            bundles,
            written,
            export_map,
            skipped,
        })
    }

    /// Serialize every export root. A failing root aborts in strict mode and
    /// is skipped with a warning otherwise.
    fn serialize(&self, graph: &ModuleGraph) -> Result<(Vec<RootSequence>, Vec<SkippedRoot>)> {
        let mut sequences = Vec::new();
        let mut skipped = Vec::new();
        let roots: Vec<_> = graph.export_roots().collect();

        for (root, result) in roots
            .iter()
            .zip(graph.serialize_all(roots.iter().copied(), self.options.ledger_mode))
        {
            match result {
                Ok(sequence) => sequences.push(sequence),
                Err(error) if !self.options.strict => {
                    tracing::warn!(root = %graph.name(*root), %error, "skipping export root");
                    skipped.push(SkippedRoot {
                        root: graph.name(*root).to_string(),
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }
        Ok((sequences, skipped))
    }
}

/// `path` as-is when absolute, otherwise joined onto `root`.
fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.clean()
    } else {
        root.join(path).clean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_pluralizes() {
        let mut analysis = AnalysisReport::default();
        analysis.defined_modules = vec!["X".into(), "Y".into()];
        analysis.number_of_exports = 1;
        let report = LinkReport {
            graph: ModuleGraph::new(),
            analysis,
            stats: LoadStats {
                files_total: 2,
                files_processed: 2,
                files_ignored: 0,
            },
            bundles: Vec::new(),
            written: Vec::new(),
            export_map: None,
            skipped: Vec::new(),
        };
        assert_eq!(report.summary(), "2 files, 2 modules processed for 1 export directive.");
    }

    #[test]
    fn test_resolve_against_root() {
        assert_eq!(resolve_against(Path::new("/p"), Path::new("out")), Path::new("/p/out"));
        assert_eq!(resolve_against(Path::new("/p"), Path::new("/abs/./x")), Path::new("/abs/x"));
    }
}
