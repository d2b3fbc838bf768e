//! Load pass: walk source roots, register files and evaluate their directives.

use std::path::{Path, PathBuf};

use jslink_graph::{AnalysisReport, Error, ModuleGraph, Result, SourceId, StatCollector};
use path_clean::PathClean;
use regex::Regex;
use serde::Serialize;
use walkdir::WalkDir;

use crate::directive::DirectiveEngine;
use crate::runtime::Runtime;

/// Default include pattern, applied to file base names.
pub const DEFAULT_INCLUDE_PATTERN: &str = r".+\.js$";

/// Enumerates candidate files under a source root.
#[derive(Debug, Clone)]
pub struct FileWalker {
    include: Regex,
    exclude: Option<Regex>,
    recursive: bool,
}

impl Default for FileWalker {
    fn default() -> Self {
        Self {
            include: Regex::new(DEFAULT_INCLUDE_PATTERN).expect("default include pattern is valid"),
            exclude: None,
            recursive: false,
        }
    }
}

impl FileWalker {
    pub fn new(include: Regex, exclude: Option<Regex>, recursive: bool) -> Self {
        Self {
            include,
            exclude,
            recursive,
        }
    }

    /// Compile the patterns, reporting a bad one by the setting it came from.
    pub fn from_patterns(include: &str, exclude: Option<&str>, recursive: bool) -> Result<Self> {
        let compile = |name: &str, pattern: &str| {
            Regex::new(pattern).map_err(|e| Error::InvalidPattern {
                setting: name.to_string(),
                reason: e.to_string(),
            })
        };
        Ok(Self {
            include: compile("includePattern", include)?,
            exclude: exclude.map(|p| compile("excludePattern", p)).transpose()?,
            recursive,
        })
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    /// True if the base name passes include and exclude.
    pub fn accepts(&self, file_name: &str) -> bool {
        self.include.is_match(file_name)
            && !self.exclude.as_ref().is_some_and(|re| re.is_match(file_name))
    }

    /// Files under `root`, sorted by name. Hidden entries are skipped.
    ///
    /// Every non-directory entry seen counts towards `stats.files_total`.
    pub fn walk(&self, root: &Path, stats: &mut LoadStats) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(Error::io(
                root,
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "source path does not exist or is not readable",
                ),
            ));
        }

        let depth = if self.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(root)
            .max_depth(depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                Error::io(path, e.into())
            })?;
            if entry.file_type().is_dir() {
                continue;
            }

            stats.files_total += 1;
            let name = entry.file_name().to_string_lossy();
            if !entry.file_type().is_file() || !self.accepts(&name) {
                continue;
            }
            files.push(entry.path().clean());
        }
        Ok(files)
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// File counters for one or more load passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadStats {
    pub files_total: usize,
    pub files_processed: usize,
    pub files_ignored: usize,
}

impl LoadStats {
    fn settle(&mut self) {
        self.files_ignored = self.files_total.saturating_sub(self.files_processed);
    }
}

/// Reports [`LoadStats`] as `filesTotal`, `filesProcessed` and `filesIgnored`.
#[derive(Debug, Clone, Copy)]
pub struct LoadStatsCollector(pub LoadStats);

impl StatCollector for LoadStatsCollector {
    fn name(&self) -> &'static str {
        "load-stats"
    }

    fn collect(&self, _graph: &ModuleGraph, report: &mut AnalysisReport) {
        report.insert("filesTotal", self.0.files_total);
        report.insert("filesProcessed", self.0.files_processed);
        report.insert("filesIgnored", self.0.files_ignored);
    }
}

/// Runs load passes into a graph.
pub struct Loader<'a> {
    engine: DirectiveEngine<'a>,
    walker: &'a FileWalker,
    runtime: &'a dyn Runtime,
    stats: LoadStats,
}

impl<'a> Loader<'a> {
    pub fn new(engine: DirectiveEngine<'a>, walker: &'a FileWalker, runtime: &'a dyn Runtime) -> Self {
        Self {
            engine,
            walker,
            runtime,
            stats: LoadStats::default(),
        }
    }

    /// Walk `root` and evaluate every accepted file. Fails fast.
    pub fn load(&mut self, graph: &mut ModuleGraph, root: &Path) -> Result<()> {
        for path in self.walker.walk(root, &mut self.stats)? {
            self.load_file(graph, &path)?;
            self.stats.files_processed += 1;
        }
        self.stats.settle();
        Ok(())
    }

    /// Register one file and evaluate its directives.
    ///
    /// A file first seen through a relative `requires` already has a source
    /// unit; it is evaluated now rather than read again.
    pub fn load_file(&mut self, graph: &mut ModuleGraph, path: &Path) -> Result<SourceId> {
        let source = match graph.source_by_path(path) {
            Some(unit) => unit.id(),
            None => {
                let raw = self.runtime.read_file(path)?;
                graph.add_source(path, raw)
            }
        };

        let evaluation = self.engine.evaluate(graph, source)?;
        tracing::debug!(
            path = %path.display(),
            modules = evaluation.blocks,
            directives = evaluation.directives,
            "loaded source"
        );
        Ok(source)
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn names(files: &[PathBuf], root: &Path) -> Vec<String> {
        files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_walk_flat_by_default() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.js");
        touch(dir.path(), "a.js");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "sub/c.js");

        let mut stats = LoadStats::default();
        let files = FileWalker::default().walk(dir.path(), &mut stats).unwrap();
        assert_eq!(names(&files, dir.path()), ["a.js", "b.js"]);
        assert_eq!(stats.files_total, 3);
    }

    #[test]
    fn test_walk_recursive_skips_hidden() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.js");
        touch(dir.path(), ".hidden.js");
        touch(dir.path(), ".git/x.js");
        touch(dir.path(), "sub/c.js");

        let walker = FileWalker::from_patterns(DEFAULT_INCLUDE_PATTERN, None, true).unwrap();
        let files = walker.walk(dir.path(), &mut LoadStats::default()).unwrap();
        assert_eq!(names(&files, dir.path()), ["a.js", "sub/c.js"]);
    }

    #[test]
    fn test_exclude_matches_base_name() {
        let walker = FileWalker::from_patterns(r".+\.js$", Some(r"^test-"), false).unwrap();
        assert!(walker.accepts("app.js"));
        assert!(!walker.accepts("test-app.js"));
        assert!(!walker.accepts("app.ts"));
    }

    #[test]
    fn test_bad_pattern_is_reported() {
        let err = FileWalker::from_patterns("(", None, false).unwrap_err();
        assert!(err.to_string().contains("includePattern"));
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let err = FileWalker::default()
            .walk(Path::new("/definitely/not/here"), &mut LoadStats::default())
            .unwrap_err();
        assert!(matches!(err, Error::Io { ref source, .. } if source.kind() == std::io::ErrorKind::NotFound));
    }
}
