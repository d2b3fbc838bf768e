//! Atomic bundle writing.
//!
//! Writing happens in two phases. A pre-flight pass checks every destination
//! before anything touches the disk, so a refused overwrite leaves the output
//! directory as it was. Content is then written to a uniquely named temporary
//! file next to each destination and renamed into place once every temporary
//! file exists. Temporaries that were not renamed are removed on drop.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use jslink_graph::{Error, ModuleGraph, Result};
use path_clean::PathClean;
use tempfile::NamedTempFile;

use crate::planner::Bundle;

/// Writes planned bundles and the digraph export map.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundleWriter {
    overwrite: bool,
}

impl BundleWriter {
    pub fn new(overwrite: bool) -> Self {
        Self { overwrite }
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Fail with [`Error::OverwriteDisallowed`] on the first destination
    /// that already exists, unless overwriting is allowed.
    pub fn check<'b, I>(&self, destinations: I) -> Result<()>
    where
        I: IntoIterator<Item = &'b Path>,
    {
        if self.overwrite {
            return Ok(());
        }
        for destination in destinations {
            if destination.exists() {
                return Err(Error::OverwriteDisallowed {
                    destination: destination.to_path_buf(),
                });
            }
        }
        Ok(())
    }

    /// Concatenate each bundle's sources into its destination.
    ///
    /// Returns the written paths in bundle order.
    pub fn write(&self, graph: &ModuleGraph, bundles: &[Bundle]) -> Result<Vec<PathBuf>> {
        self.check(bundles.iter().map(|b| b.destination.as_path()))?;

        let mut operations = Vec::with_capacity(bundles.len());
        for bundle in bundles {
            let mut content = Vec::new();
            for path in &bundle.sources {
                let unit = graph.source_by_path(path).ok_or_else(|| {
                    Error::io(
                        path,
                        std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "source is not part of the graph",
                        ),
                    )
                })?;
                content.extend_from_slice(unit.raw());
            }
            operations.push((bundle.destination.clone(), content));
        }

        write_files_atomic(&operations)?;
        for (bundle, (path, content)) in bundles.iter().zip(&operations) {
            tracing::info!(
                root = %bundle.root,
                path = %path.display(),
                sources = bundle.sources.len(),
                bytes = content.len(),
                "wrote bundle"
            );
        }
        Ok(operations.into_iter().map(|(path, _)| path).collect())
    }

    /// Write the graph's digraph text to `path`.
    ///
    /// The path must not be one of the graph's inputs, and an existing file
    /// is only replaced when overwriting is allowed.
    pub fn write_digraph(&self, graph: &ModuleGraph, path: &Path, name: &str) -> Result<PathBuf> {
        let path = path.clean();
        if graph.source_by_path(&path).is_some() {
            return Err(Error::SelfOverwrite {
                module: name.to_string(),
                destination: path,
            });
        }
        self.check([path.as_path()])?;

        write_files_atomic(&[(path.clone(), graph.to_digraph(name).into_bytes())])?;
        tracing::info!(path = %path.display(), "wrote export map");
        Ok(path)
    }
}

/// Two-phase write. Nothing is renamed until every temporary is written.
fn write_files_atomic(operations: &[(PathBuf, Vec<u8>)]) -> Result<()> {
    let mut staged: Vec<(NamedTempFile, &Path)> = Vec::with_capacity(operations.len());

    // Phase 1: stage each file in its target directory
    for (target_path, content) in operations {
        let parent = target_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| Error::io(parent, e))?;
        temp.write_all(content).map_err(|e| Error::io(temp.path(), e))?;
        staged.push((temp, target_path.as_path()));
    }

    // Phase 2: rename into place
    for (temp, target_path) in staged {
        temp.persist(target_path).map_err(|e| {
            tracing::warn!(path = %target_path.display(), "rename failed, discarding staged output");
            Error::io(target_path, e.error)
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with_sources(dir: &Path) -> (ModuleGraph, Vec<PathBuf>) {
        let mut graph = ModuleGraph::new();
        let a = dir.join("a.js");
        let b = dir.join("b.js");
        graph.add_source(&a, b"var a;\n".to_vec());
        graph.add_source(&b, b"var b;\n".to_vec());
        (graph, vec![b, a])
    }

    #[test]
    fn test_write_concatenates_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let (graph, sources) = graph_with_sources(dir.path());
        let bundle = Bundle {
            root: "A".to_string(),
            target: "all.js".to_string(),
            sources,
            destination: dir.path().join("out/nested/all.js"),
        };

        let written = BundleWriter::new(false).write(&graph, &[bundle]).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(fs::read_to_string(&written[0]).unwrap(), "var b;\nvar a;\n");

        let entries: Vec<_> = fs::read_dir(dir.path().join("out/nested"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["all.js"]);
    }

    #[test]
    fn test_unrelated_tmp_sibling_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let (graph, sources) = graph_with_sources(dir.path());
        let sibling = dir.path().join("all.js.tmp");
        fs::write(&sibling, "user data").unwrap();

        let bundle = Bundle {
            root: "A".to_string(),
            target: "all.js".to_string(),
            sources,
            destination: dir.path().join("all.js"),
        };
        BundleWriter::new(false).write(&graph, &[bundle]).unwrap();

        assert_eq!(fs::read_to_string(&sibling).unwrap(), "user data");
        assert_eq!(fs::read_to_string(dir.path().join("all.js")).unwrap(), "var b;\nvar a;\n");
    }

    #[test]
    fn test_existing_destination_blocks_whole_write() {
        let dir = tempfile::tempdir().unwrap();
        let (graph, sources) = graph_with_sources(dir.path());
        let taken = dir.path().join("taken.js");
        fs::write(&taken, "keep").unwrap();

        let fresh = Bundle {
            root: "A".to_string(),
            target: "fresh.js".to_string(),
            sources: sources.clone(),
            destination: dir.path().join("fresh.js"),
        };
        let blocked = Bundle {
            root: "A".to_string(),
            target: "taken.js".to_string(),
            sources,
            destination: taken.clone(),
        };
        let bundles = [fresh, blocked];

        let err = BundleWriter::new(false).write(&graph, &bundles).unwrap_err();
        assert!(matches!(err, Error::OverwriteDisallowed { .. }));
        assert!(!dir.path().join("fresh.js").exists());
        assert_eq!(fs::read_to_string(&taken).unwrap(), "keep");

        BundleWriter::new(true).write(&graph, &bundles).unwrap();
        assert_eq!(fs::read_to_string(&taken).unwrap(), "var b;\nvar a;\n");
    }

    #[test]
    fn test_digraph_refuses_input_path() {
        let dir = tempfile::tempdir().unwrap();
        let (graph, sources) = graph_with_sources(dir.path());

        let err = BundleWriter::new(true)
            .write_digraph(&graph, &sources[0], "jslink")
            .unwrap_err();
        assert!(matches!(err, Error::SelfOverwrite { .. }));

        let dot = dir.path().join("jslink.dot");
        BundleWriter::new(false).write_digraph(&graph, &dot, "jslink").unwrap();
        assert!(fs::read_to_string(&dot).unwrap().starts_with("digraph jslink {"));
        assert!(matches!(
            BundleWriter::new(false).write_digraph(&graph, &dot, "jslink"),
            Err(Error::OverwriteDisallowed { .. })
        ));
    }
}
