//! Shared test utilities for jslink-bundler tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use jslink_bundler::{LinkOptions, MemoryRuntime};
use tempfile::TempDir;

/// Create a project directory populated with `files` (relative path, content).
pub fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    for (rel, content) in files {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(&path, content).expect("write fixture");
    }
    dir
}

/// Link options rooted at `root`, loading `src` and writing to `out`.
pub fn options(root: &Path) -> LinkOptions {
    LinkOptions {
        sources: vec![PathBuf::from("src")],
        destination: PathBuf::from("out"),
        root: root.to_path_buf(),
        ..LinkOptions::default()
    }
}

/// In-memory runtime rooted at `/p`.
pub fn memory(files: &[(&str, &str)]) -> MemoryRuntime {
    files.iter().fold(MemoryRuntime::new(), |runtime, (rel, content)| {
        runtime.with_file(Path::new("/p").join(rel), *content)
    })
}

pub fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).expect("read output")
}
