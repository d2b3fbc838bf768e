//! Platform runtime abstraction for jslink.
//!
//! The `Runtime` trait is the seam between the linker and the filesystem:
//! reading sources and resolving relative `requires` paths. `NativeRuntime`
//! talks to the real filesystem; `MemoryRuntime` serves a fixed file map for
//! tests and embedding.

use std::fmt;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use rustc_hash::FxHashMap;

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error on \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<RuntimeError> for jslink_graph::Error {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::FileNotFound(path) => jslink_graph::Error::io(
                path,
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ),
            RuntimeError::Io { path, source } => jslink_graph::Error::io(path, source),
        }
    }
}

/// File access used by the loader and the directive engine.
pub trait Runtime: Send + Sync + fmt::Debug {
    /// Read a file's raw bytes.
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Resolve `specifier` against the directory `from`.
    ///
    /// Returns the cleaned path of an existing file, or `FileNotFound`
    /// carrying the path that was tried.
    fn resolve(&self, specifier: &str, from: &Path) -> RuntimeResult<PathBuf>;
}

/// Runtime backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl Runtime for NativeRuntime {
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        std::fs::read(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => RuntimeError::FileNotFound(path.to_path_buf()),
            _ => RuntimeError::Io {
                path: path.to_path_buf(),
                source,
            },
        })
    }

    fn resolve(&self, specifier: &str, from: &Path) -> RuntimeResult<PathBuf> {
        let candidate = from.join(specifier).clean();
        if candidate.is_file() {
            Ok(candidate)
        } else {
            Err(RuntimeError::FileNotFound(candidate))
        }
    }
}

/// Runtime serving an in-memory file map.
///
/// Paths are cleaned on insert and lookup, so `a/./b.js` and `a/b.js` name
/// the same file.
#[derive(Debug, Clone, Default)]
pub struct MemoryRuntime {
    files: FxHashMap<PathBuf, Vec<u8>>,
}

impl MemoryRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into().clean(), content.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Runtime for MemoryRuntime {
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        self.files
            .get(&path.clean())
            .cloned()
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
    }

    fn resolve(&self, specifier: &str, from: &Path) -> RuntimeResult<PathBuf> {
        let candidate = from.join(specifier).clean();
        if self.files.contains_key(&candidate) {
            Ok(candidate)
        } else {
            Err(RuntimeError::FileNotFound(candidate))
        }
    }
}
