//! Error taxonomy shared by every linker stage.
//!
//! Each variant carries the module name(s) involved and, where the failing
//! operation knows it, the offending file. Graph primitives do not know which
//! file triggered them, so the directive engine attaches the path afterwards
//! through [`Error::in_file`].

use std::path::{Path, PathBuf};

/// Result type alias for linker operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while loading, serializing, planning or writing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A module name (or export target) is blank or otherwise unusable.
    #[error("invalid module name {name:?}: {reason}{}", at(.file))]
    Structural {
        name: String,
        reason: String,
        file: Option<PathBuf>,
    },

    /// A module was defined twice, or one comment block declared two modules.
    #[error("duplicate definition of module `{module}`{}{}", at(.file), previously(.previous))]
    DuplicateDefinition {
        module: String,
        file: Option<PathBuf>,
        previous: Option<PathBuf>,
    },

    /// A module declared a requirement on itself.
    #[error("module `{module}` cannot depend on itself{}", at(.file))]
    SelfDependency {
        module: String,
        file: Option<PathBuf>,
    },

    /// The same requirement was declared twice for one module.
    #[error("`{requirement}` already marked as requirement of `{module}`{}", at(.file))]
    DuplicateDependency {
        module: String,
        requirement: String,
        file: Option<PathBuf>,
    },

    /// Serializing an export root walked back into a module still being visited.
    #[error("cyclic dependency discovered at `{module}`: {}{}", .cycle.join(" -> "), at(.file))]
    CyclicDependency {
        module: String,
        cycle: Vec<String>,
        file: Option<PathBuf>,
    },

    /// A relative `requires` path did not resolve to a file.
    #[error("external module file not found: \"{}\" (required as `{specifier}`){}", .resolved.display(), at(.file))]
    ExternalFileNotFound {
        specifier: String,
        resolved: PathBuf,
        file: Option<PathBuf>,
    },

    /// A bundle destination would overwrite one of the linked sources.
    #[error("bundle for `{module}` would overwrite its own input \"{}\"", .destination.display())]
    SelfOverwrite { module: String, destination: PathBuf },

    /// A destination exists and overwriting was not allowed.
    #[error("cannot overwrite \"{}\"", .destination.display())]
    OverwriteDisallowed { destination: PathBuf },

    /// Two bundles were planned onto the same destination.
    #[error("bundles for `{first}` and `{second}` both target \"{}\"", .destination.display())]
    DestinationConflict {
        destination: PathBuf,
        first: String,
        second: String,
    },

    /// An export target would place its bundle outside the output directory.
    #[error("export target \"{target}\" of `{module}` {reason}{}", at(.file))]
    InvalidTarget {
        module: String,
        target: String,
        reason: &'static str,
        file: Option<PathBuf>,
    },

    /// The directive registry was configured inconsistently.
    #[error("invalid directive `{name}`: {reason}")]
    InvalidDirective { name: String, reason: String },

    /// An include or exclude pattern failed to compile.
    #[error("invalid {setting}: {reason}")]
    InvalidPattern { setting: String, reason: String },

    /// Strict mode found modules that were required but never defined.
    #[error("{} orphan module{} detected under strict mode:\n- {}", .modules.len(), plural(.modules.len()), .modules.join("\n- "))]
    OrphanModules { modules: Vec<String> },

    /// Filesystem failure on a specific path.
    #[error("I/O error on \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn at(file: &Option<PathBuf>) -> String {
    match file {
        Some(path) => format!(" (in {})", path.display()),
        None => String::new(),
    }
}

fn previously(previous: &Option<PathBuf>) -> String {
    match previous {
        Some(path) => format!("; already defined by {}", path.display()),
        None => String::new(),
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

impl Error {
    /// Build an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the file being processed, unless the error already names one.
    pub fn in_file(mut self, path: &Path) -> Self {
        let slot = match &mut self {
            Error::Structural { file, .. }
            | Error::DuplicateDefinition { file, .. }
            | Error::SelfDependency { file, .. }
            | Error::DuplicateDependency { file, .. }
            | Error::CyclicDependency { file, .. }
            | Error::ExternalFileNotFound { file, .. }
            | Error::InvalidTarget { file, .. } => file,
            _ => return self,
        };
        if slot.is_none() {
            *slot = Some(path.to_path_buf());
        }
        self
    }

    /// The file this error is attributed to, if any.
    pub fn file(&self) -> Option<&Path> {
        match self {
            Error::Structural { file, .. }
            | Error::DuplicateDefinition { file, .. }
            | Error::SelfDependency { file, .. }
            | Error::DuplicateDependency { file, .. }
            | Error::CyclicDependency { file, .. }
            | Error::ExternalFileNotFound { file, .. }
            | Error::InvalidTarget { file, .. } => file.as_deref(),
            Error::SelfOverwrite { destination, .. }
            | Error::OverwriteDisallowed { destination }
            | Error::DestinationConflict { destination, .. } => Some(destination),
            Error::Io { path, .. } => Some(path),
            Error::InvalidDirective { .. }
            | Error::InvalidPattern { .. }
            | Error::OrphanModules { .. } => None,
        }
    }

    /// True for [`Error::CyclicDependency`].
    pub fn is_cycle(&self) -> bool {
        matches!(self, Error::CyclicDependency { .. })
    }
}
