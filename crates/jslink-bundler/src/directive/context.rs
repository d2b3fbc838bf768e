use std::path::Path;

use jslink_graph::{Error, ModuleGraph, ModuleId, Result, SourceId};
use path_clean::PathClean;

use crate::runtime::{Runtime, RuntimeError};

/// Everything a directive evaluator may touch while one source unit is
/// being evaluated.
pub struct DirectiveContext<'a> {
    pub graph: &'a mut ModuleGraph,
    pub source: SourceId,
    pub path: &'a Path,
    pub runtime: &'a dyn Runtime,
    /// Project root; discovered modules are named relative to it.
    pub root: &'a Path,
}

impl DirectiveContext<'_> {
    /// Resolve a relative `requires` path and register the file it names.
    ///
    /// The module is named by the file's path relative to the project root,
    /// with `/` separators. A newly seen file becomes a source unit defining
    /// that module; its own comments are not evaluated here.
    pub fn discover(&mut self, specifier: &str) -> Result<ModuleId> {
        let from = self.path.parent().unwrap_or(Path::new(""));
        let resolved = match self.runtime.resolve(specifier, from) {
            Ok(path) => path,
            Err(RuntimeError::FileNotFound(resolved)) => {
                return Err(Error::ExternalFileNotFound {
                    specifier: specifier.to_string(),
                    resolved,
                    file: Some(self.path.to_path_buf()),
                });
            }
            Err(other) => return Err(other.into()),
        };

        let name = module_name_for(&resolved, self.root);
        let module = self.graph.get_or_insert(&name)?;
        if !self.graph.module(module).defined() {
            let raw = self.runtime.read_file(&resolved)?;
            let source = self.graph.add_source(resolved.clone(), raw);
            self.graph.define(module, source)?;
            tracing::debug!(module = %name, path = %resolved.display(), "discovered external module");
        }
        Ok(module)
    }
}

/// True for tokens of the form `./x`, `../x` that do not end in `/`.
pub fn is_relative_specifier(token: &str) -> bool {
    (token.starts_with("./") || token.starts_with("../")) && !token.ends_with('/')
}

/// `path` relative to `root`, joined with `/`.
///
/// Paths outside `root` keep their cleaned form.
pub fn module_name_for(path: &Path, root: &Path) -> String {
    let cleaned = path.clean();
    let Ok(relative) = cleaned.strip_prefix(root.clean()) else {
        return cleaned.to_string_lossy().into_owned();
    };
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
