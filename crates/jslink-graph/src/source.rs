use std::borrow::Cow;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::module::ModuleId;

/// Dense index of a [`SourceUnit`] inside its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SourceId(pub(crate) u32);

impl SourceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One comment block as reported by a [`CommentScanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    /// The block is a documentation comment (`/** ... */`).
    pub is_doc_block: bool,
    /// The block carries an `@ignore` marker.
    pub has_ignore_marker: bool,
    /// Comment body with the delimiters removed.
    pub text: String,
}

impl CommentBlock {
    /// Only doc blocks without an ignore marker are evaluated.
    pub fn qualifies(&self) -> bool {
        self.is_doc_block && !self.has_ignore_marker
    }
}

/// Extracts comment blocks from raw source text.
pub trait CommentScanner {
    fn scan(&self, text: &str) -> Vec<CommentBlock>;
}

impl<F> CommentScanner for F
where
    F: Fn(&str) -> Vec<CommentBlock>,
{
    fn scan(&self, text: &str) -> Vec<CommentBlock> {
        self(text)
    }
}

/// A physical file taking part in a link.
///
/// The raw bytes are kept untouched so bundles reproduce the input exactly.
/// Comment blocks are scanned on first request and cached for the life of
/// the unit.
#[derive(Debug)]
pub struct SourceUnit {
    pub(crate) id: SourceId,
    pub(crate) path: PathBuf,
    pub(crate) raw: Vec<u8>,
    pub(crate) comments: OnceCell<Vec<CommentBlock>>,
    pub(crate) modules: Vec<ModuleId>,
    pub(crate) evaluated: bool,
}

impl SourceUnit {
    pub(crate) fn new(id: SourceId, path: PathBuf, raw: Vec<u8>) -> Self {
        Self {
            id,
            path,
            raw,
            comments: OnceCell::new(),
            modules: Vec::new(),
            evaluated: false,
        }
    }

    pub fn id(&self) -> SourceId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Content decoded as UTF-8, lossily.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }

    /// Comment blocks, scanned once with `scanner` and cached.
    pub fn comments(&self, scanner: &dyn CommentScanner) -> &[CommentBlock] {
        self.comments.get_or_init(|| scanner.scan(&self.text()))
    }

    /// Modules this unit defines, in definition order.
    pub fn modules(&self) -> &[ModuleId] {
        &self.modules
    }

    /// True once its directives have been evaluated.
    pub fn evaluated(&self) -> bool {
        self.evaluated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_comments_are_scanned_once() {
        let calls = Cell::new(0);
        let scanner = |text: &str| {
            calls.set(calls.get() + 1);
            vec![CommentBlock {
                is_doc_block: true,
                has_ignore_marker: false,
                text: text.to_string(),
            }]
        };
        let unit = SourceUnit::new(SourceId(0), PathBuf::from("a.js"), b"body".to_vec());

        assert_eq!(unit.comments(&scanner).len(), 1);
        assert_eq!(unit.comments(&scanner)[0].text, "body");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_qualifies() {
        let mut block = CommentBlock {
            is_doc_block: true,
            has_ignore_marker: false,
            text: String::new(),
        };
        assert!(block.qualifies());
        block.has_ignore_marker = true;
        assert!(!block.qualifies());
        block.has_ignore_marker = false;
        block.is_doc_block = false;
        assert!(!block.qualifies());
    }
}
