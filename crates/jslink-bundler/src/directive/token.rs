//! Directive tokenizer.
//!
//! A directive is `@` followed by a tag name. Its value starts after the tag
//! and runs to the end of the line or to the next `@` on that line,
//! whichever comes first. Values are trimmed and never cross a line break.

/// One `@tag value` occurrence inside a comment block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveToken {
    pub tag: String,
    pub value: String,
    /// Zero-based line within the block.
    pub line: usize,
}

/// Matches tag names case-insensitively, with optional aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectivePattern {
    tag: String,
    aliases: Vec<String>,
}

impl DirectivePattern {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            aliases: Vec::new(),
        }
    }

    /// Also accept `alias` as this directive.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn matches(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(tag))
    }

    /// True if any tag this pattern accepts is also accepted by `other`.
    pub fn overlaps(&self, other: &DirectivePattern) -> bool {
        std::iter::once(&self.tag)
            .chain(&self.aliases)
            .any(|tag| other.matches(tag))
    }
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Split a comment body into directive tokens, in source order.
pub fn tokenize(text: &str) -> Vec<DirectiveToken> {
    let mut tokens = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let mut rest = line;
        while let Some(at) = rest.find('@') {
            let after = &rest[at + 1..];
            let tag_len = after
                .char_indices()
                .find(|(_, c)| !is_tag_char(*c))
                .map_or(after.len(), |(i, _)| i);

            if tag_len == 0 || !after.starts_with(|c: char| c.is_ascii_alphabetic()) {
                rest = after;
                continue;
            }

            let tag = &after[..tag_len];
            let tail = &after[tag_len..];
            let value_end = tail.find('@').unwrap_or(tail.len());
            tokens.push(DirectiveToken {
                tag: tag.to_string(),
                value: tail[..value_end].trim().to_string(),
                line: line_no,
            });
            rest = &tail[value_end..];
        }
    }

    tokens
}
