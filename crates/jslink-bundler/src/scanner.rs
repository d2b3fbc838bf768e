//! JavaScript comment scanner.
//!
//! A small lexer that only tells code, strings and comments apart. It knows
//! enough about string and template literals that `/*` inside a string is not
//! taken for a comment. Regular expression literals are not recognised.

use jslink_graph::{CommentBlock, CommentScanner};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsCommentScanner {
    /// Also report `//` comments (never doc blocks).
    pub include_line_comments: bool,
}

impl JsCommentScanner {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Clone, Copy)]
enum Mode {
    Code,
    /// Inside `${ ... }`; the counter tracks nested braces.
    Interpolation(usize),
}

impl CommentScanner for JsCommentScanner {
    fn scan(&self, text: &str) -> Vec<CommentBlock> {
        let bytes = text.as_bytes();
        let mut blocks = Vec::new();
        let mut modes = vec![Mode::Code];
        let mut i = 0;

        while i < bytes.len() {
            match (bytes[i], bytes.get(i + 1).copied()) {
                (b'/', Some(b'*')) => {
                    let start = i + 2;
                    let end = find(bytes, start, b"*/").unwrap_or(bytes.len());
                    blocks.push(block(&text[start..end]));
                    i = (end + 2).min(bytes.len());
                }
                (b'/', Some(b'/')) => {
                    let start = i + 2;
                    let end = find(bytes, start, b"\n").unwrap_or(bytes.len());
                    if self.include_line_comments {
                        blocks.push(CommentBlock {
                            is_doc_block: false,
                            has_ignore_marker: false,
                            text: text[start..end].to_string(),
                        });
                    }
                    i = end;
                }
                (quote @ (b'\'' | b'"'), _) => i = skip_string(bytes, i + 1, quote),
                (b'`', _) => {
                    i = skip_template(bytes, i + 1);
                    if bytes.get(i.wrapping_sub(2)) == Some(&b'$') && bytes[i - 1] == b'{' {
                        modes.push(Mode::Interpolation(0));
                    }
                }
                (b'{', _) => {
                    if let Some(Mode::Interpolation(depth)) = modes.last_mut() {
                        *depth += 1;
                    }
                    i += 1;
                }
                (b'}', _) => {
                    match modes.last_mut() {
                        Some(Mode::Interpolation(0)) => {
                            modes.pop();
                            i = skip_template(bytes, i + 1);
                            if bytes.get(i.wrapping_sub(2)) == Some(&b'$') && bytes[i - 1] == b'{' {
                                modes.push(Mode::Interpolation(0));
                            }
                            continue;
                        }
                        Some(Mode::Interpolation(depth)) => *depth -= 1,
                        _ => {}
                    }
                    i += 1;
                }
                _ => i += 1,
            }
        }

        blocks
    }
}

fn block(body: &str) -> CommentBlock {
    CommentBlock {
        is_doc_block: body.starts_with('*'),
        has_ignore_marker: has_ignore_marker(body),
        text: body.to_string(),
    }
}

/// `@ignore` followed by whitespace, another `@`, or the end of the block.
fn has_ignore_marker(body: &str) -> bool {
    const MARKER: &[u8] = b"@ignore";
    let bytes = body.as_bytes();
    bytes.windows(MARKER.len()).enumerate().any(|(at, window)| {
        window.eq_ignore_ascii_case(MARKER)
            && match bytes.get(at + MARKER.len()) {
                None => true,
                Some(next) => next.is_ascii_whitespace() || *next == b'@',
            }
    })
}

fn find(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

/// Index just past the closing quote. Unterminated strings end at the line.
fn skip_string(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Index just past the closing backtick, or just past a `${` opener.
fn skip_template(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => return i + 1,
            b'$' if bytes.get(i + 1) == Some(&b'{') => return i + 2,
            _ => i += 1,
        }
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<CommentBlock> {
        JsCommentScanner::new().scan(text)
    }

    #[test]
    fn test_doc_and_plain_blocks() {
        let blocks = scan("/** @module A */\nvar a = 1; /* plain */");
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].is_doc_block);
        assert_eq!(blocks[0].text, "* @module A ");
        assert!(!blocks[1].is_doc_block);
    }

    #[test]
    fn test_empty_block_is_not_doc() {
        let blocks = scan("/**/");
        assert_eq!(blocks.len(), 1);
        assert!(!blocks[0].is_doc_block);
    }

    #[test]
    fn test_comment_markers_in_strings_are_ignored() {
        let src = r#"var s = "/** @module Fake */"; var t = '/* no */'; /** @module Real */"#;
        let blocks = scan(src);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].text.contains("Real"));
    }

    #[test]
    fn test_template_literals_and_interpolation() {
        let src = "var t = `/** @module Fake */ ${ {a: 1}.a /** @module Inner */ } tail /* x */`;\n/** @module After */";
        let blocks = scan(src);
        let texts: Vec<_> = blocks.iter().map(|b| b.text.trim()).collect();
        assert_eq!(texts, ["* @module Inner", "* @module After"]);
    }

    #[test]
    fn test_ignore_marker_variants() {
        assert!(scan("/** @module A\n * @ignore\n */")[0].has_ignore_marker);
        assert!(scan("/** @module A @ignore@x */")[0].has_ignore_marker);
        assert!(scan("/** @IGNORE */")[0].has_ignore_marker);
        assert!(scan("/** @module A @ignore")[0].has_ignore_marker);
        assert!(!scan("/** @module A @ignored */")[0].has_ignore_marker);
    }

    #[test]
    fn test_line_comments_are_optional() {
        let src = "// @module A\n/** @module B */";
        assert_eq!(scan(src).len(), 1);

        let scanner = JsCommentScanner {
            include_line_comments: true,
        };
        let blocks = scanner.scan(src);
        assert_eq!(blocks.len(), 2);
        assert!(!blocks[0].qualifies());
    }
}
