//! String literal decoding and interpolation
//!
//! Quoted strings are decoded with PHP escape rules. Interpolated strings
//! and heredocs are split into text parts and expression parts; the text
//! between expressions is taken from the source by byte offset, so every
//! grammar shape of the string's children is handled the same way.

use super::{children, named_children, span, Lowerer};
use crate::ast::{Node, NodeKind, StringKind, VariableName};
use crate::error::Result;
use tree_sitter::Node as TsNode;

/// Child kinds that are literal text rather than interpolated expressions
const TEXT_KINDS: &[&str] = &[
    "string_content",
    "string_value",
    "escape_sequence",
    "text",
    "heredoc_start",
    "heredoc_end",
    "nowdoc_string",
    "nowdoc_body",
    "comment",
];

/// Decode the body of a single-quoted string
pub fn decode_single(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some(&next) if next == '\\' || next == '\'' => {
                    out.push(next);
                    chars.next();
                }
                _ => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Decode escape sequences of a double-quoted, heredoc or backtick body.
///
/// `quote` is the delimiter that may be escaped; heredocs have none.
pub fn decode_double(raw: &str, quote: Option<char>) -> String {
    let bytes = raw.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' || i + 1 >= bytes.len() {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        let next = bytes[i + 1];
        let simple = match next {
            b'n' => Some(b'\n'),
            b't' => Some(b'\t'),
            b'r' => Some(b'\r'),
            b'v' => Some(0x0B),
            b'e' => Some(0x1B),
            b'f' => Some(0x0C),
            b'\\' => Some(b'\\'),
            b'$' => Some(b'$'),
            c if quote.map_or(false, |q| q as u32 == c as u32) => Some(c),
            _ => None,
        };
        if let Some(byte) = simple {
            out.push(byte);
            i += 2;
            continue;
        }

        match next {
            b'0'..=b'7' => {
                let digits = take_while(&bytes[i + 1..], 3, |b| (b'0'..=b'7').contains(&b));
                let value = u32::from_str_radix(digits, 8).unwrap_or(0);
                out.push((value & 0xFF) as u8);
                i += 1 + digits.len();
            }
            b'x' => {
                let digits = take_while(&bytes[i + 2..], 2, |b| b.is_ascii_hexdigit());
                if digits.is_empty() {
                    out.extend_from_slice(b"\\x");
                    i += 2;
                } else {
                    out.push(u8::from_str_radix(digits, 16).unwrap_or(0));
                    i += 2 + digits.len();
                }
            }
            b'u' if bytes.get(i + 2) == Some(&b'{') => {
                let rest = &raw[i + 3..];
                let decoded = rest
                    .find('}')
                    .and_then(|end| u32::from_str_radix(&rest[..end], 16).ok().map(|v| (v, end)))
                    .and_then(|(v, end)| char::from_u32(v).map(|c| (c, end)));
                match decoded {
                    Some((c, end)) => {
                        let mut buf = [0u8; 4];
                        out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                        i += 3 + end + 1;
                    }
                    None => {
                        out.push(b'\\');
                        i += 1;
                    }
                }
            }
            _ => {
                out.push(b'\\');
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn take_while(bytes: &[u8], max: usize, pred: impl Fn(u8) -> bool) -> &str {
    let len = bytes
        .iter()
        .take(max)
        .take_while(|&&b| pred(b))
        .count();
    std::str::from_utf8(&bytes[..len]).unwrap_or("")
}

/// Remove up to `indent` spaces or tabs from the start of every line.
///
/// With `at_line_start` false the first line continues an earlier part and
/// keeps its leading whitespace.
pub fn strip_indent(text: &str, indent: usize, at_line_start: bool) -> String {
    if indent == 0 {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split_inclusive('\n').enumerate() {
        if i == 0 && !at_line_start {
            out.push_str(line);
            continue;
        }
        let strip = line
            .bytes()
            .take(indent)
            .take_while(|b| *b == b' ' || *b == b'\t')
            .count();
        out.push_str(&line[strip..]);
    }
    out
}

/// Label and body bounds of a heredoc or nowdoc, as offsets into its text
struct DocBounds {
    label: String,
    body_start: usize,
    body_end: usize,
    indent: usize,
}

fn doc_bounds(text: &str) -> Option<DocBounds> {
    let opener = text.find("<<<")?;
    let first_nl = text.find('\n')?;
    let label = text
        .get(opener + 3..first_nl)?
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
        .to_string();
    let last_nl = text.rfind('\n')?;
    let closing = &text[last_nl + 1..];
    let indent = closing.len() - closing.trim_start_matches(|c: char| c == ' ' || c == '\t').len();

    let body_start = first_nl + 1;
    let body_end = if last_nl > first_nl {
        if text[..last_nl].ends_with('\r') {
            last_nl - 1
        } else {
            last_nl
        }
    } else {
        body_start
    };
    Some(DocBounds {
        label,
        body_start,
        body_end: body_end.max(body_start),
        indent,
    })
}

impl<'s> Lowerer<'s> {
    /// `'...'` or `"..."`, with an optional `b` prefix
    pub(super) fn lower_quoted(&mut self, node: TsNode<'_>) -> Result<Node> {
        let text = self.text(node);
        let prefix = usize::from(text.starts_with(|c: char| c == 'b' || c == 'B'));
        let delimiter = text[prefix..].chars().next();
        if text.len() < prefix + 2 {
            return Ok(self.unsupported(node));
        }
        let start = node.start_byte() + prefix + 1;
        let end = node.end_byte() - 1;

        match delimiter {
            Some('\'') => Ok(Node::new(NodeKind::String {
                value: decode_single(self.slice(start, end)),
                kind: StringKind::SingleQuoted,
                doc_label: None,
            })
            .with_span(span(node))),
            Some('"') => {
                let parts = self.interpolated_parts(node, start, end, Some('"'), 0)?;
                Ok(string_node(parts, StringKind::DoubleQuoted, None).with_span(span(node)))
            }
            _ => Ok(self.unsupported(node)),
        }
    }

    pub(super) fn lower_heredoc(&mut self, node: TsNode<'_>, nowdoc: bool) -> Result<Node> {
        let text = self.text(node);
        let bounds = match doc_bounds(text) {
            Some(bounds) => bounds,
            None => return Ok(self.unsupported(node)),
        };
        let base = node.start_byte();
        let (start, end) = (base + bounds.body_start, base + bounds.body_end);

        let node_out = if nowdoc {
            Node::new(NodeKind::String {
                value: strip_indent(self.slice(start, end), bounds.indent, true),
                kind: StringKind::Nowdoc,
                doc_label: Some(bounds.label),
            })
        } else {
            let parts = self.interpolated_parts(node, start, end, None, bounds.indent)?;
            string_node(parts, StringKind::Heredoc, Some(bounds.label))
        };
        Ok(node_out.with_span(span(node)))
    }

    pub(super) fn lower_shell_exec(&mut self, node: TsNode<'_>) -> Result<Node> {
        if node.end_byte() < node.start_byte() + 2 {
            return Ok(self.unsupported(node));
        }
        let parts =
            self.interpolated_parts(node, node.start_byte() + 1, node.end_byte() - 1, Some('`'), 0)?;
        Ok(Node::new(NodeKind::ShellExec(parts)).with_span(span(node)))
    }

    /// Split `start..end` of a string into text and expression parts
    fn interpolated_parts(
        &mut self,
        node: TsNode<'_>,
        start: usize,
        end: usize,
        quote: Option<char>,
        indent: usize,
    ) -> Result<Vec<Node>> {
        let mut parts = Vec::new();
        let mut pos = start;
        for child in interpolations(node) {
            let (child_start, child_end) = (child.start_byte(), child.end_byte());
            if child_start < pos || child_end > end {
                continue;
            }
            let before = self.slice(pos, child_start);
            let child_text = self.text(child);

            let (gap_end, resume, expr) = if child_text.starts_with("${") {
                (child_start, child_end, self.dollar_brace(child)?)
            } else if before.ends_with("${") {
                let close = self.closing_brace(child_end, end);
                let expr = if child.kind() == "name" {
                    Node::variable(child_text).with_span(span(child))
                } else {
                    self.lower_expr(child)?
                };
                (child_start - 2, close, expr)
            } else if before.ends_with('{') && child_text.starts_with('$') {
                let close = self.closing_brace(child_end, end);
                (child_start - 1, close, self.lower_expr(child)?)
            } else {
                (child_start, child_end, self.simple_interpolation(child)?)
            };

            self.push_text(&mut parts, pos, gap_end, quote, indent);
            parts.push(expr);
            pos = resume;
        }
        self.push_text(&mut parts, pos, end, quote, indent);
        Ok(parts)
    }

    fn push_text(&self, parts: &mut Vec<Node>, start: usize, end: usize, quote: Option<char>, indent: usize) {
        if start >= end {
            return;
        }
        let raw = self.slice(start, end);
        let at_line_start = start == 0 || self.source.as_bytes().get(start - 1) == Some(&b'\n');
        let unindented = strip_indent(raw, indent, at_line_start);
        let text = decode_double(&unindented, quote);
        if !text.is_empty() {
            parts.push(Node::new(NodeKind::EncapsedStringPart(text)));
        }
    }

    /// Offset after the `}` closing a braced interpolation
    fn closing_brace(&self, from: usize, limit: usize) -> usize {
        let rest = self.slice(from, limit);
        match rest.find('}') {
            Some(at) if rest[..at].trim().is_empty() => from + at + 1,
            _ => from,
        }
    }

    /// `${name}` and `${expr}` as one node
    fn dollar_brace(&mut self, node: TsNode<'_>) -> Result<Node> {
        let text = self.text(node);
        let inner = text
            .trim_start_matches("${")
            .trim_end_matches('}')
            .trim();
        if !inner.is_empty() && inner.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Ok(Node::variable(inner).with_span(span(node)));
        }
        match named_children(node).into_iter().next() {
            Some(expr) => Ok(Node::new(NodeKind::Variable(VariableName::Dynamic(Box::new(
                self.lower_expr(expr)?,
            ))))
            .with_span(span(node))),
            None => Ok(self.unsupported(node)),
        }
    }

    /// `$a[key]` inside a string indexes with the literal key
    fn simple_interpolation(&mut self, node: TsNode<'_>) -> Result<Node> {
        if node.kind() == "subscript_expression" {
            if let [var, key] = named_children(node).as_slice() {
                if key.kind() == "name" {
                    return Ok(Node::new(NodeKind::ArrayDimFetch {
                        var: Box::new(self.lower_expr(*var)?),
                        dim: Some(Box::new(Node::new(NodeKind::String {
                            value: self.text(*key).to_string(),
                            kind: StringKind::SingleQuoted,
                            doc_label: None,
                        }))),
                    })
                    .with_span(span(node)));
                }
            }
        }
        self.lower_expr(node)
    }
}

/// Expression children of a string, in source order
fn interpolations<'t>(node: TsNode<'t>) -> Vec<TsNode<'t>> {
    let mut found = Vec::new();
    for child in children(node) {
        if !child.is_named() || TEXT_KINDS.contains(&child.kind()) {
            continue;
        }
        if child.kind() == "heredoc_body" {
            found.extend(interpolations(child));
        } else {
            found.push(child);
        }
    }
    found
}

/// A string with no expression parts is a plain scalar
fn string_node(parts: Vec<Node>, kind: StringKind, doc_label: Option<String>) -> Node {
    let plain = parts
        .iter()
        .all(|p| matches!(p.kind, NodeKind::EncapsedStringPart(_)));
    if plain {
        let value = parts
            .into_iter()
            .filter_map(|p| match p.kind {
                NodeKind::EncapsedStringPart(text) => Some(text),
                _ => None,
            })
            .collect::<String>();
        Node::new(NodeKind::String {
            value,
            kind,
            doc_label,
        })
    } else {
        Node::new(NodeKind::Encapsed {
            parts,
            kind,
            doc_label,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single() {
        assert_eq!(decode_single(r"it\'s a \\ and \n"), "it's a \\ and \\n");
    }

    #[test]
    fn test_decode_double() {
        assert_eq!(decode_double(r#"a\tb\n\"\$"#, Some('"')), "a\tb\n\"$");
        assert_eq!(decode_double(r"\x41\101\u{1F600}", Some('"')), "AA\u{1F600}");
        assert_eq!(decode_double(r#"keep \" and \q"#, None), "keep \\\" and \\q");
    }

    #[test]
    fn test_strip_indent() {
        assert_eq!(strip_indent("    a\n      b\n", 4, true), "a\n  b\n");
        assert_eq!(strip_indent("  x\n    y", 4, false), "  x\ny");
    }

    #[test]
    fn test_doc_bounds() {
        let text = "<<<'EOT'\n    one\n    two\n    EOT";
        let bounds = doc_bounds(text).unwrap();
        assert_eq!(bounds.label, "EOT");
        assert_eq!(bounds.indent, 4);
        assert_eq!(&text[bounds.body_start..bounds.body_end], "    one\n    two");
    }

    #[test]
    fn test_empty_heredoc_bounds() {
        let text = "<<<EOT\nEOT";
        let bounds = doc_bounds(text).unwrap();
        assert_eq!(bounds.body_start, bounds.body_end);
    }
}
