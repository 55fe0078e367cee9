//! Literal formatting: strings, interpolation and array literals

use super::{Emitter, CANNOT_CONVERT};
use crate::ast::{Node, NodeKind, StringKind};
use crate::error::Result;

const MAP_LITERAL: &str = "map[string]interface{}";
const LIST_LITERAL: &str = "[]interface{}";

/// Escape text for a double-quoted target string
pub fn escape_go(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0B}' => out.push_str("\\v"),
            '\u{0C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 || c as u32 == 0x7F => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

/// Double-quoted, escaped target string
pub fn quote(text: &str) -> String {
    format!("\"{}\"", escape_go(text))
}

/// Whether `text` has a line that would close a block string labelled `label`.
///
/// With `at_start` false the text continues an earlier part, so its first
/// line does not begin a source line.
pub fn contains_end_label(text: &str, label: &str, at_start: bool) -> bool {
    if label.is_empty() || !text.contains(label) {
        return false;
    }
    text.split(|c: char| c == '\n' || c == '\r')
        .enumerate()
        .filter(|(i, _)| at_start || *i > 0)
        .any(|(_, line)| {
            line.trim_start_matches(|c: char| c == ' ' || c == '\t')
                .strip_prefix(label)
                .map_or(false, |after| {
                    !after
                        .chars()
                        .next()
                        .map_or(false, |c| c.is_alphanumeric() || c == '_')
                })
        })
}

/// Block strings become raw literals unless the raw form would be cut short
fn can_render_raw(text: &str, label: &str, at_start: bool) -> bool {
    !text.contains('`') && !contains_end_label(text, label, at_start)
}

/// Render a string literal without interpolation
pub fn render_string(value: &str, kind: StringKind, doc_label: Option<&str>) -> String {
    if kind.is_block() {
        if let Some(label) = doc_label {
            if value.is_empty() {
                return "``".to_string();
            }
            if can_render_raw(value, label, true) {
                return format!("`\n{}\n`", value);
            }
        }
    }
    quote(value)
}

impl Emitter {
    pub(crate) fn p_encapsed(
        &mut self,
        parts: &[Node],
        kind: StringKind,
        doc_label: Option<&str>,
    ) -> Result<String> {
        if kind == StringKind::Heredoc {
            if let Some(label) = doc_label {
                let raw_safe = parts.iter().enumerate().all(|(i, part)| match &part.kind {
                    NodeKind::EncapsedStringPart(text) => can_render_raw(text, label, i == 0),
                    _ => true,
                });
                if raw_safe {
                    return Ok(format!("`\n{}\n`", self.encaps_list(parts, None)?));
                }
            }
        }
        Ok(format!("\"{}\"", self.encaps_list(parts, Some('"'))?))
    }

    /// Interpolated parts; text is escaped for `quote` unless it is `None`
    pub(crate) fn encaps_list(&mut self, parts: &[Node], quote: Option<char>) -> Result<String> {
        let mut out = String::new();
        for part in parts {
            match &part.kind {
                NodeKind::EncapsedStringPart(text) => match quote {
                    Some('"') => out.push_str(&escape_go(text)),
                    Some(q) => out.push_str(&escape_quote_char(text, q)),
                    None => out.push_str(text),
                },
                _ => {
                    out.push('{');
                    out.push_str(&self.render(part)?);
                    out.push('}');
                }
            }
        }
        Ok(out)
    }

    /// Array literal: a map when any entry has a key, a list otherwise
    pub(crate) fn p_array(&mut self, items: &[Node]) -> Result<String> {
        if items.is_empty() {
            return Ok(format!("{}{{}}", LIST_LITERAL));
        }

        let is_map = items
            .iter()
            .any(|item| matches!(&item.kind, NodeKind::ArrayItem { key: Some(_), .. }));
        let literal_type = if is_map { MAP_LITERAL } else { LIST_LITERAL };

        let lines = self.indented(|this| {
            let mut lines = Vec::with_capacity(items.len());
            let mut next_index: i64 = 0;
            for item in items {
                if !item.comments.is_empty() {
                    lines.push(format!(
                        "{}{}",
                        " ".repeat(this.indent_level()),
                        this.render_comments(&item.comments)
                    ));
                }

                let rendered = match &item.kind {
                    NodeKind::ArrayItem {
                        key: None,
                        unpack: false,
                        ..
                    } if is_map => {
                        let index = next_index;
                        next_index += 1;
                        format!("{} /* implicit key */ : {}", index, this.render(item)?)
                    }
                    NodeKind::ArrayItem { key: Some(key), .. } => {
                        if let Some(index) = integer_key(key) {
                            if index >= next_index {
                                next_index = index.saturating_add(1);
                            }
                        }
                        this.render(item)?
                    }
                    _ => this.render(item)?,
                };
                lines.push(format!("{}{},", " ".repeat(this.indent_level()), rendered));
            }
            Ok(lines)
        })?;

        Ok(format!(
            "{}{{\n{}{}}}",
            literal_type,
            lines.join("\n"),
            self.nl()
        ))
    }

    pub(crate) fn p_array_item(
        &mut self,
        key: Option<&Node>,
        value: &Node,
        by_ref: bool,
        unpack: bool,
    ) -> Result<String> {
        let mut out = String::new();
        if let Some(key) = key {
            out.push_str(&self.render(key)?);
            out.push_str(" : ");
        }
        if by_ref {
            out.push('&');
        }
        out.push_str(&self.render(value)?);
        if unpack {
            out.push_str("...");
            out.push_str(CANNOT_CONVERT);
        }
        Ok(out)
    }
}

fn escape_quote_char(text: &str, quote: char) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' || c == quote {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Integer value of a key the way PHP normalises array keys
fn integer_key(key: &Node) -> Option<i64> {
    match &key.kind {
        NodeKind::LNumber(raw) => parse_php_int(raw),
        NodeKind::String { value, .. } => {
            let digits = value.strip_prefix('-').unwrap_or(value);
            let canonical = !digits.is_empty()
                && digits.chars().all(|c| c.is_ascii_digit())
                && (digits == "0" || !digits.starts_with('0'))
                && value != "-0";
            if canonical {
                value.parse().ok()
            } else {
                None
            }
        }
        _ => None,
    }
}

fn parse_php_int(raw: &str) -> Option<i64> {
    let cleaned = raw.replace('_', "").to_ascii_lowercase();
    if let Some(hex) = cleaned.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = cleaned.strip_prefix("0b") {
        i64::from_str_radix(bin, 2).ok()
    } else if let Some(oct) = cleaned.strip_prefix("0o") {
        i64::from_str_radix(oct, 8).ok()
    } else if cleaned.len() > 1 && cleaned.starts_with('0') {
        i64::from_str_radix(&cleaned[1..], 8).ok()
    } else {
        cleaned.parse().ok()
    }
}
