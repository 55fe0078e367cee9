//! Conversion controller
//!
//! This module runs one PHP source through the whole pipeline: blank-line
//! preservation, parsing, rendering and output assembly.

use crate::ast::{Node, NodeType};
use crate::config::ConvertOptions;
use crate::emitter::{Emitter, Hook, HookTable, Next, BLANK_LINE_MARKER};
use crate::error::{Error, Result};
use crate::parser;
use once_cell::sync::Lazy;
use regex::Regex;
use std::rc::Rc;
use std::str::FromStr;

/// Banner placed at the top of the output
pub const HEAD_COMMENT_BLOCK: &str = "// Code generated. MUST EDIT!";

static BLANK_LINE_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("[ \t]*{}", regex::escape(BLANK_LINE_MARKER))).unwrap());

/// Main converter struct
pub struct Converter {
    options: ConvertOptions,
    hooks: Rc<HookTable>,
    sealed: bool,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    /// Create a converter with default options and no hooks
    pub fn new() -> Self {
        Self::with_options(ConvertOptions::default())
    }

    pub fn with_options(options: ConvertOptions) -> Self {
        Self {
            options,
            hooks: Rc::new(HookTable::new()),
            sealed: false,
        }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ConvertOptions {
        &mut self.options
    }

    pub fn hooks(&self) -> &HookTable {
        &self.hooks
    }

    /// Append an interceptor for `kind`
    pub fn register_hook<F>(&mut self, kind: NodeType, handler: F) -> Result<()>
    where
        F: Fn(&mut Emitter, &Node, bool, Next<'_>) -> Result<String> + 'static,
    {
        self.hook_table_mut(kind.as_str())?.register(kind, handler);
        Ok(())
    }

    /// Append an interceptor for the kind named like `Expr_FuncCall`
    pub fn register_hook_by_name<F>(&mut self, name: &str, handler: F) -> Result<()>
    where
        F: Fn(&mut Emitter, &Node, bool, Next<'_>) -> Result<String> + 'static,
    {
        let kind = NodeType::from_str(name)?;
        self.register_hook(kind, handler)
    }

    /// Let a hook bundle register its interceptors
    pub fn install(&mut self, hook: &impl Hook) -> Result<()> {
        hook.register(self.hook_table_mut("<hook bundle>")?);
        Ok(())
    }

    fn hook_table_mut(&mut self, kind: &str) -> Result<&mut HookTable> {
        if self.sealed {
            return Err(Error::HookRegistrationClosed {
                kind: kind.to_string(),
            });
        }
        Rc::get_mut(&mut self.hooks)
            .ok_or_else(|| Error::internal("hook table is still borrowed by an emitter"))
    }

    /// Convert PHP source text to Go-like pseudocode
    pub fn convert(&mut self, source: &str) -> Result<String> {
        let (marked, blank_lines) = mark_blank_lines(source);
        log::debug!("replaced {} blank lines with markers", blank_lines);

        let stmts = parser::parse_with_limit(&marked, self.options.max_depth)?;
        self.convert_nodes(&stmts)
    }

    /// Render an already parsed statement list and assemble the output
    pub fn convert_nodes(&mut self, stmts: &[Node]) -> Result<String> {
        if !self.sealed {
            log::debug!("hook registration closed: {:?}", self.hooks);
            self.sealed = true;
        }

        let mut emitter = Emitter::new(Rc::clone(&self.hooks), self.options.max_depth);
        let rendered = emitter.render_stmt_list(stmts)?;
        let body = rendered.strip_prefix('\n').unwrap_or(&rendered).to_string();
        log::debug!(
            "rendered {} statements into {} bytes",
            stmts.len(),
            body.len()
        );

        let additional_code = emitter.into_additional_code();
        let mut parts = Vec::with_capacity(3);
        if self.options.add_head_comment_block {
            parts.push(HEAD_COMMENT_BLOCK.to_string());
        }
        if self.options.add_additional_code && !additional_code.is_empty() {
            log::debug!("adding {} helper fragments", additional_code.len());
            parts.push(additional_code.flush());
        }
        parts.push(body);

        Ok(remove_blank_line_markers(&parts.join("\n\n")))
    }
}

/// Replace every whitespace-only line with the marker, keeping terminators
fn mark_blank_lines(source: &str) -> (String, usize) {
    let mut out = String::with_capacity(source.len());
    let mut count = 0;
    for line in source.split_inclusive('\n') {
        let (content, terminator) = match line.strip_suffix('\n') {
            Some(content) => (content, "\n"),
            None => (line, ""),
        };
        if content.chars().all(|c| c == ' ' || c == '\t' || c == '\r') {
            out.push_str(BLANK_LINE_MARKER);
            out.push_str(terminator);
            count += 1;
        } else {
            out.push_str(line);
        }
    }
    (out, count)
}

fn remove_blank_line_markers(text: &str) -> String {
    BLANK_LINE_MARKER_RE.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_blank_lines() {
        let (marked, count) = mark_blank_lines("a\n\n  \t\nb\r\n\r\nc");
        assert_eq!(count, 3);
        assert_eq!(
            marked,
            format!(
                "a\n{m}\n{m}\nb\r\n{m}\nc",
                m = BLANK_LINE_MARKER
            )
        );
    }

    #[test]
    fn test_mark_blank_lines_keeps_text() {
        let (marked, count) = mark_blank_lines("<?php\necho 1;\n");
        assert_eq!(count, 0);
        assert_eq!(marked, "<?php\necho 1;\n");
    }

    #[test]
    fn test_remove_markers_with_indentation() {
        let text = format!("a\n    {}\nb", BLANK_LINE_MARKER);
        assert_eq!(remove_blank_line_markers(&text), "a\n\nb");
    }

    #[test]
    fn test_registration_closes_after_convert() {
        let mut converter = Converter::with_options(ConvertOptions::body_only());
        converter.convert("<?php\necho 1;\n").unwrap();
        let result = converter.register_hook(NodeType::FuncCall, |e, n, p, next| next.call(e, n, p));
        assert_eq!(
            result,
            Err(Error::HookRegistrationClosed {
                kind: "Expr_FuncCall".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_hook_name() {
        let mut converter = Converter::new();
        let result = converter.register_hook_by_name("Expr_Foo", |e, n, p, next| next.call(e, n, p));
        assert_eq!(
            result,
            Err(Error::UnknownNodeKind {
                kind: "Expr_Foo".to_string()
            })
        );
    }

    #[test]
    fn test_header_only_when_body_empty() {
        let mut converter = Converter::new();
        assert_eq!(
            converter.convert("<?php\n").unwrap(),
            format!("{}\n\n", HEAD_COMMENT_BLOCK)
        );
    }
}
