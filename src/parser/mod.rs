//! PHP front end
//!
//! Source text is parsed with the tree-sitter PHP grammar and the concrete
//! tree is lowered into the typed [`Node`] model. Lowering is split by
//! construct class:
//!
//! - `statements`: statement lists, control flow, declarations
//! - `expressions`: operators, calls, member access, closures, arrays
//! - `strings`: quoted strings, interpolation, heredoc and nowdoc bodies
//!
//! A tree with any ERROR or MISSING node is rejected as a whole; there is
//! no partial lowering.

mod expressions;
mod statements;
pub mod strings;

use crate::ast::{NameKind, Node, NodeKind, Span};
use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::{Error, Result};
use tree_sitter::{Node as TsNode, Parser};

const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROW_SIZE: usize = 1024 * 1024;
const SNIPPET_LEN: usize = 20;

/// Parse PHP source into top-level statements
pub fn parse(source: &str) -> Result<Vec<Node>> {
    parse_with_limit(source, DEFAULT_MAX_DEPTH)
}

/// Parse with an explicit nesting limit for lowering
pub fn parse_with_limit(source: &str, max_depth: usize) -> Result<Vec<Node>> {
    let mut parser = Parser::new();
    let language: tree_sitter::Language = tree_sitter_php::LANGUAGE_PHP.into();
    parser
        .set_language(&language)
        .map_err(|e| Error::internal(format!("failed to load PHP grammar: {}", e)))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::internal("tree-sitter returned no tree"))?;
    let root = tree.root_node();

    if let Some(bad) = first_syntax_error(root) {
        let position = bad.start_position();
        let message = if bad.is_missing() {
            format!("missing `{}`", bad.kind())
        } else {
            let text = source.get(bad.byte_range()).unwrap_or("");
            let snippet: String = text
                .lines()
                .next()
                .unwrap_or("")
                .chars()
                .take(SNIPPET_LEN)
                .collect();
            if snippet.trim().is_empty() {
                "unexpected end of input".to_string()
            } else {
                format!("syntax error near `{}`", snippet.trim())
            }
        };
        return Err(Error::parse(position.row + 1, position.column + 1, message));
    }

    let mut lowerer = Lowerer::new(source, max_depth);
    let stmts = lowerer.lower_program(root)?;
    log::debug!("lowered {} top-level statements", stmts.len());
    Ok(stmts)
}

/// First ERROR or MISSING node in document order
fn first_syntax_error(root: TsNode<'_>) -> Option<TsNode<'_>> {
    if !root.has_error() {
        return None;
    }
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

/// Concrete tree to typed AST conversion state
pub(crate) struct Lowerer<'s> {
    source: &'s str,
    depth: usize,
    max_depth: usize,
}

impl<'s> Lowerer<'s> {
    pub(crate) fn new(source: &'s str, max_depth: usize) -> Self {
        Self {
            source,
            depth: 0,
            max_depth,
        }
    }

    fn text(&self, node: TsNode<'_>) -> &'s str {
        self.source.get(node.byte_range()).unwrap_or("")
    }

    fn slice(&self, start: usize, end: usize) -> &'s str {
        self.source.get(start..end).unwrap_or("")
    }

    /// Run one level of recursive lowering under the depth limit
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.max_depth {
            return Err(Error::TooDeeplyNested {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || f(self));
        self.depth -= 1;
        result
    }

    /// Keep a construct without a lowering as source text
    fn unsupported(&self, node: TsNode<'_>) -> Node {
        log::warn!(
            "no lowering for `{}` on line {}, kept verbatim",
            node.kind(),
            node.start_position().row + 1
        );
        Node::new(NodeKind::Unsupported {
            source_kind: node.kind().to_string(),
            text: self.text(node).to_string(),
        })
        .with_span(span(node))
    }

    /// `Foo\Bar`, `\Foo` or `namespace\Foo` as a name node
    fn lower_name(&self, node: TsNode<'_>) -> Node {
        Node::new(name_from_text(self.text(node))).with_span(span(node))
    }
}

fn span(node: TsNode<'_>) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

fn children<'t>(node: TsNode<'t>) -> Vec<TsNode<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Named children other than comments
fn named_children<'t>(node: TsNode<'t>) -> Vec<TsNode<'t>> {
    children(node)
        .into_iter()
        .filter(|c| c.is_named() && c.kind() != "comment")
        .collect()
}

fn first_named<'t>(node: TsNode<'t>) -> Option<TsNode<'t>> {
    named_children(node).into_iter().next()
}

/// Whether `node` has an anonymous child token `token`
fn has_token(node: TsNode<'_>, token: &str) -> bool {
    children(node)
        .iter()
        .any(|c| !c.is_named() && c.kind().eq_ignore_ascii_case(token))
}

fn has_child_kind(node: TsNode<'_>, kind: &str) -> bool {
    children(node).iter().any(|c| c.kind() == kind)
}

fn child_of_kind<'t>(node: TsNode<'t>, kind: &str) -> Option<TsNode<'t>> {
    children(node).into_iter().find(|c| c.kind() == kind)
}

pub(crate) fn name_from_text(text: &str) -> NodeKind {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let (qualification, rest) = if let Some(rest) = compact.strip_prefix('\\') {
        (NameKind::FullyQualified, rest)
    } else if let Some(rest) = compact
        .get(..10)
        .filter(|prefix| prefix.eq_ignore_ascii_case("namespace\\"))
        .and_then(|_| compact.get(10..))
        .filter(|rest| !rest.is_empty())
    {
        (NameKind::Relative, rest)
    } else {
        (NameKind::Unqualified, compact.as_str())
    };
    NodeKind::Name {
        parts: rest
            .split('\\')
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect(),
        qualification,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_text() {
        assert_eq!(
            name_from_text("\\Foo\\Bar"),
            NodeKind::Name {
                parts: vec!["Foo".to_string(), "Bar".to_string()],
                qualification: NameKind::FullyQualified,
            }
        );
        assert_eq!(
            name_from_text("namespace\\Sub"),
            NodeKind::Name {
                parts: vec!["Sub".to_string()],
                qualification: NameKind::Relative,
            }
        );
    }

    #[test]
    fn test_name_from_text_multibyte() {
        assert_eq!(
            name_from_text("aaaaaaaaaé"),
            NodeKind::Name {
                parts: vec!["aaaaaaaaaé".to_string()],
                qualification: NameKind::Unqualified,
            }
        );
    }

    #[test]
    fn test_parse_error_position() {
        match parse("<?php\n$a = ;\n") {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_simple_statements() {
        let stmts = parse("<?php\necho 1;\n$a = 2;\n").unwrap();
        assert_eq!(stmts.len(), 2);
        assert!(matches!(stmts[0].kind, NodeKind::Echo(_)));
        assert!(matches!(stmts[1].kind, NodeKind::Expression(_)));
    }

    #[test]
    fn test_comments_attach_to_next_statement() {
        let stmts = parse("<?php\n// lead\n$a = 1;\n// tail\n").unwrap();
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0].comments[0].text, "// lead");
        assert!(matches!(stmts[1].kind, NodeKind::Nop));
        assert_eq!(stmts[1].comments[0].text, "// tail");
    }

    #[test]
    fn test_lowering_depth_limit() {
        let source = format!("<?php\n$a = {}1{};\n", "(".repeat(50), ")".repeat(50));
        assert_eq!(
            parse_with_limit(&source, 10),
            Err(Error::TooDeeplyNested { limit: 10 })
        );
    }
}
