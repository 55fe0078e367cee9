//! Types mined from documentation comments
//!
//! Used only when the syntax tree itself carries no type. Any problem with the
//! comment means "no type information".

use crate::ast::Node;
use crate::docblock::DocBlock;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocTypes {
    params: HashMap<String, String>,
    return_type: Option<String>,
    var_type: Option<String>,
}

impl DocTypes {
    /// Resolve the types declared by the node's last doc comment
    pub fn from_node(node: &Node) -> Self {
        match node.doc_comment() {
            Some(comment) => Self::from_comment(&comment.text),
            None => Self::default(),
        }
    }

    pub fn from_comment(text: &str) -> Self {
        let doc = match DocBlock::parse(text) {
            Ok(doc) => doc,
            Err(err) => {
                log::debug!("ignoring documentation comment: {}", err);
                return Self::default();
            }
        };

        let mut params = HashMap::new();
        for param in doc.params() {
            if let Some(type_name) = param.type_name {
                // first declaration of a name wins
                params.entry(param.name).or_insert(type_name);
            }
        }

        Self {
            params,
            return_type: doc.return_type(),
            var_type: doc.var_type(),
        }
    }

    /// Declared type of parameter `name` (without `$`)
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    pub fn var_type(&self) -> Option<&str> {
        self.var_type.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.return_type.is_none() && self.var_type.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Comment, NodeKind};

    #[test]
    fn test_resolves_from_last_doc_comment() {
        let node = Node::new(NodeKind::Nop).with_comments(vec![
            Comment::new("/** @param string $a */"),
            Comment::new("// unrelated"),
            Comment::new("/** @param int $a\n * @return bool */"),
        ]);
        let types = DocTypes::from_node(&node);
        assert_eq!(types.param("a"), Some("int"));
        assert_eq!(types.return_type(), Some("bool"));
        assert_eq!(types.param("b"), None);
    }

    #[test]
    fn test_broken_comment_degrades_to_nothing() {
        let types = DocTypes::from_comment("/** @param array<int $a */");
        assert!(types.is_empty());
    }
}
