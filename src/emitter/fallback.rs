//! Constructs kept in source syntax and flagged for manual follow-up

use super::{Emitter, CANNOT_CONVERT};
use crate::ast::{IncludeKind, NameKind, Node, NodeKind, UseKind};
use crate::error::Result;

impl Emitter {
    pub(crate) fn p_union_type(&mut self, types: &[Node]) -> Result<String> {
        let mut rendered = Vec::with_capacity(types.len());
        for ty in types {
            rendered.push(self.render(ty)?);
        }
        Ok(format!("{}{}", rendered.join("|"), CANNOT_CONVERT))
    }

    pub(crate) fn p_instanceof(&mut self, node: &Node, expr: &Node, class: &Node) -> Result<String> {
        Ok(format!(
            "{}{}",
            self.p_infix(node, expr, " instanceof ", class)?,
            CANNOT_CONVERT
        ))
    }

    pub(crate) fn p_isset(&mut self, vars: &[Node]) -> Result<String> {
        Ok(format!(
            "isset({}){}",
            self.render_comma_separated(vars)?,
            CANNOT_CONVERT
        ))
    }

    /// `keyword(expr)` for language constructs shaped like calls
    pub(crate) fn p_keyword_call(&mut self, keyword: &str, expr: &Node) -> Result<String> {
        Ok(format!("{}({}){}", keyword, self.render(expr)?, CANNOT_CONVERT))
    }

    pub(crate) fn p_include(&mut self, expr: &Node, kind: IncludeKind) -> Result<String> {
        Ok(format!(
            "{} {}{}",
            kind.keyword(),
            self.render(expr)?,
            CANNOT_CONVERT
        ))
    }

    pub(crate) fn p_shell_exec(&mut self, parts: &[Node]) -> Result<String> {
        Ok(format!(
            "`{}`{}",
            self.encaps_list(parts, Some('`'))?,
            CANNOT_CONVERT
        ))
    }

    pub(crate) fn p_yield(&mut self, key: Option<&Node>, value: Option<&Node>) -> Result<String> {
        let mut out = String::from("yield");
        if let Some(value) = value {
            out.push(' ');
            if let Some(key) = key {
                out.push_str(&self.render(key)?);
                out.push_str(" => ");
            }
            out.push_str(&self.render(value)?);
        }
        out.push_str(CANNOT_CONVERT);
        Ok(out)
    }

    pub(crate) fn p_use(&mut self, kind: UseKind, uses: &[Node]) -> Result<String> {
        Ok(format!(
            "use {}{}{}",
            kind.prefix(),
            self.render_comma_separated(uses)?,
            CANNOT_CONVERT
        ))
    }

    pub(crate) fn p_group_use(
        &mut self,
        kind: UseKind,
        prefix: &Node,
        uses: &[Node],
    ) -> Result<String> {
        Ok(format!(
            "use {}{}\\{{{}}}{}",
            kind.prefix(),
            self.php_name(prefix)?,
            self.render_comma_separated(uses)?,
            CANNOT_CONVERT
        ))
    }

    pub(crate) fn p_use_use(
        &mut self,
        kind: UseKind,
        name: &Node,
        alias: Option<&str>,
    ) -> Result<String> {
        let mut out = format!("{}{}", kind.prefix(), self.php_name(name)?);
        if let Some(alias) = alias {
            out.push_str(" as ");
            out.push_str(alias);
        }
        Ok(out)
    }

    pub(crate) fn p_declare(&mut self, declares: &[Node], stmts: Option<&[Node]>) -> Result<String> {
        let head = format!("declare({})", self.render_comma_separated(declares)?);
        match stmts {
            Some(stmts) => Ok(format!(
                "{} {{{}{}}}{}",
                head,
                self.render_stmts(stmts)?,
                self.nl(),
                CANNOT_CONVERT
            )),
            None => Ok(format!("{}{}", head, CANNOT_CONVERT)),
        }
    }

    pub(crate) fn p_trait(&mut self, name: &str, stmts: &[Node]) -> Result<String> {
        Ok(format!(
            "trait {} {{{}{}}}{}",
            name,
            self.render_stmts(stmts)?,
            self.nl(),
            CANNOT_CONVERT
        ))
    }

    pub(crate) fn p_trait_use(&mut self, traits: &[Node], adaptations: &[Node]) -> Result<String> {
        let mut names = Vec::with_capacity(traits.len());
        for name in traits {
            names.push(self.php_name(name)?);
        }
        let mut out = format!("use {}", names.join(", "));
        if !adaptations.is_empty() {
            let body = self.indented(|this| {
                let mut body = String::new();
                for adaptation in adaptations {
                    body.push_str(&this.nl());
                    body.push_str(&this.render(adaptation)?);
                    body.push(';');
                }
                Ok(body)
            })?;
            out.push_str(&format!(" {{{}{}}}", body, self.nl()));
        }
        out.push_str(CANNOT_CONVERT);
        Ok(out)
    }

    /// Names in source notation, with `\` separators
    fn php_name(&mut self, node: &Node) -> Result<String> {
        match &node.kind {
            NodeKind::Name {
                parts,
                qualification,
            } => Ok(match qualification {
                NameKind::Unqualified => parts.join("\\"),
                NameKind::FullyQualified => format!("\\{}", parts.join("\\")),
                NameKind::Relative => format!("namespace\\{}", parts.join("\\")),
            }),
            _ => self.render(node),
        }
    }
}
