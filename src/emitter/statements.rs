use super::{Emitter, CANNOT_CONVERT};
use crate::ast::{Node, NodeKind};
use crate::error::Result;

impl Emitter {
    pub(crate) fn p_if(
        &mut self,
        cond: &Node,
        stmts: &[Node],
        elseifs: &[Node],
        else_: Option<&Node>,
    ) -> Result<String> {
        let mut out = format!(
            "if {} {{{}{}}}",
            self.render(cond)?,
            self.render_stmts(stmts)?,
            self.nl()
        );
        for elseif in elseifs {
            out.push(' ');
            out.push_str(&self.render(elseif)?);
        }
        if let Some(else_) = else_ {
            out.push(' ');
            out.push_str(&self.render(else_)?);
        }
        Ok(out)
    }

    pub(crate) fn p_else_if(&mut self, cond: &Node, stmts: &[Node]) -> Result<String> {
        Ok(format!(
            "else if {} {{{}{}}}",
            self.render(cond)?,
            self.render_stmts(stmts)?,
            self.nl()
        ))
    }

    pub(crate) fn p_else(&mut self, stmts: &[Node]) -> Result<String> {
        // `else if` written as two words arrives as an else holding one if
        if let [only] = stmts {
            if only.comments.is_empty() && matches!(only.kind, NodeKind::If { .. }) {
                return Ok(format!("else {}", self.render(only)?));
            }
        }
        Ok(format!("else {{{}{}}}", self.render_stmts(stmts)?, self.nl()))
    }

    pub(crate) fn p_for(
        &mut self,
        init: &[Node],
        cond: &[Node],
        loop_: &[Node],
        stmts: &[Node],
    ) -> Result<String> {
        let header = if init.is_empty() && cond.is_empty() && loop_.is_empty() {
            String::new()
        } else {
            let init = self.render_comma_separated(init)?;
            let cond = self.render_comma_separated(cond)?;
            let loop_ = self.render_comma_separated(loop_)?;
            format!(
                " {};{}{};{}{}",
                init,
                if cond.is_empty() { "" } else { " " },
                cond,
                if loop_.is_empty() { "" } else { " " },
                loop_
            )
        };
        Ok(format!(
            "for{} {{{}{}}}",
            header,
            self.render_stmts(stmts)?,
            self.nl()
        ))
    }

    pub(crate) fn p_foreach(
        &mut self,
        expr: &Node,
        key_var: Option<&Node>,
        value_var: &Node,
        by_ref: bool,
        stmts: &[Node],
    ) -> Result<String> {
        let key = match key_var {
            Some(key) => self.render(key)?,
            None => "_".to_string(),
        };
        // Go has no destructuring in range clauses
        let value = match &value_var.kind {
            NodeKind::List(_) => format!("[{}]{}", self.render(value_var)?, CANNOT_CONVERT),
            _ => self.render(value_var)?,
        };
        Ok(format!(
            "for {}, {}{} := range {} {{{}{}}}",
            key,
            if by_ref { "&" } else { "" },
            value,
            self.render(expr)?,
            self.render_stmts(stmts)?,
            self.nl()
        ))
    }

    pub(crate) fn p_while(&mut self, cond: &Node, stmts: &[Node]) -> Result<String> {
        Ok(format!(
            "for {} {{{}{}}}",
            self.render(cond)?,
            self.render_stmts(stmts)?,
            self.nl()
        ))
    }

    /// `do {} while (c)` becomes an endless loop ending in a conditional break
    pub(crate) fn p_do(&mut self, cond: &Node, stmts: &[Node]) -> Result<String> {
        let body = self.render_stmts(stmts)?;
        let exit = self.indented(|this| {
            let condition = this.render(cond)?;
            let brk = this.indented(|inner| Ok(format!("{}break", inner.nl())))?;
            Ok(format!(
                "\n{nl}if !({}) {{{}{nl}}}",
                condition,
                brk,
                nl = this.nl()
            ))
        })?;
        Ok(format!("for {{{}{}{}}}", body, exit, self.nl()))
    }

    pub(crate) fn p_switch(&mut self, cond: &Node, cases: &[Node]) -> Result<String> {
        let body = self.indented(|this| {
            let mut out = String::new();
            for (i, case) in cases.iter().enumerate() {
                if !case.comments.is_empty() {
                    out.push_str(&this.nl());
                    out.push_str(&this.render_comments(&case.comments));
                }
                out.push_str(&this.nl());
                out.push_str(&this.render(case)?);

                let is_last = i + 1 == cases.len();
                if !is_last && falls_through(case) {
                    let fallthrough =
                        this.indented(|inner| Ok(format!("{}fallthrough", inner.nl())))?;
                    out.push_str(&fallthrough);
                }
            }
            Ok(out)
        })?;
        Ok(format!(
            "switch {} {{{}{}}}",
            self.render(cond)?,
            body,
            self.nl()
        ))
    }

    pub(crate) fn p_case(&mut self, cond: Option<&Node>, stmts: &[Node]) -> Result<String> {
        let label = match cond {
            Some(cond) => format!("case {}:", self.render(cond)?),
            None => "default:".to_string(),
        };
        // cases never fall through in the target, so a closing break is noise
        let stmts = match stmts.split_last() {
            Some((last, rest)) if is_plain_break(last) => rest,
            _ => stmts,
        };
        Ok(format!("{}{}", label, self.render_stmts(stmts)?))
    }

    pub(crate) fn p_jump(&mut self, keyword: &str, num: Option<&Node>) -> Result<String> {
        match num {
            None => Ok(keyword.to_string()),
            Some(node) if is_level_one(node) => Ok(keyword.to_string()),
            Some(node) => Ok(format!("{} {}{}", keyword, self.render(node)?, CANNOT_CONVERT)),
        }
    }

    pub(crate) fn p_try_catch(
        &mut self,
        stmts: &[Node],
        catches: &[Node],
        finally: Option<&Node>,
    ) -> Result<String> {
        let mut out = String::from("// TODO: error trap");
        out.push_str(&self.render_stmt_list(stmts)?);
        for clause in catches.iter().chain(finally) {
            let rendered = self.render(clause)?;
            out.push_str(&self.nl());
            out.push_str(&self.comment_out(&rendered));
        }
        Ok(out)
    }

    pub(crate) fn p_catch(
        &mut self,
        types: &[Node],
        var: Option<&Node>,
        stmts: &[Node],
    ) -> Result<String> {
        let mut names = Vec::with_capacity(types.len());
        for ty in types {
            names.push(self.render(ty)?);
        }
        let var = match var {
            Some(var) => format!(" {}", self.render(var)?),
            None => String::new(),
        };
        Ok(format!(
            "catch ({}{}) {{{}{}}}",
            names.join(" | "),
            var,
            self.render_stmts(stmts)?,
            self.nl()
        ))
    }

    /// `throw new E($msg)` returns an error built from the message
    pub(crate) fn p_throw(&mut self, expr: &Node) -> Result<String> {
        let message = match &expr.kind {
            NodeKind::New { args, .. } if !args.is_empty() => self.render(&args[0])?,
            _ => self.render(expr)?,
        };
        Ok(format!("return errors.New({})", message))
    }

    pub(crate) fn p_namespace(&mut self, name: Option<&Node>, stmts: &[Node]) -> Result<String> {
        let package = match name {
            Some(name) => self.render(name)?,
            None => "main".to_string(),
        };
        Ok(format!(
            "package {}{}",
            package,
            self.render_stmt_list(stmts)?
        ))
    }

    /// Prefix every line of already rendered text with `// `
    fn comment_out(&self, text: &str) -> String {
        let indent = " ".repeat(self.indent_level());
        let nl = self.nl();
        text.split('\n')
            .enumerate()
            .map(|(i, line)| {
                let line = if i == 0 {
                    line
                } else {
                    line.strip_prefix(indent.as_str()).unwrap_or(line)
                };
                format!("// {}", line).trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join(&nl)
    }
}

fn is_level_one(node: &Node) -> bool {
    matches!(&node.kind, NodeKind::LNumber(raw) if raw == "1")
}

fn is_plain_break(node: &Node) -> bool {
    node.comments.is_empty()
        && match &node.kind {
            NodeKind::Break(None) => true,
            NodeKind::Break(Some(num)) => is_level_one(num),
            _ => false,
        }
}

/// A case falls through unless its last statement leaves the switch
fn falls_through(case: &Node) -> bool {
    let stmts = match &case.kind {
        NodeKind::Case { stmts, .. } => stmts,
        _ => return false,
    };
    let last = stmts
        .iter()
        .rev()
        .find(|s| !matches!(s.kind, NodeKind::Nop));
    match last {
        None => true,
        Some(stmt) => !matches!(
            &stmt.kind,
            NodeKind::Break(_)
                | NodeKind::Continue(_)
                | NodeKind::Return(_)
                | NodeKind::Throw(_)
                | NodeKind::Goto(_)
        ) && !matches!(&stmt.kind, NodeKind::Expression(e) if matches!(e.kind, NodeKind::Exit { .. })),
    }
}
