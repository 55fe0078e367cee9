use super::{Emitter, CANNOT_CONVERT};
use crate::ast::{
    Associativity, BinaryOperator, CastKind, IncDecOperator, NameKind, Node, NodeKind,
    UnaryOperator, VariableName,
};
use crate::error::Result;

pub(crate) fn render_name(parts: &[String], qualification: NameKind) -> String {
    match qualification {
        NameKind::Relative => format!("namespace.{}", parts.join(".")),
        _ => parts.join("."),
    }
}

impl Emitter {
    /// Render a child operand, parenthesised if it binds looser than its parent
    pub(crate) fn p_prec(
        &mut self,
        node: &Node,
        parent_precedence: i32,
        parent_associativity: Associativity,
        position: Associativity,
    ) -> Result<String> {
        if let Some((precedence, _)) = node.kind.precedence() {
            if precedence > parent_precedence
                || (precedence == parent_precedence && parent_associativity != position)
            {
                return Ok(format!("({})", self.render(node)?));
            }
        }
        self.render(node)
    }

    pub(crate) fn p_infix(
        &mut self,
        parent: &Node,
        left: &Node,
        op: &str,
        right: &Node,
    ) -> Result<String> {
        let (precedence, associativity) = parent
            .kind
            .precedence()
            .unwrap_or((0, Associativity::NonAssoc));
        Ok(format!(
            "{}{}{}",
            self.p_prec(left, precedence, associativity, Associativity::Left)?,
            op,
            self.p_prec(right, precedence, associativity, Associativity::Right)?
        ))
    }

    pub(crate) fn p_variable(&mut self, name: &VariableName) -> Result<String> {
        match name {
            VariableName::Named(name) => Ok(name.clone()),
            VariableName::Dynamic(expr) => Ok(format!("{}{}", self.render(expr)?, CANNOT_CONVERT)),
        }
    }

    pub(crate) fn p_const_fetch(&mut self, name: &Node) -> Result<String> {
        let rendered = self.render(name)?;
        Ok(match rendered.to_ascii_lowercase().as_str() {
            "null" => "nil".to_string(),
            "true" | "false" => rendered.to_ascii_lowercase(),
            _ => rendered,
        })
    }

    pub(crate) fn p_arg(
        &mut self,
        value: &Node,
        by_ref: bool,
        unpack: bool,
        name: Option<&str>,
    ) -> Result<String> {
        let mut out = String::new();
        if let Some(name) = name {
            out.push_str(name);
            out.push_str(": ");
        }
        if by_ref {
            out.push('&');
        }
        out.push_str(&self.render(value)?);
        if unpack {
            out.push_str("...");
        }
        if name.is_some() {
            out.push_str(CANNOT_CONVERT);
        }
        Ok(out)
    }

    pub(crate) fn p_list(&mut self, items: &[Option<Node>]) -> Result<String> {
        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            parts.push(match item {
                Some(item) => self.render(item)?,
                None => "_".to_string(),
            });
        }
        Ok(parts.join(", "))
    }

    pub(crate) fn p_assign(&mut self, node: &Node, var: &Node, expr: &Node) -> Result<String> {
        // `$list[] = $value` appends
        if let NodeKind::ArrayDimFetch { var: target, dim: None } = &var.kind {
            let target = self.p_dereference_lhs(target)?;
            return Ok(format!(
                "{} = append({}, {})",
                target,
                target,
                self.render(expr)?
            ));
        }
        self.p_infix(node, var, " = ", expr)
    }

    pub(crate) fn p_assign_op(
        &mut self,
        node: &Node,
        op: BinaryOperator,
        var: &Node,
        expr: &Node,
    ) -> Result<String> {
        match op {
            BinaryOperator::Pow => {
                let target = self.render(var)?;
                Ok(format!(
                    "{} = math.Pow({}, {})",
                    target,
                    target,
                    self.render(expr)?
                ))
            }
            BinaryOperator::Coalesce => Ok(format!(
                "{}{}",
                self.p_infix(node, var, " ??= ", expr)?,
                CANNOT_CONVERT
            )),
            _ => {
                let token = op.go_token().unwrap_or(op.php_token());
                self.p_infix(node, var, &format!(" {}= ", token), expr)
            }
        }
    }

    pub(crate) fn p_binary_op(
        &mut self,
        node: &Node,
        op: BinaryOperator,
        left: &Node,
        right: &Node,
    ) -> Result<String> {
        if op == BinaryOperator::Pow {
            return Ok(format!(
                "math.Pow({}, {})",
                self.render(left)?,
                self.render(right)?
            ));
        }
        match op.go_token() {
            Some(token) => self.p_infix(node, left, &format!(" {} ", token), right),
            None => Ok(format!(
                "{}{}",
                self.p_infix(node, left, &format!(" {} ", op.php_token()), right)?,
                CANNOT_CONVERT
            )),
        }
    }

    pub(crate) fn p_unary_op(
        &mut self,
        node: &Node,
        op: UnaryOperator,
        expr: &Node,
    ) -> Result<String> {
        // `- -$a` must not collapse into a decrement
        let doubled = match (&op, &expr.kind) {
            (UnaryOperator::Minus, NodeKind::UnaryOp { op: UnaryOperator::Minus, .. })
            | (UnaryOperator::Plus, NodeKind::UnaryOp { op: UnaryOperator::Plus, .. }) => true,
            (
                UnaryOperator::Minus | UnaryOperator::Plus,
                NodeKind::IncDec { prefix: true, .. },
            ) => true,
            _ => false,
        };
        if doubled {
            return Ok(format!("{}({})", op.go_token(), self.render(expr)?));
        }
        let (precedence, associativity) = node.kind.precedence().unwrap_or(op.precedence());
        Ok(format!(
            "{}{}",
            op.go_token(),
            self.p_prec(expr, precedence, associativity, Associativity::Right)?
        ))
    }

    pub(crate) fn p_inc_dec(
        &mut self,
        node: &Node,
        op: IncDecOperator,
        prefix: bool,
        var: &Node,
    ) -> Result<String> {
        let (precedence, associativity) = node
            .kind
            .precedence()
            .unwrap_or((10, Associativity::Right));
        if prefix {
            Ok(format!(
                "{}{}",
                op.token(),
                self.p_prec(var, precedence, associativity, Associativity::Right)?
            ))
        } else {
            Ok(format!(
                "{}{}",
                self.p_prec(var, precedence, associativity, Associativity::Left)?,
                op.token()
            ))
        }
    }

    pub(crate) fn p_cast(&mut self, node: &Node, kind: CastKind, expr: &Node) -> Result<String> {
        match kind.go_function() {
            Some(function) => Ok(format!("{}({})", function, self.render(expr)?)),
            None => {
                let (precedence, associativity) = node
                    .kind
                    .precedence()
                    .unwrap_or((10, Associativity::Right));
                Ok(format!(
                    "({}) {}{}",
                    kind.php_name(),
                    self.p_prec(expr, precedence, associativity, Associativity::Right)?,
                    CANNOT_CONVERT
                ))
            }
        }
    }

    pub(crate) fn p_func_call(&mut self, name: &Node, args: &[Node]) -> Result<String> {
        Ok(format!(
            "{}({})",
            self.p_call_lhs(name)?,
            self.render_args(args)?
        ))
    }

    pub(crate) fn p_method_call(
        &mut self,
        var: &Node,
        name: &Node,
        args: &[Node],
        nullsafe: bool,
    ) -> Result<String> {
        Ok(format!(
            "{}.{}({}){}",
            self.p_dereference_lhs(var)?,
            self.p_object_property(name)?,
            self.render_args(args)?,
            if nullsafe { " /* NOTE: nullsafe */" } else { "" }
        ))
    }

    pub(crate) fn p_static_call(&mut self, class: &Node, name: &Node, args: &[Node]) -> Result<String> {
        Ok(format!(
            "{}.{}({})",
            self.p_dereference_lhs(class)?,
            self.render(name)?,
            self.render_args(args)?
        ))
    }

    pub(crate) fn p_property_fetch(&mut self, var: &Node, name: &Node, nullsafe: bool) -> Result<String> {
        Ok(format!(
            "{}.{}{}",
            self.p_dereference_lhs(var)?,
            self.p_object_property(name)?,
            if nullsafe { " /* NOTE: nullsafe */" } else { "" }
        ))
    }

    pub(crate) fn p_array_dim_fetch(&mut self, var: &Node, dim: Option<&Node>) -> Result<String> {
        let dim = match dim {
            Some(dim) => self.render(dim)?,
            None => String::new(),
        };
        Ok(format!("{}[{}]", self.p_dereference_lhs(var)?, dim))
    }

    pub(crate) fn p_new(&mut self, class: &Node, args: &[Node]) -> Result<String> {
        if let NodeKind::Class { .. } = class.kind {
            let body = self.indented(|this| {
                Ok(format!("{}{}", this.nl(), this.render(class)?))
            })?;
            return Ok(format!(
                "new class({}) {{{}{}}}{}",
                self.render_args(args)?,
                body,
                self.nl(),
                CANNOT_CONVERT
            ));
        }
        Ok(format!("&{}{{{}}}", self.render(class)?, self.render_args(args)?))
    }

    pub(crate) fn p_ternary(
        &mut self,
        cond: &Node,
        if_: Option<&Node>,
        else_: &Node,
    ) -> Result<String> {
        let condition = self.render(cond)?;
        let then_value = self.indented(|this| {
            let value = match if_ {
                Some(value) => this.render(value)?,
                None => this.render(cond)?,
            };
            Ok(format!("{}{}", this.nl(), value))
        })?;
        let else_value =
            self.indented(|this| Ok(format!("{}{}", this.nl(), this.render(else_)?)))?;
        let nl = self.nl();
        Ok(format!(
            "if {} {{{}{}}} else {{{}{}}}",
            condition, then_value, nl, else_value, nl
        ))
    }

    pub(crate) fn p_closure(
        &mut self,
        node: &Node,
        params: &[Node],
        uses: &[Node],
        return_type: Option<&Node>,
        stmts: &[Node],
        by_ref: bool,
    ) -> Result<String> {
        let signature = self.render_signature(node, params, return_type)?;
        let uses = if uses.is_empty() {
            String::new()
        } else {
            format!(" /* use({}) */", self.render_comma_separated(uses)?)
        };
        Ok(format!(
            "func {}{}{} {{{}{}}}",
            if by_ref { "&" } else { "" },
            signature,
            uses,
            self.render_stmts(stmts)?,
            self.nl()
        ))
    }

    pub(crate) fn p_arrow_function(
        &mut self,
        node: &Node,
        params: &[Node],
        return_type: Option<&Node>,
        expr: &Node,
        by_ref: bool,
    ) -> Result<String> {
        let signature = self.render_signature(node, params, return_type)?;
        let body = self.indented(|this| Ok(format!("{}return {}", this.nl(), this.render(expr)?)))?;
        Ok(format!(
            "func {}{} {{{}{}}}",
            if by_ref { "&" } else { "" },
            signature,
            body,
            self.nl()
        ))
    }

    pub(crate) fn p_exit(&mut self, expr: Option<&Node>) -> Result<String> {
        let code = match expr {
            Some(expr) => self.render(expr)?,
            None => String::new(),
        };
        Ok(format!("os.Exit({})", code))
    }

    pub(crate) fn p_call_lhs(&mut self, node: &Node) -> Result<String> {
        let plain = matches!(
            node.kind,
            NodeKind::Name { .. }
                | NodeKind::Variable(_)
                | NodeKind::ArrayDimFetch { .. }
                | NodeKind::FuncCall { .. }
                | NodeKind::MethodCall { .. }
                | NodeKind::StaticCall { .. }
                | NodeKind::Array { .. }
        );
        if plain {
            self.render(node)
        } else {
            Ok(format!("({})", self.render(node)?))
        }
    }

    pub(crate) fn p_dereference_lhs(&mut self, node: &Node) -> Result<String> {
        let plain = matches!(
            node.kind,
            NodeKind::Variable(_)
                | NodeKind::Name { .. }
                | NodeKind::ArrayDimFetch { .. }
                | NodeKind::PropertyFetch { .. }
                | NodeKind::StaticPropertyFetch { .. }
                | NodeKind::FuncCall { .. }
                | NodeKind::MethodCall { .. }
                | NodeKind::StaticCall { .. }
                | NodeKind::Array { .. }
                | NodeKind::String { .. }
                | NodeKind::ConstFetch(_)
                | NodeKind::ClassConstFetch { .. }
        );
        if plain {
            self.render(node)
        } else {
            Ok(format!("({})", self.render(node)?))
        }
    }

    /// Member name after `.`; computed names keep PHP's braces
    pub(crate) fn p_object_property(&mut self, node: &Node) -> Result<String> {
        match &node.kind {
            NodeKind::Identifier(_) | NodeKind::VarLikeIdentifier(_) => self.render(node),
            _ => Ok(format!("{{{}}}", self.render(node)?)),
        }
    }
}
