//! Statement lowering

use super::{
    child_of_kind, children, first_named, has_child_kind, has_token, named_children,
    name_from_text, span, Lowerer,
};
use crate::ast::{Comment, Modifiers, Node, NodeKind, UseKind};
use crate::error::Result;
use tree_sitter::Node as TsNode;

impl<'s> Lowerer<'s> {
    pub(crate) fn lower_program(&mut self, root: TsNode<'_>) -> Result<Vec<Node>> {
        let stmts = self.lower_statements(&children(root))?;
        Ok(group_namespaces(stmts))
    }

    /// Lower a statement sequence, attaching each comment run to the
    /// statement after it
    pub(super) fn lower_statements(&mut self, nodes: &[TsNode<'_>]) -> Result<Vec<Node>> {
        self.lower_sequence(nodes, |this, node| this.lower_statement(node))
    }

    fn lower_members(&mut self, list: TsNode<'_>) -> Result<Vec<Node>> {
        self.lower_sequence(&children(list), |this, node| this.lower_member(node))
    }

    fn lower_sequence<'t>(
        &mut self,
        nodes: &[TsNode<'t>],
        mut lower: impl FnMut(&mut Self, TsNode<'t>) -> Result<Vec<Node>>,
    ) -> Result<Vec<Node>> {
        let mut out = Vec::new();
        let mut pending: Vec<Comment> = Vec::new();
        for &child in nodes {
            if child.kind() == "comment" {
                pending.push(Comment::new(self.text(child)));
                continue;
            }
            if !child.is_named() {
                continue;
            }
            let mut lowered = lower(self, child)?;
            if let Some(first) = lowered.first_mut() {
                let mut comments = std::mem::take(&mut pending);
                comments.append(&mut first.comments);
                first.comments = comments;
            }
            out.extend(lowered);
        }
        if !pending.is_empty() {
            out.push(Node::new(NodeKind::Nop).with_comments(pending));
        }
        Ok(out)
    }

    /// Statements of a body: a block, a colon block or a single statement
    fn block(&mut self, node: TsNode<'_>) -> Result<Vec<Node>> {
        match node.kind() {
            "compound_statement" | "colon_block" | "declaration_list" => {
                self.lower_statements(&children(node))
            }
            _ => self.lower_statement(node),
        }
    }

    /// Body of a control structure, including the `: ... endX;` form
    fn body(&mut self, node: TsNode<'_>) -> Result<Vec<Node>> {
        if let Some(body) = node.child_by_field_name("body") {
            return self.block(body);
        }
        let kids = children(node);
        match kids.iter().position(|c| c.kind() == ":") {
            Some(colon) => {
                let rest: Vec<TsNode<'_>> = kids[colon + 1..]
                    .iter()
                    .copied()
                    .filter(|c| !matches!(c.kind(), "else_if_clause" | "else_clause"))
                    .collect();
                self.lower_statements(&rest)
            }
            None => Ok(Vec::new()),
        }
    }

    fn condition(&mut self, node: TsNode<'_>) -> Result<Node> {
        match node.child_by_field_name("condition") {
            Some(cond) => self.lower_expr(cond),
            None => Ok(self.unsupported(node)),
        }
    }

    /// Zero or more typed statements for one concrete statement
    pub(super) fn lower_statement(&mut self, node: TsNode<'_>) -> Result<Vec<Node>> {
        let stmt_span = span(node);
        self.nested(|this| this.lower_statement_inner(node))
            .map(|stmts| {
                stmts
                    .into_iter()
                    .map(|s| {
                        if s.span.end == 0 {
                            s.with_span(stmt_span)
                        } else {
                            s
                        }
                    })
                    .collect()
            })
    }

    fn lower_statement_inner(&mut self, node: TsNode<'_>) -> Result<Vec<Node>> {
        let kind = match node.kind() {
            "php_tag" | "empty_statement" | "?>" => return Ok(Vec::new()),
            "compound_statement" => return self.block(node),
            "text" => return Ok(self.inline_html(self.text(node))),
            "text_interpolation" => {
                let text = child_of_kind(node, "text").map_or("", |t| self.text(t));
                return Ok(self.inline_html(text));
            }
            "expression_statement" => match first_named(node) {
                Some(expr) if expr.kind() == "throw_expression" => match first_named(expr) {
                    Some(inner) => NodeKind::Throw(Box::new(self.lower_expr(inner)?)),
                    None => return Ok(vec![self.unsupported(node)]),
                },
                Some(expr) => NodeKind::Expression(Box::new(self.lower_expr(expr)?)),
                None => return Ok(Vec::new()),
            },
            "echo_statement" => NodeKind::Echo(self.lower_expr_list(node)?),
            "exit_statement" => {
                let expr = match first_named(node) {
                    Some(e) => Some(Box::new(self.lower_expr(e)?)),
                    None => None,
                };
                let die = self.text(node).trim_start().to_ascii_lowercase().starts_with("die");
                NodeKind::Expression(Box::new(Node::new(NodeKind::Exit { expr, die })))
            }
            "if_statement" => self.lower_if(node)?,
            "while_statement" => NodeKind::While {
                cond: Box::new(self.condition(node)?),
                stmts: self.body(node)?,
            },
            "do_statement" => NodeKind::Do {
                cond: Box::new(self.condition(node)?),
                stmts: self.body(node)?,
            },
            "for_statement" => self.lower_for(node)?,
            "foreach_statement" => self.lower_foreach(node)?,
            "switch_statement" => self.lower_switch(node)?,
            "break_statement" => NodeKind::Break(self.optional_expr(node)?),
            "continue_statement" => NodeKind::Continue(self.optional_expr(node)?),
            "return_statement" => NodeKind::Return(self.optional_expr(node)?),
            "try_statement" => self.lower_try(node)?,
            "function_definition" => NodeKind::Function {
                name: self.field_text(node, "name"),
                params: self.lower_params(node)?,
                return_type: self.return_type(node)?,
                stmts: self.body(node)?,
                by_ref: is_by_ref(node),
            },
            "class_declaration" => self.lower_class(node, None)?,
            "interface_declaration" => NodeKind::Interface {
                name: self.field_text(node, "name"),
                extends: self.clause_names(node, "base_clause"),
                stmts: self.member_body(node)?,
            },
            "trait_declaration" => NodeKind::Trait {
                name: self.field_text(node, "name"),
                stmts: self.member_body(node)?,
            },
            "namespace_definition" => {
                let name = node
                    .child_by_field_name("name")
                    .map(|n| Box::new(self.lower_name(n)));
                match node.child_by_field_name("body") {
                    Some(body) => NodeKind::Namespace {
                        name,
                        stmts: self.block(body)?,
                        braced: true,
                    },
                    None => NodeKind::Namespace {
                        name,
                        stmts: Vec::new(),
                        braced: false,
                    },
                }
            }
            "namespace_use_declaration" => self.lower_namespace_use(node),
            "const_declaration" => NodeKind::ConstStmt(self.lower_consts(node)?),
            "global_declaration" => NodeKind::Global(self.lower_expr_list(node)?),
            "function_static_declaration" => {
                let mut vars = Vec::new();
                for decl in named_children(node) {
                    let var = match decl.child_by_field_name("name") {
                        Some(name) => self.lower_expr(name)?,
                        None => self.unsupported(decl),
                    };
                    let default = match decl.child_by_field_name("value") {
                        Some(value) => Some(Box::new(self.lower_expr(value)?)),
                        None => None,
                    };
                    vars.push(
                        Node::new(NodeKind::StaticVar {
                            var: Box::new(var),
                            default,
                        })
                        .with_span(span(decl)),
                    );
                }
                NodeKind::Static(vars)
            }
            "unset_statement" => NodeKind::Unset(self.lower_expr_list(node)?),
            "declare_statement" => self.lower_declare(node)?,
            "named_label_statement" => NodeKind::Label(
                first_named(node)
                    .map_or_else(|| self.text(node).trim_end_matches(':'), |n| self.text(n))
                    .trim()
                    .to_string(),
            ),
            "goto_statement" => NodeKind::Goto(
                first_named(node)
                    .map_or("", |n| self.text(n))
                    .to_string(),
            ),
            _ => return Ok(vec![self.unsupported(node)]),
        };
        Ok(vec![Node::new(kind)])
    }

    fn inline_html(&self, text: &str) -> Vec<Node> {
        if text.trim().is_empty() {
            Vec::new()
        } else {
            vec![Node::new(NodeKind::InlineHtml(text.trim_end().to_string()))]
        }
    }

    fn field_text(&self, node: TsNode<'_>, field: &str) -> String {
        node.child_by_field_name(field)
            .map_or("", |n| self.text(n))
            .to_string()
    }

    fn optional_expr(&mut self, node: TsNode<'_>) -> Result<Option<Box<Node>>> {
        match first_named(node) {
            Some(expr) => Ok(Some(Box::new(self.lower_expr(expr)?))),
            None => Ok(None),
        }
    }

    fn lower_if(&mut self, node: TsNode<'_>) -> Result<NodeKind> {
        let cond = Box::new(self.condition(node)?);
        let stmts = self.body(node)?;
        let mut elseifs = Vec::new();
        let mut else_ = None;
        for clause in children(node) {
            match clause.kind() {
                "else_if_clause" => elseifs.push(
                    Node::new(NodeKind::ElseIf {
                        cond: Box::new(self.condition(clause)?),
                        stmts: self.body(clause)?,
                    })
                    .with_span(span(clause)),
                ),
                "else_clause" => {
                    else_ = Some(Box::new(
                        Node::new(NodeKind::Else {
                            stmts: self.body(clause)?,
                        })
                        .with_span(span(clause)),
                    ))
                }
                _ => {}
            }
        }
        Ok(NodeKind::If {
            cond,
            stmts,
            elseifs,
            else_,
        })
    }

    /// `for (init; cond; loop)`: the header is split on its `;` tokens
    fn lower_for(&mut self, node: TsNode<'_>) -> Result<NodeKind> {
        let mut sections: [Vec<Node>; 3] = Default::default();
        let mut section = 0;
        let mut in_header = false;
        for child in children(node) {
            match child.kind() {
                "(" if !in_header => in_header = true,
                ")" if in_header => break,
                ";" if in_header => section = (section + 1).min(2),
                "comment" => {}
                _ if in_header && child.is_named() => {
                    let exprs = self.flatten_sequence(child)?;
                    sections[section].extend(exprs);
                }
                _ => {}
            }
        }
        let [init, cond, loop_] = sections;
        Ok(NodeKind::For {
            init,
            cond,
            loop_,
            stmts: self.body(node)?,
        })
    }

    fn lower_foreach(&mut self, node: TsNode<'_>) -> Result<NodeKind> {
        let kids = children(node);
        let as_index = kids
            .iter()
            .position(|c| c.kind().eq_ignore_ascii_case("as"))
            .unwrap_or(kids.len());
        let body_id = node.child_by_field_name("body").map(|b| b.id());
        let is_operand = |c: &TsNode<'_>| c.is_named() && c.kind() != "comment";

        let expr = match kids[..as_index].iter().copied().find(|c| is_operand(c)) {
            Some(e) => self.lower_expr(e)?,
            None => self.unsupported(node),
        };
        let target = kids[as_index..]
            .iter()
            .copied()
            .find(|c| is_operand(c) && Some(c.id()) != body_id);

        let (key_var, value) = match target {
            Some(t) if matches!(t.kind(), "pair" | "foreach_pair") => {
                let parts = named_children(t);
                match parts.as_slice() {
                    [key, value, ..] => (Some(Box::new(self.lower_expr(*key)?)), Some(*value)),
                    _ => (None, Some(t)),
                }
            }
            other => (None, other),
        };

        let (value_var, by_ref) = match value {
            Some(v) if v.kind() == "by_ref" => match first_named(v) {
                Some(inner) => (self.lower_assign_target(inner)?, true),
                None => (self.unsupported(v), true),
            },
            Some(v) => (self.lower_assign_target(v)?, false),
            None => (self.unsupported(node), false),
        };

        Ok(NodeKind::Foreach {
            expr: Box::new(expr),
            key_var,
            value_var: Box::new(value_var),
            by_ref,
            stmts: self.body(node)?,
        })
    }

    fn lower_switch(&mut self, node: TsNode<'_>) -> Result<NodeKind> {
        let cond = self.condition(node)?;
        let mut cases: Vec<Node> = Vec::new();
        let mut pending: Vec<Comment> = Vec::new();

        let block = node
            .child_by_field_name("body")
            .or_else(|| child_of_kind(node, "switch_block"));
        let entries = block.map(children).unwrap_or_default();
        for entry in entries {
            match entry.kind() {
                "comment" => pending.push(Comment::new(self.text(entry))),
                "case_statement" | "default_statement" => {
                    let value = entry.child_by_field_name("value");
                    let cond = match value {
                        Some(v) => Some(Box::new(self.lower_expr(v)?)),
                        None => None,
                    };
                    let kids = children(entry);
                    let start = kids
                        .iter()
                        .position(|c| matches!(c.kind(), ":" | ";"))
                        .map_or(kids.len(), |i| i + 1);
                    let stmts = self.lower_statements(&kids[start..])?;
                    cases.push(
                        Node::new(NodeKind::Case { cond, stmts })
                            .with_comments(std::mem::take(&mut pending))
                            .with_span(span(entry)),
                    );
                }
                _ => {}
            }
        }
        if !pending.is_empty() {
            if let Some(NodeKind::Case { stmts, .. }) = cases.last_mut().map(|c| &mut c.kind) {
                stmts.push(Node::new(NodeKind::Nop).with_comments(pending));
            }
        }
        Ok(NodeKind::Switch {
            cond: Box::new(cond),
            cases,
        })
    }

    fn lower_try(&mut self, node: TsNode<'_>) -> Result<NodeKind> {
        let stmts = self.body(node)?;
        let mut catches = Vec::new();
        let mut finally = None;
        for clause in children(node) {
            match clause.kind() {
                "catch_clause" => {
                    let types = match clause.child_by_field_name("type") {
                        Some(t) if t.kind() == "type_list" => {
                            let mut types = Vec::new();
                            for ty in named_children(t) {
                                types.push(self.lower_type(ty)?);
                            }
                            types
                        }
                        Some(t) => vec![self.lower_type(t)?],
                        None => Vec::new(),
                    };
                    let var = match clause.child_by_field_name("name") {
                        Some(v) => Some(Box::new(self.lower_expr(v)?)),
                        None => None,
                    };
                    catches.push(
                        Node::new(NodeKind::Catch {
                            types,
                            var,
                            stmts: self.body(clause)?,
                        })
                        .with_span(span(clause)),
                    );
                }
                "finally_clause" => {
                    finally = Some(Box::new(
                        Node::new(NodeKind::Finally {
                            stmts: self.body(clause)?,
                        })
                        .with_span(span(clause)),
                    ))
                }
                _ => {}
            }
        }
        Ok(NodeKind::TryCatch {
            stmts,
            catches,
            finally,
        })
    }

    /// Class declaration, or the class body of `new class(...) {...}`
    pub(super) fn lower_class(&mut self, node: TsNode<'_>, name: Option<String>) -> Result<NodeKind> {
        let name = name.or_else(|| node.child_by_field_name("name").map(|n| self.text(n).to_string()));
        let extends = child_of_kind(node, "base_clause")
            .and_then(first_named)
            .map(|n| Box::new(self.lower_name(n)));
        Ok(NodeKind::Class {
            name,
            modifiers: self.modifiers(node),
            extends,
            implements: self.clause_names(node, "class_interface_clause"),
            stmts: self.member_body(node)?,
        })
    }

    fn member_body(&mut self, node: TsNode<'_>) -> Result<Vec<Node>> {
        match node
            .child_by_field_name("body")
            .or_else(|| child_of_kind(node, "declaration_list"))
        {
            Some(list) => self.lower_members(list),
            None => Ok(Vec::new()),
        }
    }

    fn clause_names(&self, node: TsNode<'_>, clause: &str) -> Vec<Node> {
        child_of_kind(node, clause)
            .map(named_children)
            .unwrap_or_default()
            .into_iter()
            .map(|n| self.lower_name(n))
            .collect()
    }

    fn lower_member(&mut self, node: TsNode<'_>) -> Result<Vec<Node>> {
        let member_span = span(node);
        let kind = match node.kind() {
            "method_declaration" => NodeKind::ClassMethod {
                name: self.field_text(node, "name"),
                modifiers: self.modifiers(node),
                params: self.lower_params(node)?,
                return_type: self.return_type(node)?,
                stmts: match node.child_by_field_name("body") {
                    Some(body) => Some(self.block(body)?),
                    None => None,
                },
                by_ref: is_by_ref(node),
            },
            "property_declaration" => self.lower_property(node)?,
            "const_declaration" => NodeKind::ClassConst {
                modifiers: self.modifiers(node),
                consts: self.lower_consts(node)?,
            },
            "use_declaration" => {
                let mut traits = Vec::new();
                let mut adaptations = Vec::new();
                for child in named_children(node) {
                    match child.kind() {
                        "use_list" => {
                            for rule in named_children(child) {
                                let text = self.text(rule).trim().trim_end_matches(';').trim_end();
                                adaptations.push(
                                    Node::new(NodeKind::TraitUseAdaptation(text.to_string()))
                                        .with_span(span(rule)),
                                );
                            }
                        }
                        _ => traits.push(self.lower_name(child)),
                    }
                }
                NodeKind::TraitUse {
                    traits,
                    adaptations,
                }
            }
            _ => return self.lower_statement(node),
        };
        Ok(vec![Node::new(kind).with_span(member_span)])
    }

    fn lower_property(&mut self, node: TsNode<'_>) -> Result<NodeKind> {
        let type_ = match node.child_by_field_name("type") {
            Some(t) => Some(Box::new(self.lower_type(t)?)),
            None => None,
        };
        let mut props = Vec::new();
        for element in named_children(node)
            .into_iter()
            .filter(|c| c.kind() == "property_element")
        {
            let name_node = element
                .child_by_field_name("name")
                .or_else(|| child_of_kind(element, "variable_name"));
            let name = name_node
                .map_or("", |n| self.text(n))
                .trim_start_matches('$')
                .to_string();
            let default_node = element.child_by_field_name("default_value").or_else(|| {
                named_children(element)
                    .into_iter()
                    .find(|c| name_node.map_or(true, |n| n.id() != c.id()))
                    .map(|c| match c.kind() {
                        "property_initializer" => first_named(c).unwrap_or(c),
                        _ => c,
                    })
            });
            let default = match default_node {
                Some(d) => Some(Box::new(self.lower_expr(d)?)),
                None => None,
            };
            props.push(
                Node::new(NodeKind::PropertyProperty { name, default }).with_span(span(element)),
            );
        }
        Ok(NodeKind::Property {
            modifiers: self.modifiers(node),
            type_,
            props,
        })
    }

    fn lower_consts(&mut self, node: TsNode<'_>) -> Result<Vec<Node>> {
        let mut consts = Vec::new();
        for element in named_children(node)
            .into_iter()
            .filter(|c| c.kind() == "const_element")
        {
            let parts = named_children(element);
            let (name, value) = match parts.as_slice() {
                [name, .., value] => (self.text(*name).to_string(), self.lower_expr(*value)?),
                _ => (self.text(element).to_string(), self.unsupported(element)),
            };
            consts.push(
                Node::new(NodeKind::Const {
                    name,
                    value: Box::new(value),
                })
                .with_span(span(element)),
            );
        }
        Ok(consts)
    }

    pub(super) fn modifiers(&self, node: TsNode<'_>) -> Modifiers {
        let mut modifiers = Modifiers::default();
        for child in children(node) {
            match child.kind() {
                "visibility_modifier" => {
                    modifiers.visibility = Some(self.text(child).to_ascii_lowercase())
                }
                "var_modifier" => modifiers.visibility = Some("public".to_string()),
                "static_modifier" => modifiers.is_static = true,
                "abstract_modifier" => modifiers.is_abstract = true,
                "final_modifier" => modifiers.is_final = true,
                "readonly_modifier" => modifiers.is_readonly = true,
                _ => {}
            }
        }
        modifiers
    }

    fn lower_declare(&mut self, node: TsNode<'_>) -> Result<NodeKind> {
        let mut declares = Vec::new();
        for directive in children(node)
            .into_iter()
            .filter(|c| c.kind() == "declare_directive")
        {
            let text = self.text(directive);
            let key = text.split('=').next().unwrap_or("").trim().to_string();
            let value = match named_children(directive).last() {
                Some(v) => self.lower_expr(*v)?,
                None => Node::new(NodeKind::LNumber(
                    text.split('=').nth(1).unwrap_or("").trim().to_string(),
                )),
            };
            declares.push(
                Node::new(NodeKind::DeclareDeclare {
                    key,
                    value: Box::new(value),
                })
                .with_span(span(directive)),
            );
        }
        let stmts = if let Some(body) = node.child_by_field_name("body") {
            Some(self.block(body)?)
        } else if let Some(block) = child_of_kind(node, "compound_statement") {
            Some(self.block(block)?)
        } else if has_token(node, ":") {
            Some(self.body(node)?)
        } else {
            None
        };
        Ok(NodeKind::Declare { declares, stmts })
    }

    /// `use A\B as C, D;`, `use function ...` and `use A\{B, C}`
    fn lower_namespace_use(&self, node: TsNode<'_>) -> NodeKind {
        let kind = use_kind(node).unwrap_or(UseKind::Normal);

        if let Some(group) = child_of_kind(node, "namespace_use_group") {
            let prefix = child_of_kind(node, "namespace_name")
                .or_else(|| child_of_kind(node, "namespace_name_as_prefix"))
                .map_or("", |n| self.text(n));
            let uses = named_children(group)
                .into_iter()
                .filter(|c| matches!(c.kind(), "namespace_use_clause" | "namespace_use_group_clause"))
                .map(|clause| self.lower_use_clause(clause, use_kind(clause).unwrap_or(UseKind::Normal)))
                .collect();
            return NodeKind::GroupUse {
                kind,
                prefix: Box::new(Node::new(name_from_text(prefix))),
                uses,
            };
        }

        NodeKind::Use {
            kind,
            uses: named_children(node)
                .into_iter()
                .filter(|c| c.kind() == "namespace_use_clause")
                .map(|clause| self.lower_use_clause(clause, UseKind::Normal))
                .collect(),
        }
    }

    /// One imported name with its optional alias
    fn lower_use_clause(&self, clause: TsNode<'_>, kind: UseKind) -> Node {
        let alias_node = clause.child_by_field_name("alias").or_else(|| {
            child_of_kind(clause, "namespace_aliasing_clause").and_then(first_named)
        });
        let name = named_children(clause)
            .into_iter()
            .filter(|c| Some(c.id()) != alias_node.map(|a| a.id()))
            .find(|c| matches!(c.kind(), "name" | "qualified_name" | "namespace_name"))
            .map_or("", |n| self.text(n));
        Node::new(NodeKind::UseUse {
            kind,
            name: Box::new(Node::new(name_from_text(name))),
            alias: alias_node.map(|a| self.text(a).to_string()),
        })
        .with_span(span(clause))
    }
}

/// `function` / `const` written directly on a use declaration or clause
fn use_kind(node: TsNode<'_>) -> Option<UseKind> {
    let keyword = match node.child_by_field_name("type") {
        Some(t) => t.kind().to_ascii_lowercase(),
        None => children(node)
            .into_iter()
            .filter(|c| !c.is_named())
            .map(|c| c.kind().to_ascii_lowercase())
            .find(|k| k == "function" || k == "const")?,
    };
    match keyword.as_str() {
        "function" => Some(UseKind::Function),
        "const" => Some(UseKind::Constant),
        _ => None,
    }
}

pub(super) fn is_by_ref(node: TsNode<'_>) -> bool {
    has_child_kind(node, "reference_modifier") || has_token(node, "&")
}

/// `namespace X;` owns every statement up to the next namespace
fn group_namespaces(stmts: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(stmts.len());
    for stmt in stmts {
        let starts_namespace = matches!(stmt.kind, NodeKind::Namespace { .. });
        if !starts_namespace {
            if let Some(last) = out.last_mut() {
                if let NodeKind::Namespace {
                    braced: false,
                    stmts,
                    ..
                } = &mut last.kind
                {
                    stmts.push(stmt);
                    continue;
                }
            }
        }
        out.push(stmt);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_alias_skips_inline_comment() {
        let stmts = crate::parser::parse("<?php\nuse Foo\\Bar /* c */ as Baz;\n").unwrap();
        let uses = match &stmts[0].kind {
            NodeKind::Use { uses, .. } => uses,
            other => panic!("unexpected {:?}", other),
        };
        match &uses[0].kind {
            NodeKind::UseUse { name, alias, .. } => {
                assert_eq!(
                    name.kind,
                    NodeKind::Name {
                        parts: vec!["Foo".to_string(), "Bar".to_string()],
                        qualification: crate::ast::NameKind::Unqualified,
                    }
                );
                assert_eq!(alias.as_deref(), Some("Baz"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_use_function_kind() {
        let stmts = crate::parser::parse("<?php\nuse function Foo\\bar;\n").unwrap();
        match &stmts[0].kind {
            NodeKind::Use { kind, uses } => {
                assert_eq!(*kind, UseKind::Function);
                assert_eq!(uses.len(), 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_group_namespaces() {
        let ns = Node::new(NodeKind::Namespace {
            name: Some(Box::new(Node::name("App"))),
            stmts: Vec::new(),
            braced: false,
        });
        let grouped = group_namespaces(vec![ns, Node::new(NodeKind::Nop), Node::new(NodeKind::Nop)]);
        assert_eq!(grouped.len(), 1);
        match &grouped[0].kind {
            NodeKind::Namespace { stmts, .. } => assert_eq!(stmts.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
    }
}
