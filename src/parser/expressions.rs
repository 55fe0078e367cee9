//! Expression lowering

use super::statements::is_by_ref;
use super::{child_of_kind, children, first_named, has_child_kind, has_token, named_children, span, Lowerer};
use crate::ast::{
    BinaryOperator, CastKind, Comment, IncDecOperator, IncludeKind, MagicConstKind, Node,
    NodeKind, UnaryOperator, VariableName,
};
use crate::error::Result;
use tree_sitter::Node as TsNode;

impl<'s> Lowerer<'s> {
    pub(crate) fn lower_expr(&mut self, node: TsNode<'_>) -> Result<Node> {
        let expr_span = span(node);
        self.nested(|this| this.lower_expr_inner(node))
            .map(|expr| expr.with_span(expr_span))
    }

    fn lower_expr_inner(&mut self, node: TsNode<'_>) -> Result<Node> {
        let kind = match node.kind() {
            "parenthesized_expression" => {
                return match first_named(node) {
                    Some(inner) => self.lower_expr(inner),
                    None => Ok(self.unsupported(node)),
                };
            }
            "variable_name" => NodeKind::Variable(VariableName::Named(
                self.text(node).trim_start_matches('$').to_string(),
            )),
            "dynamic_variable_name" => match first_named(node) {
                Some(inner) => NodeKind::Variable(VariableName::Dynamic(Box::new(self.lower_expr(inner)?))),
                None => return Ok(self.unsupported(node)),
            },
            "name" => self.bare_name(node),
            "qualified_name" | "relative_scope" => NodeKind::ConstFetch(Box::new(self.lower_name(node))),
            "boolean" | "null" => NodeKind::ConstFetch(Box::new(Node::name(self.text(node)))),
            "integer" => NodeKind::LNumber(self.text(node).to_string()),
            "float" => NodeKind::DNumber(self.text(node).to_string()),
            "string" | "encapsed_string" => return self.lower_quoted(node),
            "heredoc" => return self.lower_heredoc(node, false),
            "nowdoc" => return self.lower_heredoc(node, true),
            "shell_command_expression" => return self.lower_shell_exec(node),
            "array_creation_expression" => NodeKind::Array {
                items: self.lower_array_items(node)?,
            },
            "list_literal" => NodeKind::List(self.lower_list_items(node)?),
            "assignment_expression" => {
                let (left, right) = self.operands(node)?;
                NodeKind::Assign {
                    var: Box::new(self.lower_assign_target(left)?),
                    expr: Box::new(self.lower_expr(right)?),
                }
            }
            "reference_assignment_expression" => {
                let (left, right) = self.operands(node)?;
                let right = match right.kind() {
                    "by_ref" => first_named(right).unwrap_or(right),
                    _ => right,
                };
                NodeKind::AssignRef {
                    var: Box::new(self.lower_assign_target(left)?),
                    expr: Box::new(self.lower_expr(right)?),
                }
            }
            "augmented_assignment_expression" => {
                let (left, right) = self.operands(node)?;
                let token = self.operator_text(node);
                match BinaryOperator::from_assign_token(token) {
                    Some(op) => NodeKind::AssignOp {
                        op,
                        var: Box::new(self.lower_expr(left)?),
                        expr: Box::new(self.lower_expr(right)?),
                    },
                    None => return Ok(self.unsupported(node)),
                }
            }
            "binary_expression" => {
                let (left, right) = self.operands(node)?;
                let token = self.operator_text(node);
                if token.eq_ignore_ascii_case("instanceof") {
                    NodeKind::Instanceof {
                        expr: Box::new(self.lower_expr(left)?),
                        class: Box::new(self.name_or_expr(right)?),
                    }
                } else {
                    match BinaryOperator::from_token(token) {
                        Some(op) => NodeKind::BinaryOp {
                            op,
                            left: Box::new(self.lower_expr(left)?),
                            right: Box::new(self.lower_expr(right)?),
                        },
                        None => return Ok(self.unsupported(node)),
                    }
                }
            }
            "unary_op_expression" => {
                let token = self.operator_text(node);
                let operand = node
                    .child_by_field_name("argument")
                    .or_else(|| named_children(node).into_iter().last());
                match (UnaryOperator::from_token(token), operand) {
                    (Some(op), Some(operand)) => NodeKind::UnaryOp {
                        op,
                        expr: Box::new(self.lower_expr(operand)?),
                    },
                    _ => return Ok(self.unsupported(node)),
                }
            }
            "update_expression" => {
                let kids = children(node);
                let prefix = kids.first().map_or(false, |c| !c.is_named());
                let op = if kids.iter().any(|c| c.kind() == "--") {
                    IncDecOperator::Decrement
                } else {
                    IncDecOperator::Increment
                };
                match first_named(node) {
                    Some(var) => NodeKind::IncDec {
                        op,
                        prefix,
                        var: Box::new(self.lower_expr(var)?),
                    },
                    None => return Ok(self.unsupported(node)),
                }
            }
            "cast_expression" => {
                let type_name = node
                    .child_by_field_name("type")
                    .map_or("", |t| self.text(t))
                    .trim_matches(|c: char| c == '(' || c == ')' || c.is_whitespace());
                let value = node
                    .child_by_field_name("value")
                    .or_else(|| named_children(node).into_iter().last());
                match (CastKind::from_type_name(type_name), value) {
                    (Some(kind), Some(value)) => NodeKind::Cast {
                        kind,
                        expr: Box::new(self.lower_expr(value)?),
                    },
                    _ => return Ok(self.unsupported(node)),
                }
            }
            "error_suppression_expression" => NodeKind::ErrorSuppress(self.only_operand(node)?),
            "clone_expression" => NodeKind::Clone(self.only_operand(node)?),
            "print_intrinsic" => NodeKind::Print(self.only_operand(node)?),
            "include_expression" => self.include(node, IncludeKind::Include)?,
            "include_once_expression" => self.include(node, IncludeKind::IncludeOnce)?,
            "require_expression" => self.include(node, IncludeKind::Require)?,
            "require_once_expression" => self.include(node, IncludeKind::RequireOnce)?,
            "function_call_expression" => return self.lower_func_call(node),
            "member_call_expression" | "nullsafe_member_call_expression" => NodeKind::MethodCall {
                var: Box::new(self.field_expr(node, "object")?),
                name: Box::new(self.member_name(node)?),
                args: self.lower_args(node)?,
                nullsafe: node.kind().starts_with("nullsafe"),
            },
            "scoped_call_expression" => NodeKind::StaticCall {
                class: Box::new(self.scope(node)?),
                name: Box::new(self.member_name(node)?),
                args: self.lower_args(node)?,
            },
            "member_access_expression" | "nullsafe_member_access_expression" => {
                NodeKind::PropertyFetch {
                    var: Box::new(self.field_expr(node, "object")?),
                    name: Box::new(self.member_name(node)?),
                    nullsafe: node.kind().starts_with("nullsafe"),
                }
            }
            "scoped_property_access_expression" => {
                let name = match node.child_by_field_name("name") {
                    Some(n) if n.kind() == "variable_name" => Node::new(NodeKind::VarLikeIdentifier(
                        self.text(n).trim_start_matches('$').to_string(),
                    ))
                    .with_span(span(n)),
                    Some(n) => self.lower_expr(n)?,
                    None => return Ok(self.unsupported(node)),
                };
                NodeKind::StaticPropertyFetch {
                    class: Box::new(self.scope(node)?),
                    name: Box::new(name),
                }
            }
            "class_constant_access_expression" => match named_children(node).as_slice() {
                [class, name] => NodeKind::ClassConstFetch {
                    class: Box::new(self.name_or_expr(*class)?),
                    name: Box::new(
                        Node::new(NodeKind::Identifier(self.text(*name).to_string()))
                            .with_span(span(*name)),
                    ),
                },
                _ => return Ok(self.unsupported(node)),
            },
            "subscript_expression" => {
                let parts = named_children(node);
                match parts.as_slice() {
                    [var] => NodeKind::ArrayDimFetch {
                        var: Box::new(self.lower_expr(*var)?),
                        dim: None,
                    },
                    [var, dim, ..] => NodeKind::ArrayDimFetch {
                        var: Box::new(self.lower_expr(*var)?),
                        dim: Some(Box::new(self.lower_expr(*dim)?)),
                    },
                    [] => return Ok(self.unsupported(node)),
                }
            }
            "object_creation_expression" => self.lower_new(node)?,
            "conditional_expression" => {
                let cond = match node.child_by_field_name("condition") {
                    Some(c) => self.lower_expr(c)?,
                    None => return Ok(self.unsupported(node)),
                };
                let if_ = match node.child_by_field_name("body") {
                    Some(b) => Some(Box::new(self.lower_expr(b)?)),
                    None => None,
                };
                let else_ = match node.child_by_field_name("alternative") {
                    Some(a) => self.lower_expr(a)?,
                    None => return Ok(self.unsupported(node)),
                };
                NodeKind::Ternary {
                    cond: Box::new(cond),
                    if_,
                    else_: Box::new(else_),
                }
            }
            "anonymous_function" | "anonymous_function_creation_expression" => NodeKind::Closure {
                params: self.lower_params(node)?,
                uses: self.lower_closure_uses(node)?,
                return_type: self.return_type(node)?,
                stmts: match node.child_by_field_name("body") {
                    Some(body) => self.lower_statements(&children(body))?,
                    None => Vec::new(),
                },
                by_ref: is_by_ref(node),
                is_static: is_static(node),
            },
            "arrow_function" => match node.child_by_field_name("body") {
                Some(body) => NodeKind::ArrowFunction {
                    params: self.lower_params(node)?,
                    return_type: self.return_type(node)?,
                    expr: Box::new(self.lower_expr(body)?),
                    by_ref: is_by_ref(node),
                    is_static: is_static(node),
                },
                None => return Ok(self.unsupported(node)),
            },
            "yield_expression" => {
                if has_token(node, "from") {
                    NodeKind::YieldFrom(self.only_operand(node)?)
                } else {
                    match first_named(node) {
                        Some(element) if element.kind() == "array_element_initializer" => {
                            match self.lower_array_element(element)?.kind {
                                NodeKind::ArrayItem { key, value, .. } => NodeKind::Yield {
                                    key,
                                    value: Some(value),
                                },
                                _ => return Ok(self.unsupported(node)),
                            }
                        }
                        Some(value) => NodeKind::Yield {
                            key: None,
                            value: Some(Box::new(self.lower_expr(value)?)),
                        },
                        None => NodeKind::Yield {
                            key: None,
                            value: None,
                        },
                    }
                }
            }
            _ => return Ok(self.unsupported(node)),
        };
        Ok(Node::new(kind))
    }

    /// A bare identifier in expression position
    fn bare_name(&self, node: TsNode<'_>) -> NodeKind {
        let text = self.text(node);
        if let Some(kind) = MagicConstKind::from_name(text) {
            return NodeKind::MagicConst(kind);
        }
        match text.to_ascii_lowercase().as_str() {
            "exit" => NodeKind::Exit {
                expr: None,
                die: false,
            },
            "die" => NodeKind::Exit {
                expr: None,
                die: true,
            },
            _ => NodeKind::ConstFetch(Box::new(self.lower_name(node))),
        }
    }

    /// A name in callee or class position, or any other expression there
    fn name_or_expr(&mut self, node: TsNode<'_>) -> Result<Node> {
        match node.kind() {
            "name" | "qualified_name" | "relative_scope" | "namespace_name" => Ok(self.lower_name(node)),
            "named_type" => match first_named(node) {
                Some(inner) => self.name_or_expr(inner),
                None => Ok(self.lower_name(node)),
            },
            _ => self.lower_expr(node),
        }
    }

    fn operands<'t>(&self, node: TsNode<'t>) -> Result<(TsNode<'t>, TsNode<'t>)> {
        let left = node.child_by_field_name("left");
        let right = node.child_by_field_name("right");
        match (left, right) {
            (Some(l), Some(r)) => Ok((l, r)),
            _ => {
                let named = named_children(node);
                match (named.first(), named.last()) {
                    (Some(l), Some(r)) if named.len() >= 2 => Ok((*l, *r)),
                    _ => Err(crate::error::Error::internal(format!(
                        "`{}` without two operands",
                        node.kind()
                    ))),
                }
            }
        }
    }

    fn operator_text(&self, node: TsNode<'_>) -> &'s str {
        match node.child_by_field_name("operator") {
            Some(op) => self.text(op).trim(),
            None => children(node)
                .into_iter()
                .find(|c| !c.is_named())
                .map_or("", |c| self.text(c).trim()),
        }
    }

    fn only_operand(&mut self, node: TsNode<'_>) -> Result<Box<Node>> {
        match named_children(node).into_iter().last() {
            Some(operand) => Ok(Box::new(self.lower_expr(operand)?)),
            None => Ok(Box::new(self.unsupported(node))),
        }
    }

    fn include(&mut self, node: TsNode<'_>, kind: IncludeKind) -> Result<NodeKind> {
        Ok(NodeKind::Include {
            expr: self.only_operand(node)?,
            kind,
        })
    }

    fn field_expr(&mut self, node: TsNode<'_>, field: &str) -> Result<Node> {
        match node.child_by_field_name(field) {
            Some(child) => self.lower_expr(child),
            None => Ok(self.unsupported(node)),
        }
    }

    fn scope(&mut self, node: TsNode<'_>) -> Result<Node> {
        match node.child_by_field_name("scope") {
            Some(scope) => self.name_or_expr(scope),
            None => Ok(self.unsupported(node)),
        }
    }

    /// `name` of a member access: an identifier, or a dynamic expression
    fn member_name(&mut self, node: TsNode<'_>) -> Result<Node> {
        match node.child_by_field_name("name") {
            Some(name) if name.kind() == "name" => Ok(Node::new(NodeKind::Identifier(
                self.text(name).to_string(),
            ))
            .with_span(span(name))),
            Some(name) => self.lower_expr(name),
            None => Ok(self.unsupported(node)),
        }
    }

    /// Calls to `isset`, `empty`, `eval`, `exit` and `die` are language
    /// constructs with their own nodes
    fn lower_func_call(&mut self, node: TsNode<'_>) -> Result<Node> {
        let callee = match node.child_by_field_name("function") {
            Some(f) => f,
            None => return Ok(self.unsupported(node)),
        };
        let args = self.lower_args(node)?;

        if callee.kind() == "name" {
            let name = self.text(callee).to_ascii_lowercase();
            let first_value = || {
                args.first().map(|arg| match &arg.kind {
                    NodeKind::Arg { value, .. } => value.clone(),
                    _ => Box::new(arg.clone()),
                })
            };
            let construct = match name.as_str() {
                "isset" => Some(NodeKind::Isset(
                    args.iter()
                        .map(|arg| match &arg.kind {
                            NodeKind::Arg { value, .. } => (**value).clone(),
                            _ => arg.clone(),
                        })
                        .collect(),
                )),
                "empty" => first_value().map(NodeKind::Empty),
                "eval" => first_value().map(NodeKind::Eval),
                "exit" | "die" => Some(NodeKind::Exit {
                    expr: first_value(),
                    die: name == "die",
                }),
                _ => None,
            };
            if let Some(kind) = construct {
                return Ok(Node::new(kind));
            }
        }

        Ok(Node::new(NodeKind::FuncCall {
            name: Box::new(self.name_or_expr(callee)?),
            args,
        }))
    }

    /// Argument list, each argument carrying the comments before it
    pub(super) fn lower_args(&mut self, node: TsNode<'_>) -> Result<Vec<Node>> {
        let list = match node
            .child_by_field_name("arguments")
            .or_else(|| child_of_kind(node, "arguments"))
        {
            Some(list) => list,
            None => return Ok(Vec::new()),
        };
        let mut args = Vec::new();
        let mut pending: Vec<Comment> = Vec::new();
        for child in children(list) {
            if child.kind() == "comment" {
                pending.push(Comment::new(self.text(child)));
                continue;
            }
            if !child.is_named() {
                continue;
            }
            let arg = self.lower_argument(child)?;
            args.push(arg.with_comments(std::mem::take(&mut pending)));
        }
        Ok(args)
    }

    fn lower_argument(&mut self, node: TsNode<'_>) -> Result<Node> {
        let arg_span = span(node);
        if node.kind() != "argument" {
            let unpack = node.kind() == "variadic_unpacking";
            let value_node = if unpack { first_named(node).unwrap_or(node) } else { node };
            return Ok(Node::new(NodeKind::Arg {
                value: Box::new(self.lower_expr(value_node)?),
                by_ref: false,
                unpack,
                name: None,
            })
            .with_span(arg_span));
        }

        let name_node = node.child_by_field_name("name");
        let mut unpack = has_token(node, "...");
        let mut value = None;
        for child in named_children(node) {
            if name_node.map_or(false, |n| n.id() == child.id()) {
                continue;
            }
            match child.kind() {
                "reference_modifier" => {}
                "variadic_unpacking" => {
                    unpack = true;
                    value = Some(first_named(child).unwrap_or(child));
                }
                _ => value = Some(child),
            }
        }
        let value = match value {
            Some(v) => self.lower_expr(v)?,
            None => self.unsupported(node),
        };
        Ok(Node::new(NodeKind::Arg {
            value: Box::new(value),
            by_ref: is_by_ref(node),
            unpack,
            name: name_node.map(|n| self.text(n).to_string()),
        })
        .with_span(arg_span))
    }

    pub(super) fn lower_params(&mut self, node: TsNode<'_>) -> Result<Vec<Node>> {
        let list = match node.child_by_field_name("parameters") {
            Some(list) => list,
            None => return Ok(Vec::new()),
        };
        let mut params = Vec::new();
        for param in named_children(list) {
            params.push(self.lower_param(param)?);
        }
        Ok(params)
    }

    fn lower_param(&mut self, node: TsNode<'_>) -> Result<Node> {
        let mut by_ref = is_by_ref(node);
        let var = match node.child_by_field_name("name") {
            Some(name) if name.kind() == "by_ref" => {
                by_ref = true;
                match first_named(name) {
                    Some(inner) => self.lower_expr(inner)?,
                    None => self.unsupported(name),
                }
            }
            Some(name) => self.lower_expr(name)?,
            None => return Ok(self.unsupported(node)),
        };
        let type_ = match node.child_by_field_name("type") {
            Some(t) => Some(Box::new(self.lower_type(t)?)),
            None => None,
        };
        let default = match node.child_by_field_name("default_value") {
            Some(d) => Some(Box::new(self.lower_expr(d)?)),
            None => None,
        };
        let promoted = if node.kind() == "property_promotion_parameter" {
            self.modifiers(node)
        } else {
            Default::default()
        };
        Ok(Node::new(NodeKind::Param {
            var: Box::new(var),
            type_,
            default,
            by_ref,
            variadic: node.kind() == "variadic_parameter" || has_token(node, "..."),
            promoted,
        })
        .with_span(span(node)))
    }

    pub(super) fn return_type(&mut self, node: TsNode<'_>) -> Result<Option<Box<Node>>> {
        match node.child_by_field_name("return_type") {
            Some(t) => Ok(Some(Box::new(self.lower_type(t)?))),
            None => Ok(None),
        }
    }

    pub(super) fn lower_type(&mut self, node: TsNode<'_>) -> Result<Node> {
        let kind = match node.kind() {
            "primitive_type" | "bottom_type" | "cast_type" => {
                NodeKind::Identifier(self.text(node).to_string())
            }
            "name" | "qualified_name" | "relative_scope" => return Ok(self.lower_name(node)),
            "named_type" => match first_named(node) {
                Some(inner) => return self.lower_type(inner),
                None => NodeKind::Identifier(self.text(node).to_string()),
            },
            "optional_type" => match first_named(node) {
                Some(inner) => NodeKind::NullableType(Box::new(self.lower_type(inner)?)),
                None => return Ok(self.unsupported(node)),
            },
            "union_type" | "type_list" => {
                let mut types = Vec::new();
                for ty in named_children(node) {
                    types.push(self.lower_type(ty)?);
                }
                NodeKind::UnionType(types)
            }
            _ => return Ok(self.unsupported(node)),
        };
        Ok(Node::new(kind).with_span(span(node)))
    }

    fn lower_closure_uses(&mut self, node: TsNode<'_>) -> Result<Vec<Node>> {
        let clause = match child_of_kind(node, "anonymous_function_use_clause") {
            Some(clause) => clause,
            None => return Ok(Vec::new()),
        };
        let mut uses = Vec::new();
        let mut pending_ref = false;
        for child in children(clause) {
            match child.kind() {
                "&" => pending_ref = true,
                "by_ref" => {
                    let var = match first_named(child) {
                        Some(inner) => self.lower_expr(inner)?,
                        None => self.unsupported(child),
                    };
                    uses.push(Node::new(NodeKind::ClosureUse {
                        var: Box::new(var),
                        by_ref: true,
                    }));
                    pending_ref = false;
                }
                "variable_name" => {
                    uses.push(Node::new(NodeKind::ClosureUse {
                        var: Box::new(self.lower_expr(child)?),
                        by_ref: pending_ref,
                    }));
                    pending_ref = false;
                }
                _ => {}
            }
        }
        Ok(uses)
    }

    fn lower_new(&mut self, node: TsNode<'_>) -> Result<NodeKind> {
        let named = named_children(node);
        if let Some(anonymous) = named.iter().find(|c| c.kind() == "anonymous_class") {
            return Ok(NodeKind::New {
                class: Box::new(Node::new(self.lower_class(*anonymous, None)?).with_span(span(*anonymous))),
                args: self.lower_args(*anonymous)?,
            });
        }
        if has_child_kind(node, "declaration_list") {
            return Ok(NodeKind::New {
                class: Box::new(Node::new(self.lower_class(node, None)?)),
                args: self.lower_args(node)?,
            });
        }
        let class = match named.iter().find(|c| c.kind() != "arguments") {
            Some(class) => self.name_or_expr(*class)?,
            None => self.unsupported(node),
        };
        Ok(NodeKind::New {
            class: Box::new(class),
            args: self.lower_args(node)?,
        })
    }

    /// Left side of `=`: array literals there destructure
    pub(super) fn lower_assign_target(&mut self, node: TsNode<'_>) -> Result<Node> {
        Ok(array_to_list(self.lower_expr(node)?))
    }

    fn lower_array_items(&mut self, node: TsNode<'_>) -> Result<Vec<Node>> {
        let mut items = Vec::new();
        let mut pending: Vec<Comment> = Vec::new();
        for child in children(node) {
            match child.kind() {
                "comment" => pending.push(Comment::new(self.text(child))),
                "array_element_initializer" => {
                    let item = self.lower_array_element(child)?;
                    items.push(item.with_comments(std::mem::take(&mut pending)));
                }
                _ => {}
            }
        }
        Ok(items)
    }

    fn lower_array_element(&mut self, node: TsNode<'_>) -> Result<Node> {
        let named = named_children(node);
        let (key, value_node) = if has_token(node, "=>") && named.len() >= 2 {
            (Some(named[0]), named[named.len() - 1])
        } else {
            match named.last() {
                Some(last) => (None, *last),
                None => return Ok(self.unsupported(node)),
            }
        };
        let mut unpack = has_token(node, "...");
        let mut by_ref = false;
        let value_node = match value_node.kind() {
            "by_ref" => {
                by_ref = true;
                first_named(value_node).unwrap_or(value_node)
            }
            "variadic_unpacking" => {
                unpack = true;
                first_named(value_node).unwrap_or(value_node)
            }
            _ => value_node,
        };
        let key = match key {
            Some(k) => Some(Box::new(self.lower_expr(k)?)),
            None => None,
        };
        Ok(Node::new(NodeKind::ArrayItem {
            key,
            value: Box::new(self.lower_expr(value_node)?),
            by_ref,
            unpack,
        })
        .with_span(span(node)))
    }

    /// `list(...)` slots; skipped slots are `None`
    fn lower_list_items(&mut self, node: TsNode<'_>) -> Result<Vec<Option<Node>>> {
        let mut items = Vec::new();
        let mut filled = false;
        for child in children(node) {
            match child.kind() {
                "," => {
                    if !filled {
                        items.push(None);
                    }
                    filled = false;
                }
                "=>" => {
                    items.pop();
                    filled = false;
                }
                "comment" => {}
                _ if child.is_named() => {
                    let item = match child.kind() {
                        "array_element_initializer" => {
                            match self.lower_array_element(child)?.kind {
                                NodeKind::ArrayItem { value, .. } => array_to_list(*value),
                                other => Node::new(other),
                            }
                        }
                        "by_ref" => match first_named(child) {
                            Some(inner) => self.lower_assign_target(inner)?,
                            None => self.unsupported(child),
                        },
                        _ => self.lower_assign_target(child)?,
                    };
                    items.push(Some(item));
                    filled = true;
                }
                _ => {}
            }
        }
        Ok(items)
    }

    /// Expressions of an `echo`/`global`/`unset` list
    pub(super) fn lower_expr_list(&mut self, node: TsNode<'_>) -> Result<Vec<Node>> {
        let mut exprs = Vec::new();
        for child in named_children(node) {
            exprs.extend(self.flatten_sequence(child)?);
        }
        Ok(exprs)
    }

    /// `a, b, c` in expression lists, flattened
    pub(super) fn flatten_sequence(&mut self, node: TsNode<'_>) -> Result<Vec<Node>> {
        if node.kind() != "sequence_expression" {
            return Ok(vec![self.lower_expr(node)?]);
        }
        let mut exprs = Vec::new();
        let mut current = Some(node);
        while let Some(seq) = current.take() {
            for child in named_children(seq) {
                if child.kind() == "sequence_expression" {
                    current = Some(child);
                } else {
                    exprs.push(self.lower_expr(child)?);
                }
            }
        }
        Ok(exprs)
    }
}

/// Array literals in assignment position destructure, at any depth
fn array_to_list(node: Node) -> Node {
    match node.kind {
        NodeKind::Array { items } => Node {
            kind: NodeKind::List(
                items
                    .into_iter()
                    .map(|item| match item.kind {
                        NodeKind::ArrayItem { value, .. } => Some(array_to_list(*value)),
                        _ => Some(array_to_list(item)),
                    })
                    .collect(),
            ),
            comments: node.comments,
            span: node.span,
        },
        _ => node,
    }
}

fn is_static(node: TsNode<'_>) -> bool {
    has_child_kind(node, "static_modifier") || has_token(node, "static")
}
