//! Functions, classes, interfaces and their members

use super::{DocTypes, Emitter, MemberScope, BLANK_LINE_MARKER};
use crate::ast::{Node, NodeKind, VariableName};
use crate::error::Result;

const ANONYMOUS_CLASS: &str = "AnonymousClass";

impl Emitter {
    pub(crate) fn p_param(
        &mut self,
        var: &Node,
        type_: Option<&Node>,
        default: Option<&Node>,
        by_ref: bool,
        variadic: bool,
    ) -> Result<String> {
        let mut out = String::new();
        if by_ref {
            out.push('&');
        }
        out.push_str(&self.render(var)?);
        if let Some(type_) = type_ {
            out.push(' ');
            if variadic {
                out.push_str("...");
            }
            out.push_str(&self.render(type_)?);
        } else if variadic {
            out.push_str(" ...interface{}");
        }
        if let Some(default) = default {
            out.push_str(&format!(" /* = {} */", self.render(default)?));
        }
        Ok(out)
    }

    /// `(params) ret`, filling missing types from the doc comment of `owner`
    pub(crate) fn render_signature(
        &mut self,
        owner: &Node,
        params: &[Node],
        return_type: Option<&Node>,
    ) -> Result<String> {
        let doc = DocTypes::from_node(owner);

        let mut rendered = Vec::with_capacity(params.len());
        for param in params {
            let documented = match &param.kind {
                NodeKind::Param {
                    var, type_: None, ..
                } => param_name(var).and_then(|name| doc.param(name)),
                _ => None,
            };
            match documented {
                Some(type_name) => {
                    let mut typed = param.clone();
                    if let NodeKind::Param { type_, .. } = &mut typed.kind {
                        *type_ = Some(Box::new(Node::new(NodeKind::Identifier(
                            type_name.to_string(),
                        ))));
                    }
                    rendered.push(self.render(&typed)?);
                }
                None => rendered.push(self.render(param)?),
            }
        }

        let ret = match return_type {
            Some(ty) => format!(" {}", self.render(ty)?),
            None => doc
                .return_type()
                .map(|ty| format!(" {}", ty))
                .unwrap_or_default(),
        };
        Ok(format!("({}){}", rendered.join(", "), ret))
    }

    pub(crate) fn p_function(
        &mut self,
        node: &Node,
        name: &str,
        params: &[Node],
        return_type: Option<&Node>,
        stmts: &[Node],
        by_ref: bool,
    ) -> Result<String> {
        let signature = self.render_signature(node, params, return_type)?;
        let body = self.scoped(MemberScope::TopLevel, |this| this.render_stmts(stmts))?;
        Ok(format!(
            "func {}{}{} {{{}{}}}",
            if by_ref { "&" } else { "" },
            name,
            signature,
            body,
            self.nl()
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn p_class_method(
        &mut self,
        node: &Node,
        name: &str,
        is_abstract: bool,
        params: &[Node],
        return_type: Option<&Node>,
        stmts: Option<&[Node]>,
        by_ref: bool,
    ) -> Result<String> {
        let signature = self.render_signature(node, params, return_type)?;
        let name = format!("{}{}", if by_ref { "&" } else { "" }, name);

        let receiver = match &self.scope {
            MemberScope::Interface => return Ok(format!("{}{}", name, signature)),
            MemberScope::Class(class) => format!("(this *{}) ", class),
            MemberScope::TopLevel => String::new(),
        };

        match stmts {
            Some(stmts) => {
                let body = self.scoped(MemberScope::TopLevel, |this| this.render_stmts(stmts))?;
                Ok(format!(
                    "func {}{}{} {{{}{}}}",
                    receiver,
                    name,
                    signature,
                    body,
                    self.nl()
                ))
            }
            None => Ok(format!(
                "{}func {}{}{} {{}}",
                if is_abstract {
                    format!("// TODO: abstract{}", self.nl())
                } else {
                    String::new()
                },
                receiver,
                name,
                signature
            )),
        }
    }

    /// A class becomes a struct followed by its constants and methods
    pub(crate) fn p_class(
        &mut self,
        name: Option<&str>,
        extends: Option<&Node>,
        implements: &[Node],
        stmts: &[Node],
    ) -> Result<String> {
        let struct_name = name.unwrap_or(ANONYMOUS_CLASS);
        let mut out = String::from("// TODO: Think structure strategy.");
        if !implements.is_empty() {
            out.push_str(&self.nl());
            out.push_str("// implements: ");
            out.push_str(&self.render_comma_separated(implements)?);
        }
        out.push_str(&self.nl());
        out.push_str(&format!("type {} struct {{", struct_name));

        let fields = self.indented(|this| {
            let mut fields = String::new();
            if let Some(parent) = extends {
                fields.push_str(&this.nl());
                fields.push_str(&this.render(parent)?);
            }
            let field_stmts: Vec<Node> = stmts
                .iter()
                .filter(|s| is_struct_field(s))
                .cloned()
                .collect();
            fields.push_str(&this.render_stmt_list(&field_stmts)?);
            Ok(fields)
        })?;
        out.push_str(&fields);
        out.push_str(&self.nl());
        out.push('}');

        let members = self.scoped(MemberScope::Class(struct_name.to_string()), |this| {
            this.render_members(stmts.iter().filter(|s| !is_struct_field(s)))
        })?;
        out.push_str(&members);
        Ok(out)
    }

    /// Members after a type block, each separated by one blank line
    fn render_members<'a>(&mut self, members: impl Iterator<Item = &'a Node>) -> Result<String> {
        let mut out = String::new();
        for member in members {
            let starts_blank = member
                .comments
                .first()
                .map_or(false, |c| c.text.trim() == BLANK_LINE_MARKER);
            if !starts_blank {
                out.push('\n');
            }
            out.push_str(&self.render_stmt_list(std::slice::from_ref(member))?);
        }
        Ok(out)
    }

    pub(crate) fn p_interface(
        &mut self,
        name: &str,
        extends: &[Node],
        stmts: &[Node],
    ) -> Result<String> {
        let body = self.scoped(MemberScope::Interface, |this| {
            this.indented(|this| {
                let mut body = String::new();
                for parent in extends {
                    body.push_str(&this.nl());
                    body.push_str(&this.render(parent)?);
                }
                body.push_str(&this.render_stmt_list(stmts)?);
                Ok(body)
            })
        })?;
        Ok(format!("type {} interface {{{}{}}}", name, body, self.nl()))
    }

    pub(crate) fn p_property(
        &mut self,
        node: &Node,
        type_: Option<&Node>,
        props: &[Node],
    ) -> Result<String> {
        let type_name = match type_ {
            Some(ty) => self.render(ty)?,
            None => DocTypes::from_node(node)
                .var_type()
                .unwrap_or("interface{}")
                .to_string(),
        };

        let saved = self.property_type.replace(type_name);
        let mut lines = Vec::with_capacity(props.len());
        let mut result = Ok(());
        for prop in props {
            match self.render(prop) {
                Ok(line) => lines.push(line),
                Err(err) => {
                    result = Err(err);
                    break;
                }
            }
        }
        self.property_type = saved;
        result?;
        Ok(lines.join(&self.nl()))
    }

    pub(crate) fn p_property_property(&mut self, name: &str, default: Option<&Node>) -> Result<String> {
        let mut out = name.to_string();
        if let Some(type_name) = &self.property_type {
            out.push(' ');
            out.push_str(type_name);
        }
        if let Some(default) = default {
            out.push_str(" = ");
            out.push_str(&self.render(default)?);
        }
        Ok(out)
    }

    pub(crate) fn p_consts(&mut self, consts: &[Node]) -> Result<String> {
        let mut lines = Vec::with_capacity(consts.len());
        for constant in consts {
            lines.push(format!("const {}", self.render(constant)?));
        }
        Ok(lines.join(&self.nl()))
    }
}

fn param_name(var: &Node) -> Option<&str> {
    match &var.kind {
        NodeKind::Variable(VariableName::Named(name)) => Some(name),
        _ => None,
    }
}

fn is_struct_field(stmt: &Node) -> bool {
    matches!(
        stmt.kind,
        NodeKind::Property { .. } | NodeKind::TraitUse { .. }
    )
}
