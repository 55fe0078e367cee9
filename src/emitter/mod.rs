//! Emission engine
//!
//! [`Emitter::render`] is the single recursive entry point: it consults the
//! interceptor chain for the node's kind and falls back to the default rule.
//! Rules render their children through `render` again, so rendering is the
//! traversal.

pub mod additional_code;
pub mod hooks;
pub mod literals;
pub mod types;

mod declarations;
mod expressions;
mod fallback;
mod statements;

pub use additional_code::AdditionalCode;
pub use hooks::{Hook, HookFn, HookTable, Next};
pub use types::DocTypes;

use crate::ast::{Comment, Node, NodeKind};
use crate::error::{Error, Result};
use std::rc::Rc;

/// Suffix marking constructs without a faithful translation
pub const CANNOT_CONVERT: &str = " /* cannot convert */";

/// Placeholder substituted for blank source lines
pub const BLANK_LINE_MARKER: &str = "// ITS DUMMY LINE //";

/// Spaces per indentation level
pub const INDENT_WIDTH: usize = 4;

const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROW_SIZE: usize = 1024 * 1024;

/// Declaration currently being rendered, for method receivers
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MemberScope {
    TopLevel,
    Class(String),
    Interface,
}

/// Per-conversion rendering state
pub struct Emitter {
    hooks: Rc<HookTable>,
    additional_code: AdditionalCode,
    indent: usize,
    depth: usize,
    max_depth: usize,
    scope: MemberScope,
    property_type: Option<String>,
}

impl Emitter {
    pub fn new(hooks: Rc<HookTable>, max_depth: usize) -> Self {
        Self {
            hooks,
            additional_code: AdditionalCode::new(),
            indent: 0,
            depth: 0,
            max_depth,
            scope: MemberScope::TopLevel,
            property_type: None,
        }
    }

    /// Render a node through its interceptors and default rule
    pub fn render(&mut self, node: &Node) -> Result<String> {
        self.render_with(node, false)
    }

    pub fn render_with(&mut self, node: &Node, preserve_formatting: bool) -> Result<String> {
        if self.depth >= self.max_depth {
            return Err(Error::TooDeeplyNested {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let hooks = Rc::clone(&self.hooks);
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            match hooks.chain(node.node_type()) {
                Some(chain) => Next::new(chain).call(self, node, preserve_formatting),
                None => self.render_default(node),
            }
        });
        self.depth -= 1;
        result
    }

    /// Register helper code for the preamble; first registration of a key wins
    pub fn add_additional_code(&mut self, key: impl Into<String>, code: impl Into<String>) -> bool {
        self.additional_code.add(key, code)
    }

    pub fn additional_code(&self) -> &AdditionalCode {
        &self.additional_code
    }

    pub fn into_additional_code(self) -> AdditionalCode {
        self.additional_code
    }

    /// Current indentation in spaces
    pub fn indent_level(&self) -> usize {
        self.indent
    }

    /// Newline followed by the current indentation
    pub fn nl(&self) -> String {
        format!("\n{}", " ".repeat(self.indent))
    }

    /// Run `f` one level deeper; the previous level is restored on every exit
    pub fn indented<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let saved = self.indent;
        self.indent += INDENT_WIDTH;
        let result = f(self);
        self.indent = saved;
        result
    }

    fn scoped<T>(
        &mut self,
        scope: MemberScope,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let saved = std::mem::replace(&mut self.scope, scope);
        let result = f(self);
        self.scope = saved;
        result
    }

    /// Statements one level deeper, each on its own line after its comments
    pub fn render_stmts(&mut self, stmts: &[Node]) -> Result<String> {
        self.indented(|this| this.render_stmt_list(stmts))
    }

    /// Statements at the current level; every statement starts with a newline
    pub fn render_stmt_list(&mut self, stmts: &[Node]) -> Result<String> {
        let mut out = String::new();
        for stmt in stmts {
            if !stmt.comments.is_empty() {
                out.push_str(&self.nl());
                out.push_str(&self.render_comments(&stmt.comments));
                if matches!(stmt.kind, NodeKind::Nop) {
                    continue;
                }
            }
            out.push_str(&self.nl());
            out.push_str(&self.render(stmt)?);
        }
        Ok(out)
    }

    /// Comments on consecutive lines at the current indentation
    pub fn render_comments(&self, comments: &[Comment]) -> String {
        let nl = self.nl();
        comments
            .iter()
            .map(|c| reformat_comment(&c.text).replace('\n', &nl))
            .collect::<Vec<_>>()
            .join(&nl)
    }

    pub fn render_comma_separated(&mut self, nodes: &[Node]) -> Result<String> {
        let mut parts = Vec::with_capacity(nodes.len());
        for node in nodes {
            parts.push(self.render(node)?);
        }
        Ok(parts.join(", "))
    }

    /// Argument list: one line, or one argument per line when any carries comments
    pub fn render_args(&mut self, args: &[Node]) -> Result<String> {
        if !args.iter().any(|a| !a.comments.is_empty()) {
            return self.render_comma_separated(args);
        }

        let body = self.indented(|this| {
            let mut out = String::new();
            for arg in args {
                if !arg.comments.is_empty() {
                    out.push_str(&this.nl());
                    out.push_str(&this.render_comments(&arg.comments));
                }
                out.push_str(&this.nl());
                out.push_str(&this.render(arg)?);
                out.push(',');
            }
            Ok(out)
        })?;
        Ok(format!("{}{}", body, self.nl()))
    }

    /// Default rule for the node's kind
    pub(crate) fn render_default(&mut self, node: &Node) -> Result<String> {
        use NodeKind as K;
        match &node.kind {
            K::Name {
                parts,
                qualification,
            } => Ok(expressions::render_name(parts, *qualification)),
            K::Identifier(name) | K::VarLikeIdentifier(name) => Ok(name.clone()),
            K::NullableType(inner) => self.render(inner),
            K::UnionType(types) => self.p_union_type(types),
            K::Param {
                var,
                type_,
                default,
                by_ref,
                variadic,
                ..
            } => self.p_param(var, type_.as_deref(), default.as_deref(), *by_ref, *variadic),
            K::Arg {
                value,
                by_ref,
                unpack,
                name,
            } => self.p_arg(value, *by_ref, *unpack, name.as_deref()),
            K::Const { name, value } => Ok(format!("{} = {}", name, self.render(value)?)),

            K::LNumber(raw) | K::DNumber(raw) => Ok(raw.clone()),
            K::String {
                value,
                kind,
                doc_label,
            } => Ok(literals::render_string(value, *kind, doc_label.as_deref())),
            K::Encapsed {
                parts,
                kind,
                doc_label,
            } => self.p_encapsed(parts, *kind, doc_label.as_deref()),
            K::EncapsedStringPart(text) => Ok(literals::escape_go(text)),
            K::MagicConst(kind) => Ok(format!("{}{}", kind.name(), CANNOT_CONVERT)),

            K::Variable(name) => self.p_variable(name),
            K::ConstFetch(name) => self.p_const_fetch(name),
            K::Array { items } => self.p_array(items),
            K::ArrayItem {
                key,
                value,
                by_ref,
                unpack,
            } => self.p_array_item(key.as_deref(), value, *by_ref, *unpack),
            K::List(items) => self.p_list(items),
            K::Assign { var, expr } => self.p_assign(node, var, expr),
            K::AssignRef { var, expr } => self.p_infix(node, var, " = &", expr),
            K::AssignOp { op, var, expr } => self.p_assign_op(node, *op, var, expr),
            K::BinaryOp { op, left, right } => self.p_binary_op(node, *op, left, right),
            K::UnaryOp { op, expr } => self.p_unary_op(node, *op, expr),
            K::IncDec { op, prefix, var } => self.p_inc_dec(node, *op, *prefix, var),
            K::Cast { kind, expr } => self.p_cast(node, *kind, expr),
            K::FuncCall { name, args } => self.p_func_call(name, args),
            K::MethodCall {
                var,
                name,
                args,
                nullsafe,
            } => self.p_method_call(var, name, args, *nullsafe),
            K::StaticCall { class, name, args } => self.p_static_call(class, name, args),
            K::PropertyFetch {
                var,
                name,
                nullsafe,
            } => self.p_property_fetch(var, name, *nullsafe),
            K::StaticPropertyFetch { class, name } => {
                Ok(format!("{}.{}", self.p_dereference_lhs(class)?, self.p_object_property(name)?))
            }
            K::ClassConstFetch { class, name } => {
                Ok(format!("{}.{}", self.render(class)?, self.render(name)?))
            }
            K::ArrayDimFetch { var, dim } => self.p_array_dim_fetch(var, dim.as_deref()),
            K::New { class, args } => self.p_new(class, args),
            K::Clone(expr) => self.render(expr),
            K::Ternary { cond, if_, else_ } => self.p_ternary(cond, if_.as_deref(), else_),
            K::Closure {
                params,
                uses,
                return_type,
                stmts,
                by_ref,
                ..
            } => self.p_closure(node, params, uses, return_type.as_deref(), stmts, *by_ref),
            K::ClosureUse { var, by_ref } => {
                Ok(format!("{}{}", if *by_ref { "&" } else { "" }, self.render(var)?))
            }
            K::ArrowFunction {
                params,
                return_type,
                expr,
                by_ref,
                ..
            } => self.p_arrow_function(node, params, return_type.as_deref(), expr, *by_ref),
            K::Instanceof { expr, class } => self.p_instanceof(node, expr, class),
            K::Isset(vars) => self.p_isset(vars),
            K::Empty(expr) => self.p_keyword_call("empty", expr),
            K::Eval(expr) => self.p_keyword_call("eval", expr),
            K::Include { expr, kind } => self.p_include(expr, *kind),
            K::Exit { expr, .. } => self.p_exit(expr.as_deref()),
            K::Print(expr) => Ok(format!("fmt.Print({})", self.render(expr)?)),
            K::ErrorSuppress(expr) => {
                Ok(format!("{} /* NOTE: suppress error */", self.render(expr)?))
            }
            K::ShellExec(parts) => self.p_shell_exec(parts),
            K::Yield { key, value } => self.p_yield(key.as_deref(), value.as_deref()),
            K::YieldFrom(expr) => Ok(format!("yield from {}{}", self.render(expr)?, CANNOT_CONVERT)),

            K::Expression(expr) => self.render(expr),
            K::Echo(exprs) => Ok(format!("fmt.Print({})", self.render_comma_separated(exprs)?)),
            K::InlineHtml(text) => Ok(format!(
                "/* NOTE: Inline HTML{nl}{}{nl}*/",
                text,
                nl = self.nl()
            )),
            K::If {
                cond,
                stmts,
                elseifs,
                else_,
            } => self.p_if(cond, stmts, elseifs, else_.as_deref()),
            K::ElseIf { cond, stmts } => self.p_else_if(cond, stmts),
            K::Else { stmts } => self.p_else(stmts),
            K::For {
                init,
                cond,
                loop_,
                stmts,
            } => self.p_for(init, cond, loop_, stmts),
            K::Foreach {
                expr,
                key_var,
                value_var,
                by_ref,
                stmts,
            } => self.p_foreach(expr, key_var.as_deref(), value_var, *by_ref, stmts),
            K::While { cond, stmts } => self.p_while(cond, stmts),
            K::Do { cond, stmts } => self.p_do(cond, stmts),
            K::Switch { cond, cases } => self.p_switch(cond, cases),
            K::Case { cond, stmts } => self.p_case(cond.as_deref(), stmts),
            K::Break(num) => self.p_jump("break", num.as_deref()),
            K::Continue(num) => self.p_jump("continue", num.as_deref()),
            K::Return(expr) => match expr {
                Some(expr) => Ok(format!("return {}", self.render(expr)?)),
                None => Ok("return".to_string()),
            },
            K::TryCatch {
                stmts,
                catches,
                finally,
            } => self.p_try_catch(stmts, catches, finally.as_deref()),
            K::Catch { types, var, stmts } => self.p_catch(types, var.as_deref(), stmts),
            K::Finally { stmts } => Ok(format!("finally {{{}{}}}", self.render_stmts(stmts)?, self.nl())),
            K::Throw(expr) => self.p_throw(expr),
            K::Function {
                name,
                params,
                return_type,
                stmts,
                by_ref,
            } => self.p_function(node, name, params, return_type.as_deref(), stmts, *by_ref),
            K::Class {
                name,
                extends,
                implements,
                stmts,
                ..
            } => self.p_class(name.as_deref(), extends.as_deref(), implements, stmts),
            K::Interface {
                name,
                extends,
                stmts,
            } => self.p_interface(name, extends, stmts),
            K::Trait { name, stmts } => self.p_trait(name, stmts),
            K::ClassMethod {
                name,
                modifiers,
                params,
                return_type,
                stmts,
                by_ref,
            } => self.p_class_method(
                node,
                name,
                modifiers.is_abstract,
                params,
                return_type.as_deref(),
                stmts.as_deref(),
                *by_ref,
            ),
            K::Property { type_, props, .. } => self.p_property(node, type_.as_deref(), props),
            K::PropertyProperty { name, default } => {
                self.p_property_property(name, default.as_deref())
            }
            K::ClassConst { consts, .. } | K::ConstStmt(consts) => self.p_consts(consts),
            K::TraitUse {
                traits,
                adaptations,
            } => self.p_trait_use(traits, adaptations),
            K::TraitUseAdaptation(text) => Ok(text.clone()),
            K::Namespace { name, stmts, .. } => self.p_namespace(name.as_deref(), stmts),
            K::Use { kind, uses } => self.p_use(*kind, uses),
            K::GroupUse { kind, prefix, uses } => self.p_group_use(*kind, prefix, uses),
            K::UseUse { kind, name, alias } => self.p_use_use(*kind, name, alias.as_deref()),
            K::Global(vars) => Ok(format!(
                "global {}{}",
                self.render_comma_separated(vars)?,
                CANNOT_CONVERT
            )),
            K::Static(vars) => Ok(format!(
                "static {}{}",
                self.render_comma_separated(vars)?,
                CANNOT_CONVERT
            )),
            K::StaticVar { var, default } => match default {
                Some(default) => Ok(format!("{} = {}", self.render(var)?, self.render(default)?)),
                None => self.render(var),
            },
            K::Unset(vars) => Ok(format!(
                "unset({}){}",
                self.render_comma_separated(vars)?,
                CANNOT_CONVERT
            )),
            K::Declare { declares, stmts } => self.p_declare(declares, stmts.as_deref()),
            K::DeclareDeclare { key, value } => Ok(format!("{}={}", key, self.render(value)?)),
            K::Label(name) => Ok(format!("{}:", name)),
            K::Goto(name) => Ok(format!("goto {}", name)),
            K::Nop => Ok(String::new()),

            K::Unsupported { source_kind, text } => {
                log::debug!("emitting unsupported `{}` verbatim", source_kind);
                Ok(format!("{}{}", text, CANNOT_CONVERT))
            }
        }
    }
}

/// Normalise a comment for re-indentation: `#` becomes `//`, and the
/// continuation lines of block comments lose their common indentation
pub(crate) fn reformat_comment(text: &str) -> String {
    let text = text.trim();
    if let Some(rest) = text.strip_prefix('#') {
        if !rest.starts_with('[') {
            return format!("//{}", rest);
        }
    }
    if !text.contains('\n') {
        return text.to_string();
    }

    let mut lines = text.lines();
    let first = lines.next().unwrap_or_default().trim_end();
    let rest: Vec<&str> = lines.collect();

    let mut out = String::from(first);
    if rest.iter().all(|l| l.trim_start().starts_with('*')) {
        for line in rest {
            out.push_str("\n ");
            out.push_str(line.trim());
        }
        return out;
    }

    let common = rest
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    for line in rest {
        out.push('\n');
        out.push_str(line.get(common..).unwrap_or("").trim_end());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reformat_doc_comment() {
        let text = "/**\n         * Summary\n         */";
        assert_eq!(reformat_comment(text), "/**\n * Summary\n */");
    }

    #[test]
    fn test_reformat_block_comment() {
        let text = "/* first\n        second\n          third */";
        assert_eq!(reformat_comment(text), "/* first\nsecond\n  third */");
    }

    #[test]
    fn test_hash_comment() {
        assert_eq!(reformat_comment("# note"), "// note");
    }

    #[test]
    fn test_indented_restores_level_on_error() {
        let mut emitter = Emitter::new(Rc::new(HookTable::new()), 10);
        let result: Result<()> = emitter.indented(|e| {
            assert_eq!(e.indent_level(), INDENT_WIDTH);
            Err(Error::internal("boom"))
        });
        assert!(result.is_err());
        assert_eq!(emitter.indent_level(), 0);
    }

    #[test]
    fn test_depth_guard() {
        let mut node = Node::variable("x");
        for _ in 0..20 {
            node = Node::new(NodeKind::Clone(Box::new(node)));
        }
        let mut emitter = Emitter::new(Rc::new(HookTable::new()), 10);
        assert_eq!(
            emitter.render(&node),
            Err(Error::TooDeeplyNested { limit: 10 })
        );
        let mut emitter = Emitter::new(Rc::new(HookTable::new()), 100);
        assert_eq!(emitter.render(&node).unwrap(), "x");
    }
}
