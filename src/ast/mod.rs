//! Typed PHP syntax tree
//!
//! Every node owns its children. The tree is built once by the parser and is
//! read-only while it is rendered.

pub mod node_type;
pub mod operators;

pub use node_type::NodeType;
pub use operators::*;

use serde::Serialize;

/// Byte range of a node in the parsed source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A source comment attached to the node that follows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// `/** ... */` documentation comment
    pub fn is_doc(&self) -> bool {
        self.text.starts_with("/**")
    }
}

/// AST node: a kind-specific payload plus attached comments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    pub span: Span,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            comments: Vec::new(),
            span: Span::default(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }

    /// Last `/** */` comment attached to this node
    pub fn doc_comment(&self) -> Option<&Comment> {
        self.comments.iter().rev().find(|c| c.is_doc())
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Shorthand for an unqualified name node
    pub fn name(name: impl Into<String>) -> Self {
        Node::new(NodeKind::Name {
            parts: vec![name.into()],
            qualification: NameKind::Unqualified,
        })
    }

    /// Shorthand for a `$name` variable node
    pub fn variable(name: impl Into<String>) -> Self {
        Node::new(NodeKind::Variable(VariableName::Named(name.into())))
    }

    /// Last segment of a name node, used to match function names
    pub fn simple_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Name { parts, .. } => parts.last().map(String::as_str),
            NodeKind::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum VariableName {
    Named(String),
    Dynamic(Box<Node>),
}

/// Visibility and other declaration modifiers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Modifiers {
    pub visibility: Option<String>,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_readonly: bool,
}

impl Modifiers {
    /// Modifiers as PHP keywords, each followed by a space
    pub fn php_prefix(&self) -> String {
        let mut out = String::new();
        if self.is_abstract {
            out.push_str("abstract ");
        }
        if self.is_final {
            out.push_str("final ");
        }
        if let Some(visibility) = &self.visibility {
            out.push_str(visibility);
            out.push(' ');
        }
        if self.is_static {
            out.push_str("static ");
        }
        if self.is_readonly {
            out.push_str("readonly ");
        }
        out
    }
}

/// Kind-specific payload of a node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NodeKind {
    // Names and structural helpers
    Name {
        parts: Vec<String>,
        qualification: NameKind,
    },
    Identifier(String),
    VarLikeIdentifier(String),
    NullableType(Box<Node>),
    UnionType(Vec<Node>),
    Param {
        var: Box<Node>,
        type_: Option<Box<Node>>,
        default: Option<Box<Node>>,
        by_ref: bool,
        variadic: bool,
        promoted: Modifiers,
    },
    Arg {
        value: Box<Node>,
        by_ref: bool,
        unpack: bool,
        name: Option<String>,
    },
    Const {
        name: String,
        value: Box<Node>,
    },

    // Scalars
    LNumber(String),
    DNumber(String),
    String {
        value: String,
        kind: StringKind,
        doc_label: Option<String>,
    },
    Encapsed {
        parts: Vec<Node>,
        kind: StringKind,
        doc_label: Option<String>,
    },
    EncapsedStringPart(String),
    MagicConst(MagicConstKind),

    // Expressions
    Variable(VariableName),
    ConstFetch(Box<Node>),
    Array {
        items: Vec<Node>,
    },
    ArrayItem {
        key: Option<Box<Node>>,
        value: Box<Node>,
        by_ref: bool,
        unpack: bool,
    },
    List(Vec<Option<Node>>),
    Assign {
        var: Box<Node>,
        expr: Box<Node>,
    },
    AssignRef {
        var: Box<Node>,
        expr: Box<Node>,
    },
    AssignOp {
        op: BinaryOperator,
        var: Box<Node>,
        expr: Box<Node>,
    },
    BinaryOp {
        op: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    UnaryOp {
        op: UnaryOperator,
        expr: Box<Node>,
    },
    IncDec {
        op: IncDecOperator,
        prefix: bool,
        var: Box<Node>,
    },
    Cast {
        kind: CastKind,
        expr: Box<Node>,
    },
    FuncCall {
        name: Box<Node>,
        args: Vec<Node>,
    },
    MethodCall {
        var: Box<Node>,
        name: Box<Node>,
        args: Vec<Node>,
        nullsafe: bool,
    },
    StaticCall {
        class: Box<Node>,
        name: Box<Node>,
        args: Vec<Node>,
    },
    PropertyFetch {
        var: Box<Node>,
        name: Box<Node>,
        nullsafe: bool,
    },
    StaticPropertyFetch {
        class: Box<Node>,
        name: Box<Node>,
    },
    ClassConstFetch {
        class: Box<Node>,
        name: Box<Node>,
    },
    ArrayDimFetch {
        var: Box<Node>,
        dim: Option<Box<Node>>,
    },
    New {
        class: Box<Node>,
        args: Vec<Node>,
    },
    Clone(Box<Node>),
    Ternary {
        cond: Box<Node>,
        if_: Option<Box<Node>>,
        else_: Box<Node>,
    },
    Closure {
        params: Vec<Node>,
        uses: Vec<Node>,
        return_type: Option<Box<Node>>,
        stmts: Vec<Node>,
        by_ref: bool,
        is_static: bool,
    },
    ClosureUse {
        var: Box<Node>,
        by_ref: bool,
    },
    ArrowFunction {
        params: Vec<Node>,
        return_type: Option<Box<Node>>,
        expr: Box<Node>,
        by_ref: bool,
        is_static: bool,
    },
    Instanceof {
        expr: Box<Node>,
        class: Box<Node>,
    },
    Isset(Vec<Node>),
    Empty(Box<Node>),
    Eval(Box<Node>),
    Include {
        expr: Box<Node>,
        kind: IncludeKind,
    },
    Exit {
        expr: Option<Box<Node>>,
        die: bool,
    },
    Print(Box<Node>),
    ErrorSuppress(Box<Node>),
    ShellExec(Vec<Node>),
    Yield {
        key: Option<Box<Node>>,
        value: Option<Box<Node>>,
    },
    YieldFrom(Box<Node>),

    // Statements
    Expression(Box<Node>),
    Echo(Vec<Node>),
    InlineHtml(String),
    If {
        cond: Box<Node>,
        stmts: Vec<Node>,
        elseifs: Vec<Node>,
        else_: Option<Box<Node>>,
    },
    ElseIf {
        cond: Box<Node>,
        stmts: Vec<Node>,
    },
    Else {
        stmts: Vec<Node>,
    },
    For {
        init: Vec<Node>,
        cond: Vec<Node>,
        loop_: Vec<Node>,
        stmts: Vec<Node>,
    },
    Foreach {
        expr: Box<Node>,
        key_var: Option<Box<Node>>,
        value_var: Box<Node>,
        by_ref: bool,
        stmts: Vec<Node>,
    },
    While {
        cond: Box<Node>,
        stmts: Vec<Node>,
    },
    Do {
        cond: Box<Node>,
        stmts: Vec<Node>,
    },
    Switch {
        cond: Box<Node>,
        cases: Vec<Node>,
    },
    Case {
        cond: Option<Box<Node>>,
        stmts: Vec<Node>,
    },
    Break(Option<Box<Node>>),
    Continue(Option<Box<Node>>),
    Return(Option<Box<Node>>),
    TryCatch {
        stmts: Vec<Node>,
        catches: Vec<Node>,
        finally: Option<Box<Node>>,
    },
    Catch {
        types: Vec<Node>,
        var: Option<Box<Node>>,
        stmts: Vec<Node>,
    },
    Finally {
        stmts: Vec<Node>,
    },
    Throw(Box<Node>),
    Function {
        name: String,
        params: Vec<Node>,
        return_type: Option<Box<Node>>,
        stmts: Vec<Node>,
        by_ref: bool,
    },
    Class {
        name: Option<String>,
        modifiers: Modifiers,
        extends: Option<Box<Node>>,
        implements: Vec<Node>,
        stmts: Vec<Node>,
    },
    Interface {
        name: String,
        extends: Vec<Node>,
        stmts: Vec<Node>,
    },
    Trait {
        name: String,
        stmts: Vec<Node>,
    },
    ClassMethod {
        name: String,
        modifiers: Modifiers,
        params: Vec<Node>,
        return_type: Option<Box<Node>>,
        stmts: Option<Vec<Node>>,
        by_ref: bool,
    },
    Property {
        modifiers: Modifiers,
        type_: Option<Box<Node>>,
        props: Vec<Node>,
    },
    PropertyProperty {
        name: String,
        default: Option<Box<Node>>,
    },
    ClassConst {
        modifiers: Modifiers,
        consts: Vec<Node>,
    },
    ConstStmt(Vec<Node>),
    TraitUse {
        traits: Vec<Node>,
        adaptations: Vec<Node>,
    },
    TraitUseAdaptation(String),
    Namespace {
        name: Option<Box<Node>>,
        stmts: Vec<Node>,
        braced: bool,
    },
    Use {
        kind: UseKind,
        uses: Vec<Node>,
    },
    GroupUse {
        kind: UseKind,
        prefix: Box<Node>,
        uses: Vec<Node>,
    },
    UseUse {
        kind: UseKind,
        name: Box<Node>,
        alias: Option<String>,
    },
    Global(Vec<Node>),
    Static(Vec<Node>),
    StaticVar {
        var: Box<Node>,
        default: Option<Box<Node>>,
    },
    Unset(Vec<Node>),
    Declare {
        declares: Vec<Node>,
        stmts: Option<Vec<Node>>,
    },
    DeclareDeclare {
        key: String,
        value: Box<Node>,
    },
    Label(String),
    Goto(String),
    Nop,

    /// Source construct without a typed representation, kept verbatim
    Unsupported {
        source_kind: String,
        text: String,
    },
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Name { qualification, .. } => match qualification {
                NameKind::Unqualified => NodeType::Name,
                NameKind::FullyQualified => NodeType::NameFullyQualified,
                NameKind::Relative => NodeType::NameRelative,
            },
            NodeKind::Identifier(_) => NodeType::Identifier,
            NodeKind::VarLikeIdentifier(_) => NodeType::VarLikeIdentifier,
            NodeKind::NullableType(_) => NodeType::NullableType,
            NodeKind::UnionType(_) => NodeType::UnionType,
            NodeKind::Param { .. } => NodeType::Param,
            NodeKind::Arg { .. } => NodeType::Arg,
            NodeKind::Const { .. } => NodeType::Const,
            NodeKind::LNumber(_) => NodeType::LNumber,
            NodeKind::DNumber(_) => NodeType::DNumber,
            NodeKind::String { .. } => NodeType::String,
            NodeKind::Encapsed { .. } => NodeType::Encapsed,
            NodeKind::EncapsedStringPart(_) => NodeType::EncapsedStringPart,
            NodeKind::MagicConst(_) => NodeType::MagicConst,
            NodeKind::Variable(_) => NodeType::Variable,
            NodeKind::ConstFetch(_) => NodeType::ConstFetch,
            NodeKind::Array { .. } => NodeType::Array,
            NodeKind::ArrayItem { .. } => NodeType::ArrayItem,
            NodeKind::List(_) => NodeType::List,
            NodeKind::Assign { .. } => NodeType::Assign,
            NodeKind::AssignRef { .. } => NodeType::AssignRef,
            NodeKind::AssignOp { .. } => NodeType::AssignOp,
            NodeKind::BinaryOp { .. } => NodeType::BinaryOp,
            NodeKind::UnaryOp { .. } => NodeType::UnaryOp,
            NodeKind::IncDec { .. } => NodeType::IncDec,
            NodeKind::Cast { .. } => NodeType::Cast,
            NodeKind::FuncCall { .. } => NodeType::FuncCall,
            NodeKind::MethodCall { .. } => NodeType::MethodCall,
            NodeKind::StaticCall { .. } => NodeType::StaticCall,
            NodeKind::PropertyFetch { .. } => NodeType::PropertyFetch,
            NodeKind::StaticPropertyFetch { .. } => NodeType::StaticPropertyFetch,
            NodeKind::ClassConstFetch { .. } => NodeType::ClassConstFetch,
            NodeKind::ArrayDimFetch { .. } => NodeType::ArrayDimFetch,
            NodeKind::New { .. } => NodeType::New,
            NodeKind::Clone(_) => NodeType::Clone,
            NodeKind::Ternary { .. } => NodeType::Ternary,
            NodeKind::Closure { .. } => NodeType::Closure,
            NodeKind::ClosureUse { .. } => NodeType::ClosureUse,
            NodeKind::ArrowFunction { .. } => NodeType::ArrowFunction,
            NodeKind::Instanceof { .. } => NodeType::Instanceof,
            NodeKind::Isset(_) => NodeType::Isset,
            NodeKind::Empty(_) => NodeType::Empty,
            NodeKind::Eval(_) => NodeType::Eval,
            NodeKind::Include { .. } => NodeType::Include,
            NodeKind::Exit { .. } => NodeType::Exit,
            NodeKind::Print(_) => NodeType::Print,
            NodeKind::ErrorSuppress(_) => NodeType::ErrorSuppress,
            NodeKind::ShellExec(_) => NodeType::ShellExec,
            NodeKind::Yield { .. } => NodeType::Yield,
            NodeKind::YieldFrom(_) => NodeType::YieldFrom,
            NodeKind::Expression(_) => NodeType::Expression,
            NodeKind::Echo(_) => NodeType::Echo,
            NodeKind::InlineHtml(_) => NodeType::InlineHtml,
            NodeKind::If { .. } => NodeType::If,
            NodeKind::ElseIf { .. } => NodeType::ElseIf,
            NodeKind::Else { .. } => NodeType::Else,
            NodeKind::For { .. } => NodeType::For,
            NodeKind::Foreach { .. } => NodeType::Foreach,
            NodeKind::While { .. } => NodeType::While,
            NodeKind::Do { .. } => NodeType::Do,
            NodeKind::Switch { .. } => NodeType::Switch,
            NodeKind::Case { .. } => NodeType::Case,
            NodeKind::Break(_) => NodeType::Break,
            NodeKind::Continue(_) => NodeType::Continue,
            NodeKind::Return(_) => NodeType::Return,
            NodeKind::TryCatch { .. } => NodeType::TryCatch,
            NodeKind::Catch { .. } => NodeType::Catch,
            NodeKind::Finally { .. } => NodeType::Finally,
            NodeKind::Throw(_) => NodeType::Throw,
            NodeKind::Function { .. } => NodeType::Function,
            NodeKind::Class { .. } => NodeType::Class,
            NodeKind::Interface { .. } => NodeType::Interface,
            NodeKind::Trait { .. } => NodeType::Trait,
            NodeKind::ClassMethod { .. } => NodeType::ClassMethod,
            NodeKind::Property { .. } => NodeType::Property,
            NodeKind::PropertyProperty { .. } => NodeType::PropertyProperty,
            NodeKind::ClassConst { .. } => NodeType::ClassConst,
            NodeKind::ConstStmt(_) => NodeType::ConstStmt,
            NodeKind::TraitUse { .. } => NodeType::TraitUse,
            NodeKind::TraitUseAdaptation(_) => NodeType::TraitUseAdaptation,
            NodeKind::Namespace { .. } => NodeType::Namespace,
            NodeKind::Use { .. } => NodeType::Use,
            NodeKind::GroupUse { .. } => NodeType::GroupUse,
            NodeKind::UseUse { .. } => NodeType::UseUse,
            NodeKind::Global(_) => NodeType::Global,
            NodeKind::Static(_) => NodeType::Static,
            NodeKind::StaticVar { .. } => NodeType::StaticVar,
            NodeKind::Unset(_) => NodeType::Unset,
            NodeKind::Declare { .. } => NodeType::Declare,
            NodeKind::DeclareDeclare { .. } => NodeType::DeclareDeclare,
            NodeKind::Label(_) => NodeType::Label,
            NodeKind::Goto(_) => NodeType::Goto,
            NodeKind::Nop => NodeType::Nop,
            NodeKind::Unsupported { .. } => NodeType::Unsupported,
        }
    }

    /// Precedence of an expression kind, `None` for atoms
    pub fn precedence(&self) -> Option<(i32, Associativity)> {
        use Associativity::*;
        match self {
            NodeKind::BinaryOp { op, .. } => Some(op.precedence()),
            NodeKind::UnaryOp { op, .. } => Some(op.precedence()),
            NodeKind::IncDec { .. } | NodeKind::Cast { .. } | NodeKind::ErrorSuppress(_) => {
                Some((10, Right))
            }
            NodeKind::Instanceof { .. } => Some((20, NonAssoc)),
            NodeKind::Ternary { .. } => Some((150, NonAssoc)),
            NodeKind::Assign { .. } | NodeKind::AssignRef { .. } | NodeKind::AssignOp { .. } => {
                Some((160, Right))
            }
            NodeKind::YieldFrom(_) => Some((165, Right)),
            NodeKind::Print(_) => Some((168, Right)),
            NodeKind::Yield { .. } => Some((175, Right)),
            NodeKind::Include { .. } => Some((200, Left)),
            _ => None,
        }
    }
}
