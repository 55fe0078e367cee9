//! Node kind tags
//!
//! `NodeType` is the fieldless tag of every AST node. Hooks are keyed by it,
//! and its string form is the familiar PHP AST name (`Expr_FuncCall`).

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! node_types {
    ($($variant:ident => $name:literal,)*) => {
        /// Kind tag of an AST node
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum NodeType {
            $($variant,)*
        }

        impl NodeType {
            /// Every node kind, in declaration order
            pub const ALL: &'static [NodeType] = &[$(NodeType::$variant,)*];

            /// Canonical name of the kind
            pub fn as_str(self) -> &'static str {
                match self {
                    $(NodeType::$variant => $name,)*
                }
            }
        }

        impl FromStr for NodeType {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(NodeType::$variant),)*
                    _ => Err(Error::UnknownNodeKind { kind: s.to_string() }),
                }
            }
        }
    };
}

node_types! {
    Name => "Name",
    NameFullyQualified => "Name_FullyQualified",
    NameRelative => "Name_Relative",
    Identifier => "Identifier",
    VarLikeIdentifier => "VarLikeIdentifier",
    NullableType => "NullableType",
    UnionType => "UnionType",
    Param => "Param",
    Arg => "Arg",
    Const => "Const",

    LNumber => "Scalar_LNumber",
    DNumber => "Scalar_DNumber",
    String => "Scalar_String",
    Encapsed => "Scalar_Encapsed",
    EncapsedStringPart => "Scalar_EncapsedStringPart",
    MagicConst => "Scalar_MagicConst",

    Variable => "Expr_Variable",
    ConstFetch => "Expr_ConstFetch",
    Array => "Expr_Array",
    ArrayItem => "Expr_ArrayItem",
    List => "Expr_List",
    Assign => "Expr_Assign",
    AssignRef => "Expr_AssignRef",
    AssignOp => "Expr_AssignOp",
    BinaryOp => "Expr_BinaryOp",
    UnaryOp => "Expr_UnaryOp",
    IncDec => "Expr_IncDec",
    Cast => "Expr_Cast",
    FuncCall => "Expr_FuncCall",
    MethodCall => "Expr_MethodCall",
    StaticCall => "Expr_StaticCall",
    PropertyFetch => "Expr_PropertyFetch",
    StaticPropertyFetch => "Expr_StaticPropertyFetch",
    ClassConstFetch => "Expr_ClassConstFetch",
    ArrayDimFetch => "Expr_ArrayDimFetch",
    New => "Expr_New",
    Clone => "Expr_Clone",
    Ternary => "Expr_Ternary",
    Closure => "Expr_Closure",
    ClosureUse => "Expr_ClosureUse",
    ArrowFunction => "Expr_ArrowFunction",
    Instanceof => "Expr_Instanceof",
    Isset => "Expr_Isset",
    Empty => "Expr_Empty",
    Eval => "Expr_Eval",
    Include => "Expr_Include",
    Exit => "Expr_Exit",
    Print => "Expr_Print",
    ErrorSuppress => "Expr_ErrorSuppress",
    ShellExec => "Expr_ShellExec",
    Yield => "Expr_Yield",
    YieldFrom => "Expr_YieldFrom",

    Expression => "Stmt_Expression",
    Echo => "Stmt_Echo",
    InlineHtml => "Stmt_InlineHTML",
    If => "Stmt_If",
    ElseIf => "Stmt_ElseIf",
    Else => "Stmt_Else",
    For => "Stmt_For",
    Foreach => "Stmt_Foreach",
    While => "Stmt_While",
    Do => "Stmt_Do",
    Switch => "Stmt_Switch",
    Case => "Stmt_Case",
    Break => "Stmt_Break",
    Continue => "Stmt_Continue",
    Return => "Stmt_Return",
    TryCatch => "Stmt_TryCatch",
    Catch => "Stmt_Catch",
    Finally => "Stmt_Finally",
    Throw => "Stmt_Throw",
    Function => "Stmt_Function",
    Class => "Stmt_Class",
    Interface => "Stmt_Interface",
    Trait => "Stmt_Trait",
    ClassMethod => "Stmt_ClassMethod",
    Property => "Stmt_Property",
    PropertyProperty => "Stmt_PropertyProperty",
    ClassConst => "Stmt_ClassConst",
    ConstStmt => "Stmt_Const",
    TraitUse => "Stmt_TraitUse",
    TraitUseAdaptation => "Stmt_TraitUseAdaptation",
    Namespace => "Stmt_Namespace",
    Use => "Stmt_Use",
    GroupUse => "Stmt_GroupUse",
    UseUse => "Stmt_UseUse",
    Global => "Stmt_Global",
    Static => "Stmt_Static",
    StaticVar => "Stmt_StaticVar",
    Unset => "Stmt_Unset",
    Declare => "Stmt_Declare",
    DeclareDeclare => "Stmt_DeclareDeclare",
    Label => "Stmt_Label",
    Goto => "Stmt_Goto",
    Nop => "Stmt_Nop",

    Unsupported => "Unsupported",
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in NodeType::ALL {
            assert_eq!(kind.as_str().parse::<NodeType>().unwrap(), *kind);
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "Expr_Nope".parse::<NodeType>().unwrap_err();
        assert_eq!(
            err,
            Error::UnknownNodeKind {
                kind: "Expr_Nope".to_string()
            }
        );
    }

    #[test]
    fn test_familiar_names() {
        assert_eq!(NodeType::FuncCall.as_str(), "Expr_FuncCall");
        assert_eq!(NodeType::InlineHtml.to_string(), "Stmt_InlineHTML");
        assert_eq!(NodeType::ConstStmt.as_str(), "Stmt_Const");
    }
}
