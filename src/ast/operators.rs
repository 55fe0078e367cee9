//! Operators, literal styles and the precedence table

use serde::{Deserialize, Serialize};

/// Binary operators, including the ones usable in compound assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    Pow,
    Concat,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    ShiftLeft,
    ShiftRight,
    BooleanAnd,
    BooleanOr,
    LogicalAnd,
    LogicalOr,
    LogicalXor,
    Equal,
    NotEqual,
    Identical,
    NotIdentical,
    Smaller,
    SmallerOrEqual,
    Greater,
    GreaterOrEqual,
    Spaceship,
    Coalesce,
}

impl BinaryOperator {
    /// Parse a PHP operator token
    pub fn from_token(token: &str) -> Option<Self> {
        use BinaryOperator::*;
        let op = match token.to_ascii_lowercase().as_str() {
            "+" => Plus,
            "-" => Minus,
            "*" => Mul,
            "/" => Div,
            "%" => Mod,
            "**" => Pow,
            "." => Concat,
            "&" => BitwiseAnd,
            "|" => BitwiseOr,
            "^" => BitwiseXor,
            "<<" => ShiftLeft,
            ">>" => ShiftRight,
            "&&" => BooleanAnd,
            "||" => BooleanOr,
            "and" => LogicalAnd,
            "or" => LogicalOr,
            "xor" => LogicalXor,
            "==" => Equal,
            "!=" | "<>" => NotEqual,
            "===" => Identical,
            "!==" => NotIdentical,
            "<" => Smaller,
            "<=" => SmallerOrEqual,
            ">" => Greater,
            ">=" => GreaterOrEqual,
            "<=>" => Spaceship,
            "??" => Coalesce,
            _ => return None,
        };
        Some(op)
    }

    /// Parse a compound assignment token such as `.=`
    pub fn from_assign_token(token: &str) -> Option<Self> {
        token.strip_suffix('=').and_then(Self::from_token)
    }

    /// Operator as written in PHP
    pub fn php_token(self) -> &'static str {
        use BinaryOperator::*;
        match self {
            Plus => "+",
            Minus => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "**",
            Concat => ".",
            BitwiseAnd => "&",
            BitwiseOr => "|",
            BitwiseXor => "^",
            ShiftLeft => "<<",
            ShiftRight => ">>",
            BooleanAnd => "&&",
            BooleanOr => "||",
            LogicalAnd => "and",
            LogicalOr => "or",
            LogicalXor => "xor",
            Equal => "==",
            NotEqual => "!=",
            Identical => "===",
            NotIdentical => "!==",
            Smaller => "<",
            SmallerOrEqual => "<=",
            Greater => ">",
            GreaterOrEqual => ">=",
            Spaceship => "<=>",
            Coalesce => "??",
        }
    }

    /// Operator in the target syntax, `None` when there is no counterpart
    pub fn go_token(self) -> Option<&'static str> {
        use BinaryOperator::*;
        match self {
            Concat => Some("+"),
            LogicalAnd => Some("&&"),
            LogicalOr => Some("||"),
            LogicalXor => Some("!="),
            Identical => Some("=="),
            NotIdentical => Some("!="),
            Pow | Spaceship | Coalesce => None,
            other => Some(other.php_token()),
        }
    }

    pub fn precedence(self) -> (i32, Associativity) {
        use Associativity::*;
        use BinaryOperator::*;
        match self {
            Pow => (0, Right),
            Mul | Div | Mod => (40, Left),
            Plus | Minus | Concat => (50, Left),
            ShiftLeft | ShiftRight => (60, Left),
            Smaller | SmallerOrEqual | Greater | GreaterOrEqual => (70, NonAssoc),
            Equal | NotEqual | Identical | NotIdentical | Spaceship => (80, NonAssoc),
            BitwiseAnd => (90, Left),
            BitwiseXor => (100, Left),
            BitwiseOr => (110, Left),
            BooleanAnd => (120, Left),
            BooleanOr => (130, Left),
            Coalesce => (140, Right),
            LogicalAnd => (170, Left),
            LogicalXor => (180, Left),
            LogicalOr => (190, Left),
        }
    }
}

/// Operator associativity, also used as the child position marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    NonAssoc,
    Right,
}

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
    BitwiseNot,
}

impl UnaryOperator {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" => Some(UnaryOperator::Plus),
            "-" => Some(UnaryOperator::Minus),
            "!" => Some(UnaryOperator::Not),
            "~" => Some(UnaryOperator::BitwiseNot),
            _ => None,
        }
    }

    /// Operator in the target syntax
    pub fn go_token(self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "!",
            UnaryOperator::BitwiseNot => "^",
        }
    }

    pub fn precedence(self) -> (i32, Associativity) {
        match self {
            UnaryOperator::Not => (30, Associativity::Right),
            _ => (10, Associativity::Right),
        }
    }
}

/// Increment or decrement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncDecOperator {
    Increment,
    Decrement,
}

impl IncDecOperator {
    pub fn token(self) -> &'static str {
        match self {
            IncDecOperator::Increment => "++",
            IncDecOperator::Decrement => "--",
        }
    }
}

/// Target of a `(type)` cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CastKind {
    Int,
    Double,
    String,
    Bool,
    Array,
    Object,
    Unset,
}

impl CastKind {
    /// Parse the text between the cast parentheses
    pub fn from_type_name(name: &str) -> Option<Self> {
        let kind = match name.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" => CastKind::Int,
            "float" | "double" | "real" => CastKind::Double,
            "string" | "binary" => CastKind::String,
            "bool" | "boolean" => CastKind::Bool,
            "array" => CastKind::Array,
            "object" => CastKind::Object,
            "unset" => CastKind::Unset,
            _ => return None,
        };
        Some(kind)
    }

    pub fn php_name(self) -> &'static str {
        match self {
            CastKind::Int => "int",
            CastKind::Double => "double",
            CastKind::String => "string",
            CastKind::Bool => "bool",
            CastKind::Array => "array",
            CastKind::Object => "object",
            CastKind::Unset => "unset",
        }
    }

    /// Conversion function in the target syntax
    pub fn go_function(self) -> Option<&'static str> {
        match self {
            CastKind::Int => Some("int"),
            CastKind::Double => Some("float64"),
            CastKind::String => Some("string"),
            CastKind::Bool => Some("bool"),
            CastKind::Array | CastKind::Object | CastKind::Unset => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncludeKind {
    Include,
    IncludeOnce,
    Require,
    RequireOnce,
}

impl IncludeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            IncludeKind::Include => "include",
            IncludeKind::IncludeOnce => "include_once",
            IncludeKind::Require => "require",
            IncludeKind::RequireOnce => "require_once",
        }
    }
}

/// `__LINE__` and friends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MagicConstKind {
    Class,
    Dir,
    File,
    Function,
    Line,
    Method,
    Namespace,
    Trait,
}

impl MagicConstKind {
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.to_ascii_uppercase().as_str() {
            "__CLASS__" => MagicConstKind::Class,
            "__DIR__" => MagicConstKind::Dir,
            "__FILE__" => MagicConstKind::File,
            "__FUNCTION__" => MagicConstKind::Function,
            "__LINE__" => MagicConstKind::Line,
            "__METHOD__" => MagicConstKind::Method,
            "__NAMESPACE__" => MagicConstKind::Namespace,
            "__TRAIT__" => MagicConstKind::Trait,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            MagicConstKind::Class => "__CLASS__",
            MagicConstKind::Dir => "__DIR__",
            MagicConstKind::File => "__FILE__",
            MagicConstKind::Function => "__FUNCTION__",
            MagicConstKind::Line => "__LINE__",
            MagicConstKind::Method => "__METHOD__",
            MagicConstKind::Namespace => "__NAMESPACE__",
            MagicConstKind::Trait => "__TRAIT__",
        }
    }
}

/// Original quoting style of a string literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StringKind {
    SingleQuoted,
    DoubleQuoted,
    Heredoc,
    Nowdoc,
}

impl StringKind {
    /// Block strings delimited by a label
    pub fn is_block(self) -> bool {
        matches!(self, StringKind::Heredoc | StringKind::Nowdoc)
    }
}

/// `use function` / `use const` / plain `use`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UseKind {
    Normal,
    Function,
    Constant,
}

impl UseKind {
    pub fn prefix(self) -> &'static str {
        match self {
            UseKind::Normal => "",
            UseKind::Function => "function ",
            UseKind::Constant => "const ",
        }
    }
}

/// Name qualification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameKind {
    Unqualified,
    FullyQualified,
    Relative,
}
