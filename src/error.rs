use miette::Diagnostic;
use thiserror::Error;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a conversion
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum Error {
    #[error("I/O error: {0}")]
    #[diagnostic(code(php_to_go::io_error))]
    Io(String),

    #[error("Parse error on line {line}, column {column}: {message}")]
    #[diagnostic(code(php_to_go::parse_error))]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("No rendering rule for node kind `{kind}`")]
    #[diagnostic(
        code(php_to_go::unknown_node_kind),
        help("node kinds are named like `Expr_FuncCall` or `Stmt_If`")
    )]
    UnknownNodeKind { kind: String },

    #[error("Input is nested too deeply (limit is {limit} levels)")]
    #[diagnostic(code(php_to_go::too_deeply_nested))]
    TooDeeplyNested { limit: usize },

    #[error("Cannot register a hook for `{kind}` after the first conversion")]
    #[diagnostic(
        code(php_to_go::hook_registration_closed),
        help("register every hook before calling `convert`")
    )]
    HookRegistrationClosed { kind: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(php_to_go::config_error))]
    Config { message: String },

    #[error("Internal error: {message}")]
    #[diagnostic(code(php_to_go::internal_error))]
    Internal { message: String },
}

impl Error {
    /// Create a parse error at a 1-based position
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
