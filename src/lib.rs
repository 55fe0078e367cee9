//! php-to-go: convert PHP source into Go-like pseudocode
//!
//! This library parses PHP, lowers it into a typed AST and renders every node
//! through a chain of user-registered interceptors that ends in a built-in
//! rule. The output is a readable starting point for a manual port, not
//! compilable Go.

pub mod ast;
pub mod cli;
pub mod config;
pub mod converter;
pub mod docblock;
pub mod emitter;
pub mod error;
pub mod hooks;
pub mod parser;

pub use config::ConvertOptions;
pub use converter::Converter;
pub use error::{Error, Result};

// Re-export commonly used types
pub use ast::{Node, NodeKind, NodeType};
pub use emitter::{Emitter, Hook, HookTable, Next};
pub use hooks::StdlibHook;
