//! Command-line interface module
//!
//! This module contains the implementations for the CLI subcommands.

pub mod ast;
pub mod convert;

/// Common CLI utilities
pub mod utils {
    use anyhow::{Context, Result};
    use std::path::Path;

    /// Read a PHP source file
    pub fn read_source(path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Write output to file or stdout
    pub fn write_output(content: &str, output_path: Option<&Path>) -> Result<()> {
        match output_path {
            Some(path) => std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display())),
            None => {
                println!("{}", content);
                Ok(())
            }
        }
    }
}
