use super::utils::read_source;
use crate::parser;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the ast subcommand: dump the lowered AST as JSON
pub fn ast(input_path: &Path) -> Result<()> {
    let source = read_source(input_path)?;
    let stmts = parser::parse(&source)
        .with_context(|| format!("Failed to parse {}", input_path.display()))?;

    let json = serde_json::to_string_pretty(&stmts).context("Failed to serialize AST to JSON")?;
    println!("{}", json);
    Ok(())
}
