use super::utils::{read_source, write_output};
use crate::config::ConvertOptions;
use crate::converter::Converter;
use crate::hooks::StdlibHook;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// Arguments for the convert command
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub force: bool,
    pub no_header: bool,
    pub no_additional_code: bool,
    pub no_stdlib_hooks: bool,
    pub config_path: Option<PathBuf>,
}

impl ConvertArgs {
    /// Options from the config file, with flags applied on top
    pub fn to_options(&self) -> Result<ConvertOptions> {
        let mut options = match &self.config_path {
            Some(path) => ConvertOptions::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => ConvertOptions::default(),
        };
        if self.no_header {
            options.add_head_comment_block = false;
        }
        if self.no_additional_code {
            options.add_additional_code = false;
        }
        Ok(options)
    }
}

/// Run the convert subcommand
pub fn convert(args: &ConvertArgs) -> Result<()> {
    if !args.input_path.is_file() {
        bail!("File not found: {}", args.input_path.display());
    }
    if let Some(output) = &args.output_path {
        if output.exists() && !args.force {
            bail!("File already exists: {}", output.display());
        }
    }

    log::info!("Starting: {}", args.input_path.display());

    let mut converter = Converter::with_options(args.to_options()?);
    if !args.no_stdlib_hooks {
        converter.install(&StdlibHook::new())?;
    }

    let source = read_source(&args.input_path)?;
    let result = converter
        .convert(&source)
        .with_context(|| format!("Failed to convert {}", args.input_path.display()))?;

    write_output(&result, args.output_path.as_deref())
}
