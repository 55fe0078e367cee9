use clap::{Parser, Subcommand};
use miette::{miette, Result};
use std::path::PathBuf;

use php_to_go::cli;

#[derive(Parser)]
#[command(name = "php-to-go")]
#[command(about = "Convert PHP source into Go-like pseudocode")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PHP file
    Convert {
        /// Input PHP file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite the output file if it exists
        #[arg(long)]
        force: bool,

        /// Omit the generated-code banner
        #[arg(long)]
        no_header: bool,

        /// Omit helper code contributed by hooks
        #[arg(long)]
        no_additional_code: bool,

        /// Do not install the built-in standard library hooks
        #[arg(long)]
        no_stdlib_hooks: bool,

        /// JSON file with conversion options
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Dump the parsed AST as JSON
    Ast {
        /// Input PHP file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            force,
            no_header,
            no_additional_code,
            no_stdlib_hooks,
            config,
        } => {
            let args = cli::convert::ConvertArgs {
                input_path: input,
                output_path: output,
                force,
                no_header,
                no_additional_code,
                no_stdlib_hooks,
                config_path: config,
            };
            cli::convert::convert(&args).map_err(|e| miette!("{:#}", e))
        }
        Commands::Ast { input } => cli::ast::ast(&input).map_err(|e| miette!("{:#}", e)),
    }
}
