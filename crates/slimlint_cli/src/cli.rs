//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use slimlint_core::DEFAULT_TIMEOUT;

/// slimlint - slim-lint for editors and the command line
#[derive(Parser)]
#[command(name = "slimlint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lint Slim templates with slim-lint
    Check {
        /// Files to lint
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Command used to run slim-lint (may include arguments)
        #[arg(long, value_name = "CMD")]
        executable: Option<String>,

        /// slim-lint rules file, relative to the current directory
        #[arg(short, long, value_name = "PATH")]
        config: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Seconds before a slim-lint run is killed
        #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
        timeout: u64,
    },

    /// Start the LSP server
    Lsp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
