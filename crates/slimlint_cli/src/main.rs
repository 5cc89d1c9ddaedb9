//! slimlint CLI
//!
//! Runs slim-lint over Slim templates, from the command line or as a
//! language server.

mod cli;
mod commands;
mod output;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{CheckOptions, run_check, run_lsp};
use output::output_results;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Check {
            files,
            executable,
            config,
            format,
            timeout,
        } => {
            let options = CheckOptions {
                executable,
                config,
                timeout: Duration::from_secs(timeout),
            };
            let reports = run_check(&files, &options)?;
            output_results(&reports, format)
        }
        Commands::Lsp => run_lsp().map(|_| false),
    }
}
