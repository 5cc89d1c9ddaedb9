//! Subcommand implementations

mod check;
mod lsp;

pub use check::{CheckOptions, FileReport, run_check};
pub use lsp::run_lsp;

use miette::{IntoDiagnostic, Result};
use tokio::runtime::Runtime;

fn create_tokio_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}
