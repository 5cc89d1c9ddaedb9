//! # slimlint_core
//!
//! Linting engine for Slim templates, backed by the external `slim-lint`
//! executable.
//!
//! This crate provides:
//! - The `LintEngine` orchestrator and its per-document diagnostic store
//! - Settings resolution into a `slim-lint` command line
//! - Process execution with timeout and cancellation
//! - Parsing of `slim-lint` output into diagnostics
//!
//! ## Example
//!
//! ```rust,ignore
//! use slimlint_core::{LintEngine, LintEnvironment, LintOutcome};
//!
//! let engine = LintEngine::new();
//! let env = LintEnvironment::new(settings, Some(project_root));
//! if let LintOutcome::Committed { diagnostics, .. } = engine.run(&document, &env).await {
//!     println!("{}: {} issues", document.key(), diagnostics.len());
//! }
//! ```

mod config;
mod diagnostic;
pub mod document;
mod engine;
mod error;
pub mod parser;
pub mod runner;
mod store;

pub use config::{
    DEFAULT_CONFIG_FILE, DEFAULT_EXECUTABLE, LintEnvironment, LintInvocation, LintSettings,
};
pub use diagnostic::{Diagnostic, LineRange, Severity};
pub use document::{LineIndex, SLIM_LANGUAGE_ID, TextDocument};
pub use engine::{LintEngine, LintOutcome};
pub use error::LintError;
pub use parser::{LintRecord, parse_output, parse_records};
pub use runner::DEFAULT_TIMEOUT;
pub use store::DiagnosticStore;

#[cfg(test)]
pub mod test_utils;
