//! Lint error types.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Errors that can abort a single lint cycle.
///
/// None of these disable future lints; the engine reports them and the next
/// open or save starts from scratch.
#[derive(Debug, Error)]
pub enum LintError {
    /// A required setting is missing or blank.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The linter executable could not be started.
    #[error("Failed to run `{command}`: {hint}")]
    Spawn {
        command: String,
        hint: String,
        #[source]
        source: io::Error,
    },

    /// The linter did not exit within the allotted time.
    #[error("slim-lint did not finish within {timeout:?} and was killed")]
    Timeout { timeout: Duration },

    /// The linter wrote to stderr.
    #[error("slim-lint reported an error: {stderr}")]
    ToolFailed { stderr: String },

    /// I/O error while talking to the linter.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl LintError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a launch error with a hint matching the failure kind.
    pub fn spawn(command: impl Into<String>, source: io::Error) -> Self {
        let hint = match source.kind() {
            io::ErrorKind::NotFound => {
                "executable not found; install slim-lint or set `executablePath`".to_string()
            }
            io::ErrorKind::PermissionDenied => {
                "permission denied; check that `executablePath` points to an executable file"
                    .to_string()
            }
            _ => source.to_string(),
        };

        Self::Spawn {
            command: command.into(),
            hint,
            source,
        }
    }
}
