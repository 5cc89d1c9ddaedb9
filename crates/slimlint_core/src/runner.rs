//! slim-lint process execution.
//!
//! The process is spawned with `kill_on_drop`, so abandoning the wait future
//! (timeout, cancellation or engine disposal) also kills the process.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::sync::oneshot;
use tracing::debug;

use crate::LintError;
use crate::config::LintInvocation;

/// Wall-clock limit for one slim-lint run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How a linter run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Execution {
    /// The process exited; this is its captured stdout.
    Completed(String),
    /// A newer lint for the same document took over and the process was killed.
    Cancelled,
}

/// Runs slim-lint and captures its stdout.
///
/// A non-zero exit status is not an error: slim-lint exits non-zero whenever
/// it reports lints. Only launch failures, timeouts and stderr output are.
/// Either a message on `cancel` or the sender being dropped cancels the run.
pub async fn execute(
    invocation: &LintInvocation,
    timeout: Duration,
    cancel: oneshot::Receiver<()>,
) -> Result<Execution, LintError> {
    debug!("Running: {}", invocation.display());

    let mut command = Command::new(&invocation.command);
    command
        .args(invocation.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if !invocation.working_dir.as_os_str().is_empty() {
        command.current_dir(&invocation.working_dir);
    }

    let child = command
        .spawn()
        .map_err(|e| LintError::spawn(&invocation.command, e))?;

    let output = tokio::select! {
        result = tokio::time::timeout(timeout, child.wait_with_output()) => {
            result.map_err(|_| LintError::Timeout { timeout })??
        }
        _ = cancel => {
            debug!("Cancelled: {}", invocation.document_path.display());
            return Ok(Execution::Cancelled);
        }
    };

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return Err(LintError::ToolFailed {
            stderr: stderr.to_string(),
        });
    }

    debug!(
        "slim-lint exited with {} for {}",
        output.status,
        invocation.document_path.display()
    );

    Ok(Execution::Completed(
        String::from_utf8_lossy(&output.stdout).into_owned(),
    ))
}
