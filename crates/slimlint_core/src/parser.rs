//! Parser for slim-lint's default reporter output.
//!
//! Each reported issue occupies one line:
//!
//! ```text
//! app/views/index.slim:12 [W] LineLength: Line is too long. [84/80]
//! ```
//!
//! Anything that does not match is ignored.

use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostic::{Diagnostic, Severity};
use crate::document::LineIndex;

static ISSUE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^.+?:(-?\d+) \[(\w)\] (\w+): (.+)$").expect("issue pattern is valid")
});

/// One issue line as printed by slim-lint, before it is placed in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintRecord {
    /// Zero-based line, clamped at zero.
    pub line: u32,
    pub severity: Severity,
    pub rule_name: String,
    pub message: String,
}

/// Extracts every issue line from `output`, in order of appearance.
pub fn parse_records(output: &str) -> Vec<LintRecord> {
    ISSUE_LINE
        .captures_iter(output)
        .filter_map(|caps| {
            let reported: i64 = caps[1].parse().ok()?;
            let line = u32::try_from(reported.saturating_sub(1).max(0)).ok()?;
            Some(LintRecord {
                line,
                severity: Severity::from_code(&caps[2]),
                rule_name: caps[3].to_string(),
                message: caps[4].trim_end().to_string(),
            })
        })
        .collect()
}

/// Parses `output` into diagnostics placed on the lines of `index`.
///
/// Records pointing past the last line are dropped; the line may have been
/// deleted while the linter was running.
pub fn parse_output(output: &str, index: &LineIndex<'_>) -> Vec<Diagnostic> {
    parse_records(output)
        .into_iter()
        .filter_map(|record| {
            let range = index.content_range(record.line as usize)?;
            Some(
                Diagnostic::new(record.line, range, record.rule_name, &record.message)
                    .with_severity(record.severity),
            )
        })
        .collect()
}
