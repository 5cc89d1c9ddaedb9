//! Diagnostic types for lint results.

use serde::{Deserialize, Serialize};

/// Severity level for diagnostics.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed.
    #[default]
    Error,
    /// Warning - should be reviewed.
    Warning,
}

impl Severity {
    /// Maps the one-letter code printed by slim-lint.
    ///
    /// Only `W` is a warning; every other code is treated as an error.
    pub fn from_code(code: &str) -> Self {
        if code == "W" {
            Severity::Warning
        } else {
            Severity::Error
        }
    }
}

/// Highlighted columns on a single line, in UTF-16 code units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRange {
    pub start_character: u32,
    pub end_character: u32,
}

impl LineRange {
    pub fn new(start_character: u32, end_character: u32) -> Self {
        Self {
            start_character,
            end_character,
        }
    }
}

/// A single issue reported by slim-lint, anchored to a document line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Zero-based line in the owning document.
    pub line: u32,

    /// Columns to highlight on `line`.
    pub range: LineRange,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// The rule that generated this diagnostic.
    pub rule_name: String,

    /// Display message, `"<rule>: <text>"`.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new diagnostic; the display message is prefixed with the rule name.
    pub fn new(
        line: u32,
        range: LineRange,
        rule_name: impl Into<String>,
        text: impl AsRef<str>,
    ) -> Self {
        let rule_name = rule_name.into();
        let message = format!("{}: {}", rule_name, text.as_ref());
        Self {
            line,
            range,
            severity: Severity::Error,
            rule_name,
            message,
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("W", Severity::Warning)]
    #[case("E", Severity::Error)]
    #[case("F", Severity::Error)]
    #[case("", Severity::Error)]
    fn severity_from_code(#[case] code: &str, #[case] expected: Severity) {
        assert_eq!(Severity::from_code(code), expected);
    }

    #[test]
    fn message_is_prefixed_with_rule() {
        let diag = Diagnostic::new(3, LineRange::new(2, 10), "LineLength", "Line is too long.");
        assert_eq!(diag.message, "LineLength: Line is too long.");
        assert_eq!(diag.rule_name, "LineLength");
        assert_eq!(diag.severity, Severity::Error);
    }

    #[test]
    fn serializes_lowercase_severity() {
        let diag = Diagnostic::new(0, LineRange::default(), "Tab", "x")
            .with_severity(Severity::Warning);
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["rule_name"], "Tab");
    }
}
