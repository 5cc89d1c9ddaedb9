//! LSP type conversion utilities.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range};

use slimlint_core::{Diagnostic as SlimDiagnostic, Severity as SlimSeverity};

/// Value of `Diagnostic::source` for everything this server publishes.
pub const DIAGNOSTIC_SOURCE: &str = "slim-lint";

/// Converts an engine diagnostic to an LSP diagnostic.
pub fn to_lsp_diagnostic(diag: &SlimDiagnostic) -> Diagnostic {
    let severity = match diag.severity {
        SlimSeverity::Error => DiagnosticSeverity::ERROR,
        SlimSeverity::Warning => DiagnosticSeverity::WARNING,
    };

    Diagnostic {
        range: Range::new(
            Position::new(diag.line, diag.range.start_character),
            Position::new(diag.line, diag.range.end_character),
        ),
        severity: Some(severity),
        code: Some(NumberOrString::String(diag.rule_name.clone())),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: diag.message.clone(),
        ..Default::default()
    }
}

/// Converts a batch of engine diagnostics.
pub fn to_lsp_diagnostics(diags: &[SlimDiagnostic]) -> Vec<Diagnostic> {
    diags.iter().map(to_lsp_diagnostic).collect()
}
