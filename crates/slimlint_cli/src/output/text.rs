//! Text output formatter

use slimlint_core::{Diagnostic, Severity};

use crate::commands::FileReport;

pub fn output_text(reports: &[FileReport]) {
    for report in reports {
        if report.diagnostics.is_empty() {
            continue;
        }

        println!("\n{}:", report.path.display());
        for diag in &report.diagnostics {
            println!("  {}", format_diagnostic(diag));
        }
    }

    let total_issues: usize = reports.iter().map(|r| r.diagnostics.len()).sum();

    println!();
    println!(
        "Checked {} files, found {} issues",
        reports.len(),
        total_issues
    );
}

/// One-based `line:column severity message`.
fn format_diagnostic(diag: &Diagnostic) -> String {
    let severity = match diag.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    format!(
        "{}:{} {} {}",
        diag.line + 1,
        diag.range.start_character + 1,
        severity,
        diag.message
    )
}
