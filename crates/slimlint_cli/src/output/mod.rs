//! Output formatting module

mod json;
mod text;

use miette::Result;
use slimlint_core::Severity;

use crate::cli::OutputFormat;
use crate::commands::FileReport;

/// Prints the reports and returns whether any error was found.
pub fn output_results(reports: &[FileReport], format: OutputFormat) -> Result<bool> {
    let has_errors = reports
        .iter()
        .flat_map(|r| &r.diagnostics)
        .any(|d| d.severity == Severity::Error);

    match format {
        OutputFormat::Json => json::output_json(reports)?,
        OutputFormat::Text => text::output_text(reports),
    }

    Ok(has_errors)
}
