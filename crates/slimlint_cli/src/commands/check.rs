//! Check command implementation

use std::path::{Path, PathBuf};
use std::time::Duration;

use miette::{IntoDiagnostic, Result, WrapErr, miette};
use tracing::{debug, info, warn};

use slimlint_core::{
    Diagnostic, LintEngine, LintEnvironment, LintOutcome, LintSettings, SLIM_LANGUAGE_ID,
    TextDocument,
};

use super::create_tokio_runtime;

pub struct CheckOptions {
    pub executable: Option<String>,
    pub config: Option<String>,
    pub timeout: Duration,
}

/// Diagnostics found in one file.
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

/// A file read from disk once, before slim-lint runs.
struct FileDocument {
    key: String,
    path: PathBuf,
    language_id: String,
    text: String,
}

impl FileDocument {
    fn load(path: &Path) -> Result<Self> {
        let path = std::path::absolute(path).into_diagnostic()?;
        let text = std::fs::read_to_string(&path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

        Ok(Self {
            key: path.display().to_string(),
            language_id: language_id_for(&path),
            path,
            text,
        })
    }
}

impl TextDocument for FileDocument {
    fn key(&self) -> &str {
        &self.key
    }

    fn language_id(&self) -> &str {
        &self.language_id
    }

    fn file_path(&self) -> Option<PathBuf> {
        Some(self.path.clone())
    }

    fn text(&self) -> Option<String> {
        Some(self.text.clone())
    }
}

fn language_id_for(path: &Path) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("slim") => SLIM_LANGUAGE_ID.to_string(),
        Some(ext) => ext.to_ascii_lowercase(),
        None => "plaintext".to_string(),
    }
}

/// Lints `files` one after another.
///
/// Stops at the first file slim-lint fails on.
pub fn run_check(files: &[PathBuf], options: &CheckOptions) -> Result<Vec<FileReport>> {
    let defaults = LintSettings::default();
    let settings = LintSettings {
        executable_path: options
            .executable
            .clone()
            .unwrap_or(defaults.executable_path),
        configuration_path: options
            .config
            .clone()
            .unwrap_or(defaults.configuration_path),
        ..LintSettings::default()
    };
    let root = std::env::current_dir().into_diagnostic()?;
    let env = LintEnvironment::new(settings, Some(root));
    let engine = LintEngine::new().with_timeout(options.timeout);

    info!("Checking {} file(s)", files.len());

    let reports = create_tokio_runtime()?.block_on(async {
        let mut reports = Vec::new();
        for path in files {
            let document = FileDocument::load(path)?;
            if !LintEngine::is_eligible(&document) {
                warn!("Skipping {}: not a Slim template", path.display());
                continue;
            }

            match engine.run(&document, &env).await {
                LintOutcome::Committed { diagnostics, .. } => reports.push(FileReport {
                    path: path.clone(),
                    diagnostics,
                }),
                LintOutcome::Failed(e) => {
                    return Err(miette!("{}: {}", path.display(), e));
                }
                other => debug!("No result for {}: {:?}", path.display(), other),
            }
        }
        Ok(reports)
    });

    engine.dispose();
    reports
}
