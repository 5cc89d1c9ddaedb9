//! Lint settings and command-line resolution.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::LintError;

/// Default linter command.
pub const DEFAULT_EXECUTABLE: &str = "slim-lint";

/// Default rules file name, resolved against the project root.
pub const DEFAULT_CONFIG_FILE: &str = ".slim-lint.yml";

/// User-facing settings, as sent by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintSettings {
    /// Command plus optional leading arguments, e.g. `bundle exec slim-lint`.
    #[serde(default = "default_executable_path")]
    pub executable_path: String,

    /// Rules file passed with `--config` when it exists.
    #[serde(default = "default_configuration_path")]
    pub configuration_path: String,

    /// Also lint on every content change, not only on open and save.
    #[serde(default)]
    pub lint_on_change: bool,
}

fn default_executable_path() -> String {
    DEFAULT_EXECUTABLE.to_string()
}

fn default_configuration_path() -> String {
    DEFAULT_CONFIG_FILE.to_string()
}

impl Default for LintSettings {
    fn default() -> Self {
        Self {
            executable_path: default_executable_path(),
            configuration_path: default_configuration_path(),
            lint_on_change: false,
        }
    }
}

/// Everything a single lint request reads from its surroundings.
///
/// Built fresh by the host for every request so that settings edits take
/// effect on the next open or save.
#[derive(Debug, Clone, Default)]
pub struct LintEnvironment {
    pub settings: LintSettings,
    /// Top-level directory of the active workspace, if any.
    pub project_root: Option<PathBuf>,
}

impl LintEnvironment {
    pub fn new(settings: LintSettings, project_root: Option<PathBuf>) -> Self {
        Self {
            settings,
            project_root,
        }
    }
}

/// A fully resolved linter command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintInvocation {
    /// Program to execute.
    pub command: String,
    /// Leading arguments split off `executablePath`.
    pub base_args: Vec<String>,
    /// Rules file, when one was found.
    pub config_file: Option<PathBuf>,
    /// Absolute path of the document being linted.
    pub document_path: PathBuf,
    /// Working directory of the linter process.
    pub working_dir: PathBuf,
    /// Non-fatal problems found while resolving.
    pub warnings: Vec<String>,
}

impl LintInvocation {
    /// Resolves settings against the environment for one document.
    pub fn resolve(env: &LintEnvironment, document_path: &Path) -> Result<Self, LintError> {
        let settings = &env.settings;

        if settings.executable_path.trim().is_empty() {
            return Err(LintError::config("`executablePath` must not be blank"));
        }
        if settings.configuration_path.trim().is_empty() {
            return Err(LintError::config("`configurationPath` must not be blank"));
        }

        let mut tokens = settings.executable_path.split_whitespace().map(String::from);
        let command = tokens
            .next()
            .ok_or_else(|| LintError::config("`executablePath` must not be blank"))?;
        let base_args = tokens.collect();

        let working_dir = match &env.project_root {
            Some(root) => root.clone(),
            None => document_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };

        let configured = settings.configuration_path.trim();
        let candidate = if configured == DEFAULT_CONFIG_FILE {
            working_dir.join(DEFAULT_CONFIG_FILE)
        } else {
            let path = normalize_separators(configured);
            if path.is_relative() {
                working_dir.join(path)
            } else {
                path
            }
        };

        let mut warnings = Vec::new();
        let config_file = if candidate.is_file() {
            Some(candidate)
        } else {
            let message = format!(
                "Configuration file {} not found; running slim-lint with its default rules",
                candidate.display()
            );
            warn!("{}", message);
            warnings.push(message);
            None
        };

        Ok(Self {
            command,
            base_args,
            config_file,
            document_path: document_path.to_path_buf(),
            working_dir,
            warnings,
        })
    }

    /// Arguments after the command:
    /// `[...base_args, (--config, path)?, document_path]`.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.base_args.iter().map(OsString::from).collect();
        if let Some(config) = &self.config_file {
            args.push(OsString::from("--config"));
            args.push(config.clone().into_os_string());
        }
        args.push(self.document_path.clone().into_os_string());
        args
    }

    /// Human-readable command line for logs.
    pub fn display(&self) -> String {
        let mut out = self.command.clone();
        for arg in self.args() {
            out.push(' ');
            out.push_str(&arg.to_string_lossy());
        }
        out
    }
}

fn normalize_separators(path: &str) -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(path.replace('/', "\\"))
    } else {
        PathBuf::from(path.replace('\\', "/"))
    }
}
