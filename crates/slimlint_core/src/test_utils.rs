use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::TempDir;

use crate::config::{LintEnvironment, LintSettings};
use crate::document::{SLIM_LANGUAGE_ID, TextDocument};

/// A project directory with a shell script standing in for slim-lint.
///
/// The script receives the document path as `$1` (or after `--config <path>`
/// when a rules file exists).
pub struct FakeLinter {
    dir: TempDir,
    script: PathBuf,
}

impl FakeLinter {
    pub fn new(body: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let script = dir.path().join("fake-slim-lint.sh");
        std::fs::write(&script, format!("#!/bin/sh\n{}\n", body)).expect("write script");
        Self { dir, script }
    }

    /// Writes another script next to the first one and returns its settings value.
    pub fn extra_script(&self, name: &str, body: &str) -> String {
        let path = self.dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("write script");
        format!("sh {}", path.display())
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn executable_path(&self) -> String {
        format!("sh {}", self.script.display())
    }

    pub fn settings(&self) -> LintSettings {
        LintSettings {
            executable_path: self.executable_path(),
            ..LintSettings::default()
        }
    }

    pub fn env(&self) -> LintEnvironment {
        LintEnvironment::new(self.settings(), Some(self.root().to_path_buf()))
    }

    pub fn write_document(&self, name: &str, text: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(&path, text).expect("write document");
        path
    }
}

/// In-memory document, optionally edited while a lint is running.
pub struct StubDocument {
    key: String,
    language_id: String,
    path: Option<PathBuf>,
    text: String,
    /// Text returned from the second read onwards, if set.
    edited: Option<String>,
    /// Number of reads after which the document reports itself closed.
    closed_after: Option<usize>,
    reads: AtomicUsize,
}

impl StubDocument {
    /// A Slim file on disk.
    pub fn slim(path: &Path, text: &str) -> Self {
        Self {
            key: format!("file://{}", path.display()),
            language_id: SLIM_LANGUAGE_ID.to_string(),
            path: Some(path.to_path_buf()),
            text: text.to_string(),
            edited: None,
            closed_after: None,
            reads: AtomicUsize::new(0),
        }
    }

    /// An unsaved buffer that has no path.
    pub fn untitled(name: &str, text: &str) -> Self {
        Self {
            key: format!("untitled:{}", name),
            language_id: SLIM_LANGUAGE_ID.to_string(),
            path: None,
            text: text.to_string(),
            edited: None,
            closed_after: None,
            reads: AtomicUsize::new(0),
        }
    }

    pub fn with_language(mut self, language_id: &str) -> Self {
        self.language_id = language_id.to_string();
        self
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    /// Returns `text` on the first read and `edited` afterwards.
    pub fn edited_during_lint(mut self, edited: &str) -> Self {
        self.edited = Some(edited.to_string());
        self
    }

    /// Already closed when the lint starts.
    pub fn closed(mut self) -> Self {
        self.closed_after = Some(0);
        self
    }

    /// Open on the first read and closed afterwards.
    pub fn closed_during_lint(mut self) -> Self {
        self.closed_after = Some(1);
        self
    }
}

impl TextDocument for StubDocument {
    fn key(&self) -> &str {
        &self.key
    }

    fn language_id(&self) -> &str {
        &self.language_id
    }

    fn file_path(&self) -> Option<PathBuf> {
        self.path.clone()
    }

    fn text(&self) -> Option<String> {
        let read = self.reads.fetch_add(1, Ordering::SeqCst);
        if self.closed_after.is_some_and(|n| read >= n) {
            return None;
        }
        match &self.edited {
            Some(edited) if read > 0 => Some(edited.clone()),
            _ => Some(self.text.clone()),
        }
    }
}
