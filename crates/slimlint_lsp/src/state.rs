//! LSP Backend state management.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tower_lsp::lsp_types::Url;
use tracing::error;

use slimlint_core::{LintEngine, LintEnvironment, LintSettings};

/// Document content and version cache.
#[derive(Debug, Clone)]
pub(crate) struct DocumentData {
    pub text: String,
    pub version: i32,
    pub language_id: String,
}

/// Shared backend state.
pub(crate) struct BackendState {
    /// Open documents, as last reported by the client.
    pub documents: RwLock<HashMap<Url, DocumentData>>,
    /// Current user settings.
    pub settings: RwLock<LintSettings>,
    /// Workspace folders, in the order the client listed them.
    pub workspace_roots: RwLock<Vec<PathBuf>>,
    /// Owner of all diagnostics and running slim-lint processes.
    pub engine: LintEngine,
}

impl fmt::Debug for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendState")
            .field("documents", &"<HashMap<Url, DocumentData>>")
            .field("settings", &self.settings)
            .field("workspace_roots", &self.workspace_roots)
            .field("engine", &"<LintEngine>")
            .finish()
    }
}

impl BackendState {
    /// Creates a new empty state.
    pub fn new() -> Self {
        Self::with_engine(LintEngine::new())
    }

    /// Creates a new state around a pre-configured engine.
    pub fn with_engine(engine: LintEngine) -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            settings: RwLock::new(LintSettings::default()),
            workspace_roots: RwLock::new(Vec::new()),
            engine,
        }
    }

    /// Returns a copy of the current settings.
    pub fn settings(&self) -> LintSettings {
        match self.settings.read() {
            Ok(settings) => settings.clone(),
            Err(e) => {
                error!("Settings lock poisoned: {}", e);
                LintSettings::default()
            }
        }
    }

    /// Replaces the current settings.
    pub fn set_settings(&self, settings: LintSettings) {
        match self.settings.write() {
            Ok(mut guard) => *guard = settings,
            Err(e) => error!("Settings lock poisoned: {}", e),
        }
    }

    /// Picks the workspace folder that contains `path`.
    ///
    /// The deepest matching folder wins; a file outside every folder falls
    /// back to the first one.
    pub fn project_root_for(&self, path: &Path) -> Option<PathBuf> {
        let roots = match self.workspace_roots.read() {
            Ok(roots) => roots,
            Err(e) => {
                error!("Workspace roots lock poisoned: {}", e);
                return None;
            }
        };

        roots
            .iter()
            .filter(|root| path.starts_with(root))
            .max_by_key(|root| root.components().count())
            .or_else(|| roots.first())
            .cloned()
    }

    /// Builds the environment for one lint request, read fresh every time.
    pub fn environment_for(&self, path: Option<&Path>) -> LintEnvironment {
        let project_root = match path {
            Some(path) => self.project_root_for(path),
            None => None,
        };
        LintEnvironment::new(self.settings(), project_root)
    }

    /// URIs of every open document.
    pub fn open_documents(&self) -> Vec<Url> {
        match self.documents.read() {
            Ok(docs) => docs.keys().cloned().collect(),
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                Vec::new()
            }
        }
    }
}

impl Default for BackendState {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for shared state.
pub(crate) type SharedState = Arc<BackendState>;
