//! Open documents as seen by the lint engine.

use std::path::PathBuf;

use tower_lsp::lsp_types::Url;
use tracing::error;

use slimlint_core::TextDocument;

use crate::state::SharedState;

/// A handle on a document tracked by the server.
///
/// `text` reads the latest content the client sent, so an edit arriving while
/// slim-lint runs is visible to the engine's staleness check.
pub(crate) struct LiveDocument {
    uri: Url,
    key: String,
    language_id: String,
    state: SharedState,
}

impl LiveDocument {
    /// Looks up an open document.
    pub fn open(state: &SharedState, uri: &Url) -> Option<Self> {
        let docs = match state.documents.read() {
            Ok(docs) => docs,
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                return None;
            }
        };
        let language_id = docs.get(uri)?.language_id.clone();
        Some(Self::new(state, uri, language_id))
    }

    /// Builds a handle for a document that may no longer be open.
    pub fn new(state: &SharedState, uri: &Url, language_id: String) -> Self {
        Self {
            uri: uri.clone(),
            key: uri.to_string(),
            language_id,
            state: state.clone(),
        }
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }
}

impl TextDocument for LiveDocument {
    fn key(&self) -> &str {
        &self.key
    }

    fn language_id(&self) -> &str {
        &self.language_id
    }

    fn file_path(&self) -> Option<PathBuf> {
        if self.uri.scheme() != "file" {
            return None;
        }
        self.uri.to_file_path().ok()
    }

    fn text(&self) -> Option<String> {
        match self.state.documents.read() {
            Ok(docs) => docs.get(&self.uri).map(|d| d.text.clone()),
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                None
            }
        }
    }
}
