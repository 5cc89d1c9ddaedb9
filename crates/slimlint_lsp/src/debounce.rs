//! Debouncing for lint-on-change.

use std::time::Duration;

use tower_lsp::lsp_types::Url;
use tracing::error;

use crate::state::{BackendState, SharedState};

/// Default debounce delay in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Spawns a debounced lint task.
///
/// Waits for the debounce period, then calls `lint_fn` only if `version` is
/// still the latest version of the document.
pub fn spawn_debounced_lint<F>(state: SharedState, uri: Url, version: i32, lint_fn: F)
where
    F: FnOnce(Url) + Send + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(DEFAULT_DEBOUNCE_MS)).await;

        if is_current_version(&state, &uri, version) {
            lint_fn(uri);
        }
    });
}

/// Checks if the document version is still current.
fn is_current_version(state: &BackendState, uri: &Url, version: i32) -> bool {
    let docs = match state.documents.read() {
        Ok(g) => g,
        Err(e) => {
            error!("Documents lock poisoned: {}", e);
            return false;
        }
    };

    docs.get(uri).is_some_and(|doc| doc.version == version)
}
