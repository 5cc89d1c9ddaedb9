//! Watched files and configuration change handlers.

use std::path::Path;

use tower_lsp::lsp_types::*;
use tracing::{debug, info};

use slimlint_core::DEFAULT_CONFIG_FILE;

use crate::config::apply_settings;
use crate::state::BackendState;

/// Handles the `workspace/didChangeWatchedFiles` notification.
///
/// Returns whether a slim-lint rules file changed, in which case open
/// documents should be linted again.
pub async fn handle_did_change_watched_files(
    state: &BackendState,
    params: DidChangeWatchedFilesParams,
) -> bool {
    debug!("Watched files changed: {:?}", params.changes);

    let configured = state.settings().configuration_path;
    let configured_name = Path::new(configured.trim())
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());

    let config_changed = params.changes.iter().any(|change| {
        let path = change.uri.path();
        path.ends_with(DEFAULT_CONFIG_FILE)
            || configured_name
                .as_deref()
                .is_some_and(|name| path.ends_with(name))
    });

    if config_changed {
        info!("slim-lint configuration changed, linting open documents again");
    }
    config_changed
}

/// Handles the `workspace/didChangeConfiguration` notification.
///
/// Returns whether settings changed.
pub async fn handle_did_change_configuration(
    state: &BackendState,
    params: DidChangeConfigurationParams,
) -> bool {
    debug!("Configuration changed");
    apply_settings(state, &params.settings)
}
