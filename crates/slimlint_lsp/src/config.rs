//! Settings received from the client.

use serde_json::Value;
use tracing::{error, info};

use slimlint_core::LintSettings;

use crate::state::BackendState;

/// Section name under which editors nest our settings.
pub const SETTINGS_SECTION: &str = "slimLint";

/// Extracts settings from `initializationOptions` or a
/// `workspace/didChangeConfiguration` payload.
///
/// Accepts both `{"slimLint": {...}}` and the bare settings object. Returns
/// `None` when the payload carries nothing for us.
pub fn settings_from_value(value: &Value) -> Option<Result<LintSettings, serde_json::Error>> {
    let section = match value.get(SETTINGS_SECTION) {
        Some(section) => section,
        None if value.as_object().is_some_and(|o| !o.is_empty()) => value,
        None => return None,
    };
    Some(serde_json::from_value(section.clone()))
}

/// Applies a settings payload to the state. Returns whether settings changed.
pub fn apply_settings(state: &BackendState, value: &Value) -> bool {
    match settings_from_value(value) {
        Some(Ok(settings)) => {
            if state.settings() == settings {
                return false;
            }
            info!(
                "Settings updated: executablePath={:?}, configurationPath={:?}, lintOnChange={}",
                settings.executable_path, settings.configuration_path, settings.lint_on_change
            );
            state.set_settings(settings);
            true
        }
        Some(Err(e)) => {
            error!("Ignoring invalid settings: {}", e);
            false
        }
        None => false,
    }
}
