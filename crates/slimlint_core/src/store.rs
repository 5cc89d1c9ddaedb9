//! Per-document diagnostic storage.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::diagnostic::Diagnostic;

/// Diagnostics keyed by document identity.
///
/// Entries are replaced wholesale, never merged.
#[derive(Debug, Default)]
pub struct DiagnosticStore {
    entries: RwLock<HashMap<String, Vec<Diagnostic>>>,
}

impl DiagnosticStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deletes any previous entry for `key` and stores `diagnostics` in its place.
    pub fn replace(&self, key: &str, diagnostics: Vec<Diagnostic>) {
        let mut entries = self.entries.write();
        entries.remove(key);
        entries.insert(key.to_string(), diagnostics);
    }

    /// Removes the entry for `key`, returning whether there was one.
    pub fn remove(&self, key: &str) -> bool {
        self.entries.write().remove(key).is_some()
    }

    /// Returns a copy of the entry for `key`.
    pub fn get(&self, key: &str) -> Option<Vec<Diagnostic>> {
        self.entries.read().get(key).cloned()
    }

    /// Keys that currently have an entry, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.entries.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
