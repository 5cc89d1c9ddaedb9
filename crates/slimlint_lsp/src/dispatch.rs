//! Forwards document lifecycle events to the lint engine.
//!
//! Every lint runs in its own task. Whatever happens inside it, including a
//! panic, is logged here and never reaches the LSP event loop.

use tower_lsp::Client;
use tower_lsp::lsp_types::{MessageType, Url};
use tracing::{debug, error};

use slimlint_core::{LintOutcome, TextDocument};

use crate::conversion::to_lsp_diagnostics;
use crate::document::LiveDocument;
use crate::state::SharedState;

/// Bridges editor events to the engine's `run` and `clear`.
#[derive(Clone)]
pub(crate) struct Dispatcher {
    client: Client,
    state: SharedState,
}

impl Dispatcher {
    pub fn new(client: Client, state: SharedState) -> Self {
        Self { client, state }
    }

    /// Called on open and save, and on change when lint-on-change is enabled.
    ///
    /// The engine decides whether the document is eligible.
    pub fn on_document_ready(&self, uri: Url) {
        let Some(document) = LiveDocument::open(&self.state, &uri) else {
            debug!("Ignoring lint request for unknown document: {}", uri);
            return;
        };

        let this = self.clone();
        let task = tokio::spawn(async move {
            let path = document.file_path();
            let env = this.state.environment_for(path.as_deref());
            let outcome = this.state.engine.run(&document, &env).await;
            this.report(document.uri(), outcome).await;
        });

        tokio::spawn(async move {
            if let Err(e) = task.await
                && e.is_panic()
            {
                error!("Lint task for {} panicked: {}", uri, e);
            }
        });
    }

    /// Called when the client closes a document.
    pub async fn on_document_closed(&self, uri: &Url, language_id: String) {
        let document = LiveDocument::new(&self.state, uri, language_id);
        if self.state.engine.clear(&document) {
            self.client
                .publish_diagnostics(uri.clone(), Vec::new(), None)
                .await;
        }
    }

    /// Lints every document the server already knows about.
    pub fn lint_open_documents(&self) {
        for uri in self.state.open_documents() {
            self.on_document_ready(uri);
        }
    }

    async fn report(&self, uri: &Url, outcome: LintOutcome) {
        match outcome {
            LintOutcome::Committed {
                diagnostics,
                warnings,
            } => {
                for warning in warnings {
                    self.client
                        .log_message(MessageType::WARNING, warning)
                        .await;
                }
                self.client
                    .publish_diagnostics(uri.clone(), to_lsp_diagnostics(&diagnostics), None)
                    .await;
            }
            LintOutcome::Failed(e) => {
                self.client
                    .log_message(MessageType::ERROR, format!("{}: {}", uri, e))
                    .await;
                self.client
                    .show_message(MessageType::ERROR, format!("slim-lint: {}", e))
                    .await;
            }
            LintOutcome::Skipped => debug!("Not a Slim file on disk: {}", uri),
            LintOutcome::Stale => debug!("Edited during lint: {}", uri),
            LintOutcome::Superseded => debug!("Lint superseded or document closed: {}", uri),
            LintOutcome::Disposed => debug!("Engine disposed, dropping lint for {}", uri),
        }
    }
}
