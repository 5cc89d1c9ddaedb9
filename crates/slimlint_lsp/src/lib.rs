//! slim-lint LSP Server
//!
//! Language Server Protocol front end for slim-lint.
//! Lints Slim templates on open and save and publishes the results as
//! editor diagnostics.

mod config;
mod conversion;
mod debounce;
mod dispatch;
mod document;
mod handler;
mod state;

use std::sync::Arc;
use std::time::Duration;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::info;

use slimlint_core::{Diagnostic as SlimDiagnostic, LintEngine};

pub use config::SETTINGS_SECTION;
pub use conversion::DIAGNOSTIC_SOURCE;
pub use debounce::DEFAULT_DEBOUNCE_MS;

use dispatch::Dispatcher;
use state::{BackendState, SharedState};

/// The LSP backend for slim-lint.
#[derive(Clone)]
pub struct Backend {
    /// Shared state
    state: SharedState,
    /// Forwards document events to the engine and reports back to the client.
    dispatcher: Dispatcher,
    client: Client,
}

impl Backend {
    /// Creates a new backend with the given client.
    pub fn new(client: Client) -> Self {
        Self::with_engine(client, LintEngine::new())
    }

    /// Creates a backend whose slim-lint runs are killed after `timeout`.
    pub fn with_timeout(client: Client, timeout: Duration) -> Self {
        Self::with_engine(client, LintEngine::new().with_timeout(timeout))
    }

    fn with_engine(client: Client, engine: LintEngine) -> Self {
        let state: SharedState = Arc::new(BackendState::with_engine(engine));
        Self {
            dispatcher: Dispatcher::new(client.clone(), state.clone()),
            state,
            client,
        }
    }

    /// Returns the diagnostics currently held for a document.
    pub fn diagnostics(&self, uri: &Url) -> Option<Vec<SlimDiagnostic>> {
        self.state.engine.diagnostics(uri.as_str())
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handler::handle_initialize(&self.state, params).await
    }

    async fn initialized(&self, _: InitializedParams) {
        handler::handle_initialized(&self.client).await;
        self.dispatcher.lint_open_documents();
    }

    async fn shutdown(&self) -> Result<()> {
        handler::handle_shutdown(&self.state).await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = handler::handle_did_open(&self.state, params).await;
        self.dispatcher.on_document_ready(uri);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let Some((uri, version)) = handler::handle_did_change(&self.state, params).await else {
            return;
        };

        if !self.state.settings().lint_on_change {
            return;
        }

        let dispatcher = self.dispatcher.clone();
        debounce::spawn_debounced_lint(self.state.clone(), uri, version, move |uri| {
            dispatcher.on_document_ready(uri);
        });
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = handler::handle_did_save(&self.state, params).await;
        self.dispatcher.on_document_ready(uri);
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let (uri, data) = handler::handle_did_close(&self.state, params).await;
        if let Some(data) = data {
            self.dispatcher
                .on_document_closed(&uri, data.language_id)
                .await;
        }
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        if handler::handle_did_change_configuration(&self.state, params).await {
            self.dispatcher.lint_open_documents();
        }
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        if handler::handle_did_change_watched_files(&self.state, params).await {
            self.dispatcher.lint_open_documents();
        }
    }
}

/// Runs the LSP server on stdin/stdout.
pub async fn run() {
    info!("slim-lint LSP server starting...");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
