//! The linting engine.
//!
//! Owns the diagnostic store and the table of in-flight linter processes.
//! A lint cycle resolves settings, runs slim-lint, parses its output and
//! replaces the document's diagnostics, unless the document changed or a
//! newer lint for it started in the meantime.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, error, info};

use crate::LintError;
use crate::config::{LintEnvironment, LintInvocation};
use crate::diagnostic::Diagnostic;
use crate::document::{LineIndex, SLIM_LANGUAGE_ID, TextDocument};
use crate::parser::parse_output;
use crate::runner::{self, DEFAULT_TIMEOUT, Execution};
use crate::store::DiagnosticStore;

/// Result of one lint cycle.
#[derive(Debug)]
pub enum LintOutcome {
    /// The document is not a Slim file on disk.
    Skipped,
    /// Diagnostics were stored for the document.
    ///
    /// `warnings` holds non-fatal problems found while building the command
    /// line, such as a missing rules file.
    Committed {
        diagnostics: Vec<Diagnostic>,
        warnings: Vec<String>,
    },
    /// The document was edited while slim-lint ran; results were discarded.
    Stale,
    /// A newer lint or disposal took over, or the document was closed;
    /// results were discarded.
    Superseded,
    /// The cycle failed; stored diagnostics were left as they were.
    Failed(LintError),
    /// The engine has been disposed.
    Disposed,
}

struct InFlight {
    generation: u64,
    /// Dropping or firing this kills the running process.
    cancel: oneshot::Sender<()>,
}

/// Drives slim-lint for open documents and keeps their diagnostics.
pub struct LintEngine {
    store: DiagnosticStore,
    in_flight: Mutex<HashMap<String, InFlight>>,
    next_generation: AtomicU64,
    disposed: AtomicBool,
    timeout: Duration,
}

impl LintEngine {
    pub fn new() -> Self {
        Self {
            store: DiagnosticStore::new(),
            in_flight: Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-run wall-clock limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns whether `document` is a Slim file the engine will lint.
    pub fn is_eligible<D: TextDocument + ?Sized>(document: &D) -> bool {
        document.language_id() == SLIM_LANGUAGE_ID && document.is_file_backed()
    }

    /// Runs one lint cycle for `document`.
    ///
    /// Any lint already running for the same document is cancelled first.
    pub async fn run<D: TextDocument + ?Sized>(
        &self,
        document: &D,
        env: &LintEnvironment,
    ) -> LintOutcome {
        if self.is_disposed() {
            return LintOutcome::Disposed;
        }
        if document.language_id() != SLIM_LANGUAGE_ID {
            return LintOutcome::Skipped;
        }
        let Some(path) = document.file_path() else {
            return LintOutcome::Skipped;
        };

        let key = document.key();
        let invocation = match LintInvocation::resolve(env, &path) {
            Ok(invocation) => invocation,
            Err(e) => {
                error!("Cannot lint {}: {}", key, e);
                return LintOutcome::Failed(e);
            }
        };

        let Some(snapshot) = document.text() else {
            debug!("Not linting {}: document is closed", key);
            return LintOutcome::Superseded;
        };
        let (generation, cancel) = self.begin(key);

        let stdout = match runner::execute(&invocation, self.timeout, cancel).await {
            Ok(Execution::Completed(stdout)) => stdout,
            Ok(Execution::Cancelled) => {
                return if self.is_disposed() {
                    LintOutcome::Disposed
                } else {
                    LintOutcome::Superseded
                };
            }
            Err(e) => {
                self.finish(key, generation);
                error!("Lint failed for {}: {}", key, e);
                return LintOutcome::Failed(e);
            }
        };

        let diagnostics = parse_output(&stdout, &LineIndex::new(&snapshot));

        match document.text() {
            Some(current) if current == snapshot => {}
            Some(_) => {
                self.finish(key, generation);
                debug!("Discarding results for {}: edited during lint", key);
                return LintOutcome::Stale;
            }
            None => {
                self.finish(key, generation);
                debug!("Discarding results for {}: closed during lint", key);
                return LintOutcome::Superseded;
            }
        }

        self.commit(key, generation, diagnostics, invocation.warnings)
    }

    /// Drops the stored diagnostics of a file-backed document.
    ///
    /// Also cancels a lint still running for it. Returns whether an entry was
    /// removed.
    pub fn clear<D: TextDocument + ?Sized>(&self, document: &D) -> bool {
        if self.is_disposed() || !document.is_file_backed() {
            return false;
        }

        let key = document.key();
        let mut in_flight = self.in_flight.lock();
        in_flight.remove(key);
        self.store.remove(key)
    }

    /// Cancels every running lint and forgets all diagnostics.
    ///
    /// Later calls to [`run`](Self::run) and [`clear`](Self::clear) do nothing.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        let cancelled = {
            let mut in_flight = self.in_flight.lock();
            let count = in_flight.len();
            in_flight.clear();
            count
        };
        self.store.clear();
        info!("Lint engine disposed ({} running lints cancelled)", cancelled);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Current diagnostics for a document key.
    pub fn diagnostics(&self, key: &str) -> Option<Vec<Diagnostic>> {
        self.store.get(key)
    }

    /// Keys of every document with stored diagnostics.
    pub fn documents(&self) -> Vec<String> {
        self.store.keys()
    }

    /// Registers a new lint for `key`, cancelling the previous one.
    fn begin(&self, key: &str) -> (u64, oneshot::Receiver<()>) {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = oneshot::channel();

        let previous = self.in_flight.lock().insert(
            key.to_string(),
            InFlight {
                generation,
                cancel: tx,
            },
        );
        if let Some(previous) = previous {
            debug!("Superseding lint #{} for {}", previous.generation, key);
            let _ = previous.cancel.send(());
        }

        (generation, rx)
    }

    /// Forgets the in-flight entry for `key` if it still belongs to `generation`.
    fn finish(&self, key: &str, generation: u64) {
        let mut in_flight = self.in_flight.lock();
        if in_flight.get(key).is_some_and(|f| f.generation == generation) {
            in_flight.remove(key);
        }
    }

    /// Stores `diagnostics` if `generation` is still the current lint for `key`.
    ///
    /// The in-flight table stays locked while the store is written so that a
    /// lint started concurrently cannot commit before this one.
    fn commit(
        &self,
        key: &str,
        generation: u64,
        diagnostics: Vec<Diagnostic>,
        warnings: Vec<String>,
    ) -> LintOutcome {
        let mut in_flight = self.in_flight.lock();
        if !in_flight.get(key).is_some_and(|f| f.generation == generation) {
            return LintOutcome::Superseded;
        }
        in_flight.remove(key);

        if self.is_disposed() {
            return LintOutcome::Disposed;
        }

        debug!("Storing {} diagnostics for {}", diagnostics.len(), key);
        self.store.replace(key, diagnostics.clone());
        LintOutcome::Committed {
            diagnostics,
            warnings,
        }
    }
}

impl Default for LintEngine {
    fn default() -> Self {
        Self::new()
    }
}
