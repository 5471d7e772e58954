//! Application state and the operations the front end drives.
//!
//! [`App`] owns the current response, the inline error, the history store and
//! the notification queue. Every failure is recovered here: executor errors
//! become the inline error message, and storage, import and clipboard errors
//! become destructive toasts. Nothing returned from this module should end
//! the process.

use crate::clipboard::Clipboard;
use crate::collection::{parse_collection, Collection, ShareDocument};
use crate::executor::{Executor, ExecutorError};
use crate::history::{HistoryEntry, HistoryStore};
use crate::models::{HttpMethod, RequestSpec, ResponseResult};
use crate::notification::{ToastMessage, ToastVariant, Toaster};
use std::path::{Path, PathBuf};

/// Outcome of an import, for callers that report it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// History was replaced with this many entries.
    Replaced(usize),
    /// The document had no `history` array; nothing changed.
    NothingToImport,
    /// The document was rejected; nothing changed.
    Rejected,
}

pub struct App {
    executor: Executor,
    history: HistoryStore,
    clipboard: Box<dyn Clipboard>,
    toaster: Toaster,
    response: Option<ResponseResult>,
    error: Option<String>,
    current_method: HttpMethod,
    current_url: String,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("history", &self.history)
            .field("response", &self.response)
            .field("error", &self.error)
            .field("current_method", &self.current_method)
            .field("current_url", &self.current_url)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(
        executor: Executor,
        history: HistoryStore,
        clipboard: Box<dyn Clipboard>,
        toaster: Toaster,
    ) -> Self {
        Self {
            executor,
            history,
            clipboard,
            toaster,
            response: None,
            error: None,
            current_method: HttpMethod::default(),
            current_url: String::new(),
        }
    }

    pub fn set_method(&mut self, method: HttpMethod) {
        self.current_method = method;
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.current_url = url.into();
    }

    pub fn current_method(&self) -> HttpMethod {
        self.current_method
    }

    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    /// Sends `spec` and records the result.
    ///
    /// On success the response replaces the current one, the inline error is
    /// cleared and a history entry attributed to the tracked method and URL is
    /// prepended. On failure the shaped message becomes the inline error and
    /// both the previous response and the history are left as they were.
    ///
    /// Taking `&mut self` keeps a second submit from starting while one is in
    /// flight.
    pub async fn submit(&mut self, spec: RequestSpec) -> Result<&ResponseResult, ExecutorError> {
        self.current_method = spec.method;
        self.current_url = spec.url.clone();

        let result = match self.executor.execute(&spec).await {
            Ok(result) => result,
            Err(err) => {
                self.error = Some(err.user_message());
                return Err(err);
            }
        };

        self.error = None;
        let entry = HistoryEntry::new(self.current_method, self.current_url.clone(), result.clone());
        if let Err(e) = self.history.append(entry) {
            log::error!("Failed to persist request history: {}", e);
            self.toaster.toast(
                "History not saved",
                e.to_string(),
                ToastVariant::Destructive,
            );
        }

        let response: &ResponseResult = self.response.insert(result);
        Ok(response)
    }

    /// Shows a stored response without sending anything.
    ///
    /// Returns `false` if `index` is out of range. History order is unchanged.
    pub fn select_history(&mut self, index: usize) -> bool {
        let Some(entry) = self.history.get(index) else {
            return false;
        };

        self.current_method = entry.method;
        self.current_url = entry.url.clone();
        self.response = Some(entry.to_response());
        self.error = None;
        true
    }

    pub fn clear_history(&mut self) {
        match self.history.clear() {
            Ok(()) => {
                self.toaster.toast(
                    "History cleared",
                    "All requests have been removed from history",
                    ToastVariant::Default,
                );
            }
            Err(e) => {
                log::error!("Failed to remove persisted history: {}", e);
                self.toaster
                    .toast("Failed to clear history", e.to_string(), ToastVariant::Destructive);
            }
        }
    }

    /// Writes the whole history as a named collection.
    ///
    /// If `path` is a directory the collection's own file name is used inside
    /// it. Returns the written path, or `None` after toasting the failure.
    pub fn export_collection(&mut self, path: &Path) -> Option<PathBuf> {
        let collection = Collection::new(self.history.entries().to_vec());
        let target = if path.is_dir() {
            path.join(collection.file_name())
        } else {
            path.to_path_buf()
        };

        let written = collection
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&target, json).map_err(|e| e.to_string()));

        match written {
            Ok(()) => {
                self.toaster.toast(
                    "Collection saved",
                    format!("Saved {} requests to {}", collection.history.len(), target.display()),
                    ToastVariant::Default,
                );
                Some(target)
            }
            Err(e) => {
                log::error!("Failed to export collection: {}", e);
                self.toaster
                    .toast("Failed to save collection", e, ToastVariant::Destructive);
                None
            }
        }
    }

    /// Replaces the history with the entries of a collection document.
    ///
    /// Malformed documents are reported and leave the history untouched.
    pub fn import_collection(&mut self, text: &str) -> ImportOutcome {
        let entries = match parse_collection(text) {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                self.toaster.toast(
                    "No history found",
                    "The collection does not contain a history list",
                    ToastVariant::Default,
                );
                return ImportOutcome::NothingToImport;
            }
            Err(e) => {
                log::warn!("Rejected collection import: {}", e);
                self.toaster
                    .toast("Failed to load collection", e.to_string(), ToastVariant::Destructive);
                return ImportOutcome::Rejected;
            }
        };

        let count = entries.len();
        match self.history.replace_all(entries) {
            Ok(()) => {
                self.toaster.toast(
                    "Collection loaded",
                    format!("Loaded {} requests", count),
                    ToastVariant::Default,
                );
            }
            Err(e) => {
                log::error!("Failed to persist imported history: {}", e);
                self.toaster.toast(
                    "History not saved",
                    format!("Loaded {} requests but could not save them: {}", count, e),
                    ToastVariant::Destructive,
                );
            }
        }
        ImportOutcome::Replaced(count)
    }

    /// Copies `{history, timestamp}` to the clipboard.
    pub fn share_collection(&mut self) -> bool {
        let document = ShareDocument::new(self.history.entries().to_vec());
        let copied = document
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| self.clipboard.set_text(&json).map_err(|e| e.to_string()));

        match copied {
            Ok(()) => {
                self.toaster.toast(
                    "Copied to clipboard",
                    "Collection copied to clipboard",
                    ToastVariant::Default,
                );
                true
            }
            Err(e) => {
                log::warn!("Failed to share collection: {}", e);
                self.toaster
                    .toast("Failed to share collection", e, ToastVariant::Destructive);
                false
            }
        }
    }

    pub fn response(&self) -> Option<&ResponseResult> {
        self.response.as_ref()
    }

    /// The shaped message of the last failed submit, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn toasts(&self) -> &[ToastMessage] {
        self.toaster.all()
    }
}
