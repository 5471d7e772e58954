//! WebPost: compose HTTP requests, inspect responses, keep a request history.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **models**: request specs, the header editor, and normalized responses
//! - **executor**: validates, sends and classifies HTTP calls over a transport
//! - **history**: newest-first request history persisted to a key-value store
//! - **collection**: export, import and share documents for the history
//! - **coordinator**: the [`App`] state that ties the above together
//! - **formatter**: renders a response for the viewer
//! - **notification**: short-lived toasts
//! - **clipboard**: write-only clipboard access
//! - **config**: global configuration loaded at startup
//!
//! # Request flow
//!
//! 1. The front end builds a [`RequestSpec`], usually through a [`RequestForm`]
//! 2. [`App::submit`] hands it to the [`Executor`], which validates it,
//!    merges default headers, sends it and parses the body
//! 3. On success the response becomes current and a [`HistoryEntry`] is
//!    prepended and persisted; on failure a shaped multi-line error message
//!    is kept for display and history is untouched
//!
//! # Example
//!
//! ```no_run
//! use webpost::clipboard::SystemClipboard;
//! use webpost::executor::{ExecutionConfig, Executor};
//! use webpost::history::{FileStore, HistoryStore};
//! use webpost::models::{HttpMethod, RequestSpec};
//! use webpost::notification::Toaster;
//! use webpost::App;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let executor = Executor::with_reqwest(&ExecutionConfig::default())?;
//! let history = HistoryStore::load(Box::new(FileStore::in_data_dir()?));
//! let mut app = App::new(executor, history, Box::new(SystemClipboard), Toaster::default());
//!
//! let spec = RequestSpec::new(HttpMethod::GET, "https://httpbin.org/get");
//! if app.submit(spec).await.is_err() {
//!     eprintln!("{}", app.error().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

pub mod clipboard;
pub mod collection;
pub mod config;
pub mod coordinator;
pub mod executor;
pub mod formatter;
pub mod history;
pub mod models;
pub mod notification;

pub use coordinator::{App, ImportOutcome};
pub use executor::{Executor, ExecutorError};
pub use history::HistoryEntry;
pub use models::{HttpMethod, RequestForm, RequestSpec, ResponseResult};
