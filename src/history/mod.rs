//! Request history tracking and persistence.
//!
//! This module keeps the newest-first log of executed requests and their
//! responses, persisted as a single JSON record so it survives restarts.
//!
//! # Example
//!
//! ```no_run
//! use webpost::history::{FileStore, HistoryStore};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let history = HistoryStore::load(Box::new(FileStore::in_data_dir()?));
//! for entry in history.entries() {
//!     println!("{} {}", entry.method, entry.url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod models;
pub mod storage;
pub mod ui;

pub use models::{HistoryEntry, HistoryError};
pub use storage::{FileStore, HistoryStore, KeyValueStore, MemoryStore, HISTORY_STORAGE_KEY};
pub use ui::{
    format_history_entry, format_history_entry_relative, format_history_list, format_timestamp,
};
