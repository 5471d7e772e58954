//! Shared helpers for the integration tests.

pub mod executor_test;
pub mod workflow_test;

use std::path::Path;
use std::sync::Once;
use webpost::clipboard::MemoryClipboard;
use webpost::executor::{ExecutionConfig, Executor};
use webpost::history::{FileStore, HistoryStore};
use webpost::notification::Toaster;
use webpost::App;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Executor over a real reqwest client with a short timeout.
pub fn test_executor() -> Executor {
    init_test_env();
    Executor::with_reqwest(&ExecutionConfig::new(5_000)).expect("client should build")
}

/// App whose history lives in `dir`.
pub fn app_in(dir: &Path) -> App {
    App::new(
        test_executor(),
        HistoryStore::load(Box::new(FileStore::new(dir))),
        Box::new(MemoryClipboard::default()),
        Toaster::default(),
    )
}
