//! Write-only access to the system clipboard.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Clipboard error: {0}")]
pub struct ClipboardError(pub String);

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard, opened on each write.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| ClipboardError(format!("Failed to access clipboard: {}", e)))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError(format!("Failed to copy to clipboard: {}", e)))
    }
}

/// Keeps the last written text in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_keeps_last_write() {
        let mut clipboard = MemoryClipboard::default();
        clipboard.set_text("first").unwrap();
        clipboard.set_text("second").unwrap();
        assert_eq!(clipboard.contents.as_deref(), Some("second"));
    }

    #[test]
    fn test_error_display() {
        let err = ClipboardError("no display".to_string());
        assert_eq!(err.to_string(), "Clipboard error: no display");
    }
}
