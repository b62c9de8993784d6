//! Best-effort clipboard copy.
//!
//! Copy failures are never fatal: the caller gets a status message either
//! way and the user can fall back to copying by hand.

use arboard::Clipboard;

use crate::controller::{Operation, StatusMessage};
use crate::error::{FeedError, FeedResult};
use crate::traits::ClipboardBackend;

/// The OS clipboard via arboard. A handle is opened per copy.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardBackend for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        let mut clipboard = Clipboard::new().map_err(|e| e.to_string())?;
        clipboard.set_text(text).map_err(|e| e.to_string())
    }
}

/// Write `text` to `backend`.
pub fn copy_text(backend: &mut dyn ClipboardBackend, text: &str) -> FeedResult<()> {
    backend.set_text(text).map_err(FeedError::ClipboardUnavailable)
}

/// Copy `text` and describe the outcome as a status message.
pub fn copy_with_status(backend: &mut dyn ClipboardBackend, text: &str) -> StatusMessage {
    match copy_text(backend, text) {
        Ok(()) => StatusMessage::info(Operation::Clipboard, format!("Copied: {}", text)),
        Err(err) => {
            tracing::warn!("Clipboard copy failed [{}]: {}", err.error_code(), err);
            StatusMessage::error(Operation::Clipboard, err.user_message())
        }
    }
}
