//! Clipboard backend trait abstraction.

/// Something text can be written to.
///
/// The production implementation wraps the OS clipboard; tests substitute a
/// recording or failing backend.
pub trait ClipboardBackend {
    /// Replace the clipboard contents with `text`.
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}
