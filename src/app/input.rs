//! Text entry backed by tui-textarea.
//!
//! [`DraftInput`] wraps a [`TextArea`] so the composer, reply box and search
//! bar share cursor movement, word deletion and undo. The controller still
//! owns the draft text; [`App`](super::App) copies edits into it.

use crossterm::event::KeyEvent;
use tui_textarea::{CursorMove, TextArea};

/// Editable text buffer with a cursor.
#[derive(Debug, Clone, Default)]
pub struct DraftInput {
    textarea: TextArea<'static>,
}

impl DraftInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input holding `text`, with the cursor at the end.
    pub fn with_text(text: &str) -> Self {
        let mut input = Self::new();
        input.set_text(text);
        input
    }

    /// The full text, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn lines(&self) -> &[String] {
        self.textarea.lines()
    }

    /// Cursor position as (row, column), counted in characters.
    pub fn cursor(&self) -> (usize, usize) {
        self.textarea.cursor()
    }

    pub fn is_empty(&self) -> bool {
        self.textarea.is_empty()
    }

    /// Replace the contents and move the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        let lines: Vec<String> = text.split('\n').map(String::from).collect();
        self.textarea = TextArea::new(lines);
        self.textarea.move_cursor(CursorMove::Bottom);
        self.textarea.move_cursor(CursorMove::End);
    }

    pub fn clear(&mut self) {
        self.textarea = TextArea::default();
    }

    pub fn insert_newline(&mut self) {
        self.textarea.insert_newline();
    }

    /// Apply an editing key. Returns true if the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        self.textarea.input(key)
    }
}
