//! Interactive application state.
//!
//! [`App`] translates key presses into controller operations and keeps the
//! purely visual state (focus, selection, text cursors) the controller does
//! not own.

mod input;
mod types;

pub use input::DraftInput;
pub use types::Focus;

use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::{self, HashtagApp};
use crate::clipboard::{copy_with_status, SystemClipboard};
use crate::controller::{
    FeedController, FeedMessage, FeedSnapshot, Operation, StatusMessage, ViewMode,
};
use crate::models::Post;
use crate::traits::ClipboardBackend;

type Opener = Box<dyn FnMut(&str) -> io::Result<()> + Send>;

/// Terminal application wrapping a [`FeedController`].
pub struct App {
    pub controller: FeedController,
    pub focus: Focus,
    /// Index into the displayed posts
    pub selected: usize,
    /// Index into the app catalog
    pub app_selected: usize,
    /// Query being typed in the search bar
    pub search_input: DraftInput,
    /// Editing buffer mirrored into the controller's composer draft
    pub composer_input: DraftInput,
    /// Editing buffer mirrored into the open reply draft
    pub reply_input: DraftInput,
    pub should_quit: bool,
    /// Set whenever something visible changed since the last draw
    pub needs_redraw: bool,
    clipboard: Box<dyn ClipboardBackend + Send>,
    opener: Opener,
}

impl App {
    pub fn new(controller: FeedController) -> Self {
        let composer_input = DraftInput::with_text(&controller.snapshot().composer.text);
        Self {
            controller,
            focus: Focus::Feed,
            selected: 0,
            app_selected: 0,
            search_input: DraftInput::new(),
            composer_input,
            reply_input: DraftInput::new(),
            should_quit: false,
            needs_redraw: true,
            clipboard: Box::new(SystemClipboard),
            opener: Box::new(|url| open::that_detached(url)),
        }
    }

    /// Replace the clipboard backend.
    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardBackend + Send>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Replace how image URLs are opened.
    pub fn with_opener<F>(mut self, opener: F) -> Self
    where
        F: FnMut(&str) -> io::Result<()> + Send + 'static,
    {
        self.opener = Box::new(opener);
        self
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.controller.snapshot()
    }

    pub fn selected_post(&self) -> Option<Post> {
        self.snapshot().posts.get(self.selected).cloned()
    }

    pub fn selected_app(&self) -> Option<&'static HashtagApp> {
        catalog::APPS.get(self.app_selected)
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
        self.controller.teardown();
    }

    /// Apply a controller message and keep the selection in range.
    pub fn handle_message(&mut self, message: FeedMessage) {
        self.controller.handle_message(message);
        self.sync_inputs();
        self.clamp_selection();
        self.mark_dirty();
    }

    /// Reload the editing buffers from drafts the controller changed on its
    /// own (a post landing, a reply closing).
    fn sync_inputs(&mut self) {
        let snapshot = self.snapshot();
        if snapshot.composer.text != self.composer_input.text() {
            self.composer_input.set_text(&snapshot.composer.text);
        }
        match snapshot.reply {
            Some(draft) if draft.text != self.reply_input.text() => {
                self.reply_input.set_text(&draft.text)
            }
            Some(_) => {}
            None if !self.reply_input.is_empty() => self.reply_input.clear(),
            None => {}
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.snapshot().posts.len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match self.focus {
            Focus::Feed => self.handle_feed_key(key),
            Focus::Apps => self.handle_apps_key(key),
            Focus::Composer | Focus::Search | Focus::Reply => self.handle_text_key(key),
        }
        self.sync_inputs();
        self.clamp_selection();
    }

    fn handle_feed_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.snapshot().posts.len();
                if self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('r') => {
                self.controller.refresh();
            }
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Char('n') | KeyCode::Char('c') => self.focus = Focus::Composer,
            KeyCode::Char('a') => self.focus = Focus::Apps,
            KeyCode::Enter | KeyCode::Char('R') => {
                if let Some(post) = self.selected_post() {
                    self.controller.open_reply(&post);
                    self.focus = Focus::Reply;
                }
            }
            KeyCode::Char('i') => self.open_selected_image(),
            KeyCode::Esc => {
                if self.controller.mode() == ViewMode::Search {
                    self.search_input.clear();
                    self.selected = 0;
                    self.controller.clear_search();
                } else {
                    self.controller.dismiss_status();
                }
            }
            _ => {}
        }
    }

    fn handle_apps_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.focus = Focus::Feed,
            KeyCode::Down | KeyCode::Char('j') => {
                if self.app_selected + 1 < catalog::APPS.len() {
                    self.app_selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.app_selected = self.app_selected.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(app) = self.selected_app() {
                    self.controller.set_composer_text(app.compose_seed());
                    self.focus = Focus::Composer;
                }
            }
            KeyCode::Char('y') => {
                if let Some(app) = self.selected_app() {
                    self.copy_to_clipboard(app.example);
                }
            }
            _ => {}
        }
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let modified = key
            .modifiers
            .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT | KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.leave_text_entry(),
            KeyCode::Enter if modified => self.insert_newline(),
            KeyCode::Enter => self.submit_text(),
            KeyCode::Char('l') if self.focus == Focus::Composer && ctrl => {
                self.composer_input.clear();
                self.controller.clear_composer();
            }
            _ => self.edit_text(key),
        }
    }

    /// Shift, Alt or Ctrl with Enter starts a new line in the composer and
    /// reply box. Search stays on one line.
    fn insert_newline(&mut self) {
        match self.focus {
            Focus::Composer => {
                self.composer_input.insert_newline();
                self.controller.set_composer_text(self.composer_input.text());
            }
            Focus::Reply => {
                self.reply_input.insert_newline();
                self.controller.set_reply_text(self.reply_input.text());
            }
            Focus::Search | Focus::Feed | Focus::Apps => {}
        }
    }

    fn edit_text(&mut self, key: KeyEvent) {
        match self.focus {
            Focus::Search => {
                self.search_input.input(key);
            }
            Focus::Composer => {
                if self.composer_input.input(key) {
                    self.controller.set_composer_text(self.composer_input.text());
                }
            }
            Focus::Reply => {
                if self.reply_input.input(key) {
                    self.controller.set_reply_text(self.reply_input.text());
                }
            }
            Focus::Feed | Focus::Apps => {}
        }
    }

    fn leave_text_entry(&mut self) {
        if self.focus == Focus::Reply {
            self.controller.close_reply();
        }
        self.focus = Focus::Feed;
    }

    fn submit_text(&mut self) {
        let snapshot = self.snapshot();
        match self.focus {
            Focus::Search => {
                let query = self.search_input.lines().join(" ");
                self.selected = 0;
                self.controller.submit_search(&query);
                self.focus = Focus::Feed;
            }
            Focus::Composer => {
                if self.controller.submit_post(&snapshot.composer.text).is_submitted() {
                    self.focus = Focus::Feed;
                }
            }
            Focus::Reply => {
                let text = snapshot.reply.map(|draft| draft.text).unwrap_or_default();
                if self.controller.submit_reply(&text).is_submitted() {
                    self.focus = Focus::Feed;
                }
            }
            Focus::Feed | Focus::Apps => {}
        }
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        let status = copy_with_status(self.clipboard.as_mut(), text);
        self.controller.set_status(status);
    }

    /// Open the first image of the selected post at full size.
    fn open_selected_image(&mut self) {
        let Some(image) = self.selected_post().and_then(|post| post.images.first().cloned())
        else {
            return;
        };
        if image.fullsize_url.is_empty() {
            return;
        }
        if let Err(e) = (self.opener)(&image.fullsize_url) {
            tracing::warn!("Failed to open image {}: {}", image.fullsize_url, e);
            self.controller.set_status(StatusMessage::error(
                Operation::OpenImage,
                format!("Could not open image: {}", image.fullsize_url),
            ));
        }
    }
}
