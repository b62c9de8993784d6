//! Terminal rendering.
//!
//! Presentation only: everything drawn comes from the controller snapshot
//! and the App's visual state. Layout, top to bottom:
//! - Search bar
//! - Posts (with the app catalog alongside when it has focus)
//! - Reply box when a reply is open, otherwise the composer
//! - Status line or key hints

mod feed;
mod panels;
mod theme;

pub use feed::format_age;
pub use theme::{COLOR_ERROR, COLOR_INFO};

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, Focus};

/// Draw the whole screen.
pub fn render(frame: &mut Frame, app: &App) {
    let snapshot = app.snapshot();

    let input_height = if app.focus == Focus::Composer || app.focus == Focus::Reply {
        6
    } else {
        3
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(input_height),
            Constraint::Length(1),
        ])
        .split(frame.area());

    panels::render_search_bar(frame, rows[0], &app.search_input, app.focus == Focus::Search);

    if app.focus == Focus::Apps {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);
        feed::render_posts(frame, columns[0], &snapshot, app.selected);
        panels::render_apps(frame, columns[1], app.app_selected, true);
    } else {
        feed::render_posts(frame, rows[1], &snapshot, app.selected);
    }

    match &snapshot.reply {
        Some(draft) => panels::render_reply(
            frame,
            rows[2],
            draft,
            &app.reply_input,
            snapshot.pending.replies > 0,
            app.focus == Focus::Reply,
        ),
        None => panels::render_composer(
            frame,
            rows[2],
            &app.composer_input,
            &snapshot,
            app.focus == Focus::Composer,
        ),
    }

    panels::render_status(frame, rows[3], &snapshot, app.focus);
}
