//! Input panels, the app catalog and the status line.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_FOCUS, COLOR_INFO, COLOR_TAG,
};
use crate::app::{DraftInput, Focus};
use crate::catalog::APPS;
use crate::controller::{FeedSnapshot, ReplyDraft};

fn input_block(title: String, focused: bool) -> Block<'static> {
    let color = if focused { COLOR_FOCUS } else { COLOR_BORDER };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

/// Lines of `input`, with a block cursor when focused.
fn input_lines(input: &DraftInput, focused: bool, placeholder: &str) -> Vec<Line<'static>> {
    if input.is_empty() && !focused {
        return vec![Line::from(Span::styled(
            placeholder.to_string(),
            Style::default().fg(COLOR_DIM),
        ))];
    }
    let (cursor_row, cursor_col) = input.cursor();
    input
        .lines()
        .iter()
        .enumerate()
        .map(|(row, line)| {
            if !focused || row != cursor_row {
                return Line::from(line.clone());
            }
            let before: String = line.chars().take(cursor_col).collect();
            let at = line.chars().nth(cursor_col).unwrap_or(' ');
            let after: String = line.chars().skip(cursor_col + 1).collect();
            Line::from(vec![
                Span::raw(before),
                Span::styled(at.to_string(), Style::default().add_modifier(Modifier::REVERSED)),
                Span::raw(after),
            ])
        })
        .collect()
}

/// Scroll offset that keeps the cursor row inside a box of `area`.
fn scroll_to_cursor(input: &DraftInput, area: Rect) -> (u16, u16) {
    let visible = area.height.saturating_sub(2).max(1) as usize;
    let row = input.cursor().0;
    (row.saturating_sub(visible - 1) as u16, 0)
}

fn render_input(
    frame: &mut Frame,
    area: Rect,
    input: &DraftInput,
    block: Block<'static>,
    focused: bool,
    placeholder: &str,
) {
    let paragraph = Paragraph::new(input_lines(input, focused, placeholder))
        .block(block)
        .scroll(scroll_to_cursor(input, area));
    frame.render_widget(paragraph, area);
}

pub fn render_search_bar(frame: &mut Frame, area: Rect, query: &DraftInput, focused: bool) {
    let block = input_block(" Search ".to_string(), focused);
    render_input(frame, area, query, block, focused, "Press / to search");
}

pub fn render_composer(
    frame: &mut Frame,
    area: Rect,
    input: &DraftInput,
    snapshot: &FeedSnapshot,
    focused: bool,
) {
    let title = if snapshot.pending.posts > 0 {
        " New post (sending...) ".to_string()
    } else {
        " New post ".to_string()
    };
    let block = input_block(title, focused);
    render_input(frame, area, input, block, focused, "Press n to write a post");
}

pub fn render_reply(
    frame: &mut Frame,
    area: Rect,
    draft: &ReplyDraft,
    input: &DraftInput,
    sending: bool,
    focused: bool,
) {
    let mut title = format!(" Replying to @{} ", draft.target_handle);
    if sending {
        title.push_str("(sending...) ");
    }
    let block = input_block(title, focused);
    render_input(frame, area, input, block, focused, "Write a reply");
}

pub fn render_apps(frame: &mut Frame, area: Rect, selected: usize, focused: bool) {
    let items: Vec<ListItem> = APPS
        .iter()
        .map(|app| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        app.tag,
                        Style::default().fg(COLOR_TAG).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                    Span::styled(app.description, Style::default().fg(COLOR_ACCENT)),
                ]),
                Line::from(Span::styled(
                    format!("  Contract: {}", app.contract),
                    Style::default().fg(COLOR_DIM),
                )),
                Line::from(Span::styled(
                    format!("  Example: {}", app.example),
                    Style::default().fg(COLOR_DIM),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(input_block(" Apps (Enter: use, y: copy example) ".to_string(), focused))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if focused {
        state.select(Some(selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn key_hints(focus: Focus) -> &'static str {
    match focus {
        Focus::Feed => "j/k move  Enter reply  i image  n post  / search  a apps  r refresh  Esc back  q quit",
        Focus::Composer => "Enter send  Alt+Enter new line  Ctrl+L clear  Esc cancel",
        Focus::Search => "Enter search (empty clears)  Esc cancel",
        Focus::Reply => "Enter send reply  Alt+Enter new line  Esc close",
        Focus::Apps => "j/k move  Enter use  y copy example  Esc back",
    }
}

pub fn render_status(frame: &mut Frame, area: Rect, snapshot: &FeedSnapshot, focus: Focus) {
    let line = match &snapshot.status {
        Some(status) => {
            let color = if status.is_error { COLOR_ERROR } else { COLOR_INFO };
            Line::from(Span::styled(status.text.clone(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(key_hints(focus), Style::default().fg(COLOR_DIM))),
    };
    frame.render_widget(Paragraph::new(line), area);
}
