//! Post list and search result rendering.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_SELECTED_BG, COLOR_TAG};
use crate::controller::{FeedSnapshot, ViewMode};
use crate::models::{Actor, Post};

/// Compact age of a post relative to `now` ("45s", "12m", "3h", "2d").
///
/// Future timestamps (clock skew) read as "now".
pub fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - created_at).num_seconds();
    match secs {
        s if s < 5 => "now".to_string(),
        s if s < 60 => format!("{}s", s),
        s if s < 3_600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3_600),
        s if s < 86_400 * 30 => format!("{}d", s / 86_400),
        _ => created_at.format("%Y-%m-%d").to_string(),
    }
}

fn post_header(post: &Post, now: DateTime<Utc>) -> Line<'static> {
    let mut spans = vec![Span::styled(
        post.author_label(),
        Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
    )];
    if post.author_display_name.is_some() {
        spans.push(Span::styled(
            format!(" @{}", post.author_handle),
            Style::default().fg(COLOR_DIM),
        ));
    }
    if let Some(created_at) = post.created_at {
        spans.push(Span::styled(
            format!(" · {}", format_age(created_at, now)),
            Style::default().fg(COLOR_DIM),
        ));
    }
    Line::from(spans)
}

fn text_line(line: &str) -> Line<'static> {
    let spans: Vec<Span<'static>> = line
        .split_inclusive(' ')
        .map(|word| {
            if word.starts_with('#') || word.starts_with('@') {
                Span::styled(word.to_string(), Style::default().fg(COLOR_TAG))
            } else {
                Span::raw(word.to_string())
            }
        })
        .collect();
    Line::from(spans)
}

fn post_item(post: &Post, replying: bool, now: DateTime<Utc>) -> ListItem<'static> {
    let mut lines = vec![post_header(post, now)];
    lines.extend(post.text.lines().map(text_line));
    for image in &post.images {
        lines.push(Line::from(Span::styled(
            format!("[image: {}]", image.alt_label()),
            Style::default().fg(COLOR_DIM),
        )));
    }
    let mut counters = format!(
        "replies {}  reposts {}  likes {}",
        post.reply_count, post.repost_count, post.like_count
    );
    if replying {
        counters.push_str("  (replying)");
    }
    lines.push(Line::from(Span::styled(counters, Style::default().fg(COLOR_DIM))));
    lines.push(Line::default());
    ListItem::new(lines)
}

fn actor_line(actor: &Actor) -> Line<'static> {
    let mut spans = vec![Span::styled(actor.label(), Style::default().fg(COLOR_ACCENT))];
    if actor.display_name.is_some() {
        spans.push(Span::styled(
            format!(" @{}", actor.handle),
            Style::default().fg(COLOR_DIM),
        ));
    }
    Line::from(spans)
}

fn title(snapshot: &FeedSnapshot) -> String {
    match (&snapshot.mode, &snapshot.search_query) {
        (ViewMode::Search, Some(query)) => format!(" Search: {} ", query),
        (ViewMode::Search, None) => " Search ".to_string(),
        (ViewMode::Feed, _) => " Timeline ".to_string(),
    }
}

/// Render the displayed posts, with matching actors above them in Search
/// mode.
pub fn render_posts(frame: &mut Frame, area: Rect, snapshot: &FeedSnapshot, selected: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(title(snapshot));

    if snapshot.posts.is_empty() {
        let message = if snapshot.loading {
            "Loading..."
        } else if snapshot.is_empty_search() {
            "No posts found"
        } else {
            "Nothing here yet"
        };
        let mut lines: Vec<Line> = snapshot.actors.iter().map(actor_line).collect();
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(message, Style::default().fg(COLOR_DIM))));
        frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
        return;
    }

    let now = Utc::now();
    let mut items: Vec<ListItem> = Vec::new();
    if !snapshot.actors.is_empty() {
        let mut lines: Vec<Line> = snapshot.actors.iter().map(actor_line).collect();
        lines.push(Line::default());
        items.push(ListItem::new(lines));
    }
    let offset = items.len();
    items.extend(
        snapshot
            .posts
            .iter()
            .map(|post| post_item(post, snapshot.is_replying_to(&post.uri), now)),
    );

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(COLOR_SELECTED_BG));
    let mut state = ListState::default();
    state.select(Some(selected + offset));
    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_age_buckets() {
        let now = Utc::now();
        assert_eq!(format_age(now, now), "now");
        assert_eq!(format_age(now - Duration::seconds(42), now), "42s");
        assert_eq!(format_age(now - Duration::minutes(12), now), "12m");
        assert_eq!(format_age(now - Duration::hours(3), now), "3h");
        assert_eq!(format_age(now - Duration::days(2), now), "2d");
    }

    #[test]
    fn test_format_age_future_is_now() {
        let now = Utc::now();
        assert_eq!(format_age(now + Duration::minutes(5), now), "now");
    }

    #[test]
    fn test_text_line_highlights_tags() {
        let line = text_line("#pay $5 @bob");
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[0].style.fg, Some(COLOR_TAG));
        assert_eq!(line.spans[1].style.fg, None);
        assert_eq!(line.spans[2].style.fg, Some(COLOR_TAG));
    }
}
