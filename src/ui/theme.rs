//! Color theme constants.

use ratatui::style::Color;

/// Primary border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Border of the focused panel
pub const COLOR_FOCUS: Color = Color::White;

/// Author names and selected rows
pub const COLOR_ACCENT: Color = Color::White;

/// Handles, timestamps and counters
pub const COLOR_DIM: Color = Color::DarkGray;

/// Hashtags and app tags
pub const COLOR_TAG: Color = Color::LightCyan;

/// Informational status line
pub const COLOR_INFO: Color = Color::LightGreen;

/// Error status line
pub const COLOR_ERROR: Color = Color::Red;

/// Background of the selected post
pub const COLOR_SELECTED_BG: Color = Color::Rgb(30, 30, 40);
