//! Error category classification for unified error handling.

use std::fmt;

/// High-level categorization of errors for handling decisions.
///
/// Nothing is retried automatically; the category only shapes the hint the
/// user sees next to an inline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout.
    Network,

    /// Missing or rejected credentials.
    Auth,

    /// Service-side failures (HTTP 5xx, malformed responses).
    Server,

    /// Local platform capability unavailable (clipboard).
    System,
}

impl ErrorCategory {
    /// Short label suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::System => "system",
        }
    }

    /// Suggested user action for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Auth => "Check FEEDLINE_HANDLE and FEEDLINE_APP_PASSWORD",
            ErrorCategory::Server => "The service may be having issues. Please try again later",
            ErrorCategory::System => "Copy the text manually instead",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
