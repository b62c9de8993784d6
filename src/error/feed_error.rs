//! Unified error type for feedline.

use std::fmt;

use super::category::ErrorCategory;
use crate::traits::GatewayError;

/// Unified error type.
///
/// Blank user input is deliberately absent: it is reported as an ignored
/// submission, not as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// Any gateway call failure.
    NetworkOrServer(GatewayError),

    /// Clipboard could not be written.
    ClipboardUnavailable(String),
}

impl FeedError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FeedError::NetworkOrServer(err) => match err {
                GatewayError::ConnectionFailed(_) | GatewayError::Timeout(_) => {
                    ErrorCategory::Network
                }
                GatewayError::NotAuthenticated(_) => ErrorCategory::Auth,
                GatewayError::ServerError { status: 401, .. } => ErrorCategory::Auth,
                GatewayError::ServerError { .. }
                | GatewayError::InvalidResponse(_)
                | GatewayError::Other(_) => ErrorCategory::Server,
            },
            FeedError::ClipboardUnavailable(_) => ErrorCategory::System,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            FeedError::NetworkOrServer(err) => err.error_code(),
            FeedError::ClipboardUnavailable(_) => "E_CLIPBOARD",
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            FeedError::NetworkOrServer(_) => {
                format!("Request failed. {}.", self.category().recovery_hint())
            }
            FeedError::ClipboardUnavailable(_) => {
                "Failed to copy - please copy manually".to_string()
            }
        }
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::NetworkOrServer(err) => write!(f, "{}", err),
            FeedError::ClipboardUnavailable(msg) => write!(f, "Clipboard unavailable: {}", msg),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::NetworkOrServer(err) => Some(err),
            FeedError::ClipboardUnavailable(_) => None,
        }
    }
}

impl From<GatewayError> for FeedError {
    fn from(err: GatewayError) -> Self {
        FeedError::NetworkOrServer(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_converts() {
        let err: FeedError = GatewayError::Timeout("30s".to_string()).into();
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.error_code(), "E_GW_TIMEOUT");
        assert!(err.user_message().contains("internet"));
    }

    #[test]
    fn test_auth_category() {
        let err = FeedError::NetworkOrServer(GatewayError::ServerError {
            status: 401,
            message: "AuthRequired".to_string(),
        });
        assert_eq!(err.category(), ErrorCategory::Auth);
    }

    #[test]
    fn test_clipboard_error_message() {
        let err = FeedError::ClipboardUnavailable("no display".to_string());
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.user_message(), "Failed to copy - please copy manually");
        assert_eq!(err.to_string(), "Clipboard unavailable: no display");
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;
        let err = FeedError::from(GatewayError::Other("boom".to_string()));
        assert!(err.source().is_some());
        assert!(FeedError::ClipboardUnavailable(String::new()).source().is_none());
    }
}
