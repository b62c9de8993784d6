//! Remote feed gateway trait abstraction.
//!
//! Provides a trait-based abstraction over the social service so the
//! controller can be driven by the production XRPC client or by a scripted
//! mock in tests.

use async_trait::async_trait;

use crate::models::{RawPost, RawSearchResults};

/// Gateway operation errors.
///
/// Every gateway call is independently fallible; none of these are fatal to
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Connection could not be established
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// Service returned a non-success status
    ServerError { status: u16, message: String },
    /// Response body could not be understood
    InvalidResponse(String),
    /// No usable session (missing or rejected credentials)
    NotAuthenticated(String),
    /// Other error
    Other(String),
}

impl GatewayError {
    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            GatewayError::ConnectionFailed(_) => "E_GW_CONN",
            GatewayError::Timeout(_) => "E_GW_TIMEOUT",
            GatewayError::ServerError { .. } => "E_GW_HTTP",
            GatewayError::InvalidResponse(_) => "E_GW_INVALID",
            GatewayError::NotAuthenticated(_) => "E_GW_AUTH",
            GatewayError::Other(_) => "E_GW_OTHER",
        }
    }

    /// Whether the service rejected our session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            GatewayError::NotAuthenticated(_) | GatewayError::ServerError { status: 401, .. }
        )
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            GatewayError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            GatewayError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            GatewayError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            GatewayError::NotAuthenticated(msg) => write!(f, "Not authenticated: {}", msg),
            GatewayError::Other(msg) => write!(f, "Gateway error: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

/// The four operations the timeline controller needs from the service.
///
/// No call is atomic with another and no ordering is guaranteed between two
/// calls issued close together.
///
/// # Example
///
/// ```ignore
/// use feedline::traits::FeedGateway;
///
/// async fn newest_uri<G: FeedGateway>(gateway: &G) -> Option<String> {
///     let posts = gateway.fetch_timeline().await.ok()?;
///     posts.first().map(|p| p.uri.clone())
/// }
/// ```
#[async_trait]
pub trait FeedGateway: Send + Sync {
    /// Fetch the home timeline, newest first as the service orders it.
    async fn fetch_timeline(&self) -> Result<Vec<RawPost>, GatewayError>;

    /// Publish a new top-level post.
    async fn create_post(&self, text: &str) -> Result<(), GatewayError>;

    /// Publish a reply to the post identified by `target_uri`.
    async fn create_reply(&self, text: &str, target_uri: &str) -> Result<(), GatewayError>;

    /// Search actors and posts matching `query`.
    async fn search(&self, query: &str) -> Result<RawSearchResults, GatewayError>;
}
