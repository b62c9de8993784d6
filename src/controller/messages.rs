//! FeedMessage enum for async communication with the controller.

use crate::models::{Post, SearchResult};
use crate::traits::GatewayError;

/// Messages delivered to the controller from the poller and from spawned
/// gateway requests.
///
/// Timeline and search responses carry the sequence number they were issued
/// with so the controller can drop any that arrive after the view has moved
/// on.
#[derive(Debug, Clone)]
pub enum FeedMessage {
    /// Scheduled refresh tick
    PollTick,
    /// Timeline fetch finished
    TimelineLoaded {
        seq: u64,
        result: Result<Vec<Post>, GatewayError>,
    },
    /// Search finished
    SearchCompleted {
        seq: u64,
        query: String,
        result: Result<SearchResult, GatewayError>,
    },
    /// New post request finished
    PostCreated {
        text: String,
        result: Result<(), GatewayError>,
    },
    /// Reply request finished
    ReplyCreated {
        target_uri: String,
        text: String,
        result: Result<(), GatewayError>,
    },
}

impl FeedMessage {
    /// Whether this message answers a request the controller issued.
    pub fn is_response(&self) -> bool {
        !matches!(self, FeedMessage::PollTick)
    }
}
