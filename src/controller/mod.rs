//! Timeline synchronization and interaction control.
//!
//! - [`FeedController`]: owns the view state and applies gateway responses
//! - [`PollingScheduler`]: sends periodic refresh ticks
//! - [`FeedSnapshot`]: the read-only view handed to presentation

mod machine;
mod messages;
mod scheduler;
mod state;

pub use machine::FeedController;
pub use messages::FeedMessage;
pub use scheduler::{PollingScheduler, DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL};
pub use state::{
    ComposerDraft, FeedSnapshot, IgnoredReason, Operation, PendingRequests, ReplyDraft,
    SearchView, StatusMessage, Submission, ViewMode,
};
