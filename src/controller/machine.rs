//! The timeline interaction state machine.
//!
//! [`FeedController`] owns the view state, issues gateway requests on
//! spawned tasks and applies their responses when they come back over the
//! message channel. Presentation reads [`FeedSnapshot`] values, either by
//! polling [`FeedController::snapshot`] or through a watch receiver.
//!
//! Responses are guarded against staleness in two ways:
//! - each timeline fetch carries a sequence number and is applied only if it
//!   is above the refresh watermark. A successful fetch raises the watermark
//!   to its own number; applied search results raise it past every fetch
//!   issued so far, since those were meant for the timeline view.
//! - each search carries its own sequence number and only the latest one
//!   submitted is applied. Clearing the search forgets it, so results that
//!   land afterwards are dropped.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use super::messages::FeedMessage;
use super::scheduler::PollingScheduler;
use super::state::{
    ComposerDraft, FeedSnapshot, FeedState, IgnoredReason, Operation, PendingRequests,
    ReplyDraft, SearchView, StatusMessage, Submission, ViewMode,
};
use crate::error::FeedError;
use crate::models::{Post, SearchResult};
use crate::render::{render_posts, render_search};
use crate::traits::{FeedGateway, GatewayError};

const REFRESH_FAILED: &str = "Failed to load posts";
const SEARCH_FAILED: &str = "Search failed";
const POST_FAILED: &str = "Failed to create post";
const REPLY_FAILED: &str = "Failed to send reply";

/// Timeline synchronization and interaction controller.
pub struct FeedController {
    gateway: Arc<dyn FeedGateway>,
    state: FeedState,
    pending: PendingRequests,
    message_tx: mpsc::UnboundedSender<FeedMessage>,
    message_rx: mpsc::UnboundedReceiver<FeedMessage>,
    snapshot_tx: watch::Sender<FeedSnapshot>,
    scheduler: Option<PollingScheduler>,
    /// Sequence number handed to the next timeline fetch
    next_refresh_seq: u64,
    /// Timeline fetches numbered at or below this are stale
    refresh_watermark: u64,
    next_search_seq: u64,
    /// Search whose results may still be applied (0 when none)
    latest_search_seq: u64,
    torn_down: bool,
}

impl FeedController {
    /// Create an unmounted controller in Feed mode with an empty timeline.
    pub fn new(gateway: Arc<dyn FeedGateway>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let state = FeedState {
            initial_load: true,
            ..Default::default()
        };
        let (snapshot_tx, _) =
            watch::channel(FeedSnapshot::from_state(&state, PendingRequests::default()));

        Self {
            gateway,
            state,
            pending: PendingRequests::default(),
            message_tx,
            message_rx,
            snapshot_tx,
            scheduler: None,
            next_refresh_seq: 1,
            refresh_watermark: 0,
            next_search_seq: 1,
            latest_search_seq: 0,
            torn_down: false,
        }
    }

    /// Seed the composer with startup text (e.g. from a launch URL).
    pub fn with_initial_draft(mut self, text: impl Into<String>) -> Self {
        self.state.composer.text = text.into();
        self.publish();
        self
    }

    /// Start the poll timer and issue the startup refresh.
    ///
    /// Must be called from within a tokio runtime. Mounting twice, or after
    /// teardown, does nothing.
    pub fn mount(&mut self, poll_interval: Duration) {
        if self.torn_down || self.scheduler.is_some() {
            return;
        }
        self.scheduler = Some(PollingScheduler::spawn(
            poll_interval,
            self.message_tx.clone(),
        ));
        self.refresh();
    }

    /// Stop the poll timer and stop applying responses.
    ///
    /// Requests still in flight may complete afterwards; their results are
    /// discarded.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let Some(mut scheduler) = self.scheduler.take() {
            scheduler.cancel();
        }
        tracing::info!(
            "Feed controller torn down ({} request(s) still in flight)",
            self.pending.total()
        );
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn is_polling(&self) -> bool {
        self.scheduler
            .as_ref()
            .map(PollingScheduler::is_running)
            .unwrap_or(false)
    }

    // ------------------------------------------------------------------
    // Snapshot access
    // ------------------------------------------------------------------

    /// Current view state.
    pub fn snapshot(&self) -> FeedSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Receiver that is notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn mode(&self) -> ViewMode {
        self.state.mode()
    }

    pub fn pending(&self) -> PendingRequests {
        self.pending
    }

    fn publish(&self) {
        self.snapshot_tx
            .send_replace(FeedSnapshot::from_state(&self.state, self.pending));
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Fetch the timeline. Overlapping refreshes are allowed; the newest
    /// request to resolve successfully determines the displayed timeline.
    ///
    /// Returns the sequence number of the issued request, or None after
    /// teardown.
    pub fn refresh(&mut self) -> Option<u64> {
        if self.torn_down {
            return None;
        }
        let seq = self.next_refresh_seq;
        self.next_refresh_seq += 1;
        self.pending.refreshes += 1;

        let gateway = Arc::clone(&self.gateway);
        self.spawn_request(async move {
            let result = gateway
                .fetch_timeline()
                .await
                .map(|raws| render_posts(&raws));
            FeedMessage::TimelineLoaded { seq, result }
        });
        tracing::debug!("Refresh #{} issued", seq);
        self.publish();
        Some(seq)
    }

    /// Search for `query`. A blank query clears the search instead.
    pub fn submit_search(&mut self, query: &str) -> Submission {
        if self.torn_down {
            return Submission::Ignored(IgnoredReason::TornDown);
        }
        let query = query.trim();
        if query.is_empty() {
            self.clear_search();
            return Submission::Ignored(IgnoredReason::EmptyInput);
        }

        let seq = self.next_search_seq;
        self.next_search_seq += 1;
        self.latest_search_seq = seq;
        self.pending.searches += 1;

        let gateway = Arc::clone(&self.gateway);
        let query = query.to_string();
        self.spawn_request(async move {
            let result = gateway.search(&query).await.map(|raw| render_search(&raw));
            FeedMessage::SearchCompleted { seq, query, result }
        });
        tracing::debug!("Search #{} issued", seq);
        self.publish();
        Submission::Submitted
    }

    /// Leave search mode and refresh the timeline.
    pub fn clear_search(&mut self) {
        if self.torn_down {
            return;
        }
        self.state.search = None;
        self.latest_search_seq = 0;
        self.refresh();
    }

    /// Open the reply composer on `post`, discarding any other open draft.
    pub fn open_reply(&mut self, post: &Post) {
        if let Some(previous) = &self.state.reply {
            if previous.target_post_uri != post.uri {
                tracing::debug!("Discarding reply draft for {}", previous.target_post_uri);
            }
        }
        self.state.reply = Some(ReplyDraft {
            target_post_uri: post.uri.clone(),
            target_handle: post.author_handle.clone(),
            text: String::new(),
        });
        self.publish();
    }

    /// Close the reply composer without sending.
    pub fn close_reply(&mut self) {
        if self.state.reply.take().is_some() {
            self.publish();
        }
    }

    /// Update the open reply draft's text. Does nothing when none is open.
    pub fn set_reply_text(&mut self, text: impl Into<String>) {
        if let Some(draft) = self.state.reply.as_mut() {
            draft.text = text.into();
            self.publish();
        }
    }

    /// Send `text` as a reply to the open draft's target.
    ///
    /// On failure the draft stays open with `text` so it can be resent.
    pub fn submit_reply(&mut self, text: &str) -> Submission {
        if self.torn_down {
            return Submission::Ignored(IgnoredReason::TornDown);
        }
        if text.trim().is_empty() {
            tracing::debug!("Ignoring blank reply");
            return Submission::Ignored(IgnoredReason::EmptyInput);
        }
        let Some(draft) = self.state.reply.as_mut() else {
            tracing::debug!("Ignoring reply with no open reply target");
            return Submission::Ignored(IgnoredReason::NoReplyTarget);
        };

        draft.text = text.to_string();
        let target_uri = draft.target_post_uri.clone();
        self.pending.replies += 1;

        let gateway = Arc::clone(&self.gateway);
        let text = text.to_string();
        self.spawn_request(async move {
            let result = gateway.create_reply(&text, &target_uri).await;
            FeedMessage::ReplyCreated {
                target_uri,
                text,
                result,
            }
        });
        self.publish();
        Submission::Submitted
    }

    /// Replace the composer text.
    pub fn set_composer_text(&mut self, text: impl Into<String>) {
        self.state.composer.text = text.into();
        self.publish();
    }

    pub fn clear_composer(&mut self) {
        self.state.composer = ComposerDraft::default();
        self.publish();
    }

    /// Publish `text` as a new top-level post.
    pub fn submit_post(&mut self, text: &str) -> Submission {
        if self.torn_down {
            return Submission::Ignored(IgnoredReason::TornDown);
        }
        if text.trim().is_empty() {
            tracing::debug!("Ignoring blank post");
            return Submission::Ignored(IgnoredReason::EmptyInput);
        }

        self.state.composer.text = text.to_string();
        self.pending.posts += 1;

        let gateway = Arc::clone(&self.gateway);
        let text = text.to_string();
        self.spawn_request(async move {
            let result = gateway.create_post(&text).await;
            FeedMessage::PostCreated { text, result }
        });
        self.publish();
        Submission::Submitted
    }

    /// Show an informational or error message (e.g. clipboard outcome).
    pub fn set_status(&mut self, status: StatusMessage) {
        self.state.status = Some(status);
        self.publish();
    }

    pub fn dismiss_status(&mut self) {
        if self.state.status.take().is_some() {
            self.publish();
        }
    }

    /// Handle a scheduled tick: refresh in Feed mode, skip in Search mode.
    pub fn on_poll_tick(&mut self) {
        if self.torn_down {
            return;
        }
        match self.state.mode() {
            ViewMode::Feed => {
                self.refresh();
            }
            ViewMode::Search => tracing::debug!("Skipping poll tick while searching"),
        }
    }

    // ------------------------------------------------------------------
    // Message handling
    // ------------------------------------------------------------------

    fn spawn_request<F>(&self, request: F)
    where
        F: Future<Output = FeedMessage> + Send + 'static,
    {
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let message = request.await;
            // The controller may be gone; the response is then simply dropped.
            let _ = message_tx.send(message);
        });
    }

    /// Wait for the next message from the poller or a finished request.
    pub async fn next_message(&mut self) -> Option<FeedMessage> {
        self.message_rx.recv().await
    }

    /// Receive and apply one message.
    pub async fn process_next(&mut self) -> bool {
        match self.message_rx.recv().await {
            Some(message) => {
                self.handle_message(message);
                true
            }
            None => false,
        }
    }

    /// Apply messages until no request is in flight.
    pub async fn settle(&mut self) {
        while self.pending.total() > 0 {
            if !self.process_next().await {
                break;
            }
        }
    }

    /// Apply one message to the state.
    pub fn handle_message(&mut self, message: FeedMessage) {
        self.account_response(&message);
        if self.torn_down {
            if message.is_response() {
                tracing::debug!("Discarding response after teardown");
            }
            return;
        }

        match message {
            FeedMessage::PollTick => self.on_poll_tick(),
            FeedMessage::TimelineLoaded { seq, result } => self.apply_timeline(seq, result),
            FeedMessage::SearchCompleted { seq, query, result } => {
                self.apply_search(seq, query, result)
            }
            FeedMessage::PostCreated { text, result } => self.apply_post(text, result),
            FeedMessage::ReplyCreated {
                target_uri,
                text,
                result,
            } => self.apply_reply(target_uri, text, result),
        }
        self.publish();
    }

    fn account_response(&mut self, message: &FeedMessage) {
        let counter = match message {
            FeedMessage::PollTick => return,
            FeedMessage::TimelineLoaded { .. } => &mut self.pending.refreshes,
            FeedMessage::SearchCompleted { .. } => &mut self.pending.searches,
            FeedMessage::PostCreated { .. } => &mut self.pending.posts,
            FeedMessage::ReplyCreated { .. } => &mut self.pending.replies,
        };
        *counter = counter.saturating_sub(1);
    }

    fn apply_timeline(&mut self, seq: u64, result: Result<Vec<Post>, GatewayError>) {
        self.state.initial_load = false;

        if seq <= self.refresh_watermark {
            tracing::debug!(
                "Discarding refresh #{} (watermark #{})",
                seq,
                self.refresh_watermark
            );
            return;
        }

        match result {
            Ok(posts) => {
                tracing::debug!("Refresh #{} applied ({} posts)", seq, posts.len());
                self.refresh_watermark = seq;
                self.state.timeline = posts;
                self.state.search = None;
                self.state.clear_status_from(Operation::Refresh);
            }
            Err(err) => {
                log_failure(&format!("Refresh #{}", seq), err);
                self.state.status = Some(StatusMessage::error(Operation::Refresh, REFRESH_FAILED));
            }
        }
    }

    fn apply_search(&mut self, seq: u64, query: String, result: Result<SearchResult, GatewayError>) {
        if seq != self.latest_search_seq {
            tracing::debug!("Discarding stale search #{} for {:?}", seq, query);
            return;
        }

        match result {
            Ok(results) => {
                tracing::debug!(
                    "Search {:?} applied ({} actors, {} posts)",
                    query,
                    results.actors.len(),
                    results.posts.len()
                );
                self.state.search = Some(SearchView { query, results });
                // Refreshes issued before the results landed belong to the timeline view.
                self.refresh_watermark = self.next_refresh_seq - 1;
                self.state.clear_status_from(Operation::Search);
            }
            Err(err) => {
                log_failure(&format!("Search {:?}", query), err);
                self.state.status = Some(StatusMessage::error(Operation::Search, SEARCH_FAILED));
            }
        }
    }

    fn apply_post(&mut self, text: String, result: Result<(), GatewayError>) {
        match result {
            Ok(()) => {
                tracing::info!("Post published ({} chars)", text.chars().count());
                if self.state.composer.text == text {
                    self.state.composer = ComposerDraft::default();
                }
                self.state.clear_status_from(Operation::Post);
                self.refresh();
            }
            Err(err) => {
                log_failure("Post", err);
                self.state.status = Some(StatusMessage::error(Operation::Post, POST_FAILED));
            }
        }
    }

    fn apply_reply(&mut self, target_uri: String, text: String, result: Result<(), GatewayError>) {
        match result {
            Ok(()) => {
                tracing::info!("Reply to {} published", target_uri);
                let same_target = self
                    .state
                    .reply
                    .as_ref()
                    .map(|draft| draft.target_post_uri == target_uri)
                    .unwrap_or(false);
                if same_target {
                    self.state.reply = None;
                }
                self.state.clear_status_from(Operation::Reply);
                self.refresh();
            }
            Err(err) => {
                log_failure(&format!("Reply to {}", target_uri), err);
                if let Some(draft) = self.state.reply.as_mut() {
                    if draft.target_post_uri == target_uri && draft.text.is_empty() {
                        draft.text = text;
                    }
                }
                self.state.status = Some(StatusMessage::error(Operation::Reply, REPLY_FAILED));
            }
        }
    }
}

fn log_failure(what: &str, err: GatewayError) {
    let err = FeedError::from(err);
    tracing::warn!(
        "{} failed [{} {}]: {}",
        what,
        err.category(),
        err.error_code(),
        err
    );
}

impl Drop for FeedController {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockFeedGateway;
    use crate::models::RawPost;
    use crate::render::render_post;

    fn raw(uri: &str) -> RawPost {
        RawPost::new(uri, "alice.test", format!("post {}", uri))
    }

    fn controller(gateway: &MockFeedGateway) -> FeedController {
        FeedController::new(Arc::new(gateway.clone()))
    }

    #[tokio::test]
    async fn test_new_controller_starts_in_feed_mode_loading() {
        let gateway = MockFeedGateway::new();
        let controller = controller(&gateway);
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.mode, ViewMode::Feed);
        assert!(snapshot.loading);
        assert!(snapshot.posts.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_applies_posts_and_stops_loading() {
        let gateway = MockFeedGateway::new();
        gateway.push_timeline(Ok(vec![raw("u1"), raw("u2")]));
        let mut controller = controller(&gateway);

        assert_eq!(controller.refresh(), Some(1));
        assert_eq!(controller.pending().refreshes, 1);
        controller.settle().await;

        let snapshot = controller.snapshot();
        assert!(!snapshot.loading);
        let uris: Vec<_> = snapshot.posts.iter().map(|p| p.uri.as_str()).collect();
        assert_eq!(uris, vec!["u1", "u2"]);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_posts() {
        let gateway = MockFeedGateway::new();
        gateway.push_timeline(Ok(vec![raw("u1")]));
        gateway.push_timeline(Err(GatewayError::Timeout("30s".to_string())));
        let mut controller = controller(&gateway);

        controller.refresh();
        controller.settle().await;
        controller.refresh();
        controller.settle().await;

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.posts.len(), 1);
        let status = snapshot.status.unwrap();
        assert!(status.is_error);
        assert_eq!(status.text, REFRESH_FAILED);
    }

    #[tokio::test]
    async fn test_successful_refresh_clears_refresh_error_only() {
        let gateway = MockFeedGateway::new();
        gateway.push_timeline(Err(GatewayError::Other("x".to_string())));
        gateway.push_timeline(Ok(vec![raw("u1")]));
        let mut controller = controller(&gateway);

        controller.refresh();
        controller.settle().await;
        assert!(controller.snapshot().status.is_some());
        controller.refresh();
        controller.settle().await;
        assert!(controller.snapshot().status.is_none());

        controller.set_status(StatusMessage::error(Operation::Post, POST_FAILED));
        gateway.push_timeline(Ok(vec![raw("u1")]));
        controller.refresh();
        controller.settle().await;
        assert_eq!(controller.snapshot().status.unwrap().origin, Operation::Post);
    }

    #[tokio::test]
    async fn test_older_refresh_landing_late_is_discarded() {
        let gateway = MockFeedGateway::new();
        let first = gateway.push_timeline_held(Ok(vec![raw("old")]));
        gateway.push_timeline(Ok(vec![raw("new")]));
        let mut controller = controller(&gateway);

        controller.refresh();
        controller.refresh();
        assert!(controller.process_next().await);
        assert_eq!(controller.snapshot().posts[0].uri, "new");

        first.release();
        controller.settle().await;
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.posts.len(), 1);
        assert_eq!(snapshot.posts[0].uri, "new");
    }

    #[tokio::test]
    async fn test_open_reply_replaces_previous_draft() {
        let gateway = MockFeedGateway::new();
        let mut controller = controller(&gateway);
        let a = render_post(&raw("a"));
        let b = render_post(&raw("b"));

        controller.open_reply(&a);
        controller.set_reply_text("draft for a");
        controller.open_reply(&b);

        let draft = controller.snapshot().reply.unwrap();
        assert_eq!(draft.target_post_uri, "b");
        assert_eq!(draft.text, "");
    }

    #[tokio::test]
    async fn test_close_reply_discards_draft() {
        let gateway = MockFeedGateway::new();
        let mut controller = controller(&gateway);
        controller.open_reply(&render_post(&raw("a")));
        controller.close_reply();
        assert!(controller.snapshot().reply.is_none());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_submit_reply_without_target_is_ignored() {
        let gateway = MockFeedGateway::new();
        let mut controller = controller(&gateway);
        assert_eq!(
            controller.submit_reply("hello"),
            Submission::Ignored(IgnoredReason::NoReplyTarget)
        );
        tokio::task::yield_now().await;
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_blank_post_is_ignored() {
        let gateway = MockFeedGateway::new();
        let mut controller = controller(&gateway);
        controller.set_composer_text("   ");
        assert_eq!(
            controller.submit_post("   "),
            Submission::Ignored(IgnoredReason::EmptyInput)
        );
        assert_eq!(controller.pending().total(), 0);
    }

    #[tokio::test]
    async fn test_post_success_clears_composer_and_refreshes() {
        let gateway = MockFeedGateway::new();
        gateway.push_timeline(Ok(vec![raw("mine")]));
        let mut controller = controller(&gateway).with_initial_draft("hello world");

        assert!(controller.submit_post("hello world").is_submitted());
        controller.settle().await;

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.composer.text, "");
        assert_eq!(snapshot.posts[0].uri, "mine");
        assert_eq!(gateway.timeline_calls(), 1);
    }

    #[tokio::test]
    async fn test_post_success_keeps_text_typed_while_sending() {
        let gateway = MockFeedGateway::new();
        let mut controller = controller(&gateway);

        controller.set_composer_text("first");
        controller.submit_post("first");
        controller.set_composer_text("second thought");
        controller.settle().await;

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.composer.text, "second thought");
        assert_eq!(gateway.timeline_calls(), 1);
    }

    #[tokio::test]
    async fn test_clear_composer_discards_draft() {
        let gateway = MockFeedGateway::new();
        let mut controller = controller(&gateway).with_initial_draft("#pay $5 @bob");
        controller.clear_composer();
        assert_eq!(controller.snapshot().composer.text, "");
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_post_failure_keeps_composer() {
        let gateway = MockFeedGateway::new();
        gateway.push_post_result(Err(GatewayError::ServerError {
            status: 500,
            message: "oops".to_string(),
        }));
        let mut controller = controller(&gateway);

        controller.submit_post("keep me");
        controller.settle().await;

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.composer.text, "keep me");
        assert_eq!(snapshot.status.unwrap().text, POST_FAILED);
        assert_eq!(gateway.timeline_calls(), 0);
    }

    #[tokio::test]
    async fn test_reply_success_closes_draft_and_refreshes() {
        let gateway = MockFeedGateway::new();
        let mut controller = controller(&gateway);
        controller.open_reply(&render_post(&raw("u1")));

        controller.submit_reply("nice");
        controller.settle().await;

        assert!(controller.snapshot().reply.is_none());
        assert_eq!(gateway.timeline_calls(), 1);
    }

    #[tokio::test]
    async fn test_reply_success_keeps_newer_draft_on_other_target() {
        let gateway = MockFeedGateway::new();
        let gate = gateway.push_reply_result_held(Ok(()));
        let mut controller = controller(&gateway);
        controller.open_reply(&render_post(&raw("u1")));
        controller.submit_reply("first");
        controller.open_reply(&render_post(&raw("u2")));

        gate.release();
        controller.settle().await;

        let draft = controller.snapshot().reply.unwrap();
        assert_eq!(draft.target_post_uri, "u2");
    }

    #[tokio::test]
    async fn test_poll_tick_refreshes_in_feed_mode() {
        let gateway = MockFeedGateway::new();
        let mut controller = controller(&gateway);
        controller.handle_message(FeedMessage::PollTick);
        controller.settle().await;
        assert_eq!(gateway.timeline_calls(), 1);
    }

    #[tokio::test]
    async fn test_operations_after_teardown_are_ignored() {
        let gateway = MockFeedGateway::new();
        let mut controller = controller(&gateway);
        controller.teardown();

        assert_eq!(controller.refresh(), None);
        assert_eq!(
            controller.submit_post("x"),
            Submission::Ignored(IgnoredReason::TornDown)
        );
        assert_eq!(
            controller.submit_search("x"),
            Submission::Ignored(IgnoredReason::TornDown)
        );
        controller.handle_message(FeedMessage::PollTick);
        tokio::task::yield_now().await;
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_response_after_teardown_is_discarded() {
        let gateway = MockFeedGateway::new();
        let gate = gateway.push_timeline_held(Ok(vec![raw("late")]));
        let mut controller = controller(&gateway);

        controller.refresh();
        controller.teardown();
        gate.release();
        controller.settle().await;

        let snapshot = controller.snapshot();
        assert!(snapshot.posts.is_empty());
        assert_eq!(controller.pending().total(), 0);
    }

    #[tokio::test]
    async fn test_subscribe_sees_changes() {
        let gateway = MockFeedGateway::new();
        let mut controller = controller(&gateway);
        let mut rx = controller.subscribe();
        rx.borrow_and_update();

        controller.set_composer_text("typing");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().composer.text, "typing");
    }
}
