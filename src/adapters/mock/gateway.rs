//! Scripted feed gateway for testing.
//!
//! Responses are queued per operation and consumed in call order. When a
//! queue is empty the gateway answers with an empty success. A response can
//! also be held back behind a [`ResponseGate`] so tests decide exactly when
//! it resolves, which is how out-of-order arrivals are reproduced.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use crate::models::{RawPost, RawSearchResults};
use crate::traits::{FeedGateway, GatewayError};

/// A gateway call recorded for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    FetchTimeline,
    CreatePost { text: String },
    CreateReply { text: String, target_uri: String },
    Search { query: String },
}

/// Releases a held response.
#[derive(Debug)]
pub struct ResponseGate {
    tx: Option<oneshot::Sender<()>>,
}

impl ResponseGate {
    /// Let the held response resolve.
    pub fn release(mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(());
        }
    }
}

struct Scripted<T> {
    result: Result<T, GatewayError>,
    hold: Option<oneshot::Receiver<()>>,
}

impl<T> Scripted<T> {
    async fn resolve(self) -> Result<T, GatewayError> {
        if let Some(hold) = self.hold {
            // A dropped gate releases the response as well.
            let _ = hold.await;
        }
        self.result
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Scripted<T>>>>;

fn push<T>(queue: &Queue<T>, result: Result<T, GatewayError>) {
    queue.lock().unwrap().push_back(Scripted { result, hold: None });
}

fn push_held<T>(queue: &Queue<T>, result: Result<T, GatewayError>) -> ResponseGate {
    let (tx, rx) = oneshot::channel();
    queue.lock().unwrap().push_back(Scripted {
        result,
        hold: Some(rx),
    });
    ResponseGate { tx: Some(tx) }
}

fn pop<T>(queue: &Queue<T>) -> Option<Scripted<T>> {
    queue.lock().unwrap().pop_front()
}

/// Mock feed gateway.
///
/// Clones share their queues and call log, so a test can keep one handle
/// while the controller owns another.
#[derive(Clone, Default)]
pub struct MockFeedGateway {
    timeline: Queue<Vec<RawPost>>,
    posts: Queue<()>,
    replies: Queue<()>,
    searches: Queue<RawSearchResults>,
    calls: Arc<Mutex<Vec<GatewayCall>>>,
}

impl MockFeedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_timeline(&self, result: Result<Vec<RawPost>, GatewayError>) {
        push(&self.timeline, result);
    }

    pub fn push_timeline_held(&self, result: Result<Vec<RawPost>, GatewayError>) -> ResponseGate {
        push_held(&self.timeline, result)
    }

    pub fn push_post_result(&self, result: Result<(), GatewayError>) {
        push(&self.posts, result);
    }

    pub fn push_reply_result(&self, result: Result<(), GatewayError>) {
        push(&self.replies, result);
    }

    pub fn push_reply_result_held(&self, result: Result<(), GatewayError>) -> ResponseGate {
        push_held(&self.replies, result)
    }

    pub fn push_search(&self, result: Result<RawSearchResults, GatewayError>) {
        push(&self.searches, result);
    }

    pub fn push_search_held(&self, result: Result<RawSearchResults, GatewayError>) -> ResponseGate {
        push_held(&self.searches, result)
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of `fetch_timeline` calls made so far.
    pub fn timeline_calls(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == GatewayCall::FetchTimeline)
            .count()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl FeedGateway for MockFeedGateway {
    async fn fetch_timeline(&self) -> Result<Vec<RawPost>, GatewayError> {
        self.record(GatewayCall::FetchTimeline);
        match pop(&self.timeline) {
            Some(scripted) => scripted.resolve().await,
            None => Ok(Vec::new()),
        }
    }

    async fn create_post(&self, text: &str) -> Result<(), GatewayError> {
        self.record(GatewayCall::CreatePost {
            text: text.to_string(),
        });
        match pop(&self.posts) {
            Some(scripted) => scripted.resolve().await,
            None => Ok(()),
        }
    }

    async fn create_reply(&self, text: &str, target_uri: &str) -> Result<(), GatewayError> {
        self.record(GatewayCall::CreateReply {
            text: text.to_string(),
            target_uri: target_uri.to_string(),
        });
        match pop(&self.replies) {
            Some(scripted) => scripted.resolve().await,
            None => Ok(()),
        }
    }

    async fn search(&self, query: &str) -> Result<RawSearchResults, GatewayError> {
        self.record(GatewayCall::Search {
            query: query.to_string(),
        });
        match pop(&self.searches) {
            Some(scripted) => scripted.resolve().await,
            None => Ok(RawSearchResults::default()),
        }
    }
}
