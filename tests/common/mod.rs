//! Common test utilities for integration tests.
//!
//! Fixture builders for raw service records and a helper that wires a
//! controller to a scripted gateway.
//!
//! # Example
//!
//! ```ignore
//! use common::{controller_with, raw_post};
//!
//! let (gateway, mut controller) = controller_with(vec![raw_post("u1", "alice.test", "hi")]);
//! controller.refresh();
//! controller.settle().await;
//! ```

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;

use std::sync::Arc;

use feedline::adapters::mock::MockFeedGateway;
use feedline::controller::FeedController;
use feedline::models::RawPost;

/// A controller over a fresh mock gateway whose first timeline fetch
/// returns `initial`.
pub fn controller_with(initial: Vec<RawPost>) -> (MockFeedGateway, FeedController) {
    let gateway = MockFeedGateway::new();
    gateway.push_timeline(Ok(initial));
    let controller = FeedController::new(Arc::new(gateway.clone()));
    (gateway, controller)
}

/// Uris of the displayed posts, in order.
pub fn displayed_uris(controller: &FeedController) -> Vec<String> {
    controller
        .snapshot()
        .posts
        .iter()
        .map(|post| post.uri.clone())
        .collect()
}
