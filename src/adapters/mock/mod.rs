//! Mock implementations for testing.
//!
//! - [`MockFeedGateway`] - Gateway with scripted, optionally held responses

pub mod gateway;

pub use gateway::{GatewayCall, MockFeedGateway, ResponseGate};
