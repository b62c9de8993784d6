//! Concrete implementations of trait abstractions.
//!
//! - [`XrpcGateway`] - Feed gateway over the XRPC HTTP API using reqwest
//!
//! The [`mock`] submodule provides a scripted [`mock::MockFeedGateway`]
//! for tests.

pub mod mock;
pub mod xrpc_gateway;

pub use mock::MockFeedGateway;
pub use xrpc_gateway::XrpcGateway;
