//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`FeedGateway`] - Remote timeline/social service operations
//! - [`ClipboardBackend`] - System clipboard writes

pub mod clipboard;
pub mod gateway;

pub use clipboard::ClipboardBackend;
pub use gateway::{FeedGateway, GatewayError};
