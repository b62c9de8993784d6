//! Startup configuration and logging.
//!
//! - [`config`] - `FeedConfig` built from the environment
//! - [`logging`] - file-backed tracing subscriber

pub mod config;
pub mod logging;

pub use config::{ConfigError, FeedConfig};
pub use logging::init_logging;
