//! Runtime configuration.
//!
//! Values come from `FEEDLINE_*` environment variables with builder
//! overrides on top, so tests and the binary share one construction path.

use std::time::Duration;
use thiserror::Error;

use crate::controller::{DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL};

pub const DEFAULT_SERVICE_URL: &str = "https://bsky.social";
pub const DEFAULT_TIMELINE_LIMIT: u32 = 50;
pub const DEFAULT_SEARCH_LIMIT: u32 = 25;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_SERVICE: &str = "FEEDLINE_SERVICE";
pub const ENV_HANDLE: &str = "FEEDLINE_HANDLE";
pub const ENV_APP_PASSWORD: &str = "FEEDLINE_APP_PASSWORD";
pub const ENV_POLL_SECS: &str = "FEEDLINE_POLL_SECS";
pub const ENV_TIMELINE_LIMIT: &str = "FEEDLINE_TIMELINE_LIMIT";
pub const ENV_SEARCH_LIMIT: &str = "FEEDLINE_SEARCH_LIMIT";

/// Configuration problems reported before the UI starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank
    #[error("{0} is not set")]
    Missing(&'static str),

    /// A variable is set but cannot be used
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Gateway and polling settings.
///
/// # Example
///
/// ```
/// use feedline::startup::FeedConfig;
/// use std::time::Duration;
///
/// let config = FeedConfig::new("alice.test", "app-pass")
///     .with_poll_interval(Duration::from_secs(60));
/// assert_eq!(config.service_url, "https://bsky.social");
/// ```
#[derive(Clone)]
pub struct FeedConfig {
    /// Base URL of the XRPC service
    pub service_url: String,
    /// Account handle used to log in
    pub handle: String,
    /// App password for the account
    pub app_password: String,
    /// Refresh period in Feed mode
    pub poll_interval: Duration,
    /// Posts fetched per timeline refresh
    pub timeline_limit: u32,
    /// Posts and actors fetched per search
    pub search_limit: u32,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for FeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedConfig")
            .field("service_url", &self.service_url)
            .field("handle", &self.handle)
            .field("app_password", &"<redacted>")
            .field("poll_interval", &self.poll_interval)
            .field("timeline_limit", &self.timeline_limit)
            .field("search_limit", &self.search_limit)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl FeedConfig {
    /// Create a config for the given account with default settings.
    pub fn new(handle: impl Into<String>, app_password: impl Into<String>) -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            handle: handle.into(),
            app_password: app_password.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeline_limit: DEFAULT_TIMELINE_LIMIT,
            search_limit: DEFAULT_SEARCH_LIMIT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the service base URL. A trailing slash is dropped.
    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the refresh period, raised to at least [`MIN_POLL_INTERVAL`].
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    pub fn with_timeline_limit(mut self, limit: u32) -> Self {
        self.timeline_limit = limit;
        self
    }

    pub fn with_search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build a config from `FEEDLINE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let mut config = Self::new(required(ENV_HANDLE)?, required(ENV_APP_PASSWORD)?);

        if let Some(url) = lookup(ENV_SERVICE).filter(|v| !v.trim().is_empty()) {
            let url = url.trim();
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ConfigError::Invalid {
                    name: ENV_SERVICE,
                    value: url.to_string(),
                });
            }
            config = config.with_service_url(url);
        }

        if let Some(secs) = positive(&lookup, ENV_POLL_SECS)? {
            config = config.with_poll_interval(Duration::from_secs(secs));
        }
        if let Some(limit) = positive(&lookup, ENV_TIMELINE_LIMIT)? {
            config = config.with_timeline_limit(limit);
        }
        if let Some(limit) = positive(&lookup, ENV_SEARCH_LIMIT)? {
            config = config.with_search_limit(limit);
        }

        Ok(config)
    }
}

/// Read an optional positive integer variable. Blank counts as unset.
fn positive<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = lookup(name).filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(Some(value)),
        _ => Err(ConfigError::Invalid { name, value: raw }),
    }
}
