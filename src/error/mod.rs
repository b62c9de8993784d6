//! Error handling for feedline.
//!
//! - **Gateway errors** ([`GatewayError`](crate::traits::GatewayError)): every
//!   remote call failure, caught where the call is made
//! - **Unified error** ([`FeedError`]): what surfaces to the user, with a
//!   category, a log code and a message
//! - **Classification** helpers turning reqwest failures and HTTP statuses
//!   into gateway errors
//!
//! | Category | Source | Transient |
//! |----------|--------|-----------|
//! | Network | connection, timeout | Yes |
//! | Server | 5xx, malformed body | Yes |
//! | Auth | 401, missing session | No |
//! | System | clipboard | No |

mod category;
mod feed_error;
mod network;

pub use category::ErrorCategory;
pub use feed_error::FeedError;
pub use network::{classify_reqwest_error, classify_status};

/// Type alias for Results using FeedError.
pub type FeedResult<T> = Result<T, FeedError>;
