//! HTTP collaborators backed by the blocking reqwest client.
//!
//! Neither collaborator retries: a failed fetch ends the run and the next
//! scheduled run tries again; a failed notification is logged by the caller.

pub mod fetcher;
pub mod slack;

pub use fetcher::HttpDocumentSource;
pub use slack::{SlackNotifier, SlackPayload};

use std::time::Duration;

/// Timeout for the document GET
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout for the webhook POST
pub const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) const USER_AGENT: &str = concat!("apiwatch/", env!("CARGO_PKG_VERSION"));
