//! Fetch the monitored document over HTTP.

#![allow(clippy::result_large_err)]

use super::{FETCH_TIMEOUT, USER_AGENT};
use apiwatch_core::errors::{ExError, ExErrorKind, Result, WatchError};
use apiwatch_core::source::DocumentSource;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

/// Single GET against a fixed document URL.
pub struct HttpDocumentSource {
    client: Client,
    url: String,
}

impl HttpDocumentSource {
    /// Source with the default client (30 s timeout).
    ///
    /// # Errors
    ///
    /// `Internal` if the HTTP client cannot be constructed.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                ExError::new(ExErrorKind::Internal)
                    .with_op("build_http_client")
                    .with_message(e.to_string())
            })?;
        Ok(Self::with_client(url, client))
    }

    /// Source using a caller-configured client.
    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl DocumentSource for HttpDocumentSource {
    fn location(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| WatchError::FetchFailed {
                url: self.url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::FetchStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.bytes().map_err(|e| WatchError::FetchFailed {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;
        tracing::debug!(url = %self.url, bytes = body.len() as u64, "document fetched");
        Ok(body.to_vec())
    }
}
