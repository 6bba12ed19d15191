//! HTTP page fetching with bounded timeout and redirect following.
//!
//! The fetcher is the only component that touches the network. It is kept
//! behind the [`FetchPage`] trait so the orchestration layer can be exercised
//! against canned markup in tests, the same way the rest of the pipeline is.
//!
//! # Failure Taxonomy
//!
//! Every network problem is reported as a [`FetchError`] variant and recovered
//! into an indeterminate result by the caller; nothing here is fatal to a
//! batch. A non-success HTTP status is deliberately *not* an error: the body
//! is still scanned for dates, and the status is only logged.

use async_trait::async_trait;
use reqwest::{Client, redirect::Policy};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::utils::truncate_for_log;

/// Network failure classes surfaced by a fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("too many redirects")]
    TooManyRedirects,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request failed: {0}")]
    Http(String),
}

/// Capability of turning a URL into raw markup.
#[async_trait]
pub trait FetchPage: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Production fetcher backed by a shared [`reqwest::Client`].
///
/// The client carries a per-request timeout, a bounded redirect policy, and a
/// stable User-Agent; it is cheap to share across concurrent checks.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher whose every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(10))
            .user_agent(concat!("newswatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }
}

#[async_trait]
impl FetchPage for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            debug!(%url, status = status.as_u16(), "non-success status; scanning body anyway");
        }

        let body = response.text().await.map_err(classify_error)?;
        debug!(
            %url,
            bytes = body.len(),
            preview = %truncate_for_log(&body, 120),
            "fetched page"
        );
        Ok(body)
    }
}

fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_redirect() {
        FetchError::TooManyRedirects
    } else if e.is_connect() {
        FetchError::Connect(e.to_string())
    } else {
        FetchError::Http(e.to_string())
    }
}
