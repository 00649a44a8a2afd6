//! Documentation content retrieval.
//!
//! The documentation source is a Context7-style HTTP API:
//!
//! ```text
//! GET {docs_url}/{library_id}?type=txt&topic=<topic>&tokens=<n>
//! Authorization: Bearer <api_key>      (optional)
//! ```
//!
//! The caller only needs to know whether text came back, so a fetch never
//! fails outright: it yields a [`FetchOutcome`]. Transport errors and 5xx/429
//! answers are retried with exponential backoff before giving up.

use dashmap::DashMap;
use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::{debug, warn};

use crate::constants::{DOCS_FETCH_ATTEMPTS, MAX_BACKOFF_DELAY_MS, STARTING_BACKOFF_DELAY_MS};
use crate::core::CtxdocsError;

/// Result of asking the documentation source for one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Text content
    Fetched(String),
    /// Why no content is available
    Failed(String),
}

impl FetchOutcome {
    #[must_use]
    pub const fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }
}

/// Something that returns documentation text for a library topic.
pub trait DocSource {
    fn fetch(
        &self,
        library_id: &str,
        topic: &str,
        tokens: u32,
    ) -> impl Future<Output = FetchOutcome> + Send;
}

type MemoKey = (String, String, u32);

/// Memoizing HTTP documentation client.
#[derive(Debug)]
pub struct DocsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    memo: DashMap<MemoKey, String>,
}

impl DocsClient {
    /// A client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CtxdocsError::NetworkError`] if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ctxdocs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CtxdocsError::NetworkError {
                operation: "build documentation client".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            memo: DashMap::new(),
        })
    }

    /// Forget all memoized content.
    pub fn reset(&self) {
        self.memo.clear();
    }

    async fn request(&self, library_id: &str, topic: &str, tokens: u32) -> Result<String, CtxdocsError> {
        let url = format!("{}/{}", self.base_url, library_id.trim_start_matches('/'));
        let tokens = tokens.to_string();

        let mut request = self
            .client
            .get(&url)
            .query(&[("type", "txt"), ("topic", topic), ("tokens", tokens.as_str())]);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| CtxdocsError::NetworkError {
            operation: format!("documentation request for '{library_id}'"),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CtxdocsError::DocsHttp {
                library: library_id.to_string(),
                topic: topic.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| CtxdocsError::NetworkError {
            operation: format!("documentation request for '{library_id}'"),
            reason: e.to_string(),
        })
    }

    async fn fetch_with_retry(&self, library_id: &str, topic: &str, tokens: u32) -> FetchOutcome {
        let key = (library_id.to_string(), topic.to_string(), tokens);
        if let Some(hit) = self.memo.get(&key) {
            return FetchOutcome::Fetched(hit.clone());
        }

        let strategy = ExponentialBackoff::from_millis(STARTING_BACKOFF_DELAY_MS)
            .max_delay(Duration::from_millis(MAX_BACKOFF_DELAY_MS))
            .factor(2)
            .take(DOCS_FETCH_ATTEMPTS.saturating_sub(1));

        let result =
            RetryIf::spawn(strategy, || self.request(library_id, topic, tokens), is_retryable).await;

        match result {
            Ok(text) if text.trim().is_empty() => {
                debug!("Empty documentation for {library_id} ({topic})");
                FetchOutcome::Failed("empty response".to_string())
            }
            Ok(text) => {
                self.memo.insert(key, text.clone());
                FetchOutcome::Fetched(text)
            }
            Err(e) => {
                warn!("Failed to fetch documentation for {library_id} ({topic}): {e}");
                FetchOutcome::Failed(e.to_string())
            }
        }
    }
}

fn is_retryable(error: &CtxdocsError) -> bool {
    match error {
        CtxdocsError::DocsHttp {
            status,
            ..
        } => {
            *status == StatusCode::TOO_MANY_REQUESTS.as_u16()
                || StatusCode::from_u16(*status).is_ok_and(|s| s.is_server_error())
        }
        CtxdocsError::NetworkError {
            ..
        } => true,
        _ => false,
    }
}

impl DocSource for DocsClient {
    fn fetch(
        &self,
        library_id: &str,
        topic: &str,
        tokens: u32,
    ) -> impl Future<Output = FetchOutcome> + Send {
        self.fetch_with_retry(library_id, topic, tokens)
    }
}
