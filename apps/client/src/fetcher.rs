//! Question fetching from the trivia API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, info, warn};

use trivia_core::{parse_response, FetchError, FetchResult, GameSettings};

/// Questions requested when no amount is given.
pub const DEFAULT_AMOUNT: u32 = 10;
/// Largest batch the trivia API accepts.
pub const MAX_AMOUNT: u32 = 50;

/// Transport failure, carrying a human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Fetches raw bytes for a URL.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, TransportError>;
}

/// HTTP transport backed by reqwest.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, TransportError> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        // The API reports failures such as rate limiting in the body, so the
        // body is parsed regardless of status.
        if !resp.status().is_success() {
            warn!(status = resp.status().as_u16(), "trivia API returned non-success status");
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Builds trivia API requests and turns responses into questions.
#[derive(Clone)]
pub struct QuestionFetcher {
    transport: Arc<dyn Transport>,
    base_url: String,
    amount: u32,
}

impl QuestionFetcher {
    /// Create a fetcher for the API at `base_url`.
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            amount: DEFAULT_AMOUNT,
        }
    }

    /// Set the number of questions requested by [`fetch`](Self::fetch).
    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Build the request URL for `amount` questions.
    ///
    /// `category` and `difficulty` are only included when set.
    pub fn request_url(&self, amount: u32, settings: &GameSettings) -> Result<Url, FetchError> {
        if amount == 0 || amount > MAX_AMOUNT {
            return Err(FetchError::InvalidRequest(format!(
                "amount must be between 1 and {}, got {}",
                MAX_AMOUNT, amount
            )));
        }

        let mut params = vec![("amount", amount.to_string())];
        if let Some(category) = settings.category_id {
            params.push(("category", category.to_string()));
        }
        if let Some(difficulty) = settings.difficulty {
            params.push(("difficulty", difficulty.as_str().to_string()));
        }

        let url = Url::parse_with_params(&self.base_url, &params)
            .map_err(|e| FetchError::InvalidRequest(format!("{}: {}", self.base_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::InvalidRequest(format!(
                "unsupported scheme: {}",
                url.scheme()
            )));
        }

        Ok(url)
    }

    /// Fetch the configured number of questions.
    pub async fn fetch(&self, settings: &GameSettings) -> FetchResult {
        self.fetch_amount(self.amount, settings).await
    }

    /// Fetch `amount` questions matching `settings`.
    pub async fn fetch_amount(&self, amount: u32, settings: &GameSettings) -> FetchResult {
        let url = self.request_url(amount, settings)?;
        info!(
            amount,
            category = ?settings.category_id,
            difficulty = ?settings.difficulty,
            "fetching questions"
        );
        debug!(%url, "trivia request");

        let body = self
            .transport
            .get(&url)
            .await
            .map_err(|e| FetchError::NetworkError(e.0))?;

        let batch = parse_response(&body).map_err(|e| {
            warn!(error = %e, "question fetch failed");
            e
        })?;

        if batch.dropped > 0 {
            debug!(dropped = batch.dropped, "skipped incomplete result entries");
        }
        info!(count = batch.questions.len(), "fetched questions");

        Ok(batch.questions)
    }
}
