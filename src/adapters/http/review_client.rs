//! HTTP Review Client - reqwest implementation of the `ReviewApi` port.
//!
//! # Configuration
//!
//! ```ignore
//! let config = ReviewClientConfig::new("http://localhost:8000")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let client = HttpReviewClient::new(config)?;
//! let page = client.list_reviews(&ReviewFilter::new().query(PAGE_SIZE)).await?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::dto::{AnalyticsDto, ErrorBody};
use crate::domain::review::{Analytics, ReviewQuery, SubmitReviewRequest};
use crate::ports::{ApiError, ReviewApi, ReviewPage, SubmitReviewResponse};

/// Default API location when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for the HTTP review client.
#[derive(Debug, Clone)]
pub struct ReviewClientConfig {
    /// Base URL of the review API, without trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ReviewClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ReviewClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Review API client over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpReviewClient {
    config: ReviewClientConfig,
    client: Client,
}

impl HttpReviewClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: ReviewClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            ApiError::network(format!("Connection failed: {}", e))
        } else {
            ApiError::network(e.to_string())
        }
    }

    /// Turns non-2xx responses into `ApiError::Status`, keeping any `detail`.
    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            detail: ErrorBody::parse_detail(&body),
        })
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::decode(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl ReviewApi for HttpReviewClient {
    async fn submit_review(
        &self,
        request: &SubmitReviewRequest,
    ) -> Result<SubmitReviewResponse, ApiError> {
        tracing::debug!(rating = %request.rating, "POST /api/submit-review");

        let response = self
            .client
            .post(self.url("/api/submit-review"))
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Self::parse_json(response).await
    }

    async fn list_reviews(&self, query: &ReviewQuery) -> Result<ReviewPage, ApiError> {
        tracing::debug!(?query, "GET /api/reviews");

        let response = self
            .client
            .get(self.url("/api/reviews"))
            .query(&query.to_params())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Self::parse_json(response).await
    }

    async fn get_analytics(&self) -> Result<Analytics, ApiError> {
        tracing::debug!("GET /api/analytics");

        let response = self
            .client
            .get(self.url("/api/analytics"))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let dto: AnalyticsDto = Self::parse_json(response).await?;
        Analytics::try_from(dto)
    }
}
