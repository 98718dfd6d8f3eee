use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::review::{Analytics, Review, ReviewId, ReviewQuery, SubmitReviewRequest};

/// Port for the review feedback REST API.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// `POST /api/submit-review`
    async fn submit_review(
        &self,
        request: &SubmitReviewRequest,
    ) -> Result<SubmitReviewResponse, ApiError>;

    /// `GET /api/reviews` with filter and paging parameters
    async fn list_reviews(&self, query: &ReviewQuery) -> Result<ReviewPage, ApiError>;

    /// `GET /api/analytics`
    async fn get_analytics(&self) -> Result<Analytics, ApiError>;
}

/// Server reply to a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReviewResponse {
    pub success: bool,
    #[serde(default)]
    pub ai_response: String,
    #[serde(default)]
    pub id: Option<ReviewId>,
}

/// One page of the review list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    /// Total matching rows, when the server reports it. Not used for paging.
    #[serde(default)]
    pub total: Option<u64>,
}

/// Errors that can occur talking to the review API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Server returned HTTP {status}")]
    Status { status: u16, detail: Option<String> },

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        ApiError::Decode(message.into())
    }

    /// Human-readable `detail` the server attached to an error response.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_only_present_on_status_errors() {
        let err = ApiError::Status {
            status: 500,
            detail: Some("Error processing review: boom".to_string()),
        };
        assert_eq!(err.detail(), Some("Error processing review: boom"));
        assert_eq!(err.to_string(), "Server returned HTTP 500");

        assert_eq!(ApiError::network("refused").detail(), None);
        assert_eq!(ApiError::Timeout { timeout_secs: 5 }.detail(), None);
    }

    #[test]
    fn submit_response_tolerates_missing_id() {
        let response: SubmitReviewResponse =
            serde_json::from_str(r#"{"success": true, "ai_response": "Thanks!"}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.ai_response, "Thanks!");
        assert!(response.id.is_none());
    }

    #[test]
    fn review_page_total_is_optional() {
        let page: ReviewPage = serde_json::from_str(r#"{"reviews": []}"#).unwrap();
        assert!(page.reviews.is_empty());
        assert!(page.total.is_none());
    }
}
