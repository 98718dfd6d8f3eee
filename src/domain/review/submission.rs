//! Review submission draft and status machine.

use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::{Rating, StateMachine};

/// Body of `POST /api/submit-review`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitReviewRequest {
    pub rating: Rating,
    pub review: String,
}

/// Reasons a draft cannot be submitted. Display text is user-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Please select a rating")]
    MissingRating,

    #[error("Please write a review")]
    EmptyReview,
}

/// The form fields being edited by the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub rating: Option<Rating>,
    pub review_text: String,
}

impl SubmissionDraft {
    /// Checks the draft and builds the request with trimmed text.
    pub fn validate(&self) -> Result<SubmitReviewRequest, DraftError> {
        let rating = self.rating.ok_or(DraftError::MissingRating)?;
        let review = self.review_text.trim();
        if review.is_empty() {
            return Err(DraftError::EmptyReview);
        }
        Ok(SubmitReviewRequest {
            rating,
            review: review.to_string(),
        })
    }

    pub fn clear(&mut self) {
        self.rating = None;
        self.review_text.clear();
    }
}

/// Lifecycle of one submit action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

impl StateMachine for SubmissionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SubmissionStatus::*;
        matches!(
            (self, target),
            (Idle, Validating)
                | (Success, Validating)
                | (Validating, Idle)
                | (Validating, Submitting)
                | (Submitting, Success)
                | (Submitting, Failed)
                | (Failed, Idle)
                | (Success, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SubmissionStatus::*;
        match self {
            Idle => vec![Validating],
            Validating => vec![Idle, Submitting],
            Submitting => vec![Success, Failed],
            Success => vec![Validating, Idle],
            Failed => vec![Idle],
        }
    }
}

impl SubmissionStatus {
    /// Submit control is disabled only while a request is in flight.
    pub fn accepts_submit(&self) -> bool {
        self.can_transition_to(&SubmissionStatus::Validating)
    }
}
