//! Review record as returned by the review API.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Rating, Timestamp};

/// Server-assigned review identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(String);

impl ReviewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A submitted review. Immutable on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub rating: Rating,
    pub review: String,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub ai_summary: String,
    #[serde(default)]
    pub recommended_actions: Vec<String>,
    /// Reply that was shown to the customer when the review was submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_response: Option<String>,
}

impl Review {
    /// True when the review text contains `term`, ignoring case.
    pub fn matches_search(&self, term: &str) -> bool {
        self.review.to_lowercase().contains(&term.to_lowercase())
    }
}
