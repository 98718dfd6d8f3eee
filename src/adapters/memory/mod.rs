//! In-memory adapters for tests and offline use.

mod in_memory_review_api;

pub use in_memory_review_api::{ApiCall, Endpoint, InMemoryReviewApi};
