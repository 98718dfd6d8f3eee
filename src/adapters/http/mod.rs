//! HTTP adapter - talks to the review API over reqwest.

mod dto;
mod review_client;

pub use dto::{AnalyticsDto, ErrorBody};
pub use review_client::{HttpReviewClient, ReviewClientConfig, DEFAULT_BASE_URL};
