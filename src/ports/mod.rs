//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the dashboards and the outside world. Adapters implement these ports.
//!
//! - `ReviewApi` - the review feedback REST API (submit, list, analytics)

mod review_api;

pub use review_api::{ApiError, ReviewApi, ReviewPage, SubmitReviewResponse};
