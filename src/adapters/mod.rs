//! Adapters - Implementations of port interfaces and presentation.
//!
//! - `http` - reqwest client for the review API
//! - `memory` - in-memory review API for tests and offline demos
//! - `terminal` - plain-text rendering of dashboard views

pub mod http;
pub mod memory;
pub mod terminal;

pub use http::{HttpReviewClient, ReviewClientConfig};
pub use memory::InMemoryReviewApi;
