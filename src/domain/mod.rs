//! Domain layer containing the review dashboard's types and pure logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (rating, timestamp, errors, state machine)
//! - `review` - Reviews, analytics, cards, filters and submission drafts

pub mod foundation;
pub mod review;
