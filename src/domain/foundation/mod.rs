//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects and error types that form the vocabulary of
//! the review dashboard domain.

mod errors;
mod rating;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use rating::Rating;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
