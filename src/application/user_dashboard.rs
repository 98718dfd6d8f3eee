//! UserDashboard - the customer review submission form.
//!
//! Owns the draft and the submit state machine. A successful submission shows
//! the server's AI reply and schedules a form reset; dropping the dashboard
//! cancels any pending reset.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

use super::scheduler::ScheduledTask;
use crate::domain::foundation::{Rating, StateMachine, ValidationError};
use crate::domain::review::{DraftError, SubmissionDraft, SubmissionStatus};
use crate::ports::ReviewApi;

/// Shown when the server gives no `detail` for a failed submission.
pub const SUBMIT_FALLBACK_ERROR: &str = "Failed to submit review. Please try again.";

/// Default delay before the form clears after a successful submission.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(5);

/// Why a submit action did not produce an AI reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Invalid(#[from] DraftError),

    #[error("A submission is already in progress")]
    InProgress,

    #[error("{message}")]
    Rejected { message: String },

    #[error("Invalid submission state: {0}")]
    State(#[from] ValidationError),
}

#[derive(Debug, Clone, Default)]
struct FormState {
    draft: SubmissionDraft,
    status: SubmissionStatus,
    error: Option<String>,
    ai_response: String,
    submitted: bool,
}

impl FormState {
    fn move_to(&mut self, target: SubmissionStatus) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(target)?;
        Ok(())
    }

    fn reset_after_success(&mut self) {
        self.draft.clear();
        self.submitted = false;
        if self.status == SubmissionStatus::Success {
            self.status = SubmissionStatus::Idle;
        }
    }
}

/// The "Response from Our Team" panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePanel {
    pub title: &'static str,
    pub body: String,
    pub footer: &'static str,
}

/// Snapshot of everything the submission form shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDashboardView {
    pub title: &'static str,
    pub intro: &'static str,
    pub rating: Option<Rating>,
    pub review_text: String,
    pub error: Option<String>,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
    pub response: Option<ResponsePanel>,
}

/// Review submission form bound to a `ReviewApi`.
pub struct UserDashboard {
    api: Arc<dyn ReviewApi>,
    state: Arc<RwLock<FormState>>,
    reset_delay: Duration,
    reset_timers: Mutex<Vec<ScheduledTask>>,
}

impl UserDashboard {
    pub fn new(api: Arc<dyn ReviewApi>) -> Self {
        Self::with_reset_delay(api, DEFAULT_RESET_DELAY)
    }

    pub fn with_reset_delay(api: Arc<dyn ReviewApi>, reset_delay: Duration) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(FormState::default())),
            reset_delay,
            reset_timers: Mutex::new(Vec::new()),
        }
    }

    pub async fn set_rating(&self, rating: Rating) {
        self.state.write().await.draft.rating = Some(rating);
    }

    pub async fn clear_rating(&self) {
        self.state.write().await.draft.rating = None;
    }

    pub async fn set_review_text(&self, text: impl Into<String>) {
        self.state.write().await.draft.review_text = text.into();
    }

    pub async fn status(&self) -> SubmissionStatus {
        self.state.read().await.status
    }

    /// Validates the draft and posts it.
    ///
    /// Returns the AI reply on success. Validation and server errors are
    /// also recorded for display; the draft is kept so the user can retry.
    pub async fn submit(&self) -> Result<String, SubmissionError> {
        let request = {
            let mut state = self.state.write().await;
            if !state.status.accepts_submit() {
                return Err(SubmissionError::InProgress);
            }
            state.move_to(SubmissionStatus::Validating)?;

            match state.draft.validate() {
                Ok(request) => {
                    state.error = None;
                    state.ai_response.clear();
                    state.move_to(SubmissionStatus::Submitting)?;
                    request
                }
                Err(invalid) => {
                    state.error = Some(invalid.to_string());
                    state.move_to(SubmissionStatus::Idle)?;
                    return Err(invalid.into());
                }
            }
        };

        tracing::info!(rating = %request.rating, "Submitting review");
        let result = self.api.submit_review(&request).await;

        let mut state = self.state.write().await;
        let failure = match result {
            Ok(response) if response.success => {
                state.move_to(SubmissionStatus::Success)?;
                state.ai_response = response.ai_response.clone();
                state.submitted = true;
                drop(state);

                self.schedule_reset().await;
                return Ok(response.ai_response);
            }
            Ok(_) => {
                tracing::warn!("Review API reported an unsuccessful submission");
                SUBMIT_FALLBACK_ERROR.to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Review submission failed");
                e.detail().unwrap_or(SUBMIT_FALLBACK_ERROR).to_string()
            }
        };

        state.move_to(SubmissionStatus::Failed)?;
        state.error = Some(failure.clone());
        state.move_to(SubmissionStatus::Idle)?;
        Err(SubmissionError::Rejected { message: failure })
    }

    async fn schedule_reset(&self) {
        let state = self.state.clone();
        let task = ScheduledTask::after("submission-reset", self.reset_delay, async move {
            state.write().await.reset_after_success();
        });

        let mut timers = self.reset_timers.lock().await;
        timers.retain(|t| !t.is_finished());
        timers.push(task);
    }

    pub async fn view(&self) -> UserDashboardView {
        let state = self.state.read().await;
        let submitting = state.status == SubmissionStatus::Submitting;

        let response = (state.submitted && !state.ai_response.is_empty()).then(|| ResponsePanel {
            title: "Response from Our Team",
            body: state.ai_response.clone(),
            footer: "Thank you for your feedback! Your review has been submitted.",
        });

        UserDashboardView {
            title: "Share Your Feedback",
            intro: "We'd love to hear about your experience. Your feedback helps us improve!",
            rating: state.draft.rating,
            review_text: state.draft.review_text.clone(),
            error: state.error.clone(),
            submit_label: if submitting { "Submitting..." } else { "Submit Review" },
            submit_disabled: submitting,
            response,
        }
    }
}
