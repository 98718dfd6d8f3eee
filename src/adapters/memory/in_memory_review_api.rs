//! In-memory Review API for tests and offline demos.
//!
//! Behaves like the review server: stores submissions, filters and pages the
//! list newest-first, and computes analytics over everything stored.
//!
//! # Features
//!
//! - Seeded review corpus
//! - Canned AI reply for submissions
//! - Scripted per-call delays and error injection
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let api = InMemoryReviewApi::new().with_ai_response("Thanks for the kind words!");
//! api.delay_next(Endpoint::ListReviews, Duration::from_millis(200)).await;
//! api.fail_next(Endpoint::Analytics, ApiError::network("down")).await;
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::domain::foundation::{Rating, Timestamp};
use crate::domain::review::{
    Analytics, DraftError, Review, ReviewId, ReviewQuery, SubmitReviewRequest,
};
use crate::ports::{ApiError, ReviewApi, ReviewPage, SubmitReviewResponse};

/// Which API operation a scripted behavior applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    SubmitReview,
    ListReviews,
    Analytics,
}

/// A recorded call, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    SubmitReview(SubmitReviewRequest),
    ListReviews(ReviewQuery),
    Analytics,
}

impl ApiCall {
    fn endpoint(&self) -> Endpoint {
        match self {
            ApiCall::SubmitReview(_) => Endpoint::SubmitReview,
            ApiCall::ListReviews(_) => Endpoint::ListReviews,
            ApiCall::Analytics => Endpoint::Analytics,
        }
    }
}

#[derive(Debug, Default)]
struct Script {
    delays: HashMap<Endpoint, VecDeque<Duration>>,
    failures: HashMap<Endpoint, VecDeque<ApiError>>,
}

#[derive(Debug, Default)]
struct Store {
    reviews: Vec<Review>,
    calls: Vec<ApiCall>,
}

/// Review API backed by process memory.
#[derive(Debug)]
pub struct InMemoryReviewApi {
    store: Mutex<Store>,
    script: Mutex<Script>,
    ai_response: Option<String>,
}

impl Default for InMemoryReviewApi {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryReviewApi {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store::default()),
            script: Mutex::new(Script::default()),
            ai_response: None,
        }
    }

    /// Seeds the corpus.
    pub fn with_reviews(mut self, reviews: impl IntoIterator<Item = Review>) -> Self {
        self.store.get_mut().reviews.extend(reviews);
        self
    }

    /// Fixes the reply returned for every submission.
    pub fn with_ai_response(mut self, response: impl Into<String>) -> Self {
        self.ai_response = Some(response.into());
        self
    }

    /// Delays the next call to `endpoint` by `delay`.
    pub async fn delay_next(&self, endpoint: Endpoint, delay: Duration) {
        self.script
            .lock()
            .await
            .delays
            .entry(endpoint)
            .or_default()
            .push_back(delay);
    }

    /// Makes the next call to `endpoint` fail with `error`.
    pub async fn fail_next(&self, endpoint: Endpoint, error: ApiError) {
        self.script
            .lock()
            .await
            .failures
            .entry(endpoint)
            .or_default()
            .push_back(error);
    }

    /// All calls received so far.
    pub async fn calls(&self) -> Vec<ApiCall> {
        self.store.lock().await.calls.clone()
    }

    /// Number of calls received for one endpoint.
    pub async fn call_count(&self, endpoint: Endpoint) -> usize {
        self.store
            .lock()
            .await
            .calls
            .iter()
            .filter(|c| c.endpoint() == endpoint)
            .count()
    }

    /// Number of stored reviews.
    pub async fn review_count(&self) -> usize {
        self.store.lock().await.reviews.len()
    }

    /// Records the call, waits out its latency and returns any injected error.
    async fn begin(&self, call: ApiCall) -> Result<(), ApiError> {
        let endpoint = call.endpoint();
        self.store.lock().await.calls.push(call);

        let (delay, failure) = {
            let mut script = self.script.lock().await;
            let delay = script
                .delays
                .get_mut(&endpoint)
                .and_then(VecDeque::pop_front)
                .unwrap_or(Duration::ZERO);
            let failure = script.failures.get_mut(&endpoint).and_then(VecDeque::pop_front);
            (delay, failure)
        };

        if !delay.is_zero() {
            sleep(delay).await;
        }
        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn reply_for(&self, rating: Rating) -> String {
        if let Some(response) = &self.ai_response {
            return response.clone();
        }
        match rating {
            Rating::Four | Rating::Five => {
                "Thank you for the wonderful review! We're glad you had a great experience.".to_string()
            }
            Rating::Three => {
                "Thank you for your feedback. We'll use it to make your next visit even better.".to_string()
            }
            Rating::One | Rating::Two => {
                "We're sorry we fell short. Your feedback has been shared with our team.".to_string()
            }
        }
    }
}

fn summary_for(request: &SubmitReviewRequest) -> String {
    let sentiment = match request.rating {
        Rating::Four | Rating::Five => "Positive",
        Rating::Three => "Mixed",
        Rating::One | Rating::Two => "Negative",
    };
    format!("{} {}-star review.", sentiment, request.rating)
}

fn actions_for(rating: Rating) -> Vec<String> {
    let mut actions = vec!["Review customer feedback patterns".to_string()];
    if rating < Rating::Four {
        actions.push("Consider follow-up with customer".to_string());
    }
    actions
}

#[async_trait]
impl ReviewApi for InMemoryReviewApi {
    async fn submit_review(
        &self,
        request: &SubmitReviewRequest,
    ) -> Result<SubmitReviewResponse, ApiError> {
        self.begin(ApiCall::SubmitReview(request.clone())).await?;

        if request.review.trim().is_empty() {
            return Err(ApiError::Status {
                status: 422,
                detail: Some(DraftError::EmptyReview.to_string()),
            });
        }

        let ai_response = self.reply_for(request.rating);
        let review = Review {
            id: ReviewId::new(uuid::Uuid::new_v4().to_string()),
            rating: request.rating,
            review: request.review.clone(),
            timestamp: Timestamp::now(),
            ai_summary: summary_for(request),
            recommended_actions: actions_for(request.rating),
            ai_response: Some(ai_response.clone()),
        };
        let id = review.id.clone();
        self.store.lock().await.reviews.push(review);

        Ok(SubmitReviewResponse {
            success: true,
            ai_response,
            id: Some(id),
        })
    }

    async fn list_reviews(&self, query: &ReviewQuery) -> Result<ReviewPage, ApiError> {
        self.begin(ApiCall::ListReviews(query.clone())).await?;

        let store = self.store.lock().await;
        let mut matching: Vec<&Review> = store
            .reviews
            .iter()
            .filter(|r| query.rating.map_or(true, |rating| r.rating == rating))
            .filter(|r| query.search.as_deref().map_or(true, |term| r.matches_search(term)))
            .collect();
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let total = matching.len() as u64;
        let reviews = matching
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect();

        Ok(ReviewPage {
            reviews,
            total: Some(total),
        })
    }

    async fn get_analytics(&self) -> Result<Analytics, ApiError> {
        self.begin(ApiCall::Analytics).await?;

        let store = self.store.lock().await;
        Ok(Analytics::compute(&store.reviews, Timestamp::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::review::{ReviewFilter, PAGE_SIZE};

    fn review(id: &str, rating: Rating, text: &str, days_ago: i64) -> Review {
        Review {
            id: ReviewId::new(id),
            rating,
            review: text.to_string(),
            timestamp: Timestamp::now().minus_days(days_ago),
            ai_summary: String::new(),
            recommended_actions: vec![],
            ai_response: None,
        }
    }

    fn request(rating: Rating, text: &str) -> SubmitReviewRequest {
        SubmitReviewRequest {
            rating,
            review: text.to_string(),
        }
    }

    #[tokio::test]
    async fn submit_stores_review_and_replies() {
        let api = InMemoryReviewApi::new().with_ai_response("Thanks for the kind words!");

        let response = api
            .submit_review(&request(Rating::Four, "Great service, fast delivery."))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.ai_response, "Thanks for the kind words!");
        assert!(response.id.is_some());
        assert_eq!(api.review_count().await, 1);
    }

    #[tokio::test]
    async fn low_rating_gets_follow_up_action() {
        let api = InMemoryReviewApi::new();
        api.submit_review(&request(Rating::Two, "Cold food")).await.unwrap();

        let page = api.list_reviews(&ReviewFilter::new().query(PAGE_SIZE)).await.unwrap();

        assert_eq!(page.reviews[0].recommended_actions.len(), 2);
        assert_eq!(page.reviews[0].ai_summary, "Negative 2-star review.");
    }

    #[tokio::test]
    async fn list_filters_sorts_and_pages() {
        let api = InMemoryReviewApi::new().with_reviews(vec![
            review("old", Rating::Five, "Fast delivery", 3),
            review("new", Rating::Five, "Slow delivery", 1),
            review("other", Rating::Two, "Rude staff", 2),
        ]);

        let mut filter = ReviewFilter::new();
        filter.set_rating(Some(Rating::Five));
        let page = api.list_reviews(&filter.query(PAGE_SIZE)).await.unwrap();
        let ids: Vec<&str> = page.reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(page.total, Some(2));

        filter.set_search_term("SLOW");
        let page = api.list_reviews(&filter.query(PAGE_SIZE)).await.unwrap();
        assert_eq!(page.reviews.len(), 1);

        let page = api
            .list_reviews(&ReviewQuery { rating: None, search: None, limit: 2, offset: 2 })
            .await
            .unwrap();
        assert_eq!(page.reviews.len(), 1);
        assert_eq!(page.reviews[0].id.as_str(), "old");
    }

    #[tokio::test]
    async fn injected_failure_is_consumed_once() {
        let api = InMemoryReviewApi::new();
        api.fail_next(Endpoint::Analytics, ApiError::network("down")).await;

        assert!(api.get_analytics().await.is_err());
        assert!(api.get_analytics().await.is_ok());
        assert_eq!(api.call_count(Endpoint::Analytics).await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn scripted_delay_applies_to_next_call() {
        let api = InMemoryReviewApi::new();
        api.delay_next(Endpoint::ListReviews, Duration::from_secs(3)).await;

        let start = tokio::time::Instant::now();
        api.list_reviews(&ReviewFilter::new().query(PAGE_SIZE)).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(3));

        let start = tokio::time::Instant::now();
        api.list_reviews(&ReviewFilter::new().query(PAGE_SIZE)).await.unwrap();
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn analytics_cover_whole_corpus() {
        let api = InMemoryReviewApi::new().with_reviews(vec![
            review("a", Rating::Five, "x", 1),
            review("b", Rating::Three, "y", 10),
        ]);

        let analytics = api.get_analytics().await.unwrap();

        assert_eq!(analytics.total, 2);
        assert_eq!(analytics.avg_rating, 4.0);
        assert_eq!(analytics.recent_trends.last_7_days.count, 1);
        assert_eq!(analytics.recent_trends.previous_7_days.count, 1);
    }
}
