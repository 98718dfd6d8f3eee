//! AdminDashboard - review list, filters and analytics with periodic refresh.
//!
//! Every change to the rating filter, search term or page starts a fetch
//! cycle: the review list and the analytics snapshot are read concurrently
//! and applied together. A poll timer repeats the reads for the current
//! filter. Each cycle carries the generation number current when it was
//! issued; results from a superseded generation are dropped.
//!
//! Read failures are logged and leave the previous data in place.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use super::scheduler::ScheduledTask;
use crate::domain::foundation::Rating;
use crate::domain::review::{
    distribution_bars, rating_filter_options, trend_points, Analytics, AnalyticsSummary,
    DistributionBar, Pagination, Review, ReviewCard, ReviewFilter, ReviewId, ReviewQuery,
    TrendPoint, PAGE_SIZE,
};
use crate::ports::ReviewApi;

/// Default period of the background refresh.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Tunables for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminDashboardSettings {
    pub poll_interval: Duration,
    pub page_size: u32,
}

impl Default for AdminDashboardSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            page_size: PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleKind {
    /// Triggered by mount or a filter/page change; owns the loading flag.
    Load,
    /// Triggered by the poll timer.
    Poll,
}

#[derive(Debug, Default)]
struct AdminState {
    reviews: Vec<Review>,
    analytics: Option<Analytics>,
    loading: bool,
    filter: ReviewFilter,
    expanded: HashSet<ReviewId>,
}

struct Shared {
    api: Arc<dyn ReviewApi>,
    state: RwLock<AdminState>,
    generation: AtomicU64,
    page_size: u32,
}

impl Shared {
    async fn refresh(&self) {
        let generation = self.generation.load(Ordering::SeqCst);
        let query = self.state.read().await.filter.query(self.page_size);
        self.run_cycle(generation, query, CycleKind::Poll).await;
    }

    async fn run_cycle(&self, generation: u64, query: ReviewQuery, kind: CycleKind) {
        tracing::debug!(generation, ?kind, ?query, "Starting fetch cycle");

        let (reviews, analytics) =
            futures::join!(self.api.list_reviews(&query), self.api.get_analytics());

        let mut state = self.state.write().await;
        let current = self.generation.load(Ordering::SeqCst);
        if current != generation {
            tracing::debug!(generation, current, "Discarding stale fetch cycle");
            return;
        }

        match reviews {
            Ok(page) => {
                state.expanded.retain(|id| page.reviews.iter().any(|r| &r.id == id));
                state.reviews = page.reviews;
            }
            Err(e) => tracing::warn!(error = %e, "Error fetching reviews"),
        }
        match analytics {
            Ok(snapshot) => state.analytics = Some(snapshot),
            Err(e) => tracing::warn!(error = %e, "Error fetching analytics"),
        }
        if kind == CycleKind::Load {
            state.loading = false;
        }
    }
}

/// "No reviews found" message with its hint line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
}

/// Snapshot of everything the admin view shows.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminDashboardView {
    /// Only true before the first analytics snapshot arrives.
    pub show_loading: bool,
    pub summary: Option<AnalyticsSummary>,
    pub distribution: Vec<DistributionBar>,
    pub trend: Vec<TrendPoint>,
    pub rating_filter: Option<Rating>,
    pub filter_options: Vec<(Option<Rating>, String)>,
    pub search_term: String,
    pub cards: Vec<ReviewCard>,
    pub empty_state: Option<EmptyState>,
    pub pagination: Option<Pagination>,
}

/// Admin dashboard bound to a `ReviewApi`. Dropping it stops polling.
pub struct AdminDashboard {
    shared: Arc<Shared>,
    _poller: ScheduledTask,
}

impl AdminDashboard {
    /// Starts the poll timer and runs the initial fetch cycle.
    pub async fn mount(api: Arc<dyn ReviewApi>, settings: AdminDashboardSettings) -> Self {
        let shared = Arc::new(Shared {
            api,
            state: RwLock::new(AdminState::default()),
            generation: AtomicU64::new(0),
            page_size: settings.page_size,
        });

        let polled = shared.clone();
        let poller = ScheduledTask::every("admin-poll", settings.poll_interval, move || {
            let shared = polled.clone();
            async move { shared.refresh().await }
        });

        let dashboard = Self {
            shared,
            _poller: poller,
        };
        dashboard.change_filter(|_| {}, true).await;
        dashboard
    }

    /// Selects a rating filter (None = all ratings) and returns to page 1.
    pub async fn set_rating_filter(&self, rating: Option<Rating>) -> bool {
        self.change_filter(|state| state.filter.set_rating(rating), false)
            .await
    }

    /// Sets the search term and returns to page 1.
    pub async fn set_search_term(&self, term: impl Into<String>) -> bool {
        let term = term.into();
        self.change_filter(|state| state.filter.set_search_term(term), false)
            .await
    }

    /// Advances one page unless the current page was short.
    pub async fn next_page(&self) -> bool {
        let page_size = self.shared.page_size;
        self.change_filter(
            |state| {
                let rows = state.reviews.len();
                state.filter.next_page(rows, page_size);
            },
            false,
        )
        .await
    }

    /// Goes back one page unless already on page 1.
    pub async fn previous_page(&self) -> bool {
        self.change_filter(
            |state| {
                state.filter.previous_page();
            },
            false,
        )
        .await
    }

    /// Jumps directly to `page` (at least 1).
    pub async fn go_to_page(&self, page: u32) -> bool {
        self.change_filter(|state| state.filter.set_page(page), false)
            .await
    }

    /// Re-reads both endpoints for the current filter, as the poll timer does.
    pub async fn refresh(&self) {
        self.shared.refresh().await;
    }

    /// Expands or collapses one review card. Returns false if not shown.
    pub async fn toggle_review(&self, id: &ReviewId) -> bool {
        let mut state = self.shared.state.write().await;
        let Some(review) = state.reviews.iter().find(|r| &r.id == id) else {
            return false;
        };
        let mut card = ReviewCard::new(review.clone()).with_expanded(state.expanded.contains(id));
        if !card.is_truncatable() {
            return false;
        }
        card.toggle();
        if card.is_expanded() {
            state.expanded.insert(id.clone());
        } else {
            state.expanded.remove(id);
        }
        true
    }

    pub async fn page(&self) -> u32 {
        self.shared.state.read().await.filter.page()
    }

    pub async fn is_loading(&self) -> bool {
        self.shared.state.read().await.loading
    }

    /// Applies a state change and starts a load cycle if the filter moved.
    async fn change_filter<F>(&self, change: F, force: bool) -> bool
    where
        F: FnOnce(&mut AdminState),
    {
        let shared = &self.shared;
        let (generation, query) = {
            let mut state = shared.state.write().await;
            let before = state.filter.clone();
            change(&mut state);
            if !force && state.filter == before {
                return false;
            }
            state.loading = true;
            let generation = shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            (generation, state.filter.query(shared.page_size))
        };

        shared.run_cycle(generation, query, CycleKind::Load).await;
        true
    }

    pub async fn view(&self) -> AdminDashboardView {
        let state = self.shared.state.read().await;
        let analytics = state.analytics.as_ref();

        let cards: Vec<ReviewCard> = state
            .reviews
            .iter()
            .map(|r| ReviewCard::new(r.clone()).with_expanded(state.expanded.contains(&r.id)))
            .collect();

        let empty_state = cards.is_empty().then(|| EmptyState {
            title: "No reviews found",
            hint: if state.filter.is_active() {
                "Try adjusting your filters"
            } else {
                "Reviews will appear here once submitted"
            },
        });

        let pagination = (!cards.is_empty())
            .then(|| Pagination::new(state.filter.page(), cards.len(), self.shared.page_size));

        AdminDashboardView {
            show_loading: state.loading && analytics.is_none(),
            summary: analytics.map(AnalyticsSummary::from_analytics),
            distribution: analytics.map(distribution_bars).unwrap_or_default(),
            trend: analytics.map(|a| trend_points(a).to_vec()).unwrap_or_default(),
            rating_filter: state.filter.rating(),
            filter_options: rating_filter_options(),
            search_term: state.filter.search_term().to_string(),
            cards,
            empty_state,
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{ApiCall, Endpoint, InMemoryReviewApi};
    use crate::domain::foundation::Timestamp;
    use crate::ports::ApiError;
    use tokio::time;

    fn reviews(count: usize, rating: Rating) -> Vec<Review> {
        (0..count)
            .map(|i| Review {
                id: ReviewId::new(format!("{}-{}", rating, i)),
                rating,
                review: format!("Review number {}", i),
                timestamp: Timestamp::now().minus_days(i as i64 % 20),
                ai_summary: "Summary".to_string(),
                recommended_actions: vec![],
                ai_response: None,
            })
            .collect()
    }

    fn list_queries(calls: &[ApiCall]) -> Vec<ReviewQuery> {
        calls
            .iter()
            .filter_map(|c| match c {
                ApiCall::ListReviews(q) => Some(q.clone()),
                _ => None,
            })
            .collect()
    }

    async fn mount(api: &Arc<InMemoryReviewApi>) -> AdminDashboard {
        AdminDashboard::mount(api.clone(), AdminDashboardSettings::default()).await
    }

    #[tokio::test(start_paused = true)]
    async fn mount_loads_first_page_and_analytics() {
        let api = Arc::new(InMemoryReviewApi::new().with_reviews(reviews(25, Rating::Four)));

        let dashboard = mount(&api).await;
        let view = dashboard.view().await;

        assert!(!view.show_loading);
        assert!(!dashboard.is_loading().await);
        assert_eq!(view.cards.len(), 10);
        assert_eq!(view.summary.unwrap().total_reviews, 25);
        assert_eq!(view.distribution.len(), 5);
        assert_eq!(view.trend.len(), 2);
        assert_eq!(
            list_queries(&api.calls().await),
            vec![ReviewQuery { rating: None, search: None, limit: 10, offset: 0 }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn filter_change_on_page_three_fetches_page_one() {
        let api = Arc::new(InMemoryReviewApi::new().with_reviews(reviews(40, Rating::Five)));
        let dashboard = mount(&api).await;
        assert!(dashboard.next_page().await);
        assert!(dashboard.next_page().await);
        assert_eq!(dashboard.page().await, 3);

        dashboard.set_rating_filter(Some(Rating::Five)).await;

        assert_eq!(dashboard.page().await, 1);
        let last = list_queries(&api.calls().await).pop().unwrap();
        assert_eq!(last.offset, 0);
        assert_eq!(last.rating, Some(Rating::Five));

        dashboard.go_to_page(3).await;
        dashboard.set_search_term("number").await;
        let last = list_queries(&api.calls().await).pop().unwrap();
        assert_eq!(last.offset, 0);
        assert_eq!(last.search.as_deref(), Some("number"));
    }

    #[tokio::test(start_paused = true)]
    async fn pagination_controls_follow_page_and_row_count() {
        let api = Arc::new(InMemoryReviewApi::new().with_reviews(reviews(15, Rating::Three)));
        let dashboard = mount(&api).await;

        let pagination = dashboard.view().await.pagination.unwrap();
        assert!(pagination.previous_disabled);
        assert!(!pagination.next_disabled);

        assert!(dashboard.next_page().await);
        let pagination = dashboard.view().await.pagination.unwrap();
        assert_eq!(pagination.page, 2);
        assert!(!pagination.previous_disabled);
        assert!(pagination.next_disabled);

        assert!(!dashboard.next_page().await);
        assert_eq!(dashboard.page().await, 2);

        assert!(dashboard.previous_page().await);
        assert!(!dashboard.previous_page().await);
        assert_eq!(dashboard.page().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn unchanged_filter_does_not_refetch() {
        let api = Arc::new(InMemoryReviewApi::new());
        let dashboard = mount(&api).await;

        assert!(!dashboard.set_rating_filter(None).await);
        assert!(!dashboard.set_search_term("").await);
        assert_eq!(api.call_count(Endpoint::ListReviews).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_state_hint_depends_on_filters() {
        let api = Arc::new(InMemoryReviewApi::new());
        let dashboard = mount(&api).await;

        let view = dashboard.view().await;
        let empty = view.empty_state.unwrap();
        assert_eq!(empty.title, "No reviews found");
        assert_eq!(empty.hint, "Reviews will appear here once submitted");
        assert!(view.pagination.is_none());

        dashboard.set_search_term("anything").await;
        let empty = dashboard.view().await.empty_state.unwrap();
        assert_eq!(empty.hint, "Try adjusting your filters");
    }

    #[tokio::test(start_paused = true)]
    async fn poll_timer_refreshes_every_thirty_seconds_without_loading() {
        let api = Arc::new(InMemoryReviewApi::new());
        let dashboard = mount(&api).await;
        assert_eq!(api.call_count(Endpoint::Analytics).await, 1);

        time::sleep(Duration::from_secs(29)).await;
        assert_eq!(api.call_count(Endpoint::Analytics).await, 1);

        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(api.call_count(Endpoint::Analytics).await, 2);
        assert_eq!(api.call_count(Endpoint::ListReviews).await, 2);
        assert!(!dashboard.is_loading().await);

        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(api.call_count(Endpoint::Analytics).await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_dashboard_stops_polling() {
        let api = Arc::new(InMemoryReviewApi::new());
        let dashboard = mount(&api).await;

        drop(dashboard);
        time::sleep(Duration::from_secs(120)).await;

        assert_eq!(api.call_count(Endpoint::Analytics).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_reads_keep_previous_snapshot() {
        let api = Arc::new(InMemoryReviewApi::new().with_reviews(reviews(3, Rating::Two)));
        let dashboard = mount(&api).await;
        let before = dashboard.view().await;

        api.fail_next(Endpoint::ListReviews, ApiError::network("down")).await;
        api.fail_next(Endpoint::Analytics, ApiError::Status { status: 500, detail: None })
            .await;
        dashboard.refresh().await;

        let after = dashboard.view().await;
        assert_eq!(after.cards, before.cards);
        assert_eq!(after.summary, before.summary);
    }

    #[tokio::test(start_paused = true)]
    async fn one_failed_read_does_not_block_the_other() {
        let api = Arc::new(InMemoryReviewApi::new());
        api.fail_next(Endpoint::Analytics, ApiError::network("down")).await;
        let dashboard = mount(&api).await;

        let view = dashboard.view().await;
        assert!(view.summary.is_none());
        assert!(!dashboard.is_loading().await);
        assert!(!view.show_loading);
        assert!(view.empty_state.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn loading_indicator_only_before_first_snapshot() {
        let api = Arc::new(InMemoryReviewApi::new());
        api.fail_next(Endpoint::Analytics, ApiError::network("down")).await;
        let dashboard = mount(&api).await;

        api.delay_next(Endpoint::ListReviews, Duration::from_secs(1)).await;
        api.delay_next(Endpoint::Analytics, Duration::from_secs(1)).await;
        let (_, (loading, view)) = tokio::join!(dashboard.set_search_term("late"), async {
            time::sleep(Duration::from_millis(100)).await;
            (dashboard.is_loading().await, dashboard.view().await)
        });
        assert!(loading);
        assert!(view.show_loading);

        api.delay_next(Endpoint::ListReviews, Duration::from_secs(1)).await;
        api.delay_next(Endpoint::Analytics, Duration::from_secs(1)).await;
        let (_, (loading, view)) = tokio::join!(dashboard.set_search_term("slow"), async {
            time::sleep(Duration::from_millis(100)).await;
            (dashboard.is_loading().await, dashboard.view().await)
        });
        assert!(loading);
        assert!(!view.show_loading);
        assert!(view.summary.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_cycle_results_are_discarded() {
        let api = Arc::new(InMemoryReviewApi::new().with_reviews(
            reviews(4, Rating::One).into_iter().chain(reviews(2, Rating::Five)),
        ));
        let dashboard = mount(&api).await;

        api.delay_next(Endpoint::ListReviews, Duration::from_secs(5)).await;
        api.delay_next(Endpoint::Analytics, Duration::from_secs(5)).await;

        let (slow, fast) = tokio::join!(
            dashboard.set_rating_filter(Some(Rating::One)),
            async {
                time::sleep(Duration::from_millis(100)).await;
                dashboard.set_rating_filter(Some(Rating::Five)).await
            }
        );
        assert!(slow && fast);

        let view = dashboard.view().await;
        assert_eq!(view.rating_filter, Some(Rating::Five));
        assert_eq!(view.cards.len(), 2);
        assert!(view.cards.iter().all(|c| c.review().rating == Rating::Five));
        assert!(!dashboard.is_loading().await);
    }

    #[tokio::test(start_paused = true)]
    async fn toggling_a_long_review_persists_across_refresh() {
        let mut long = reviews(1, Rating::Four);
        long[0].review = "x".repeat(151);
        let id = long[0].id.clone();
        let api = Arc::new(InMemoryReviewApi::new().with_reviews(long));
        let dashboard = mount(&api).await;

        assert_eq!(dashboard.view().await.cards[0].toggle_label(), Some("Show more"));
        assert!(dashboard.toggle_review(&id).await);
        dashboard.refresh().await;

        let card = &dashboard.view().await.cards[0];
        assert!(card.is_expanded());
        assert_eq!(card.toggle_label(), Some("Show less"));
        assert!(!dashboard.toggle_review(&ReviewId::new("missing")).await);
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_collapses_again_and_ignores_short_reviews() {
        let mut mixed = reviews(2, Rating::Three);
        mixed[0].review = "y".repeat(200);
        let long_id = mixed[0].id.clone();
        let short_id = mixed[1].id.clone();
        let api = Arc::new(InMemoryReviewApi::new().with_reviews(mixed));
        let dashboard = mount(&api).await;

        assert!(dashboard.toggle_review(&long_id).await);
        assert!(dashboard.toggle_review(&long_id).await);
        assert!(!dashboard.toggle_review(&short_id).await);

        let view = dashboard.view().await;
        assert!(view.cards.iter().all(|c| !c.is_expanded()));
        let long = view.cards.iter().find(|c| c.review().id == long_id).unwrap();
        assert_eq!(long.toggle_label(), Some("Show more"));
    }
}
