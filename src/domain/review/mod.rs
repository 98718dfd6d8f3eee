//! Review module - customer reviews and the state the dashboards derive
//! from them.
//!
//! - `review` - the review record and its identifier
//! - `analytics` - corpus-wide aggregate snapshot
//! - `card` - per-review presentation with expand/collapse
//! - `filter` - admin filter, search and pagination state
//! - `charts` - chart inputs derived from analytics
//! - `submission` - customer draft and submit status machine

mod analytics;
mod card;
mod charts;
mod filter;
#[allow(clippy::module_inception)]
mod review;
mod submission;

pub use analytics::{Analytics, RatingDistribution, RecentTrends, TrendDirection, TrendWindow};
pub use card::{ReviewCard, TRUNCATE_AT};
pub use charts::{distribution_bars, trend_points, AnalyticsSummary, DistributionBar, TrendPoint};
pub use filter::{rating_filter_options, Pagination, ReviewFilter, ReviewQuery, PAGE_SIZE};
pub use review::{Review, ReviewId};
pub use submission::{DraftError, SubmissionDraft, SubmissionStatus, SubmitReviewRequest};
