//! Chart inputs derived from an analytics snapshot.

use super::{Analytics, TrendDirection};
use crate::domain::foundation::Rating;

/// One bar of the rating distribution chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionBar {
    pub rating: Rating,
    pub label: String,
    pub count: u64,
}

/// One point of the two-point trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub period: &'static str,
    pub avg_rating: f64,
    pub count: u64,
}

/// The headline numbers shown above the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSummary {
    pub average_rating: String,
    pub total_reviews: u64,
    pub trend: TrendDirection,
}

impl AnalyticsSummary {
    pub fn from_analytics(analytics: &Analytics) -> Self {
        Self {
            average_rating: format!("{:.2}", analytics.avg_rating),
            total_reviews: analytics.total,
            trend: analytics.recent_trends.direction(),
        }
    }

    pub fn trend_label(&self) -> &'static str {
        self.trend.label()
    }
}

/// Five bars in ascending rating order.
pub fn distribution_bars(analytics: &Analytics) -> Vec<DistributionBar> {
    analytics
        .distribution
        .iter()
        .map(|(rating, count)| DistributionBar {
            rating,
            label: rating.label(),
            count,
        })
        .collect()
}

/// "Previous 7 Days" followed by "Last 7 Days".
pub fn trend_points(analytics: &Analytics) -> [TrendPoint; 2] {
    let trends = &analytics.recent_trends;
    [
        TrendPoint {
            period: "Previous 7 Days",
            avg_rating: trends.previous_7_days.avg_rating,
            count: trends.previous_7_days.count,
        },
        TrendPoint {
            period: "Last 7 Days",
            avg_rating: trends.last_7_days.avg_rating,
            count: trends.last_7_days.count,
        },
    ]
}
