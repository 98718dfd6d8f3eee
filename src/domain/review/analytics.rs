//! Aggregate analytics snapshot for the whole review corpus.

use serde::{Deserialize, Serialize};

use super::Review;
use crate::domain::foundation::{Rating, Timestamp};

/// Number of reviews per star rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingDistribution([u64; 5]);

impl RatingDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for a single rating bucket.
    pub fn count(&self, rating: Rating) -> u64 {
        self.0[Self::index(rating)]
    }

    pub fn set(&mut self, rating: Rating, count: u64) {
        self.0[Self::index(rating)] = count;
    }

    pub fn increment(&mut self, rating: Rating) {
        self.0[Self::index(rating)] += 1;
    }

    /// Buckets in ascending rating order.
    pub fn iter(&self) -> impl Iterator<Item = (Rating, u64)> + '_ {
        Rating::ALL.into_iter().map(move |r| (r, self.count(r)))
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    fn index(rating: Rating) -> usize {
        rating.value() as usize - 1
    }
}

/// Average and count for one 7-day window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendWindow {
    pub avg_rating: f64,
    pub count: u64,
}

impl TrendWindow {
    fn from_ratings(ratings: &[Rating]) -> Self {
        Self {
            avg_rating: average(ratings),
            count: ratings.len() as u64,
        }
    }
}

/// Last-7-days versus previous-7-days comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentTrends {
    pub last_7_days: TrendWindow,
    pub previous_7_days: TrendWindow,
}

impl RecentTrends {
    /// Improving when the recent average is at least the previous one.
    pub fn direction(&self) -> TrendDirection {
        if self.last_7_days.avg_rating >= self.previous_7_days.avg_rating {
            TrendDirection::Improving
        } else {
            TrendDirection::Declining
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Improving,
    Declining,
}

impl TrendDirection {
    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Improving => "↑ Improving",
            TrendDirection::Declining => "↓ Declining",
        }
    }
}

/// Point-in-time analytics snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Analytics {
    pub avg_rating: f64,
    pub total: u64,
    pub distribution: RatingDistribution,
    pub recent_trends: RecentTrends,
}

impl Analytics {
    /// Computes a snapshot over `reviews` relative to `now`.
    ///
    /// Averages are rounded to two decimals and empty sets average to 0.
    pub fn compute(reviews: &[Review], now: Timestamp) -> Self {
        let mut distribution = RatingDistribution::new();
        for review in reviews {
            distribution.increment(review.rating);
        }

        let last_start = now.minus_days(7);
        let previous_start = now.minus_days(14);

        let last: Vec<Rating> = reviews
            .iter()
            .filter(|r| r.timestamp >= last_start)
            .map(|r| r.rating)
            .collect();
        let previous: Vec<Rating> = reviews
            .iter()
            .filter(|r| r.timestamp >= previous_start && r.timestamp < last_start)
            .map(|r| r.rating)
            .collect();
        let all: Vec<Rating> = reviews.iter().map(|r| r.rating).collect();

        Self {
            avg_rating: average(&all),
            total: reviews.len() as u64,
            distribution,
            recent_trends: RecentTrends {
                last_7_days: TrendWindow::from_ratings(&last),
                previous_7_days: TrendWindow::from_ratings(&previous),
            },
        }
    }
}

fn average(ratings: &[Rating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: u64 = ratings.iter().map(|r| u64::from(r.value())).sum();
    let avg = sum as f64 / ratings.len() as f64;
    (avg * 100.0).round() / 100.0
}
