//! Wire-format DTOs for the review API that differ from domain types.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::domain::foundation::Rating;
use crate::domain::review::{Analytics, RatingDistribution, RecentTrends};
use crate::ports::ApiError;

/// `GET /api/analytics` response body.
///
/// The distribution arrives as a JSON object keyed by "1".."5".
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsDto {
    pub avg_rating: f64,
    pub total: u64,
    #[serde(default)]
    pub distribution: BTreeMap<String, u64>,
    #[serde(default)]
    pub recent_trends: RecentTrends,
}

impl TryFrom<AnalyticsDto> for Analytics {
    type Error = ApiError;

    fn try_from(dto: AnalyticsDto) -> Result<Self, Self::Error> {
        let mut distribution = RatingDistribution::new();
        for (key, count) in dto.distribution {
            let rating: Rating = key
                .parse()
                .map_err(|e| ApiError::decode(format!("distribution key '{}': {}", key, e)))?;
            distribution.set(rating, count);
        }

        Ok(Analytics {
            avg_rating: dto.avg_rating,
            total: dto.total,
            distribution,
            recent_trends: dto.recent_trends,
        })
    }
}

/// Error body as sent by the API server.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Extracts a string `detail`; structured details are ignored.
    pub fn parse_detail(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        match parsed.detail? {
            serde_json::Value::String(detail) if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }
}
