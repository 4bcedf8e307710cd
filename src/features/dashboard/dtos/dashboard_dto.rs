use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reviews::models::LocationRatingStats;
use crate::shared::geo::round2;

/// Overall numbers for the dashboard header
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummaryDto {
    /// Locations with at least one review
    pub total_locations: i64,
    pub total_reviews: i64,
    /// Mean over every review, two decimals; 0 without reviews
    pub average_rating: f64,
}

/// Rating statistics for one location
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationStatsDto {
    pub location_id: String,
    pub review_count: i64,
    pub average_rating: f64,
}

impl From<LocationRatingStats> for LocationStatsDto {
    fn from(stats: LocationRatingStats) -> Self {
        Self {
            location_id: stats.location_id,
            review_count: stats.count as i64,
            average_rating: round2(stats.average),
        }
    }
}
