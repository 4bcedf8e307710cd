use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::locations::dtos::LocationResponseDto;
use crate::features::reviews::models::{RatingSummary, Review};
use crate::shared::geo::round2;
use crate::shared::validation::validate_not_blank;

/// Response DTO for a review
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponseDto {
    pub id: String,
    pub location_id: String,
    /// Location name as it was when the review was written
    pub location_name: String,
    pub reviewer_name: String,
    pub review_text: String,
    pub rating: i32,
    /// Location category as it was when the review was written
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponseDto {
    fn from(r: Review) -> Self {
        let created_at = r.created_at();
        Self {
            id: r.id,
            location_id: r.location_id,
            location_name: r.location_name,
            reviewer_name: r.reviewer_name,
            review_text: r.review_text,
            rating: r.rating,
            category: r.category,
            created_at,
        }
    }
}

/// Review count plus two-decimal average rating
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatingSummaryDto {
    pub count: i64,
    /// 0 when the location has no reviews
    pub average_rating: f64,
}

impl From<RatingSummary> for RatingSummaryDto {
    fn from(summary: RatingSummary) -> Self {
        Self {
            count: summary.count as i64,
            average_rating: round2(summary.average),
        }
    }
}

/// One location together with its reviews and summary (review tab section)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationReviewsDto {
    pub location: LocationResponseDto,
    pub summary: RatingSummaryDto,
    pub reviews: Vec<ReviewResponseDto>,
}

/// Request DTO for submitting a review
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReviewDto {
    #[validate(length(min = 1, message = "Location id is required"))]
    pub location_id: String,
    #[validate(custom(function = validate_not_blank))]
    pub reviewer_name: String,
    #[validate(custom(function = validate_not_blank))]
    pub review_text: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
}
