use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::locations::models::Location;
use crate::shared::validation::validate_coordinates;

/// Response DTO for a saved location
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationResponseDto {
    pub id: String,
    pub name: String,
    pub category: String,
    /// "lat,lon" as stored
    pub coordinates: String,
    pub accuracy: Option<String>,
}

impl From<Location> for LocationResponseDto {
    fn from(l: Location) -> Self {
        Self {
            id: l.id,
            name: l.name,
            category: l.category,
            coordinates: l.coordinates,
            accuracy: l.accuracy,
        }
    }
}

/// Request DTO for saving a new location
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLocationDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(custom(function = validate_coordinates))]
    pub coordinates: String,
    /// Defaults to "Wisata" when omitted
    pub category: Option<String>,
    /// Informational GPS accuracy, e.g. "5 m"
    pub accuracy: Option<String>,
}

/// Request DTO for editing an existing location
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateLocationDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(custom(function = validate_coordinates))]
    pub coordinates: String,
    /// Kept unchanged when omitted
    pub category: Option<String>,
    pub accuracy: Option<String>,
}

/// Map marker: a location whose coordinates parsed, with its rating summary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarkerDto {
    pub id: String,
    pub name: String,
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    pub review_count: i64,
    /// Arithmetic-mean rating rounded to two decimals; 0 without reviews
    pub average_rating: f64,
}

/// Distance from a caller-supplied origin to a stored location
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DistanceResponseDto {
    pub location_id: String,
    /// Echo of the parsed origin position
    pub from: String,
    /// Great-circle kilometers, two decimals
    pub distance_km: f64,
}

/// Result of recording a visit: the stored history entry plus a
/// Google Maps directions link
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VisitResponseDto {
    pub history_id: String,
    pub name: String,
    pub coordinates: String,
    pub visited_at: DateTime<Utc>,
    pub directions_url: String,
}
