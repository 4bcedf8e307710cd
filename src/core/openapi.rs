use utoipa::{Modify, OpenApi};

use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::history::{dtos as history_dtos, handlers as history_handlers};
use crate::features::locations::{dtos as locations_dtos, handlers as locations_handlers};
use crate::features::reviews::{dtos as reviews_dtos, handlers as reviews_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Locations
        locations_handlers::list_locations,
        locations_handlers::get_location,
        locations_handlers::create_location,
        locations_handlers::update_location,
        locations_handlers::delete_location,
        locations_handlers::list_markers,
        locations_handlers::get_distance,
        locations_handlers::record_visit,
        locations_handlers::stream_locations,
        // Reviews
        reviews_handlers::list_grouped,
        reviews_handlers::list_for_location,
        reviews_handlers::create_review,
        reviews_handlers::delete_review,
        reviews_handlers::stream_reviews,
        // History
        history_handlers::list_history,
        history_handlers::stream_history,
        // Dashboard
        dashboard_handlers::get_summary,
        dashboard_handlers::get_location_stats,
        dashboard_handlers::get_top_reviews,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Locations
            locations_dtos::LocationResponseDto,
            locations_dtos::CreateLocationDto,
            locations_dtos::UpdateLocationDto,
            locations_dtos::MarkerDto,
            locations_dtos::DistanceResponseDto,
            locations_dtos::VisitResponseDto,
            ApiResponse<Vec<locations_dtos::LocationResponseDto>>,
            ApiResponse<locations_dtos::LocationResponseDto>,
            ApiResponse<Vec<locations_dtos::MarkerDto>>,
            ApiResponse<locations_dtos::DistanceResponseDto>,
            ApiResponse<locations_dtos::VisitResponseDto>,
            // Reviews
            reviews_dtos::ReviewResponseDto,
            reviews_dtos::RatingSummaryDto,
            reviews_dtos::LocationReviewsDto,
            reviews_dtos::CreateReviewDto,
            ApiResponse<Vec<reviews_dtos::LocationReviewsDto>>,
            ApiResponse<reviews_dtos::LocationReviewsDto>,
            ApiResponse<reviews_dtos::ReviewResponseDto>,
            ApiResponse<Vec<reviews_dtos::ReviewResponseDto>>,
            // History
            history_dtos::HistoryEntryResponseDto,
            ApiResponse<Vec<history_dtos::HistoryEntryResponseDto>>,
            // Dashboard
            dashboard_dtos::DashboardSummaryDto,
            dashboard_dtos::LocationStatsDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
            ApiResponse<Vec<dashboard_dtos::LocationStatsDto>>,
        )
    ),
    tags(
        (name = "locations", description = "Saved tourism and culinary locations"),
        (name = "reviews", description = "Location reviews and rating aggregates"),
        (name = "history", description = "Visit history"),
        (name = "dashboard", description = "Public dashboard aggregates"),
    ),
    info(
        title = "Jelajah API",
        version = "0.1.0",
        description = "API documentation for Jelajah",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
