use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::dashboard::dtos::{DashboardSummaryDto, LocationStatsDto};
use crate::features::dashboard::services::DashboardService;
use crate::features::reviews::dtos::ReviewResponseDto;
use crate::shared::types::{ApiResponse, Meta};

/// Overall totals for the dashboard header
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardSummaryDto>),
    ),
    tag = "dashboard"
)]
pub async fn get_summary(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>> {
    let summary = service.summary().await;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

/// Per-location rating statistics
#[utoipa::path(
    get,
    path = "/api/dashboard/locations",
    responses(
        (status = 200, description = "Per-location rating stats", body = ApiResponse<Vec<LocationStatsDto>>),
    ),
    tag = "dashboard"
)]
pub async fn get_location_stats(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<Vec<LocationStatsDto>>>> {
    let stats = service.location_stats().await;
    let total = stats.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(stats),
        None,
        Some(Meta { total }),
    )))
}

/// Top-3 review highlights
///
/// Ranks individual reviews by rating with stable ties, so one location
/// can appear more than once.
#[utoipa::path(
    get,
    path = "/api/dashboard/top-reviews",
    responses(
        (status = 200, description = "Highest rated reviews", body = ApiResponse<Vec<ReviewResponseDto>>),
    ),
    tag = "dashboard"
)]
pub async fn get_top_reviews(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<Vec<ReviewResponseDto>>>> {
    let top = service.top_reviews().await;
    Ok(Json(ApiResponse::success(Some(top), None, None)))
}
