use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::Stream;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::locations::services::LocationService;
use crate::features::reviews::dtos::{
    CreateReviewDto, LocationReviewsDto, ReviewResponseDto,
};
use crate::features::reviews::models::Review;
use crate::features::reviews::services::ReviewService;
use crate::shared::types::{ApiResponse, Meta};

/// Shared state for review routes
#[derive(Clone)]
pub struct ReviewState {
    pub review_service: Arc<ReviewService>,
    pub location_service: Arc<LocationService>,
}

/// Reviews grouped per location
///
/// One section per saved location, each with its rating summary, as the
/// review tab rendered them. Locations without reviews appear with an
/// empty section.
#[utoipa::path(
    get,
    path = "/api/reviews",
    responses(
        (status = 200, description = "Reviews grouped per location", body = ApiResponse<Vec<LocationReviewsDto>>),
    ),
    tag = "reviews"
)]
pub async fn list_grouped(
    State(state): State<ReviewState>,
) -> Result<Json<ApiResponse<Vec<LocationReviewsDto>>>> {
    let locations = state.location_service.list().await;
    let reviews = state.review_service.all().await;
    let total = reviews.len() as i64;

    let sections: Vec<LocationReviewsDto> = locations
        .into_iter()
        .map(|location| {
            let subset = ReviewService::reviews_for_location(&reviews, &location.id);
            let summary = ReviewService::rating_summary(&subset);
            LocationReviewsDto {
                location: location.into(),
                summary: summary.into(),
                reviews: subset.into_iter().cloned().map(Into::into).collect(),
            }
        })
        .collect();

    Ok(Json(ApiResponse::success(
        Some(sections),
        None,
        Some(Meta { total }),
    )))
}

/// Reviews for one location
#[utoipa::path(
    get,
    path = "/api/locations/{id}/reviews",
    params(
        ("id" = String, Path, description = "Location id")
    ),
    responses(
        (status = 200, description = "Reviews with summary", body = ApiResponse<LocationReviewsDto>),
        (status = 404, description = "Location not found")
    ),
    tag = "reviews"
)]
pub async fn list_for_location(
    State(state): State<ReviewState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LocationReviewsDto>>> {
    let location = state.location_service.get(&id).await?;
    let reviews = state.review_service.for_location(&id).await;

    let refs: Vec<&Review> = reviews.iter().collect();
    let summary = ReviewService::rating_summary(&refs);

    Ok(Json(ApiResponse::success(
        Some(LocationReviewsDto {
            location: location.into(),
            summary: summary.into(),
            reviews: reviews.into_iter().map(Into::into).collect(),
        }),
        None,
        None,
    )))
}

/// Submit a review
///
/// Blank fields and out-of-range ratings are rejected before any write is
/// issued; the location's name and category are copied onto the review.
#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewDto,
    responses(
        (status = 200, description = "Review stored", body = ApiResponse<ReviewResponseDto>),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Location not found")
    ),
    tag = "reviews"
)]
pub async fn create_review(
    State(state): State<ReviewState>,
    AppJson(dto): AppJson<CreateReviewDto>,
) -> Result<Json<ApiResponse<ReviewResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))?;

    let review = state.review_service.create(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(review.into()),
        Some("Review berhasil ditambahkan".to_string()),
        None,
    )))
}

/// Delete a review
#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    params(
        ("id" = String, Path, description = "Review id")
    ),
    responses(
        (status = 200, description = "Review deleted"),
        (status = 404, description = "Review not found")
    ),
    tag = "reviews"
)]
pub async fn delete_review(
    State(state): State<ReviewState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state.review_service.delete(&id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Review dihapus".to_string()),
        None,
    )))
}

/// Live snapshot stream for reviews
#[utoipa::path(
    get,
    path = "/api/reviews/live",
    responses(
        (status = 200, description = "SSE stream of review snapshots"),
    ),
    tag = "reviews"
)]
pub async fn stream_reviews(
    State(state): State<ReviewState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let stream = WatchStream::new(state.review_service.watch()).map(|documents| {
        let snapshot: Vec<ReviewResponseDto> = documents
            .iter()
            .filter_map(Review::from_document)
            .map(Into::into)
            .collect();
        Ok(Event::default()
            .event("snapshot")
            .json_data(&snapshot)
            .unwrap_or_else(|_| Event::default()))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
