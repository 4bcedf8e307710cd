use std::sync::Arc;

use crate::features::dashboard::dtos::{DashboardSummaryDto, LocationStatsDto};
use crate::features::reviews::dtos::ReviewResponseDto;
use crate::features::reviews::models::Review;
use crate::features::reviews::services::ReviewService;
use crate::shared::constants::TOP_REVIEWS_LIMIT;
use crate::shared::geo::round2;

/// Service for public dashboard aggregates
///
/// Every call recomputes from a fresh review snapshot; there is no cached
/// or incremental state to invalidate.
pub struct DashboardService {
    reviews: Arc<ReviewService>,
}

impl DashboardService {
    pub fn new(reviews: Arc<ReviewService>) -> Self {
        Self { reviews }
    }

    /// Overall totals for the dashboard header.
    ///
    /// `total_locations` counts distinct reviewed location ids, including
    /// dangling ones, as the home screen did.
    pub async fn summary(&self) -> DashboardSummaryDto {
        let reviews = self.reviews.all().await;
        let stats = ReviewService::stats_by_location(&reviews);

        let everything: Vec<&Review> = reviews.iter().collect();
        let overall = ReviewService::rating_summary(&everything);

        DashboardSummaryDto {
            total_locations: stats.len() as i64,
            total_reviews: overall.count as i64,
            average_rating: round2(overall.average),
        }
    }

    /// Per-location rating stats in first-appearance order.
    pub async fn location_stats(&self) -> Vec<LocationStatsDto> {
        let reviews = self.reviews.all().await;
        ReviewService::stats_by_location(&reviews)
            .into_iter()
            .map(Into::into)
            .collect()
    }

    /// The top-3 review highlights, stable on rating ties.
    pub async fn top_reviews(&self) -> Vec<ReviewResponseDto> {
        let reviews = self.reviews.all().await;
        ReviewService::top_reviews(&reviews, TOP_REVIEWS_LIMIT)
            .into_iter()
            .cloned()
            .map(Into::into)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::store::MemoryStore;
    use crate::shared::test_helpers::{insert_point, insert_review};

    async fn service(store: Arc<MemoryStore>) -> DashboardService {
        DashboardService::new(Arc::new(ReviewService::new(store)))
    }

    #[tokio::test]
    async fn test_summary_counts_reviewed_locations() {
        let store = Arc::new(MemoryStore::new());
        let keraton = insert_point(&store, "Keraton", "-7.5754,110.8243", "Wisata").await;
        let galabo = insert_point(&store, "Galabo", "-7.5690,110.8330", "Kuliner").await;
        insert_point(&store, "Unreviewed", "-7.56,110.82", "Wisata").await;

        insert_review(&store, &keraton, 4).await;
        insert_review(&store, &keraton, 2).await;
        insert_review(&store, &galabo, 5).await;

        let summary = service(store).await.summary().await;
        assert_eq!(summary.total_locations, 2);
        assert_eq!(summary.total_reviews, 3);
        assert_eq!(summary.average_rating, 3.67);
    }

    #[tokio::test]
    async fn test_summary_of_empty_store_is_all_zero() {
        let summary = service(Arc::new(MemoryStore::new())).await.summary().await;
        assert_eq!(summary.total_locations, 0);
        assert_eq!(summary.total_reviews, 0);
        assert_eq!(summary.average_rating, 0.0);
    }

    #[tokio::test]
    async fn test_top_reviews_keep_snapshot_order_on_ties() {
        let store = Arc::new(MemoryStore::new());
        let keraton = insert_point(&store, "Keraton", "-7.5754,110.8243", "Wisata").await;
        let first = insert_review(&store, &keraton, 5).await;
        let second = insert_review(&store, &keraton, 5).await;
        insert_review(&store, &keraton, 3).await;
        insert_review(&store, &keraton, 4).await;

        let top = service(store).await.top_reviews().await;
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].id, first);
        assert_eq!(top[1].id, second);
        assert_eq!(top[2].rating, 4);
    }

    #[tokio::test]
    async fn test_stats_tolerate_dangling_location_ids() {
        let store = Arc::new(MemoryStore::new());
        // no matching point was ever stored
        insert_review(&store, "ghost-location", 4).await;

        let stats = service(store).await.location_stats().await;
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].location_id, "ghost-location");
        assert_eq!(stats[0].review_count, 1);
    }
}
