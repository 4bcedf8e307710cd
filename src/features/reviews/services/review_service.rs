use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;

use crate::core::error::{AppError, Result};
use crate::features::locations::models::Location;
use crate::features::reviews::dtos::CreateReviewDto;
use crate::features::reviews::models::{LocationRatingStats, RatingSummary, Review};
use crate::modules::store::{Document, DocumentStore};
use crate::shared::constants::{POINTS_COLLECTION, REVIEWS_COLLECTION};

/// Service for location reviews
pub struct ReviewService {
    store: Arc<dyn DocumentStore>,
}

impl ReviewService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    // ------------------------------------------------------------------
    // Pure aggregation over snapshots
    // ------------------------------------------------------------------

    /// Reviews referencing the given location, input order preserved.
    /// A dangling id simply yields an empty subset.
    pub fn reviews_for_location<'a>(reviews: &'a [Review], location_id: &str) -> Vec<&'a Review> {
        reviews
            .iter()
            .filter(|review| review.location_id == location_id)
            .collect()
    }

    /// Count and mean rating for a subset; an empty subset yields a zero
    /// summary, never a division error.
    pub fn rating_summary(reviews: &[&Review]) -> RatingSummary {
        if reviews.is_empty() {
            return RatingSummary::default();
        }
        let sum: i64 = reviews.iter().map(|review| i64::from(review.rating)).sum();
        RatingSummary {
            count: reviews.len(),
            average: sum as f64 / reviews.len() as f64,
        }
    }

    /// Per-location statistics in one pass over the whole snapshot,
    /// ordered by first appearance of each location id.
    ///
    /// The mean is maintained incrementally:
    /// `new = (old * count + rating) / (count + 1)`.
    pub fn stats_by_location(reviews: &[Review]) -> Vec<LocationRatingStats> {
        let mut order: Vec<String> = Vec::new();
        let mut running: HashMap<String, (usize, f64)> = HashMap::new();

        for review in reviews {
            let entry = running
                .entry(review.location_id.clone())
                .or_insert_with(|| {
                    order.push(review.location_id.clone());
                    (0, 0.0)
                });
            entry.1 =
                (entry.1 * entry.0 as f64 + f64::from(review.rating)) / (entry.0 as f64 + 1.0);
            entry.0 += 1;
        }

        order
            .into_iter()
            .map(|location_id| {
                let (count, average) = running[&location_id];
                LocationRatingStats {
                    location_id,
                    count,
                    average,
                }
            })
            .collect()
    }

    /// Highest-rated reviews, truncated to `limit`.
    ///
    /// The sort is stable, so equal ratings keep their snapshot order.
    /// This ranks individual reviews, not locations: one location can hold
    /// several slots when more than one of its reviews rates highly.
    pub fn top_reviews(reviews: &[Review], limit: usize) -> Vec<&Review> {
        let mut ranked: Vec<&Review> = reviews.iter().collect();
        ranked.sort_by(|a, b| b.rating.cmp(&a.rating));
        ranked.truncate(limit);
        ranked
    }

    // ------------------------------------------------------------------
    // Store-backed operations
    // ------------------------------------------------------------------

    /// All decodable reviews. A failed remote read is logged and shown as
    /// an empty snapshot rather than an error.
    pub async fn all(&self) -> Vec<Review> {
        let documents = match self.store.snapshot(REVIEWS_COLLECTION).await {
            Ok(documents) => documents,
            Err(err) => {
                tracing::error!("Failed to read reviews: {}", err);
                Vec::new()
            }
        };
        documents.iter().filter_map(Review::from_document).collect()
    }

    /// Reviews for one location, snapshot order preserved.
    pub async fn for_location(&self, location_id: &str) -> Vec<Review> {
        self.all()
            .await
            .into_iter()
            .filter(|review| review.location_id == location_id)
            .collect()
    }

    /// Submit a review. The referenced location must exist; its name and
    /// category are copied onto the review at write time.
    pub async fn create(&self, dto: CreateReviewDto) -> Result<Review> {
        let location = self.find_location(&dto.location_id).await?;

        let review = Review {
            id: String::new(),
            location_id: location.id.clone(),
            location_name: location.name.clone(),
            reviewer_name: dto.reviewer_name.trim().to_string(),
            review_text: dto.review_text.trim().to_string(),
            rating: dto.rating,
            category: location.category.clone(),
            timestamp: Utc::now().timestamp_millis(),
        };

        let data = serde_json::to_value(&review).map_err(|e| AppError::Internal(e.to_string()))?;
        let id = self.store.insert(REVIEWS_COLLECTION, data).await?;
        tracing::info!(
            "Review created: id={}, location={}, rating={}",
            id,
            review.location_id,
            review.rating
        );

        Ok(Review { id, ..review })
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.remove(REVIEWS_COLLECTION, id).await?;
        tracing::info!("Review deleted: id={}", id);
        Ok(())
    }

    /// Live snapshot subscription for the `reviews` collection.
    pub fn watch(&self) -> watch::Receiver<Vec<Document>> {
        self.store.watch(REVIEWS_COLLECTION)
    }

    async fn find_location(&self, id: &str) -> Result<Location> {
        let documents = self.store.snapshot(POINTS_COLLECTION).await?;
        documents
            .iter()
            .filter_map(Location::from_document)
            .find(|location| location.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Location '{}' not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::store::MemoryStore;
    use crate::shared::test_helpers::insert_point;

    fn review(id: &str, location_id: &str, rating: i32) -> Review {
        Review {
            id: id.to_string(),
            location_id: location_id.to_string(),
            location_name: String::new(),
            reviewer_name: String::new(),
            review_text: String::new(),
            rating,
            category: String::new(),
            timestamp: 0,
        }
    }

    #[test]
    fn test_filter_preserves_order_and_tolerates_dangling_ids() {
        let reviews = vec![
            review("a", "p1", 5),
            review("b", "p2", 3),
            review("c", "p1", 4),
        ];

        let subset = ReviewService::reviews_for_location(&reviews, "p1");
        let ids: Vec<&str> = subset.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);

        assert!(ReviewService::reviews_for_location(&reviews, "deleted").is_empty());
    }

    #[test]
    fn test_summary_matches_spec_scenario() {
        let reviews = vec![
            review("a", "p1", 4),
            review("b", "p1", 2),
            review("c", "p1", 5),
        ];
        let subset = ReviewService::reviews_for_location(&reviews, "p1");

        let summary = ReviewService::rating_summary(&subset);
        assert_eq!(summary.count, 3);
        assert_eq!((summary.average * 100.0).round() / 100.0, 3.67);
    }

    #[test]
    fn test_empty_summary_is_exactly_zero() {
        let summary = ReviewService::rating_summary(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average, 0.0);
        assert!(!summary.average.is_nan());
    }

    #[test]
    fn test_stats_by_location_keeps_first_appearance_order() {
        let reviews = vec![
            review("a", "p2", 4),
            review("b", "p1", 2),
            review("c", "p2", 5),
            review("d", "p3", 1),
        ];

        let stats = ReviewService::stats_by_location(&reviews);
        let order: Vec<&str> = stats.iter().map(|s| s.location_id.as_str()).collect();
        assert_eq!(order, ["p2", "p1", "p3"]);
        assert_eq!(stats[0].count, 2);
        assert!((stats[0].average - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_incremental_stats_agree_with_batch_average() {
        let reviews = vec![
            review("a", "p1", 4),
            review("b", "p2", 2),
            review("c", "p1", 5),
            review("d", "p2", 3),
            review("e", "p1", 1),
            review("f", "p3", 5),
        ];

        let stats = ReviewService::stats_by_location(&reviews);
        let weighted_sum: f64 = stats
            .iter()
            .map(|s| s.average * s.count as f64)
            .sum();
        let total: usize = stats.iter().map(|s| s.count).sum();

        let everything: Vec<&Review> = reviews.iter().collect();
        let overall = ReviewService::rating_summary(&everything);

        assert_eq!(total, overall.count);
        assert!((weighted_sum / total as f64 - overall.average).abs() < 1e-9);
    }

    #[test]
    fn test_top_reviews_is_stable_and_truncates() {
        let reviews = vec![
            review("a", "p1", 5),
            review("b", "p2", 5),
            review("c", "p3", 3),
            review("d", "p4", 4),
        ];

        let top = ReviewService::top_reviews(&reviews, 3);
        let ids: Vec<&str> = top.iter().map(|r| r.id.as_str()).collect();
        // ties keep snapshot order: a before b
        assert_eq!(ids, ["a", "b", "d"]);
    }

    #[test]
    fn test_top_reviews_returns_everything_when_short() {
        let reviews = vec![review("a", "p1", 2)];
        assert_eq!(ReviewService::top_reviews(&reviews, 3).len(), 1);
    }

    #[tokio::test]
    async fn test_create_copies_location_name_and_category() {
        let store = Arc::new(MemoryStore::new());
        let location_id = insert_point(&store, "Galabo", "-7.5690,110.8330", "Kuliner").await;
        let service = ReviewService::new(store);

        let created = service
            .create(CreateReviewDto {
                location_id: location_id.clone(),
                reviewer_name: "  Budi Santoso  ".to_string(),
                review_text: "Wajib dicoba".to_string(),
                rating: 5,
            })
            .await
            .unwrap();

        assert_eq!(created.location_name, "Galabo");
        assert_eq!(created.category, "Kuliner");
        assert_eq!(created.reviewer_name, "Budi Santoso");

        let stored = service.for_location(&location_id).await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].rating, 5);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_location() {
        let service = ReviewService::new(Arc::new(MemoryStore::new()));

        let result = service
            .create(CreateReviewDto {
                location_id: "missing".to_string(),
                reviewer_name: "Budi".to_string(),
                review_text: "??".to_string(),
                rating: 3,
            })
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
