use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::store::Document;

/// Stored review record with the field names the store keeps.
///
/// `locationName` and `category` are copies taken from the location at
/// write time; they may drift from the location afterwards and are not
/// reconciled. `timestamp` is the writer's clock in epoch milliseconds,
/// not globally ordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub location_id: String,
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub reviewer_name: String,
    #[serde(default)]
    pub review_text: String,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub timestamp: i64,
}

impl Review {
    /// Decode a store document; records that do not fit are skipped with a
    /// warning so one bad entry cannot sink the batch.
    pub fn from_document(document: &Document) -> Option<Self> {
        match serde_json::from_value::<Self>(document.data.clone()) {
            Ok(mut review) => {
                review.id = document.id.clone();
                Some(review)
            }
            Err(err) => {
                tracing::warn!("Skipping malformed review '{}': {}", document.id, err);
                None
            }
        }
    }

    /// Creation instant as a UTC timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp)
            .single()
            .unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// Count and arithmetic-mean rating for a set of reviews.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    pub count: usize,
    /// Raw mean; 0 for an empty set. Display rounding happens at the edge.
    pub average: f64,
}

/// Per-location rating statistics from a single pass over a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRatingStats {
    pub location_id: String,
    pub count: usize,
    pub average: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_wire_fields() {
        let document = Document {
            id: "r1".to_string(),
            data: json!({
                "locationId": "p1",
                "locationName": "Pasar Gede",
                "reviewerName": "Budi Santoso",
                "reviewText": "Ramai tapi enak",
                "rating": 4,
                "category": "Kuliner",
                "timestamp": 1754200000000i64
            }),
        };

        let review = Review::from_document(&document).unwrap();
        assert_eq!(review.id, "r1");
        assert_eq!(review.location_id, "p1");
        assert_eq!(review.rating, 4);
        assert_eq!(review.created_at().timestamp_millis(), 1754200000000);
    }

    #[test]
    fn test_missing_fields_fall_back_like_the_original_reads() {
        let document = Document {
            id: "r2".to_string(),
            data: json!({"locationId": "p1"}),
        };

        let review = Review::from_document(&document).unwrap();
        assert_eq!(review.rating, 0);
        assert_eq!(review.reviewer_name, "");
        assert_eq!(review.created_at(), DateTime::UNIX_EPOCH);
    }
}
