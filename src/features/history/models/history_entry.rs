use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::store::Document;

/// Stored visit record with the field names the store keeps.
///
/// `visitedAt` travels as an RFC 3339 string, matching the instants the
/// mobile app wrote with `toISOString()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub coordinates: String,
    #[serde(default = "unix_epoch")]
    pub visited_at: DateTime<Utc>,
}

fn unix_epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

impl HistoryEntry {
    /// Decode a store document; records that do not fit are skipped with a
    /// warning so one bad entry cannot sink the batch.
    pub fn from_document(document: &Document) -> Option<Self> {
        match serde_json::from_value::<Self>(document.data.clone()) {
            Ok(mut entry) => {
                entry.id = document.id.clone();
                Some(entry)
            }
            Err(err) => {
                tracing::warn!("Skipping malformed history entry '{}': {}", document.id, err);
                None
            }
        }
    }
}
