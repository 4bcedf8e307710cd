use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::history::models::HistoryEntry;

/// Response DTO for a visit history entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntryResponseDto {
    pub id: String,
    pub name: String,
    pub coordinates: String,
    pub visited_at: DateTime<Utc>,
}

impl From<HistoryEntry> for HistoryEntryResponseDto {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            coordinates: entry.coordinates,
            visited_at: entry.visited_at,
        }
    }
}
