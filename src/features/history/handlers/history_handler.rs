use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::Stream;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

use crate::core::error::Result;
use crate::features::history::dtos::HistoryEntryResponseDto;
use crate::features::history::models::HistoryEntry;
use crate::features::history::services::HistoryService;
use crate::shared::types::{ApiResponse, Meta};

/// List visit history, newest first
#[utoipa::path(
    get,
    path = "/api/history",
    responses(
        (status = 200, description = "Visit history, newest first", body = ApiResponse<Vec<HistoryEntryResponseDto>>),
    ),
    tag = "history"
)]
pub async fn list_history(
    State(service): State<Arc<HistoryService>>,
) -> Result<Json<ApiResponse<Vec<HistoryEntryResponseDto>>>> {
    let entries = service.list().await;
    let total = entries.len() as i64;
    let data: Vec<HistoryEntryResponseDto> = entries.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(data),
        None,
        Some(Meta { total }),
    )))
}

/// Live snapshot stream for visit history
#[utoipa::path(
    get,
    path = "/api/history/live",
    responses(
        (status = 200, description = "SSE stream of history snapshots"),
    ),
    tag = "history"
)]
pub async fn stream_history(
    State(service): State<Arc<HistoryService>>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let stream = WatchStream::new(service.watch()).map(|documents| {
        let snapshot: Vec<HistoryEntryResponseDto> = documents
            .iter()
            .filter_map(HistoryEntry::from_document)
            .map(Into::into)
            .collect();
        Ok(Event::default()
            .event("snapshot")
            .json_data(&snapshot)
            .unwrap_or_else(|_| Event::default()))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::history::routes;
    use crate::modules::store::MemoryStore;
    use crate::shared::test_helpers::insert_point;
    use crate::features::locations::models::Location;
    use axum_test::TestServer;
    use serde_json::Value;

    #[tokio::test]
    async fn test_list_after_recording_visits() {
        let store = Arc::new(MemoryStore::new());
        insert_point(&store, "Keraton", "-7.5754,110.8243", "Wisata").await;

        let service = Arc::new(HistoryService::new(store.clone()));
        service
            .record_visit(&Location {
                id: "p1".to_string(),
                name: "Keraton".to_string(),
                category: "Wisata".to_string(),
                coordinates: "-7.5754,110.8243".to_string(),
                accuracy: None,
            })
            .await
            .unwrap();

        let server = TestServer::new(routes::routes(service)).expect("test server");
        let response = server.get("/api/history").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["name"], "Keraton");
    }
}
