use axum::extract::{Path, Query, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::directory::EventQuery;
use crate::models::EventId;
use crate::views::{EventDetailView, EventListView};

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> Result<Json<EventListView>, ApiError> {
    let view = EventListView::load(state.source.as_ref(), &query).await?;
    Ok(Json(view))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<EventDetailView>, ApiError> {
    let id = EventId::new(event_id);
    EventDetailView::load(state.source.as_ref(), &id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Event {}", id)))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{get_json, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_list_events_by_month() {
        let (status, json) = get_json(test_app(), "/api/events").await;

        assert_eq!(status, StatusCode::OK);
        let listing = &json["listing"]["data"];
        assert_eq!(listing["sort"], "month");
        assert_eq!(listing["total"], 4);
        assert_eq!(listing["groups"]["layout"], "buckets");
    }

    #[tokio::test]
    async fn test_list_events_filtered_by_name() {
        let (status, json) =
            get_json(test_app(), "/api/events?organization=PFL&sort=name").await;

        assert_eq!(status, StatusCode::OK);
        let listing = &json["listing"]["data"];
        assert_eq!(listing["matched"], 1);
        assert_eq!(listing["groups"]["items"][0]["key"], "P");
    }

    #[tokio::test]
    async fn test_list_events_rejects_record_sort() {
        let (status, json) = get_json(test_app(), "/api/events?sort=record").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_get_event() {
        let (status, json) = get_json(test_app(), "/api/events/300").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["event"]["name"], "UFC 300");
        let card = &json["card"]["data"];
        assert_eq!(card["main_event"]["id"], "f1");
        assert_eq!(card["main_event"]["fighter1"]["name"], "Alex Pereira");
        assert_eq!(card["undercard"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_event_not_found() {
        let (status, json) = get_json(test_app(), "/api/events/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }
}
