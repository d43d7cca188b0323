use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::api::state::AppState;
use crate::views::HomeView;

pub async fn home(State(state): State<AppState>) -> Json<HomeView> {
    Json(HomeView::load(state.source.as_ref(), Utc::now()).await)
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{get_json, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_home_shape() {
        let (status, json) = get_json(test_app(), "/api/home").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["upcoming"]["state"], "loaded");
        assert_eq!(json["past"]["state"], "loaded");
        assert!(json["today"].is_string());

        // every fixture event is in exactly one of the two lists
        let upcoming = json["upcoming"]["data"].as_array().unwrap().len();
        let past = json["past"]["data"].as_array().unwrap().len();
        assert_eq!(upcoming + past, 4);
    }
}
