use axum::extract::{Query, State};
use axum::Json;

use crate::api::state::AppState;
use crate::views::{RankingsQuery, RankingsView};

pub async fn get_rankings(
    State(state): State<AppState>,
    Query(query): Query<RankingsQuery>,
) -> Json<RankingsView> {
    Json(RankingsView::load(state.source.as_ref(), &query).await)
}
