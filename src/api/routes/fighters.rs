use axum::extract::{Path, Query, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::directory::FighterQuery;
use crate::models::FighterId;
use crate::views::{FighterDirectory, FighterProfileView};

pub async fn list_fighters(
    State(state): State<AppState>,
    Query(query): Query<FighterQuery>,
) -> Result<Json<FighterDirectory>, ApiError> {
    let directory = FighterDirectory::load(state.source.as_ref(), &query).await?;
    Ok(Json(directory))
}

pub async fn get_fighter(
    State(state): State<AppState>,
    Path(fighter_id): Path<String>,
) -> Result<Json<FighterProfileView>, ApiError> {
    let id = FighterId::new(fighter_id);
    FighterProfileView::load(state.source.as_ref(), &id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Fighter {}", id)))
}
