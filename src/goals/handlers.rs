use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{dto::DailySummary, repo_types::Goals, services::daily_summary};
use crate::{error::AppResult, meals::MealDate, state::AppState};

pub fn goals_routes() -> Router<AppState> {
    Router::new()
        .route("/goals", get(get_goals).put(put_goals))
        .route("/summary/:date", get(get_summary))
}

#[instrument(skip(state))]
pub async fn get_goals(State(state): State<AppState>) -> Json<Goals> {
    Json(state.goals.load().await)
}

#[instrument(skip(state))]
pub async fn put_goals(
    State(state): State<AppState>,
    Json(goals): Json<Goals>,
) -> AppResult<Json<Goals>> {
    state.goals.save(&goals).await?;
    info!(?goals, "goals updated");
    Ok(Json(goals))
}

#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<DailySummary>> {
    let date: MealDate = date.parse()?;
    Ok(Json(daily_summary(&state.history, &state.goals, date).await))
}
