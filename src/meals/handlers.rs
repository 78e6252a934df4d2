use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{AddMealRequest, DayMealsResponse, PruneRequest, PruneResponse, UpdateServingsRequest};
use crate::{
    error::AppResult,
    meals::{date::MealDate, repo_types::LoggedMeal},
    state::AppState,
};

// --- public routers ---

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/history/:date", get(get_day))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/history/:date/meals", post(add_meal))
        .route(
            "/history/:date/meals/:index",
            put(update_servings).delete(remove_meal),
        )
        .route("/history/prune", post(prune_history))
}

// --- handlers ---

#[instrument(skip(state))]
pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<DayMealsResponse>> {
    let date: MealDate = date.parse()?;
    let meals = state.history.list_for_date(&date).await;
    Ok(Json(DayMealsResponse { date, meals }))
}

#[instrument(skip(state, body))]
pub async fn add_meal(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(body): Json<AddMealRequest>,
) -> AppResult<(StatusCode, Json<LoggedMeal>)> {
    let date: MealDate = date.parse()?;
    let meal = state.history.add(date, body.food, body.servings).await?;
    info!(%date, food = %meal.source_food().name, servings = meal.servings(), "meal logged");
    Ok((StatusCode::CREATED, Json(meal)))
}

#[instrument(skip(state))]
pub async fn update_servings(
    State(state): State<AppState>,
    Path((date, index)): Path<(String, usize)>,
    Json(body): Json<UpdateServingsRequest>,
) -> AppResult<Json<LoggedMeal>> {
    let date: MealDate = date.parse()?;
    let meal = state.history.update_servings(date, index, body.servings).await?;
    Ok(Json(meal))
}

#[instrument(skip(state))]
pub async fn remove_meal(
    State(state): State<AppState>,
    Path((date, index)): Path<(String, usize)>,
) -> AppResult<StatusCode> {
    let date: MealDate = date.parse()?;
    state.history.remove(date, index).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, body))]
pub async fn prune_history(
    State(state): State<AppState>,
    body: Option<Json<PruneRequest>>,
) -> AppResult<Json<PruneResponse>> {
    let req = body.map(|Json(r)| r).unwrap_or_default();
    let retention_days = req.retention_days.unwrap_or(state.config.retention_days);
    let as_of = req.as_of.unwrap_or_else(MealDate::today);
    let removed = state.history.prune(retention_days, as_of).await?;
    Ok(Json(PruneResponse {
        removed,
        cutoff: as_of.days_before(retention_days),
    }))
}
