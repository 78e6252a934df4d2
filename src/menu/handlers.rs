use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::{
    client::{MealType, MenuQuery},
    services::menu_for_date,
    types::MenuView,
};
use crate::{error::AppResult, meals::MealDate, state::AppState};

#[derive(Debug, Deserialize)]
pub struct MenuParams {
    pub location: String,
    pub meal: MealType,
    pub date: Option<String>,
}

pub fn menu_routes() -> Router<AppState> {
    Router::new().route("/menu", get(get_menu))
}

/// GET /menu?location=west-village&meal=lunch&date=2025-10-20
#[instrument(skip(state))]
pub async fn get_menu(
    State(state): State<AppState>,
    Query(params): Query<MenuParams>,
) -> AppResult<Json<MenuView>> {
    let date = match params.date.as_deref() {
        Some(raw) => raw.parse()?,
        None => MealDate::today(),
    };
    let query = MenuQuery {
        location: params.location,
        meal: params.meal,
        date,
    };
    Ok(Json(menu_for_date(state.menu.as_ref(), &query).await?))
}
