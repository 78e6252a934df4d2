pub mod date;
mod dto;
pub mod handlers;
mod repo;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use date::MealDate;
pub use repo_types::{LoggedMeal, MealHistory};
pub use services::MealHistoryStore;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
