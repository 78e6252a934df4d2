mod dto;
pub mod handlers;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use dto::{DailySummary, MacroProgress};
pub use repo_types::{GoalMetric, Goals};
pub use services::{daily_summary, GoalsStore};

pub fn router() -> Router<AppState> {
    handlers::goals_routes()
}
