pub mod client;
pub mod grouping;
pub mod handlers;
pub mod services;
pub mod types;
mod wire;

use crate::state::AppState;
use axum::Router;

pub use client::{MealType, MenuQuery, MenuSource, NutrisliceClient};
pub use grouping::{group, SectionAccordion, DEFAULT_SECTION};
pub use services::menu_for_date;
pub use types::{MenuDay, MenuItem, MenuSection, MenuStatus, MenuView, MenuWeek};

pub fn router() -> Router<AppState> {
    handlers::menu_routes()
}
