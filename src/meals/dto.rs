use serde::{Deserialize, Serialize};

use crate::meals::{date::MealDate, repo_types::LoggedMeal};
use crate::nutrition::FoodItem;

#[derive(Debug, Serialize)]
pub struct DayMealsResponse {
    pub date: MealDate,
    pub meals: Vec<LoggedMeal>,
}

#[derive(Debug, Deserialize)]
pub struct AddMealRequest {
    pub food: FoodItem,
    #[serde(default = "default_servings")]
    pub servings: f64,
}

fn default_servings() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
pub struct UpdateServingsRequest {
    pub servings: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct PruneRequest {
    pub retention_days: Option<u32>,
    pub as_of: Option<MealDate>,
}

#[derive(Debug, Serialize)]
pub struct PruneResponse {
    pub removed: usize,
    pub cutoff: MealDate,
}
