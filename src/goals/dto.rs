use serde::{Deserialize, Serialize};

use crate::goals::repo_types::Goals;
use crate::meals::{LoggedMeal, MealDate};
use crate::nutrition::NutritionInfo;

/// Percent of each goal reached, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroProgress {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Serialize)]
pub struct DailySummary {
    pub date: MealDate,
    pub meals: Vec<LoggedMeal>,
    pub totals: NutritionInfo,
    pub goals: Goals,
    pub progress: MacroProgress,
}
