use serde::{Deserialize, Serialize};

pub const DEFAULT_CALORIES: f64 = 2200.0;
pub const DEFAULT_PROTEIN_G: f64 = 150.0;
pub const DEFAULT_CARB_G: f64 = 250.0;
pub const DEFAULT_FAT_G: f64 = 70.0;

/// Daily targets. Each value is stored under its own key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    pub calories: f64,
    pub protein_g: f64,
    pub carb_g: f64,
    pub fat_g: f64,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            calories: DEFAULT_CALORIES,
            protein_g: DEFAULT_PROTEIN_G,
            carb_g: DEFAULT_CARB_G,
            fat_g: DEFAULT_FAT_G,
        }
    }
}

/// Storage key and default for one goal metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalMetric {
    Calories,
    Protein,
    Carbs,
    Fat,
}

impl GoalMetric {
    pub const ALL: [GoalMetric; 4] = [
        GoalMetric::Calories,
        GoalMetric::Protein,
        GoalMetric::Carbs,
        GoalMetric::Fat,
    ];

    pub fn key(self) -> &'static str {
        match self {
            GoalMetric::Calories => "goal_calories",
            GoalMetric::Protein => "goal_protein",
            GoalMetric::Carbs => "goal_carbs",
            GoalMetric::Fat => "goal_fat",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GoalMetric::Calories => "calories",
            GoalMetric::Protein => "protein",
            GoalMetric::Carbs => "carbs",
            GoalMetric::Fat => "fat",
        }
    }

    pub fn get(self, goals: &Goals) -> f64 {
        match self {
            GoalMetric::Calories => goals.calories,
            GoalMetric::Protein => goals.protein_g,
            GoalMetric::Carbs => goals.carb_g,
            GoalMetric::Fat => goals.fat_g,
        }
    }

    pub fn set(self, goals: &mut Goals, value: f64) {
        match self {
            GoalMetric::Calories => goals.calories = value,
            GoalMetric::Protein => goals.protein_g = value,
            GoalMetric::Carbs => goals.carb_g = value,
            GoalMetric::Fat => goals.fat_g = value,
        }
    }
}
