use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::meals::date::MealDate;
use crate::nutrition::{scale, FoodItem, NutritionInfo};

/// A food snapshot logged at some number of servings.
///
/// `nutrition_total` is stored, not derived on read, and only changes
/// together with `servings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedMeal {
    source_food: FoodItem,
    servings: f64,
    nutrition_total: NutritionInfo,
}

impl LoggedMeal {
    pub fn new(source_food: FoodItem, servings: f64) -> AppResult<Self> {
        if let Some((field, value)) = source_food.nutrition_per_serving.first_invalid() {
            return Err(AppError::InvalidNutrition { field, value });
        }
        let nutrition_total = scale(&source_food.nutrition_per_serving, servings)?;
        Ok(Self {
            source_food,
            servings,
            nutrition_total,
        })
    }

    pub fn source_food(&self) -> &FoodItem {
        &self.source_food
    }

    pub fn servings(&self) -> f64 {
        self.servings
    }

    pub fn nutrition_total(&self) -> &NutritionInfo {
        &self.nutrition_total
    }

    /// Per-serving nutrition recovered from the stored total.
    pub fn per_serving(&self) -> NutritionInfo {
        self.nutrition_total.map(|v| v / self.servings)
    }

    /// Rescales from the per-serving snapshot, never from the previous total.
    pub fn set_servings(&mut self, servings: f64) -> AppResult<()> {
        let nutrition_total = scale(&self.source_food.nutrition_per_serving, servings)?;
        self.servings = servings;
        self.nutrition_total = nutrition_total;
        Ok(())
    }
}

/// Logged meals by day, in logged order within a day.
///
/// A day is present only while it has at least one meal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealHistory {
    days: BTreeMap<MealDate, Vec<LoggedMeal>>,
}

impl MealHistory {
    pub fn meals(&self, date: &MealDate) -> &[LoggedMeal] {
        self.days.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, date: &MealDate) -> bool {
        self.days.contains_key(date)
    }

    pub fn dates(&self) -> impl Iterator<Item = &MealDate> {
        self.days.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn push(&mut self, date: MealDate, meal: LoggedMeal) {
        self.days.entry(date).or_default().push(meal);
    }

    pub fn meal_mut(&mut self, date: &MealDate, index: usize) -> AppResult<&mut LoggedMeal> {
        self.days
            .get_mut(date)
            .and_then(|meals| meals.get_mut(index))
            .ok_or_else(|| out_of_range(date, index))
    }

    pub fn remove(&mut self, date: &MealDate, index: usize) -> AppResult<LoggedMeal> {
        let meals = self
            .days
            .get_mut(date)
            .filter(|meals| index < meals.len())
            .ok_or_else(|| out_of_range(date, index))?;
        let removed = meals.remove(index);
        if meals.is_empty() {
            self.days.remove(date);
        }
        Ok(removed)
    }

    /// Drops every day strictly before `cutoff`. Returns how many were dropped.
    pub fn retain_from(&mut self, cutoff: &MealDate) -> usize {
        let before = self.days.len();
        self.days.retain(|date, _| date >= cutoff);
        before - self.days.len()
    }
}

fn out_of_range(date: &MealDate, index: usize) -> AppError {
    AppError::IndexOutOfRange {
        date: date.to_string(),
        index,
    }
}
