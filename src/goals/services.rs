use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::goals::dto::{DailySummary, MacroProgress};
use crate::goals::repo_types::{GoalMetric, Goals};
use crate::meals::{MealDate, MealHistoryStore};
use crate::nutrition::{percent_of_goal, sum};
use crate::storage::KeyValueStore;

#[derive(Clone)]
pub struct GoalsStore {
    kv: Arc<dyn KeyValueStore>,
}

impl GoalsStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Never fails: each metric falls back to its default on its own.
    pub async fn load(&self) -> Goals {
        let mut goals = Goals::default();
        for metric in GoalMetric::ALL {
            match self.kv.get(metric.key()).await {
                Ok(Some(raw)) => match parse_goal(&raw) {
                    Some(value) => metric.set(&mut goals, value),
                    None => warn!(key = metric.key(), raw = %raw, "ignoring unusable stored goal"),
                },
                Ok(None) => {}
                Err(e) => warn!(key = metric.key(), error = %e, "goal read failed; using default"),
            }
        }
        goals
    }

    /// Writes the four keys one by one. A failure part way leaves the
    /// earlier keys updated.
    pub async fn save(&self, goals: &Goals) -> AppResult<()> {
        for metric in GoalMetric::ALL {
            let value = metric.get(goals);
            if !is_usable(value) {
                return Err(AppError::InvalidGoal {
                    name: metric.name(),
                    value,
                });
            }
        }
        for metric in GoalMetric::ALL {
            self.kv
                .set(metric.key(), &metric.get(goals).to_string())
                .await
                .map_err(AppError::StorageUnavailable)?;
        }
        debug!(?goals, "goals saved");
        Ok(())
    }
}

fn parse_goal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| is_usable(*v))
}

fn is_usable(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Meals, totals and goal progress for one day.
pub async fn daily_summary(
    history: &MealHistoryStore,
    goals: &GoalsStore,
    date: MealDate,
) -> DailySummary {
    let meals = history.list_for_date(&date).await;
    let totals = sum(meals.iter().map(|m| m.nutrition_total()));
    let goals = goals.load().await;
    let progress = MacroProgress {
        calories: percent_of_goal(totals.calories, goals.calories),
        protein: percent_of_goal(totals.protein_g, goals.protein_g),
        carbs: percent_of_goal(totals.carb_g, goals.carb_g),
        fat: percent_of_goal(totals.fat_g, goals.fat_g),
    };
    DailySummary {
        date,
        meals,
        totals,
        goals,
        progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::{FoodItem, NutritionInfo, ServingSizeInfo};
    use crate::storage::{MemoryStore, MockKeyValueStore};

    fn stores() -> (Arc<MemoryStore>, GoalsStore, MealHistoryStore) {
        let kv = Arc::new(MemoryStore::new());
        (
            kv.clone(),
            GoalsStore::new(kv.clone()),
            MealHistoryStore::new(kv),
        )
    }

    #[tokio::test]
    async fn load_defaults_when_nothing_stored() {
        let (_, goals, _) = stores();
        let loaded = goals.load().await;
        assert_eq!(
            loaded,
            Goals {
                calories: 2200.0,
                protein_g: 150.0,
                carb_g: 250.0,
                fat_g: 70.0,
            }
        );
    }

    #[tokio::test]
    async fn load_falls_back_per_metric() {
        let (kv, goals, _) = stores();
        kv.set("goal_calories", "1800").await.unwrap();
        kv.set("goal_protein", "lots").await.unwrap();
        kv.set("goal_carbs", "-5").await.unwrap();
        kv.set("goal_fat", " 55.5 ").await.unwrap();

        let loaded = goals.load().await;
        assert_eq!(loaded.calories, 1800.0);
        assert_eq!(loaded.protein_g, 150.0);
        assert_eq!(loaded.carb_g, 250.0);
        assert_eq!(loaded.fat_g, 55.5);
    }

    #[tokio::test]
    async fn load_survives_read_errors() {
        let mut kv = MockKeyValueStore::new();
        kv.expect_get().returning(|key| {
            if key == "goal_fat" {
                Ok(Some("90".to_string()))
            } else {
                Err(anyhow::anyhow!("store offline"))
            }
        });
        let goals = GoalsStore::new(Arc::new(kv)).load().await;
        assert_eq!(goals.fat_g, 90.0);
        assert_eq!(goals.calories, 2200.0);
    }

    #[tokio::test]
    async fn save_writes_decimal_strings() {
        let (kv, goals, _) = stores();
        let wanted = Goals {
            calories: 2500.0,
            protein_g: 180.5,
            carb_g: 300.0,
            fat_g: 80.0,
        };
        goals.save(&wanted).await.unwrap();
        assert_eq!(kv.get("goal_calories").await.unwrap().as_deref(), Some("2500"));
        assert_eq!(kv.get("goal_protein").await.unwrap().as_deref(), Some("180.5"));
        assert_eq!(goals.load().await, wanted);
    }

    #[tokio::test]
    async fn save_rejects_non_positive_goal_before_writing() {
        let (kv, goals, _) = stores();
        let bad = Goals {
            fat_g: 0.0,
            ..Goals::default()
        };
        let err = goals.save(&bad).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidGoal { name: "fat", .. }));
        assert_eq!(kv.get("goal_calories").await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_propagates_storage_failure() {
        let mut kv = MockKeyValueStore::new();
        kv.expect_set()
            .returning(|_, _| Err(anyhow::anyhow!("quota exceeded")));
        let err = GoalsStore::new(Arc::new(kv))
            .save(&Goals::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
    }

    #[tokio::test]
    async fn two_servings_of_a_400_calorie_meal() {
        let (_, goals, history) = stores();
        let date: MealDate = "2025-10-19".parse().unwrap();
        let food = FoodItem {
            id: "12".into(),
            name: "Chicken Tikka Bowl".into(),
            nutrition_per_serving: NutritionInfo::macros(400.0, 30.0, 45.0, 12.0),
            serving_size: ServingSizeInfo::default(),
            ingredients: None,
            allergen_icons: None,
        };
        history.add(date, food, 2.0).await.unwrap();

        assert_eq!(history.totals_for_date(&date).await.calories, 800.0);

        let summary = daily_summary(&history, &goals, date).await;
        assert_eq!(summary.meals.len(), 1);
        assert_eq!(summary.totals.calories, 800.0);
        assert_eq!(summary.goals, Goals::default());
        assert_eq!(summary.progress.calories.round(), 36.0);
        assert_eq!(summary.progress.protein, 40.0);
        assert_eq!(summary.progress.carbs, 36.0);
    }
}
