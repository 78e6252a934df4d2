use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, instrument};

use super::repo;
use crate::error::{AppError, AppResult};
use crate::meals::date::MealDate;
use crate::meals::repo_types::{LoggedMeal, MealHistory};
use crate::nutrition::{sum, FoodItem, NutritionInfo};
use crate::storage::KeyValueStore;

/// Date-keyed meal log persisted as one blob.
///
/// Every mutation reads the full history, changes it and writes it back
/// while holding `write_lock`, so concurrent callers are applied one after
/// another instead of overwriting each other.
#[derive(Clone)]
pub struct MealHistoryStore {
    kv: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl MealHistoryStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn load(&self) -> MealHistory {
        repo::load_or_empty(self.kv.as_ref()).await
    }

    #[instrument(skip(self, food), fields(food = %food.name))]
    pub async fn add(&self, date: MealDate, food: FoodItem, servings: f64) -> AppResult<LoggedMeal> {
        let meal = LoggedMeal::new(food, servings)?;
        self.mutate(|history| {
            history.push(date, meal.clone());
            Ok(())
        })
        .await?;
        Ok(meal)
    }

    pub async fn list_for_date(&self, date: &MealDate) -> Vec<LoggedMeal> {
        self.load().await.meals(date).to_vec()
    }

    #[instrument(skip(self))]
    pub async fn update_servings(
        &self,
        date: MealDate,
        index: usize,
        servings: f64,
    ) -> AppResult<LoggedMeal> {
        self.mutate(|history| {
            let meal = history.meal_mut(&date, index)?;
            meal.set_servings(servings)?;
            Ok(meal.clone())
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, date: MealDate, index: usize) -> AppResult<LoggedMeal> {
        self.mutate(|history| history.remove(&date, index)).await
    }

    /// Evicts every day strictly before `as_of - retention_days`.
    /// `retention_days` must be at least 1.
    #[instrument(skip(self))]
    pub async fn prune(&self, retention_days: u32, as_of: MealDate) -> AppResult<usize> {
        if retention_days == 0 {
            return Err(AppError::InvalidRetention(retention_days));
        }
        let cutoff = as_of.days_before(retention_days);
        let _guard = self.write_lock.lock().await;
        let mut history = repo::load_for_update(self.kv.as_ref()).await?;
        let removed = history.retain_from(&cutoff);
        if removed > 0 {
            repo::save(self.kv.as_ref(), &history).await?;
            info!(removed, %cutoff, "pruned meal history");
        }
        Ok(removed)
    }

    pub async fn totals_for_date(&self, date: &MealDate) -> NutritionInfo {
        let history = self.load().await;
        sum(history.meals(date).iter().map(LoggedMeal::nutrition_total))
    }

    async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut MealHistory) -> AppResult<T>,
    ) -> AppResult<T> {
        let _guard = self.write_lock.lock().await;
        let mut history = repo::load_for_update(self.kv.as_ref()).await?;
        let out = f(&mut history)?;
        repo::save(self.kv.as_ref(), &history).await?;
        Ok(out)
    }
}
