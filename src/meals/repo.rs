use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::meals::repo_types::MealHistory;
use crate::storage::{KeyValueStore, MEAL_HISTORY_KEY};

/// Reads the whole history for a write. Missing means empty; a failed read
/// or an unparsable blob is an error so it never gets overwritten.
pub async fn load_for_update(kv: &dyn KeyValueStore) -> AppResult<MealHistory> {
    let raw = kv
        .get(MEAL_HISTORY_KEY)
        .await
        .map_err(AppError::StorageUnavailable)?;
    match raw {
        Some(json) => serde_json::from_str(&json).map_err(AppError::CorruptHistory),
        None => Ok(MealHistory::default()),
    }
}

/// Reads the whole history for display. Any failure degrades to empty.
pub async fn load_or_empty(kv: &dyn KeyValueStore) -> MealHistory {
    match load_for_update(kv).await {
        Ok(history) => history,
        Err(e) => {
            warn!(error = %e, "meal history unreadable; showing empty history");
            MealHistory::default()
        }
    }
}

pub async fn save(kv: &dyn KeyValueStore, history: &MealHistory) -> AppResult<()> {
    let json = serde_json::to_string(history)
        .map_err(|e| AppError::StorageUnavailable(e.into()))?;
    kv.set(MEAL_HISTORY_KEY, &json)
        .await
        .map_err(AppError::StorageUnavailable)?;
    debug!(bytes = json.len(), "meal history saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, MockKeyValueStore};

    #[tokio::test]
    async fn missing_key_is_empty_history() {
        let kv = MemoryStore::new();
        assert!(load_for_update(&kv).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_blob_blocks_writes_but_not_reads() {
        let kv = MemoryStore::new();
        kv.set(MEAL_HISTORY_KEY, "{not json").await.unwrap();
        assert!(matches!(
            load_for_update(&kv).await,
            Err(AppError::CorruptHistory(_))
        ));
        assert!(load_or_empty(&kv).await.is_empty());
    }

    #[tokio::test]
    async fn failed_read_is_storage_unavailable() {
        let mut kv = MockKeyValueStore::new();
        kv.expect_get()
            .returning(|_| Err(anyhow::anyhow!("connection reset")));
        assert!(matches!(
            load_for_update(&kv).await,
            Err(AppError::StorageUnavailable(_))
        ));
        assert!(load_or_empty(&kv).await.is_empty());
    }

    #[tokio::test]
    async fn failed_write_propagates() {
        let mut kv = MockKeyValueStore::new();
        kv.expect_set()
            .returning(|_, _| Err(anyhow::anyhow!("bucket is read-only")));
        let err = save(&kv, &MealHistory::default()).await.unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
    }
}
