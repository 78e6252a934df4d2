use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::{AppConfig, StoreBackend};
use crate::goals::GoalsStore;
use crate::meals::{MealDate, MealHistoryStore};
use crate::menu::{MenuSource, NutrisliceClient};
use crate::storage::{FileStore, KeyValueStore, MemoryStore, S3Store};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub history: MealHistoryStore,
    pub goals: GoalsStore,
    pub menu: Arc<dyn MenuSource>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let kv: Arc<dyn KeyValueStore> = match &config.store {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::File { dir } => Arc::new(FileStore::new(dir).await?),
            StoreBackend::S3(minio) => Arc::new(
                S3Store::new(
                    &minio.endpoint,
                    &minio.bucket,
                    &minio.access_key,
                    &minio.secret_key,
                    &minio.region,
                )
                .await?,
            ),
        };
        let menu = Arc::new(NutrisliceClient::new(
            &config.menu_base_url,
            config.menu_timeout,
        )?) as Arc<dyn MenuSource>;

        let state = Self::from_parts(config, kv, menu);
        state.prune_on_load().await;
        Ok(state)
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        kv: Arc<dyn KeyValueStore>,
        menu: Arc<dyn MenuSource>,
    ) -> Self {
        Self {
            config,
            history: MealHistoryStore::new(kv.clone()),
            goals: GoalsStore::new(kv),
            menu,
        }
    }

    /// Applies the retention window once when the history is first loaded.
    pub async fn prune_on_load(&self) {
        match self
            .history
            .prune(self.config.retention_days, MealDate::today())
            .await
        {
            Ok(removed) => info!(removed, retention_days = self.config.retention_days, "history loaded"),
            Err(e) => warn!(error = %e, "history prune skipped"),
        }
    }

    /// In-memory state with a menu source that is never reachable.
    pub fn fake() -> Self {
        use crate::error::{AppError, AppResult};
        use crate::menu::{MenuQuery, MenuWeek};
        use async_trait::async_trait;

        struct OfflineMenu;
        #[async_trait]
        impl MenuSource for OfflineMenu {
            async fn fetch_week(&self, _q: &MenuQuery) -> AppResult<MenuWeek> {
                Err(AppError::SourceUnreachable(anyhow::anyhow!("offline")))
            }
        }

        let config = Arc::new(AppConfig {
            store: StoreBackend::Memory,
            menu_base_url: "http://fake.local".into(),
            menu_timeout: Duration::from_secs(1),
            retention_days: 30,
        });
        Self::from_parts(config, Arc::new(MemoryStore::new()), Arc::new(OfflineMenu))
    }
}
