use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use aws_config::{defaults, BehaviorVersion};
use aws_credential_types::Credentials;
use aws_sdk_s3::{
    config::{Builder as S3ConfigBuilder, Region},
    Client,
};
use aws_smithy_types::byte_stream::ByteStream;
use bytes::Bytes;
use tokio::sync::RwLock;

pub const MEAL_HISTORY_KEY: &str = "meal_history";

/// String storage by key. Single-key reads and writes only; nothing here is
/// transactional across keys.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key inside `root`.
#[derive(Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub async fn new(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("create store dir {}", root.display()))?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> anyhow::Result<PathBuf> {
        anyhow::ensure!(is_valid_key(key), "invalid store key {key:?}");
        Ok(self.root.join(format!("{key}.txt")))
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    /// Each write goes to its own temp file in the store directory and is
    /// renamed over the key, so overlapping writers never share a temp path.
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.path_for(key)?;
        let root = self.root.clone();
        let value = value.to_owned();
        tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
            let mut tmp = tempfile::NamedTempFile::new_in(&root)
                .with_context(|| format!("create temp file in {}", root.display()))?;
            tmp.write_all(value.as_bytes())
                .with_context(|| format!("write {}", tmp.path().display()))?;
            tmp.persist(&path)
                .with_context(|| format!("rename into {}", path.display()))?;
            Ok(())
        })
        .await
        .context("store write task")?
    }
}

/// One object per key in an S3 (or MinIO) bucket.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub async fn new(
        endpoint: &str,
        bucket: &str,
        access_key: &str,
        secret_key: &str,
        region: &str,
    ) -> anyhow::Result<Self> {
        let shared = defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .credentials_provider(Credentials::new(
                access_key, secret_key, None, None, "static",
            ))
            .endpoint_url(endpoint)
            .load()
            .await;

        let conf = S3ConfigBuilder::from(&shared)
            .endpoint_url(endpoint)
            .force_path_style(true)
            .build();

        Ok(Self {
            client: Client::from_conf(conf),
            bucket: bucket.to_string(),
        })
    }
}

#[async_trait]
impl KeyValueStore for S3Store {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let resp = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                let service_err = e.into_service_error();
                if service_err.is_no_such_key() {
                    return Ok(None);
                }
                return Err(service_err).context("s3 get_object");
            }
        };
        let body = resp
            .body
            .collect()
            .await
            .context("s3 read object body")?
            .into_bytes();
        let text = String::from_utf8(body.to_vec()).context("s3 object is not utf-8")?;
        Ok(Some(text))
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(Bytes::from(value.to_string())))
            .content_type("application/json")
            .send()
            .await
            .context("s3 put_object")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("goal_fat").await.unwrap(), None);
        store.set("goal_fat", "65").await.unwrap();
        assert_eq!(store.get("goal_fat").await.unwrap().as_deref(), Some("65"));
        store.set("goal_fat", "80").await.unwrap();
        assert_eq!(store.get("goal_fat").await.unwrap().as_deref(), Some("80"));
    }

    #[tokio::test]
    async fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).await.unwrap();
        assert_eq!(store.get(MEAL_HISTORY_KEY).await.unwrap(), None);
        store.set(MEAL_HISTORY_KEY, "{}").await.unwrap();

        let reopened = FileStore::new(dir.path()).await.unwrap();
        assert_eq!(
            reopened.get(MEAL_HISTORY_KEY).await.unwrap().as_deref(),
            Some("{}")
        );
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[tokio::test]
    async fn file_store_overlapping_writes_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(FileStore::new(dir.path()).await.unwrap());
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.set("goal_calories", &format!("{}", 2000 + i)).await
            }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }
        let stored: u32 = store.get("goal_calories").await.unwrap().unwrap().parse().unwrap();
        assert!((2000..2016).contains(&stored));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).await.unwrap();
        assert!(store.set("../escape", "x").await.is_err());
        assert!(store.get("").await.is_err());
    }

    #[test]
    fn key_validation() {
        assert!(is_valid_key("goal_calories"));
        assert!(is_valid_key("meal-history"));
        assert!(!is_valid_key("a/b"));
        assert!(!is_valid_key("a.b"));
    }
}
