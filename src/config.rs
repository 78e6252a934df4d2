use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct MinioConfig {
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
pub enum StoreBackend {
    Memory,
    File { dir: PathBuf },
    S3(MinioConfig),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub store: StoreBackend,
    pub menu_base_url: String,
    pub menu_timeout: Duration,
    pub retention_days: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let store = match env_or("STORE_BACKEND", "file").to_lowercase().as_str() {
            "memory" => StoreBackend::Memory,
            "file" => StoreBackend::File {
                dir: PathBuf::from(env_or("STORE_DIR", "./data")),
            },
            "s3" => StoreBackend::S3(MinioConfig {
                endpoint: required("MINIO_ENDPOINT")?,
                bucket: required("MINIO_BUCKET")?,
                access_key: required("MINIO_ACCESS_KEY")?,
                secret_key: required("MINIO_SECRET_KEY")?,
                region: env_or("MINIO_REGION", "us-east-1"),
            }),
            other => anyhow::bail!("unknown STORE_BACKEND {other:?} (memory, file or s3)"),
        };

        Ok(Self {
            store,
            menu_base_url: env_or("MENU_BASE_URL", "https://techdining.api.nutrislice.com"),
            menu_timeout: Duration::from_secs(
                std::env::var("MENU_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(10),
            ),
            retention_days: std::env::var("HISTORY_RETENTION_DAYS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|d| *d > 0)
                .unwrap_or(30),
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

fn required(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set for the s3 store"))
}
