use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ep_core::ports::{KeyValuePort, SplashCacheError};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::warn;

const KV_DIR: &str = "kv";
const KV_FILE_NAME: &str = "local_storage.json";

/// JSON-file backed string key/value namespace.
///
/// The whole namespace lives in one small JSON object; every write rewrites
/// it atomically (temp file + rename). Writes are serialized through a lock so
/// two concurrent `set` calls cannot lose each other's keys.
pub struct FileKeyValueStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Open the namespace under `root`, creating its directory if absent.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self, SplashCacheError> {
        let dir = root.as_ref().join(KV_DIR);
        fs::create_dir_all(&dir).await.map_err(|e| {
            SplashCacheError::StorageUnavailable(format!(
                "create kv dir failed: {}: {e}",
                dir.display()
            ))
        })?;

        Ok(Self::new(dir.join(KV_FILE_NAME)))
    }

    /// Use `path` as the backing file directly.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn load_map(&self) -> Result<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("read kv store failed: {}", self.path.display()))
            }
        };

        serde_json::from_str(&content)
            .with_context(|| format!("parse kv store failed: {}", self.path.display()))
    }

    // A corrupt namespace must not block new writes; start over from empty.
    async fn load_map_for_write(&self) -> BTreeMap<String, String> {
        match self.load_map().await {
            Ok(map) => map,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "discarding unreadable kv store");
                BTreeMap::new()
            }
        }
    }

    /// Atomically writes the given JSON content to the namespace file.
    async fn atomic_write(&self, content: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create kv dir failed: {}", dir.display()))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp kv failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp kv to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    async fn save_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(map).context("serialize kv store failed")?;
        self.atomic_write(&content).await
    }
}

#[async_trait]
impl KeyValuePort for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_map().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load_map_for_write().await;
        map.insert(key.to_string(), value.to_string());
        self.save_map(&map).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load_map_for_write().await;
        if map.remove(key).is_some() {
            self.save_map(&map).await?;
        }
        Ok(())
    }
}
