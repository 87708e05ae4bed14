use anyhow::Result;
use async_trait::async_trait;

/// Simple persistent string key/value namespace, distinct from the blob store.
#[async_trait]
pub trait KeyValuePort: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}
