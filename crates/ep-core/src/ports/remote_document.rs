use async_trait::async_trait;
use serde_json::Value;

use super::errors::SplashCacheError;

/// Read-only access to named documents in the remote document store.
#[async_trait]
pub trait RemoteDocumentPort: Send + Sync {
    /// `Ok(None)` when the document does not exist.
    async fn fetch_document(&self, name: &str) -> Result<Option<Value>, SplashCacheError>;
}
