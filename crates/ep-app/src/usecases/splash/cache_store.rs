//! Accessors for the two key/value entries the splash cache relies on.
//!
//! Both the config resolver and the background refresher go through these,
//! so there is exactly one reader/writer for each key.

use std::sync::Arc;

use anyhow::Result;
use ep_core::asset::{LAST_DOWNLOADED_VIDEO_URL_KEY, SPLASH_CONFIG_CACHE_KEY};
use ep_core::ports::{KeyValuePort, SplashCacheError};
use serde_json::Value;
use tracing::warn;

/// The last fetched splash settings document, stored verbatim as JSON.
pub struct SplashConfigCache {
    kv: Arc<dyn KeyValuePort>,
}

impl SplashConfigCache {
    pub fn new(kv: Arc<dyn KeyValuePort>) -> Self {
        Self { kv }
    }

    /// `Ok(None)` when nothing was cached yet.
    ///
    /// # Errors
    /// - [`SplashCacheError::StorageUnavailable`] if the namespace cannot be read
    /// - [`SplashCacheError::MalformedCache`] if the stored JSON does not parse
    pub async fn load(&self) -> Result<Option<Value>, SplashCacheError> {
        let raw = self
            .kv
            .get(SPLASH_CONFIG_CACHE_KEY)
            .await
            .map_err(|e| SplashCacheError::StorageUnavailable(format!("{e:#}")))?;

        match raw {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| SplashCacheError::MalformedCache(e.to_string())),
        }
    }

    pub async fn store(&self, document: &Value) -> Result<()> {
        let raw = serde_json::to_string(document)?;
        self.kv.set(SPLASH_CONFIG_CACHE_KEY, &raw).await
    }

    pub async fn clear(&self) -> Result<()> {
        self.kv.remove(SPLASH_CONFIG_CACHE_KEY).await
    }
}

/// The "last downloaded" marker: source URL of the blob currently stored.
///
/// The marker is only ever written after the blob write it describes has
/// completed, so a marker match means the stored blob is current.
pub struct DownloadMarker {
    kv: Arc<dyn KeyValuePort>,
}

impl DownloadMarker {
    pub fn new(kv: Arc<dyn KeyValuePort>) -> Self {
        Self { kv }
    }

    /// Unreadable markers count as absent.
    pub async fn current(&self) -> Option<String> {
        match self.kv.get(LAST_DOWNLOADED_VIDEO_URL_KEY).await {
            Ok(marker) => marker,
            Err(err) => {
                warn!(error = %err, "failed to read download marker; treating as absent");
                None
            }
        }
    }

    pub async fn matches(&self, url: &str) -> bool {
        self.current().await.as_deref() == Some(url)
    }

    pub async fn record(&self, url: &str) -> Result<()> {
        self.kv.set(LAST_DOWNLOADED_VIDEO_URL_KEY, url).await
    }

    pub async fn clear(&self) -> Result<()> {
        self.kv.remove(LAST_DOWNLOADED_VIDEO_URL_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::splash::test_support::MemoryKv;
    use serde_json::json;

    #[tokio::test]
    async fn config_cache_round_trips_documents_verbatim() {
        let kv = Arc::new(MemoryKv::default());
        let cache = SplashConfigCache::new(kv.clone());

        assert!(cache.load().await.unwrap().is_none());

        let document = json!({ "useCustom": true, "extra": { "nested": [1, 2] } });
        cache.store(&document).await.unwrap();

        assert_eq!(cache.load().await.unwrap(), Some(document));
    }

    #[tokio::test]
    async fn malformed_cache_is_reported_as_such() {
        let kv = Arc::new(MemoryKv::default());
        kv.set(SPLASH_CONFIG_CACHE_KEY, "{ broken").await.unwrap();
        let cache = SplashConfigCache::new(kv);

        assert!(matches!(
            cache.load().await,
            Err(SplashCacheError::MalformedCache(_))
        ));
    }

    #[tokio::test]
    async fn unreadable_marker_is_absent() {
        let kv = Arc::new(MemoryKv::default());
        kv.fail_reads(true);
        let marker = DownloadMarker::new(kv);

        assert_eq!(marker.current().await, None);
        assert!(!marker.matches("https://cdn.example.com/a.mp4").await);
    }
}
