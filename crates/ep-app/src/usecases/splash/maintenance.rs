//! Explicit admin operations on the splash cache.

use std::sync::Arc;

use anyhow::Result;
use ep_core::ports::BlobStorePort;
use ep_core::splash::SplashConfig;
use tracing::{info, info_span, warn, Instrument};

use super::cache_store::{DownloadMarker, SplashConfigCache};

/// Wipe the cached splash video, its marker and the cached settings.
///
/// The marker goes first: if the process dies half way, the blob left behind
/// is merely stale, never trusted.
pub struct ClearSplashCache {
    marker: Arc<DownloadMarker>,
    blob_store: Arc<dyn BlobStorePort>,
    cache: Arc<SplashConfigCache>,
}

impl ClearSplashCache {
    pub fn new(
        marker: Arc<DownloadMarker>,
        blob_store: Arc<dyn BlobStorePort>,
        cache: Arc<SplashConfigCache>,
    ) -> Self {
        Self {
            marker,
            blob_store,
            cache,
        }
    }

    pub async fn execute(&self) -> Result<()> {
        let span = info_span!("usecase.clear_splash_cache.execute");

        async {
            self.marker.clear().await?;
            self.blob_store.clear().await?;
            self.cache.clear().await?;
            info!("splash cache cleared");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplashCacheStatus {
    pub last_downloaded_url: Option<String>,
    pub blob_bytes: Option<usize>,
    /// Effective config the cached settings would produce, if any are cached.
    pub cached_config: Option<SplashConfig>,
    /// The stored blob would be used for the cached settings' video.
    pub cache_current: bool,
}

pub struct InspectSplashCache {
    marker: Arc<DownloadMarker>,
    blob_store: Arc<dyn BlobStorePort>,
    cache: Arc<SplashConfigCache>,
}

impl InspectSplashCache {
    pub fn new(
        marker: Arc<DownloadMarker>,
        blob_store: Arc<dyn BlobStorePort>,
        cache: Arc<SplashConfigCache>,
    ) -> Self {
        Self {
            marker,
            blob_store,
            cache,
        }
    }

    pub async fn execute(&self) -> SplashCacheStatus {
        let last_downloaded_url = self.marker.current().await;

        let blob_bytes = match self.blob_store.get().await {
            Ok(blob) => blob.map(|b| b.len()),
            Err(err) => {
                warn!(error = %err, "failed to read cached splash video");
                None
            }
        };

        let cached_config = match self.cache.load().await {
            Ok(candidate) => candidate.map(|c| SplashConfig::from_candidate(&c)),
            Err(err) => {
                warn!(error = %err, "cached splash settings unusable");
                None
            }
        };

        let cache_current = blob_bytes.is_some()
            && cached_config
                .as_ref()
                .and_then(|c| c.video_url.as_deref())
                .is_some_and(|url| last_downloaded_url.as_deref() == Some(url));

        SplashCacheStatus {
            last_downloaded_url,
            blob_bytes,
            cached_config,
            cache_current,
        }
    }
}
