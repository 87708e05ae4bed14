use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ep_core::ports::{AssetFetchPort, BlobStorePort, ConnectivityPort};
use ep_core::splash::SplashConfig;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span, warn, Instrument};

use super::cache_store::{DownloadMarker, SplashConfigCache};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Offline,
    NotCustomVideo,
    AlreadyCurrent,
    Refreshed { url: String, bytes: usize },
    Failed,
    /// A refresh already ran in this process.
    Skipped,
}

/// Background asset refresher: warms the splash video cache for the next
/// cold start. Never affects what is already on screen.
///
/// ## Behavior / 行为
/// 1. Offline → nothing
/// 2. Cached settings are not a custom video → nothing
/// 3. Marker already equals `videoUrl` → nothing
/// 4. Download fully into memory; any failure aborts without writing
/// 5. Write the blob, then the marker, strictly in that order
///
/// Every failure is logged and swallowed.
pub struct RefreshSplashVideo {
    connectivity: Arc<dyn ConnectivityPort>,
    cache: Arc<SplashConfigCache>,
    marker: Arc<DownloadMarker>,
    fetcher: Arc<dyn AssetFetchPort>,
    blob_store: Arc<dyn BlobStorePort>,
    started: AtomicBool,
}

impl RefreshSplashVideo {
    pub fn new(
        connectivity: Arc<dyn ConnectivityPort>,
        cache: Arc<SplashConfigCache>,
        marker: Arc<DownloadMarker>,
        fetcher: Arc<dyn AssetFetchPort>,
        blob_store: Arc<dyn BlobStorePort>,
    ) -> Self {
        Self {
            connectivity,
            cache,
            marker,
            fetcher,
            blob_store,
            started: AtomicBool::new(false),
        }
    }

    /// Fire-and-forget: run once after `delay` on the runtime.
    pub fn spawn_after(self: Arc<Self>, delay: Duration) -> JoinHandle<RefreshOutcome> {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            self.execute().await
        })
    }

    /// Run the refresh. Only the first call per instance does any work.
    pub async fn execute(&self) -> RefreshOutcome {
        if self.started.swap(true, Ordering::SeqCst) {
            debug!("splash video refresh already ran");
            return RefreshOutcome::Skipped;
        }

        let span = info_span!("usecase.refresh_splash_video.execute");
        self.refresh().instrument(span).await
    }

    async fn refresh(&self) -> RefreshOutcome {
        if !self.connectivity.is_online().await {
            info!("offline; splash video refresh skipped");
            return RefreshOutcome::Offline;
        }

        let config = match self.cache.load().await {
            Ok(Some(candidate)) => SplashConfig::from_candidate(&candidate),
            Ok(None) => SplashConfig::default(),
            Err(err) => {
                warn!(error = %err, "cached splash settings unusable");
                SplashConfig::default()
            }
        };
        let video_url = match config.video_url.as_deref() {
            Some(url) if config.wants_custom_video() => url,
            _ => {
                debug!("cached splash settings are not a custom video");
                return RefreshOutcome::NotCustomVideo;
            }
        };

        if self.marker.matches(video_url).await {
            debug!(%video_url, "cached splash video already current");
            return RefreshOutcome::AlreadyCurrent;
        }

        info!(%video_url, "downloading splash video");
        let blob = match self.fetcher.fetch_bytes(video_url).await {
            Ok(blob) => blob,
            Err(err) => {
                error!(%video_url, error = %err, "splash video download failed");
                return RefreshOutcome::Failed;
            }
        };
        let bytes = blob.len();

        if let Err(err) = self.blob_store.put(blob).await {
            error!(%video_url, error = %err, "failed to store splash video");
            return RefreshOutcome::Failed;
        }

        // Only now may the marker point at the new blob.
        if let Err(err) = self.marker.record(video_url).await {
            error!(%video_url, error = %err, "failed to record splash video marker");
            return RefreshOutcome::Failed;
        }

        info!(%video_url, bytes, "splash video cache refreshed");
        RefreshOutcome::Refreshed {
            url: video_url.to_string(),
            bytes,
        }
    }
}
