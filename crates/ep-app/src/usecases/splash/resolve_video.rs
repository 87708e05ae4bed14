use std::fmt;
use std::sync::Arc;

use ep_core::asset::ObjectRef;
use ep_core::ports::{BlobStorePort, ConnectivityPort, ObjectUrlPort};
use ep_core::splash::SplashConfig;
use tracing::{debug, info, info_span, warn, Instrument};

use super::cache_store::DownloadMarker;

/// An object reference to the cached blob, revoked when dropped.
///
/// Dropping the plan that owns it (teardown, supersession, or a fallback to
/// image mode) releases the pinned bytes on every path.
pub struct LocalVideoRef {
    object_ref: ObjectRef,
    object_urls: Arc<dyn ObjectUrlPort>,
}

impl LocalVideoRef {
    pub fn object_ref(&self) -> &ObjectRef {
        &self.object_ref
    }
}

impl Drop for LocalVideoRef {
    fn drop(&mut self) {
        self.object_urls.revoke(&self.object_ref);
        debug!(object_ref = %self.object_ref, "splash video reference revoked");
    }
}

impl fmt::Debug for LocalVideoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalVideoRef").field(&self.object_ref).finish()
    }
}

/// A playable splash video source.
#[derive(Debug)]
pub enum VideoSource {
    /// Cached blob, instant offline playback.
    Local(LocalVideoRef),
    /// Remote URL handed straight to the player, which streams it itself.
    Remote(String),
}

impl VideoSource {
    /// The string a player would load.
    pub fn locator(&self) -> &str {
        match self {
            VideoSource::Local(local) => local.object_ref().as_str(),
            VideoSource::Remote(url) => url,
        }
    }
}

/// Asset cache manager: picks a playable source for the splash video without
/// ever waiting on a download.
///
/// ## Behavior / 行为
/// 1. No `videoUrl` → no video
/// 2. Blob present and marker equals `videoUrl` → local object reference
/// 3. Otherwise, online → the remote URL itself
/// 4. Otherwise → no video
pub struct ResolveSplashVideo {
    blob_store: Arc<dyn BlobStorePort>,
    marker: Arc<DownloadMarker>,
    connectivity: Arc<dyn ConnectivityPort>,
    object_urls: Arc<dyn ObjectUrlPort>,
}

impl ResolveSplashVideo {
    pub fn new(
        blob_store: Arc<dyn BlobStorePort>,
        marker: Arc<DownloadMarker>,
        connectivity: Arc<dyn ConnectivityPort>,
        object_urls: Arc<dyn ObjectUrlPort>,
    ) -> Self {
        Self {
            blob_store,
            marker,
            connectivity,
            object_urls,
        }
    }

    /// `None` means "no video available"; the caller switches to the image splash.
    pub async fn execute(&self, config: &SplashConfig) -> Option<VideoSource> {
        let span = info_span!("usecase.resolve_splash_video.execute");

        async {
            if !config.wants_custom_video() {
                debug!("no custom video configured");
                return None;
            }
            let video_url = config.video_url.as_deref()?;

            if self.marker.matches(video_url).await {
                match self.blob_store.get().await {
                    Ok(Some(blob)) => {
                        let object_ref = self.object_urls.create(blob);
                        info!(%video_url, %object_ref, "playing splash video from local cache");
                        return Some(VideoSource::Local(LocalVideoRef {
                            object_ref,
                            object_urls: self.object_urls.clone(),
                        }));
                    }
                    Ok(None) => debug!(%video_url, "marker matches but blob is absent"),
                    Err(err) => warn!(error = %err, "failed to read cached splash video"),
                }
            }

            if self.connectivity.is_online().await {
                info!(%video_url, "streaming splash video from remote");
                return Some(VideoSource::Remote(video_url.to_string()));
            }

            info!(%video_url, "splash video not cached and offline; no video available");
            None
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::splash::test_support::*;
    use ep_core::asset::LAST_DOWNLOADED_VIDEO_URL_KEY;
    use ep_core::ports::KeyValuePort;
    use serde_json::json;
    use std::sync::atomic::Ordering;

    const VIDEO_URL: &str = "https://cdn.example.com/v2.mp4";

    struct Fixture {
        kv: Arc<MemoryKv>,
        blobs: Arc<MemoryBlobStore>,
        connectivity: Arc<StaticConnectivity>,
        object_urls: Arc<CountingObjectUrls>,
        resolver: ResolveSplashVideo,
    }

    fn fixture(online: bool, blobs: MemoryBlobStore) -> Fixture {
        let kv = Arc::new(MemoryKv::default());
        let blobs = Arc::new(blobs);
        let connectivity = Arc::new(StaticConnectivity::new(online));
        let object_urls = Arc::new(CountingObjectUrls::default());
        let resolver = ResolveSplashVideo::new(
            blobs.clone(),
            Arc::new(DownloadMarker::new(kv.clone())),
            connectivity.clone(),
            object_urls.clone(),
        );
        Fixture {
            kv,
            blobs,
            connectivity,
            object_urls,
            resolver,
        }
    }

    fn video_config() -> SplashConfig {
        SplashConfig::from_candidate(&json!({
            "useCustom": true,
            "splashType": "video",
            "videoUrl": VIDEO_URL,
        }))
    }

    #[tokio::test]
    async fn matching_marker_and_blob_give_local_reference_without_network() {
        let f = fixture(true, MemoryBlobStore::with_blob(b"cached video"));
        f.kv.set(LAST_DOWNLOADED_VIDEO_URL_KEY, VIDEO_URL).await.unwrap();

        let source = f.resolver.execute(&video_config()).await;

        assert!(matches!(source, Some(VideoSource::Local(_))));
        assert_eq!(f.connectivity.checks.load(Ordering::SeqCst), 0);
        assert_eq!(f.object_urls.live(), 1);
    }

    #[tokio::test]
    async fn repeated_resolution_hits_cache_each_time_and_releases_references() {
        let f = fixture(false, MemoryBlobStore::with_blob(b"cached video"));
        f.kv.set(LAST_DOWNLOADED_VIDEO_URL_KEY, VIDEO_URL).await.unwrap();

        let first = f.resolver.execute(&video_config()).await;
        assert!(matches!(first, Some(VideoSource::Local(_))));
        drop(first);

        let second = f.resolver.execute(&video_config()).await;
        assert!(matches!(second, Some(VideoSource::Local(_))));
        drop(second);

        assert_eq!(f.object_urls.created.load(Ordering::SeqCst), 2);
        assert_eq!(f.object_urls.live(), 0);
    }

    #[tokio::test]
    async fn stale_marker_online_streams_remote_url() {
        let f = fixture(true, MemoryBlobStore::with_blob(b"old video"));
        f.kv
            .set(LAST_DOWNLOADED_VIDEO_URL_KEY, "https://cdn.example.com/v1.mp4")
            .await
            .unwrap();

        let source = f.resolver.execute(&video_config()).await.unwrap();

        assert_eq!(source.locator(), VIDEO_URL);
        assert_eq!(f.object_urls.created.load(Ordering::SeqCst), 0);
        // a stale marker never costs a blob read
        assert_eq!(f.blobs.gets.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn offline_without_cache_has_no_video() {
        let f = fixture(false, MemoryBlobStore::default());

        assert!(f.resolver.execute(&video_config()).await.is_none());
    }

    #[tokio::test]
    async fn marker_without_blob_falls_through() {
        let f = fixture(true, MemoryBlobStore::default());
        f.kv.set(LAST_DOWNLOADED_VIDEO_URL_KEY, VIDEO_URL).await.unwrap();

        let source = f.resolver.execute(&video_config()).await;

        assert!(matches!(source, Some(VideoSource::Remote(_))));
    }

    #[tokio::test]
    async fn image_or_default_config_has_no_video() {
        let f = fixture(true, MemoryBlobStore::with_blob(b"cached video"));

        assert!(f.resolver.execute(&SplashConfig::default()).await.is_none());
        assert_eq!(f.connectivity.checks.load(Ordering::SeqCst), 0);
    }
}
