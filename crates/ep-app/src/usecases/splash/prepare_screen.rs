use std::sync::Arc;

use ep_core::bootstrap::SplashBackdrop;
use ep_core::ports::SplashCacheError;
use ep_core::splash::{SplashConfig, SplashType};
use tracing::{info, info_span, warn, Instrument};

use super::resolve_config::ResolveSplashConfig;
use super::resolve_video::{ResolveSplashVideo, VideoSource};

#[derive(Debug)]
pub enum SplashMedia {
    Video(VideoSource),
    Image { background_image_url: Option<String> },
}

/// Everything the splash view needs for this session.
///
/// `config` is what was resolved and is never changed; `media` is what is
/// actually shown, which may degrade from video to image during the session.
#[derive(Debug)]
pub struct SplashPlan {
    config: SplashConfig,
    media: SplashMedia,
}

impl SplashPlan {
    pub fn config(&self) -> &SplashConfig {
        &self.config
    }

    pub fn media(&self) -> &SplashMedia {
        &self.media
    }

    pub fn backdrop(&self) -> SplashBackdrop {
        match &self.media {
            SplashMedia::Video(_) => SplashBackdrop::Video,
            SplashMedia::Image {
                background_image_url,
            } => SplashBackdrop::Image(background_image_url.clone()),
        }
    }

    /// The player could not decode or play the selected video.
    ///
    /// Switches this session to the image splash and releases any local
    /// object reference. Persisted configuration is left untouched.
    pub fn fall_back_to_image(&mut self, error: SplashCacheError) {
        if let SplashMedia::Video(source) = &self.media {
            warn!(locator = source.locator(), %error, "splash video unplayable; using image");
        }
        // Replacing the media drops any LocalVideoRef, which revokes it.
        self.media = image_media(&self.config);
    }
}

fn image_media(config: &SplashConfig) -> SplashMedia {
    SplashMedia::Image {
        background_image_url: config.background_image_url.clone(),
    }
}

/// Splash view state: resolution may still be in flight when the view first renders.
#[derive(Debug, Default)]
pub enum SplashScreenState {
    #[default]
    Pending,
    Ready(SplashPlan),
}

impl SplashScreenState {
    pub fn backdrop(&self) -> SplashBackdrop {
        match self {
            SplashScreenState::Pending => SplashBackdrop::Neutral,
            SplashScreenState::Ready(plan) => plan.backdrop(),
        }
    }

    pub fn plan(&self) -> Option<&SplashPlan> {
        match self {
            SplashScreenState::Pending => None,
            SplashScreenState::Ready(plan) => Some(plan),
        }
    }
}

/// Use case combining config resolution and video source selection.
pub struct PrepareSplashScreen {
    config: Arc<ResolveSplashConfig>,
    video: Arc<ResolveSplashVideo>,
}

impl PrepareSplashScreen {
    pub fn new(config: Arc<ResolveSplashConfig>, video: Arc<ResolveSplashVideo>) -> Self {
        Self { config, video }
    }

    pub async fn execute(&self) -> SplashPlan {
        let span = info_span!("usecase.prepare_splash_screen.execute");

        async {
            let config = self.config.execute().await;

            let media = match config.splash_type {
                SplashType::Video if config.use_custom => {
                    match self.video.execute(&config).await {
                        Some(source) => SplashMedia::Video(source),
                        None => {
                            info!("no playable splash video; using image fallback");
                            image_media(&config)
                        }
                    }
                }
                _ => image_media(&config),
            };

            SplashPlan { config, media }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::splash::cache_store::{DownloadMarker, SplashConfigCache};
    use crate::usecases::splash::test_support::*;
    use ep_core::asset::LAST_DOWNLOADED_VIDEO_URL_KEY;
    use ep_core::ports::KeyValuePort;
    use serde_json::json;
    use std::sync::atomic::Ordering;

    const VIDEO_URL: &str = "https://cdn.example.com/v2.mp4";

    struct Fixture {
        kv: Arc<MemoryKv>,
        remote: Arc<ScriptedRemote>,
        object_urls: Arc<CountingObjectUrls>,
        prepare: PrepareSplashScreen,
    }

    fn fixture(online: bool, reply: RemoteReply, blobs: MemoryBlobStore) -> Fixture {
        let kv = Arc::new(MemoryKv::default());
        let remote = Arc::new(ScriptedRemote::new(reply));
        let connectivity = Arc::new(StaticConnectivity::new(online));
        let object_urls = Arc::new(CountingObjectUrls::default());
        let cache = Arc::new(SplashConfigCache::new(kv.clone()));

        let config = Arc::new(ResolveSplashConfig::with_default_tiers(
            remote.clone(),
            connectivity.clone(),
            cache,
            "settings/splash",
        ));
        let video = Arc::new(ResolveSplashVideo::new(
            Arc::new(blobs),
            Arc::new(DownloadMarker::new(kv.clone())),
            connectivity,
            object_urls.clone(),
        ));

        Fixture {
            kv,
            remote,
            object_urls,
            prepare: PrepareSplashScreen::new(config, video),
        }
    }

    fn custom_video_document() -> serde_json::Value {
        json!({
            "useCustom": true,
            "splashType": "video",
            "videoUrl": VIDEO_URL,
            "backgroundImageUrl": "https://cdn.example.com/bg.png",
        })
    }

    #[test]
    fn pending_state_renders_neutral_backdrop() {
        assert_eq!(SplashScreenState::default().backdrop(), SplashBackdrop::Neutral);
        assert!(SplashScreenState::Pending.plan().is_none());
    }

    #[tokio::test]
    async fn offline_without_cache_falls_back_to_image_without_network() {
        let f = fixture(
            false,
            RemoteReply::Document(custom_video_document()),
            MemoryBlobStore::default(),
        );
        f.kv
            .set(
                ep_core::asset::SPLASH_CONFIG_CACHE_KEY,
                &custom_video_document().to_string(),
            )
            .await
            .unwrap();

        let plan = f.prepare.execute().await;

        assert_eq!(f.remote.calls.load(Ordering::SeqCst), 0);
        assert_eq!(plan.config().splash_type, SplashType::Video);
        assert_eq!(
            plan.backdrop(),
            SplashBackdrop::Image(Some("https://cdn.example.com/bg.png".to_string()))
        );
    }

    #[tokio::test]
    async fn cached_video_plays_locally() {
        let f = fixture(
            true,
            RemoteReply::Document(custom_video_document()),
            MemoryBlobStore::with_blob(b"video"),
        );
        f.kv.set(LAST_DOWNLOADED_VIDEO_URL_KEY, VIDEO_URL).await.unwrap();

        let plan = f.prepare.execute().await;

        assert!(matches!(
            plan.media(),
            SplashMedia::Video(VideoSource::Local(_))
        ));
        assert_eq!(plan.backdrop(), SplashBackdrop::Video);
    }

    #[tokio::test]
    async fn unplayable_video_degrades_to_image_and_revokes_reference() {
        let f = fixture(
            true,
            RemoteReply::Document(custom_video_document()),
            MemoryBlobStore::with_blob(b"corrupt video"),
        );
        f.kv.set(LAST_DOWNLOADED_VIDEO_URL_KEY, VIDEO_URL).await.unwrap();

        let mut plan = f.prepare.execute().await;
        assert_eq!(f.object_urls.live(), 1);

        plan.fall_back_to_image(SplashCacheError::AssetUnplayable("decode error".to_string()));

        assert_eq!(f.object_urls.live(), 0);
        assert!(matches!(plan.media(), SplashMedia::Image { .. }));
        // resolved configuration is not rewritten
        assert_eq!(plan.config().splash_type, SplashType::Video);
        assert_eq!(
            f.kv.value(LAST_DOWNLOADED_VIDEO_URL_KEY).as_deref(),
            Some(VIDEO_URL)
        );
    }

    #[tokio::test]
    async fn dropping_the_plan_revokes_the_reference() {
        let f = fixture(
            false,
            RemoteReply::Absent,
            MemoryBlobStore::with_blob(b"video"),
        );
        f.kv
            .set(
                ep_core::asset::SPLASH_CONFIG_CACHE_KEY,
                &custom_video_document().to_string(),
            )
            .await
            .unwrap();
        f.kv.set(LAST_DOWNLOADED_VIDEO_URL_KEY, VIDEO_URL).await.unwrap();

        let state = SplashScreenState::Ready(f.prepare.execute().await);
        assert_eq!(f.object_urls.live(), 1);

        drop(state);
        assert_eq!(f.object_urls.live(), 0);
    }

    #[tokio::test]
    async fn default_config_uses_image_splash() {
        let f = fixture(false, RemoteReply::Absent, MemoryBlobStore::default());

        let plan = f.prepare.execute().await;

        assert_eq!(plan.config(), &SplashConfig::default());
        assert_eq!(plan.backdrop(), SplashBackdrop::Image(None));
    }
}
