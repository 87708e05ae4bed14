//! Splash screen use cases and the offline splash-video cache.

mod cache_store;
mod maintenance;
mod prepare_screen;
mod refresh_video;
mod resolve_config;
mod resolve_video;

pub use cache_store::{DownloadMarker, SplashConfigCache};
pub use maintenance::{ClearSplashCache, InspectSplashCache, SplashCacheStatus};
pub use prepare_screen::{PrepareSplashScreen, SplashMedia, SplashPlan, SplashScreenState};
pub use refresh_video::{RefreshOutcome, RefreshSplashVideo};
pub use resolve_config::{
    CachedCandidateSource, RemoteCandidateSource, ResolveSplashConfig, SplashCandidateSource,
};
pub use resolve_video::{LocalVideoRef, ResolveSplashVideo, VideoSource};

#[cfg(test)]
pub(crate) mod test_support;
