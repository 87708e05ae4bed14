//! Business logic use cases
//!
//! ```text
//! process start
//!   ├─ PrepareSplashScreen ── ResolveSplashConfig (remote → cache → defaults)
//!   │                      └─ ResolveSplashVideo  (blob + marker → local ref | remote url | none)
//!   ├─ start_splash_timer ─┐
//!   ├─ auth collaborator ──┼─ ReadinessLatch ── BootstrapSequencer ── ready (+ notices after delay)
//!   └─ data collaborator ──┘
//! main view mounted
//!   └─ RefreshSplashVideo (background, next cold start only)
//! every navigation
//!   └─ NormalizePaymentCallback
//! ```

pub mod app_lifecycle;
pub mod payment;
pub mod splash;

pub use app_lifecycle::{
    start_splash_timer, AuthSignal, BootstrapSequencer, BootstrapState, DataSignal,
    ReadinessLatch, SequencerOutcome, SplashTimerSignal, DEFAULT_NOTICE_DELAY,
};
pub use payment::NormalizePaymentCallback;
pub use splash::{
    CachedCandidateSource, ClearSplashCache, DownloadMarker, InspectSplashCache, LocalVideoRef,
    PrepareSplashScreen, RefreshOutcome, RefreshSplashVideo, RemoteCandidateSource,
    ResolveSplashConfig, ResolveSplashVideo, SplashCacheStatus, SplashCandidateSource,
    SplashConfigCache, SplashMedia, SplashPlan, SplashScreenState, VideoSource,
};
