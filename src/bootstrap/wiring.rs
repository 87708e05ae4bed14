//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Apply configuration defaults once / 统一应用配置默认值
//! - ✅ Create infra implementations (fs, kv, http) / 创建 infra 层具体实现
//! - ✅ Inject them into the use cases / 将依赖注入到 use case
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//!
//! Storage that cannot be opened is wired as "no cache", never as a failure.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ep_app::app_paths::AppPaths;
use ep_app::usecases::{
    ClearSplashCache, DownloadMarker, InspectSplashCache, NormalizePaymentCallback,
    PrepareSplashScreen, RefreshSplashVideo, ResolveSplashConfig, ResolveSplashVideo,
    SplashConfigCache, DEFAULT_NOTICE_DELAY,
};
use ep_core::app_dirs::AppDirs;
use ep_core::config::AppConfig;
use ep_core::ports::{
    BlobStorePort, BootstrapEventEmitter, ConnectivityPort, KeyValuePort, RemoteDocumentPort,
};
use ep_infra::network::build_http_client;
use ep_infra::{
    FileKeyValueStore, FixedConnectivity, FsBlobStore, HttpAssetFetcher, HttpConnectivityProbe,
    HttpDocumentStore, InMemoryObjectUrls, UnavailableBlobStore,
};
use tracing::{info, warn};

use crate::adapters::{HeadlessNavigator, LoggingBootstrapEmitter, RemoteNoticesLoader};

pub const DEFAULT_SPLASH_DOCUMENT: &str = "settings/splash";
pub const DEFAULT_NOTICES_DOCUMENT: &str = "settings/notices";
pub const DEFAULT_NETWORK_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_REFRESH_DELAY: Duration = Duration::from_millis(1500);

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Data directory unavailable: {0}")]
    DataDir(String),

    #[error("HTTP client initialization failed: {0}")]
    HttpClient(String),
}

/// Configuration with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    /// `None` when no remote is configured; the app then runs offline.
    pub remote_base_url: Option<String>,
    pub splash_document: String,
    pub notices_document: String,
    pub probe_url: Option<String>,
    pub network_timeout: Duration,
    pub offline: bool,
    pub paths: AppPaths,
    pub notice_delay: Duration,
    pub refresh_delay: Duration,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn millis_or(value: u64, default: Duration) -> Duration {
    if value == 0 {
        default
    } else {
        Duration::from_millis(value)
    }
}

/// Explicit data root: `--data-dir` first, then `[storage] data_dir`.
pub fn data_dir_override(cli_data_dir: Option<PathBuf>, config: &AppConfig) -> Option<PathBuf> {
    cli_data_dir
        .or_else(|| (!config.data_dir.as_os_str().is_empty()).then(|| config.data_dir.clone()))
}

/// Apply defaults and command-line overrides to the loaded config.
pub fn resolve_settings(
    config: &AppConfig,
    app_dirs: &AppDirs,
    force_offline: bool,
) -> ResolvedSettings {
    let remote_base_url = non_empty(&config.remote_base_url);
    let probe_url = non_empty(&config.connectivity_probe_url).or_else(|| remote_base_url.clone());

    ResolvedSettings {
        offline: force_offline || config.force_offline || remote_base_url.is_none(),
        remote_base_url,
        splash_document: non_empty(&config.splash_document)
            .unwrap_or_else(|| DEFAULT_SPLASH_DOCUMENT.to_string()),
        notices_document: non_empty(&config.notices_document)
            .unwrap_or_else(|| DEFAULT_NOTICES_DOCUMENT.to_string()),
        probe_url,
        network_timeout: match config.network_timeout_secs {
            0 => DEFAULT_NETWORK_TIMEOUT,
            secs => Duration::from_secs(secs),
        },
        paths: AppPaths::from_app_dirs(app_dirs),
        notice_delay: millis_or(config.notice_delay_ms, DEFAULT_NOTICE_DELAY),
        refresh_delay: millis_or(config.refresh_delay_ms, DEFAULT_REFRESH_DELAY),
    }
}

/// Everything the run modes need, fully assembled.
pub struct AppDeps {
    pub settings: ResolvedSettings,
    pub prepare_splash: Arc<PrepareSplashScreen>,
    pub refresh_video: Arc<RefreshSplashVideo>,
    pub clear_cache: Arc<ClearSplashCache>,
    pub inspect_cache: Arc<InspectSplashCache>,
    pub notices: Arc<RemoteNoticesLoader>,
    pub emitter: Arc<dyn BootstrapEventEmitter>,
    pub navigator: Arc<HeadlessNavigator>,
    pub payment_callback: Arc<NormalizePaymentCallback>,
    pub object_urls: Arc<InMemoryObjectUrls>,
}

async fn create_blob_store(settings: &ResolvedSettings) -> Arc<dyn BlobStorePort> {
    match FsBlobStore::open(&settings.paths.storage_root).await {
        Ok(store) => Arc::new(store),
        Err(err) => {
            warn!(error = %err, "splash video cache disabled");
            Arc::new(UnavailableBlobStore)
        }
    }
}

async fn create_key_value(settings: &ResolvedSettings) -> Arc<dyn KeyValuePort> {
    match FileKeyValueStore::open(&settings.paths.storage_root).await {
        Ok(store) => Arc::new(store),
        Err(err) => {
            // Reads of a missing namespace are empty and writes only warn.
            warn!(error = %err, "local key/value namespace unavailable");
            Arc::new(FileKeyValueStore::new(
                settings.paths.storage_root.join("kv").join("local_storage.json"),
            ))
        }
    }
}

fn create_connectivity(
    settings: &ResolvedSettings,
    client: &reqwest::Client,
) -> Arc<dyn ConnectivityPort> {
    match (&settings.probe_url, settings.offline) {
        (Some(probe_url), false) => Arc::new(HttpConnectivityProbe::new(client.clone(), probe_url)),
        _ => Arc::new(FixedConnectivity(false)),
    }
}

/// Assemble all use cases from resolved settings.
pub async fn wire_dependencies(settings: ResolvedSettings) -> WiringResult<AppDeps> {
    let client = build_http_client(settings.network_timeout)
        .map_err(|e| WiringError::HttpClient(format!("{e:#}")))?;

    let blob_store = create_blob_store(&settings).await;
    let kv = create_key_value(&settings).await;
    let connectivity = create_connectivity(&settings, &client);
    let remote: Arc<dyn RemoteDocumentPort> = Arc::new(HttpDocumentStore::new(
        client.clone(),
        settings.remote_base_url.clone().unwrap_or_default(),
    ));
    let object_urls = Arc::new(InMemoryObjectUrls::new());

    let cache = Arc::new(SplashConfigCache::new(kv.clone()));
    let marker = Arc::new(DownloadMarker::new(kv));

    let resolve_config = Arc::new(ResolveSplashConfig::with_default_tiers(
        remote.clone(),
        connectivity.clone(),
        cache.clone(),
        settings.splash_document.clone(),
    ));
    let resolve_video = Arc::new(ResolveSplashVideo::new(
        blob_store.clone(),
        marker.clone(),
        connectivity.clone(),
        object_urls.clone(),
    ));
    let refresh_video = Arc::new(RefreshSplashVideo::new(
        connectivity.clone(),
        cache.clone(),
        marker.clone(),
        Arc::new(HttpAssetFetcher::new(client)),
        blob_store.clone(),
    ));
    let navigator = Arc::new(HeadlessNavigator::new("/"));

    info!(
        storage_root = %settings.paths.storage_root.display(),
        offline = settings.offline,
        remote = settings.remote_base_url.as_deref().unwrap_or("-"),
        "dependencies wired"
    );

    Ok(AppDeps {
        prepare_splash: Arc::new(PrepareSplashScreen::new(resolve_config, resolve_video)),
        refresh_video,
        clear_cache: Arc::new(ClearSplashCache::new(
            marker.clone(),
            blob_store.clone(),
            cache.clone(),
        )),
        inspect_cache: Arc::new(InspectSplashCache::new(marker, blob_store, cache)),
        notices: Arc::new(RemoteNoticesLoader::new(
            remote,
            connectivity,
            settings.notices_document.clone(),
        )),
        emitter: Arc::new(LoggingBootstrapEmitter),
        payment_callback: Arc::new(NormalizePaymentCallback::new(navigator.clone())),
        navigator,
        object_urls,
        settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirs_at(root: &str) -> AppDirs {
        AppDirs {
            app_data_root: PathBuf::from(root),
        }
    }

    #[test]
    fn empty_config_gets_defaults_and_runs_offline() {
        let settings = resolve_settings(&AppConfig::empty(), &dirs_at("/data/exampad"), false);

        assert_eq!(
            settings,
            ResolvedSettings {
                remote_base_url: None,
                splash_document: "settings/splash".to_string(),
                notices_document: "settings/notices".to_string(),
                probe_url: None,
                network_timeout: Duration::from_secs(5),
                offline: true,
                paths: AppPaths {
                    storage_root: PathBuf::from("/data/exampad"),
                    config_path: PathBuf::from("/data/exampad/config.toml"),
                    logs_dir: PathBuf::from("/data/exampad/logs"),
                },
                notice_delay: Duration::from_millis(500),
                refresh_delay: Duration::from_millis(1500),
            }
        );
    }

    #[test]
    fn probe_defaults_to_remote_and_forced_offline_wins() {
        let mut config = AppConfig::empty();
        config.remote_base_url = "https://api.exampad.test".to_string();
        config.notice_delay_ms = 200;

        let settings = resolve_settings(&config, &dirs_at("/platform"), false);
        assert_eq!(settings.probe_url.as_deref(), Some("https://api.exampad.test"));
        assert_eq!(settings.notice_delay, Duration::from_millis(200));
        assert!(!settings.offline);

        let settings = resolve_settings(&config, &dirs_at("/platform"), true);
        assert!(settings.offline);
    }

    #[test]
    fn cli_data_dir_beats_config_data_dir() {
        let mut config = AppConfig::empty();
        assert_eq!(data_dir_override(None, &config), None);

        config.data_dir = PathBuf::from("/from/config");
        assert_eq!(
            data_dir_override(None, &config),
            Some(PathBuf::from("/from/config"))
        );
        assert_eq!(
            data_dir_override(Some(PathBuf::from("/from/cli")), &config),
            Some(PathBuf::from("/from/cli"))
        );
    }

    #[tokio::test]
    async fn storage_lands_under_the_resolved_storage_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        let app_dirs = AppDirs {
            app_data_root: root.clone(),
        };

        let deps = wire_dependencies(resolve_settings(&AppConfig::empty(), &app_dirs, true))
            .await
            .unwrap();

        assert_eq!(deps.settings.paths.storage_root, root);
        assert!(root.join("asset-store").is_dir());
    }

    #[tokio::test]
    async fn unusable_data_dir_still_wires_a_working_app() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("occupied");
        std::fs::write(&not_a_dir, b"file").unwrap();

        let app_dirs = AppDirs {
            app_data_root: not_a_dir,
        };
        let settings = resolve_settings(&AppConfig::empty(), &app_dirs, false);
        let deps = wire_dependencies(settings).await.unwrap();

        let plan = deps.prepare_splash.execute().await;
        assert_eq!(plan.config(), &ep_core::splash::SplashConfig::default());

        let status = deps.inspect_cache.execute().await;
        assert_eq!(status.blob_bytes, None);
    }
}
