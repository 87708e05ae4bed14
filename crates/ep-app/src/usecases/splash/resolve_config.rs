use std::sync::Arc;

use async_trait::async_trait;
use ep_core::ports::{ConnectivityPort, RemoteDocumentPort, SplashCacheError};
use ep_core::splash::SplashConfig;
use serde_json::{Map, Value};
use tracing::{debug, info, info_span, warn, Instrument};

use super::cache_store::SplashConfigCache;

/// One tier of the splash configuration fallback chain.
///
/// `Ok(None)` means "nothing here, ask the next tier"; an error is logged
/// and treated the same way.
#[async_trait]
pub trait SplashCandidateSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn load(&self) -> Result<Option<Value>, SplashCacheError>;
}

/// Tier 1: the remote settings document, mirrored into the local cache on success.
pub struct RemoteCandidateSource {
    remote: Arc<dyn RemoteDocumentPort>,
    connectivity: Arc<dyn ConnectivityPort>,
    cache: Arc<SplashConfigCache>,
    document: String,
}

impl RemoteCandidateSource {
    pub fn new(
        remote: Arc<dyn RemoteDocumentPort>,
        connectivity: Arc<dyn ConnectivityPort>,
        cache: Arc<SplashConfigCache>,
        document: impl Into<String>,
    ) -> Self {
        Self {
            remote,
            connectivity,
            cache,
            document: document.into(),
        }
    }
}

#[async_trait]
impl SplashCandidateSource for RemoteCandidateSource {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn load(&self) -> Result<Option<Value>, SplashCacheError> {
        if !self.connectivity.is_online().await {
            debug!("offline; skipping remote splash settings");
            return Ok(None);
        }

        let Some(document) = self.remote.fetch_document(&self.document).await? else {
            debug!(document = %self.document, "remote splash settings absent");
            return Ok(None);
        };

        // A failed mirror write only costs the next offline start its custom splash.
        if let Err(err) = self.cache.store(&document).await {
            warn!(error = %err, "failed to mirror splash settings into local cache");
        }

        Ok(Some(document))
    }
}

/// Tier 2: the last successfully fetched document.
pub struct CachedCandidateSource {
    cache: Arc<SplashConfigCache>,
}

impl CachedCandidateSource {
    pub fn new(cache: Arc<SplashConfigCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl SplashCandidateSource for CachedCandidateSource {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn load(&self) -> Result<Option<Value>, SplashCacheError> {
        self.cache.load().await
    }
}

/// Use case producing the one effective [`SplashConfig`] for this process.
///
/// ## Behavior / 行为
/// - Asks each candidate source in order; the first document found wins
/// - Falls back to an empty candidate (i.e. the defaults) when every tier
///   is empty or failed
/// - Applies the `useCustom` kill switch via [`SplashConfig::from_candidate`]
///
/// Never fails: the result is always a fully populated config.
pub struct ResolveSplashConfig {
    sources: Vec<Arc<dyn SplashCandidateSource>>,
}

impl ResolveSplashConfig {
    pub fn new(sources: Vec<Arc<dyn SplashCandidateSource>>) -> Self {
        Self { sources }
    }

    /// The standard chain: remote document, then local cache, then defaults.
    pub fn with_default_tiers(
        remote: Arc<dyn RemoteDocumentPort>,
        connectivity: Arc<dyn ConnectivityPort>,
        cache: Arc<SplashConfigCache>,
        document: impl Into<String>,
    ) -> Self {
        Self::new(vec![
            Arc::new(RemoteCandidateSource::new(
                remote,
                connectivity,
                cache.clone(),
                document,
            )),
            Arc::new(CachedCandidateSource::new(cache)),
        ])
    }

    pub async fn execute(&self) -> SplashConfig {
        let span = info_span!("usecase.resolve_splash_config.execute");

        async {
            let (tier, candidate) = self.first_candidate().await;
            let config = SplashConfig::from_candidate(&candidate);

            info!(
                tier,
                use_custom = config.use_custom,
                splash_type = ?config.splash_type,
                "splash configuration resolved"
            );
            config
        }
        .instrument(span)
        .await
    }

    async fn first_candidate(&self) -> (&'static str, Value) {
        for source in &self.sources {
            match source.load().await {
                Ok(Some(candidate)) => return (source.name(), candidate),
                Ok(None) => debug!(tier = source.name(), "no splash candidate"),
                Err(err) => {
                    warn!(tier = source.name(), error = %err, "splash candidate tier failed")
                }
            }
        }
        ("defaults", Value::Object(Map::new()))
    }
}
