use thiserror::Error;

/// Failure taxonomy of the splash cache subsystem.
///
/// None of these reach the user: every use case converts them into a
/// degraded but valid result at its own boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplashCacheError {
    /// Persistent local storage could not be opened; run without a cache.
    #[error("local storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A configuration or asset fetch failed or returned non-success.
    #[error("remote fetch failed: {0}")]
    RemoteFetchFailed(String),

    /// The selected video source could not be played this session.
    #[error("asset unplayable: {0}")]
    AssetUnplayable(String),

    /// Locally cached JSON failed to parse; same as "no cache".
    #[error("malformed cache entry: {0}")]
    MalformedCache(String),
}

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory is unavailable")]
    DataLocalDirUnavailable,
}
