use async_trait::async_trait;
use bytes::Bytes;

use super::errors::SplashCacheError;

#[async_trait]
pub trait ConnectivityPort: Send + Sync {
    /// Best-effort "is the network reachable right now".
    async fn is_online(&self) -> bool;
}

#[async_trait]
pub trait AssetFetchPort: Send + Sync {
    /// Fetch the full body at `url` into memory.
    ///
    /// Any non-success response is [`SplashCacheError::RemoteFetchFailed`];
    /// no partial body is ever returned.
    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, SplashCacheError>;
}
