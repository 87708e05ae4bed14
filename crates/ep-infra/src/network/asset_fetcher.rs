use async_trait::async_trait;
use bytes::Bytes;
use ep_core::ports::{AssetFetchPort, SplashCacheError};
use tracing::debug;

pub struct HttpAssetFetcher {
    client: reqwest::Client,
}

impl HttpAssetFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssetFetchPort for HttpAssetFetcher {
    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, SplashCacheError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SplashCacheError::RemoteFetchFailed(format!("GET {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SplashCacheError::RemoteFetchFailed(format!(
                "GET {url}: status {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SplashCacheError::RemoteFetchFailed(format!("GET {url}: body: {e}")))?;

        debug!(%url, bytes = body.len(), "asset downloaded");
        Ok(body)
    }
}
