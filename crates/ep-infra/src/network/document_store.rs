use async_trait::async_trait;
use ep_core::ports::{RemoteDocumentPort, SplashCacheError};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

/// Remote document store reached over plain HTTP GET.
///
/// A document named `settings/splash` lives at `<base_url>/settings/splash`.
/// `404` and a literal `null` body both mean "document absent".
pub struct HttpDocumentStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDocumentStore {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn document_url(&self, name: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            name.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl RemoteDocumentPort for HttpDocumentStore {
    async fn fetch_document(&self, name: &str) -> Result<Option<Value>, SplashCacheError> {
        let url = self.document_url(name);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SplashCacheError::RemoteFetchFailed(format!("GET {url}: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(%url, "remote document absent");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SplashCacheError::RemoteFetchFailed(format!(
                "GET {url}: status {status}"
            )));
        }

        let document: Value = response
            .json()
            .await
            .map_err(|e| SplashCacheError::RemoteFetchFailed(format!("GET {url}: body: {e}")))?;

        Ok((!document.is_null()).then_some(document))
    }
}
