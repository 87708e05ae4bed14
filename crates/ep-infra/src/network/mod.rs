//! HTTP adapters: remote documents, asset downloads, connectivity.

mod asset_fetcher;
mod connectivity;
mod document_store;

use std::time::Duration;

use anyhow::{Context, Result};

pub use asset_fetcher::HttpAssetFetcher;
pub use connectivity::{FixedConnectivity, HttpConnectivityProbe};
pub use document_store::HttpDocumentStore;

/// Build the shared HTTP client used by every adapter in this module.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("exampad/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("build http client failed")
}
