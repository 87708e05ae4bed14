use std::sync::Arc;

use ep_app::usecases::{AuthSignal, DataSignal};
use ep_core::bootstrap::{AuthState, Notice};
use ep_core::ports::{ConnectivityPort, RemoteDocumentPort};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Data collaborator: pending notices from the remote notices document.
///
/// The document is a JSON array of `{id, title, body}`. Offline, absent,
/// failed or malformed all degrade to "no notices".
pub struct RemoteNoticesLoader {
    remote: Arc<dyn RemoteDocumentPort>,
    connectivity: Arc<dyn ConnectivityPort>,
    document: String,
}

impl RemoteNoticesLoader {
    pub fn new(
        remote: Arc<dyn RemoteDocumentPort>,
        connectivity: Arc<dyn ConnectivityPort>,
        document: impl Into<String>,
    ) -> Self {
        Self {
            remote,
            connectivity,
            document: document.into(),
        }
    }

    pub async fn load(&self) -> Vec<Notice> {
        if !self.connectivity.is_online().await {
            debug!("offline; no notices");
            return Vec::new();
        }

        let document = match self.remote.fetch_document(&self.document).await {
            Ok(Some(document)) => document,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(document = %self.document, error = %err, "failed to load notices");
                return Vec::new();
            }
        };

        match serde_json::from_value::<Vec<Notice>>(document) {
            Ok(notices) => {
                info!(count = notices.len(), "pending notices loaded");
                notices
            }
            Err(err) => {
                warn!(document = %self.document, error = %err, "malformed notices document");
                Vec::new()
            }
        }
    }
}

/// Auth collaborator: resolves to a fixed identity.
pub fn spawn_auth_resolution(identity: AuthState, signal: AuthSignal) -> JoinHandle<()> {
    tokio::spawn(async move {
        signal.resolve(identity);
    })
}

/// Data collaborator: bulk load, then report completion with the notices.
pub fn spawn_data_load(loader: Arc<RemoteNoticesLoader>, signal: DataSignal) -> JoinHandle<()> {
    tokio::spawn(async move {
        let notices = loader.load().await;
        signal.loaded(notices);
    })
}
