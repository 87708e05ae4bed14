//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `ep-app` and the
//! adapters in `ep-infra` / `ep-platform` (or the embedding shell). The
//! bootstrap logic never touches a file, socket or UI toolkit directly.

pub mod app_dirs;
mod blob_store;
mod bootstrap_events;
pub mod errors;
mod key_value;
mod navigator;
mod network;
mod object_url;
mod remote_document;

pub use app_dirs::AppDirsPort;
pub use blob_store::BlobStorePort;
pub use bootstrap_events::BootstrapEventEmitter;
pub use errors::{AppDirsError, SplashCacheError};
pub use key_value::KeyValuePort;
pub use navigator::NavigatorPort;
pub use network::{AssetFetchPort, ConnectivityPort};
pub use object_url::ObjectUrlPort;
pub use remote_document::RemoteDocumentPort;
