pub mod fs;
pub mod kv;
pub mod network;
pub mod object_url;

pub use fs::blob_store::{FsBlobStore, UnavailableBlobStore};
pub use kv::file_store::FileKeyValueStore;
pub use network::{FixedConnectivity, HttpAssetFetcher, HttpConnectivityProbe, HttpDocumentStore};
pub use object_url::InMemoryObjectUrls;
