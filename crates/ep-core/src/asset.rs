//! Persisted slot names and local object references for the splash video.
//! 启动视频缓存的固定键名与本地对象引用

use std::fmt;

/// Schema version of the blob store layout. Bumping it moves the store to a
/// fresh namespace; old blobs are never read again.
pub const BLOB_STORE_VERSION: u32 = 1;

/// The single blob slot inside the asset store.
pub const SPLASH_VIDEO_BLOB_KEY: &str = "splash_video";

/// Key/value entry holding the source URL of the most recently cached blob
/// (the "last downloaded" marker).
pub const LAST_DOWNLOADED_VIDEO_URL_KEY: &str = "splash_video_source_url";

/// Key/value entry holding the last fetched splash settings document, verbatim.
pub const SPLASH_CONFIG_CACHE_KEY: &str = "splash_settings_cache";

/// A playable, process-local reference to an in-memory blob.
///
/// Only meaningful while the issuing [`ObjectUrlPort`](crate::ports::ObjectUrlPort)
/// still holds it; revoked references resolve to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef(String);

impl ObjectRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
