use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Single-slot persistent blob storage for the splash video.
///
/// Writes replace the slot atomically: a reader sees either the previous
/// blob or the new one, never a partial write.
#[async_trait]
pub trait BlobStorePort: Send + Sync {
    /// Replace the stored blob.
    async fn put(&self, data: Bytes) -> Result<()>;

    /// Read the stored blob. A missing blob is `Ok(None)`, not an error.
    async fn get(&self) -> Result<Option<Bytes>>;

    /// Remove the stored blob, if any.
    async fn clear(&self) -> Result<()>;
}

#[async_trait]
impl<T: BlobStorePort + ?Sized> BlobStorePort for Arc<T> {
    async fn put(&self, data: Bytes) -> Result<()> {
        (**self).put(data).await
    }

    async fn get(&self) -> Result<Option<Bytes>> {
        (**self).get().await
    }

    async fn clear(&self) -> Result<()> {
        (**self).clear().await
    }
}
