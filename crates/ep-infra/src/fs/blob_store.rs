use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use ep_core::asset::{BLOB_STORE_VERSION, SPLASH_VIDEO_BLOB_KEY};
use ep_core::ports::{BlobStorePort, SplashCacheError};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

const ASSET_STORE_DIR: &str = "asset-store";
const BLOB_FILE_EXTENSION: &str = "bin";
const PROBE_FILE_NAME: &str = ".probe";

/// Filesystem-backed single-slot blob store.
///
/// Layout: `<root>/asset-store/v<version>/splash_video.bin`. The schema
/// version is part of the path, so a layout change simply starts from an
/// empty namespace.
pub struct FsBlobStore {
    dir: PathBuf,
}

impl FsBlobStore {
    /// Open (and if necessary create) the store under `root`.
    ///
    /// Idempotent. Fails with [`SplashCacheError::StorageUnavailable`] when the
    /// namespace directory cannot be created or written; callers treat that
    /// as "no cache available".
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), ep_core::SplashCacheError> {
    /// let store = ep_infra::FsBlobStore::open("/tmp/exampad").await?;
    /// # Ok(()) }
    /// ```
    pub async fn open(root: impl AsRef<Path>) -> Result<Self, SplashCacheError> {
        let dir = root
            .as_ref()
            .join(ASSET_STORE_DIR)
            .join(format!("v{BLOB_STORE_VERSION}"));

        fs::create_dir_all(&dir).await.map_err(|e| {
            SplashCacheError::StorageUnavailable(format!(
                "create asset store dir failed: {}: {e}",
                dir.display()
            ))
        })?;

        // A read-only or sandboxed data dir shows up here rather than on first put.
        let probe = dir.join(PROBE_FILE_NAME);
        fs::write(&probe, b"").await.map_err(|e| {
            SplashCacheError::StorageUnavailable(format!(
                "asset store dir not writable: {}: {e}",
                dir.display()
            ))
        })?;
        if let Err(err) = fs::remove_file(&probe).await {
            debug!(path = %probe.display(), error = %err, "failed to remove writability probe");
        }

        debug!(dir = %dir.display(), "asset store opened");
        Ok(Self { dir })
    }

    fn blob_path(&self) -> PathBuf {
        self.dir
            .join(SPLASH_VIDEO_BLOB_KEY)
            .with_extension(BLOB_FILE_EXTENSION)
    }

    fn tmp_path(&self) -> PathBuf {
        self.blob_path()
            .with_extension(format!("{BLOB_FILE_EXTENSION}.tmp"))
    }
}

#[async_trait]
impl BlobStorePort for FsBlobStore {
    /// Write the blob to a temporary sibling, fsync it, then rename it over
    /// the slot. Readers observe either the old file or the new one.
    async fn put(&self, data: Bytes) -> Result<()> {
        let tmp_path = self.tmp_path();
        let blob_path = self.blob_path();

        let mut file = fs::File::create(&tmp_path)
            .await
            .with_context(|| format!("create temp blob failed: {}", tmp_path.display()))?;
        file.write_all(&data)
            .await
            .with_context(|| format!("write temp blob failed: {}", tmp_path.display()))?;
        file.sync_all()
            .await
            .with_context(|| format!("sync temp blob failed: {}", tmp_path.display()))?;
        drop(file);

        fs::rename(&tmp_path, &blob_path).await.with_context(|| {
            format!(
                "rename temp blob to target failed: {} -> {}",
                tmp_path.display(),
                blob_path.display()
            )
        })?;

        debug!(bytes = data.len(), "splash blob stored");
        Ok(())
    }

    async fn get(&self) -> Result<Option<Bytes>> {
        let path = self.blob_path();
        match fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read blob failed: {}", path.display())),
        }
    }

    async fn clear(&self) -> Result<()> {
        let path = self.blob_path();
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("remove blob failed: {}", path.display())),
        }
    }
}

/// Stand-in used when persistent storage could not be opened.
///
/// Reads always miss; writes fail so the refresher never records a marker
/// for a blob that was not stored.
pub struct UnavailableBlobStore;

#[async_trait]
impl BlobStorePort for UnavailableBlobStore {
    async fn put(&self, _data: Bytes) -> Result<()> {
        Err(SplashCacheError::StorageUnavailable("no persistent blob store".to_string()).into())
    }

    async fn get(&self) -> Result<Option<Bytes>> {
        Ok(None)
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }
}
