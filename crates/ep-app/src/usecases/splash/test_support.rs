//! Hand-written port doubles shared by the splash use case tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bytes::Bytes;
use ep_core::asset::ObjectRef;
use ep_core::ports::{
    AssetFetchPort, BlobStorePort, ConnectivityPort, KeyValuePort, ObjectUrlPort,
    RemoteDocumentPort, SplashCacheError,
};
use serde_json::Value;

#[derive(Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    failing_key: Mutex<Option<String>>,
}

impl MemoryKv {
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every `set` of `key` fail.
    pub fn fail_writes_to(&self, key: &str) {
        *self.failing_key.lock().unwrap() = Some(key.to_string());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl KeyValuePort for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(anyhow!("kv read failure"));
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.failing_key.lock().unwrap().as_deref() == Some(key) {
            return Err(anyhow!("kv write failure for {key}"));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryBlobStore {
    blob: Mutex<Option<Bytes>>,
    fail_puts: AtomicBool,
    pub gets: AtomicUsize,
    pub puts: AtomicUsize,
}

impl MemoryBlobStore {
    pub fn with_blob(data: &'static [u8]) -> Self {
        let store = Self::default();
        *store.blob.lock().unwrap() = Some(Bytes::from_static(data));
        store
    }

    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    pub fn blob(&self) -> Option<Bytes> {
        self.blob.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobStorePort for MemoryBlobStore {
    async fn put(&self, data: Bytes) -> Result<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(anyhow!("disk full"));
        }
        *self.blob.lock().unwrap() = Some(data);
        Ok(())
    }

    async fn get(&self) -> Result<Option<Bytes>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self.blob.lock().unwrap().clone())
    }

    async fn clear(&self) -> Result<()> {
        *self.blob.lock().unwrap() = None;
        Ok(())
    }
}

pub struct StaticConnectivity {
    online: AtomicBool,
    pub checks: AtomicUsize,
}

impl StaticConnectivity {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
            checks: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ConnectivityPort for StaticConnectivity {
    async fn is_online(&self) -> bool {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.online.load(Ordering::SeqCst)
    }
}

pub enum RemoteReply {
    Document(Value),
    Absent,
    Fail,
}

pub struct ScriptedRemote {
    reply: RemoteReply,
    pub calls: AtomicUsize,
}

impl ScriptedRemote {
    pub fn new(reply: RemoteReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RemoteDocumentPort for ScriptedRemote {
    async fn fetch_document(&self, _name: &str) -> Result<Option<Value>, SplashCacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            RemoteReply::Document(value) => Ok(Some(value.clone())),
            RemoteReply::Absent => Ok(None),
            RemoteReply::Fail => Err(SplashCacheError::RemoteFetchFailed("boom".to_string())),
        }
    }
}

pub struct ScriptedFetcher {
    body: Option<Bytes>,
    pub calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn serving(body: &'static [u8]) -> Self {
        Self {
            body: Some(Bytes::from_static(body)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            body: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AssetFetchPort for ScriptedFetcher {
    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, SplashCacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.body
            .clone()
            .ok_or_else(|| SplashCacheError::RemoteFetchFailed(format!("GET {url}: status 500")))
    }
}

#[derive(Default)]
pub struct CountingObjectUrls {
    pub created: AtomicUsize,
    pub revoked: AtomicUsize,
}

impl CountingObjectUrls {
    pub fn live(&self) -> usize {
        self.created.load(Ordering::SeqCst) - self.revoked.load(Ordering::SeqCst)
    }
}

impl ObjectUrlPort for CountingObjectUrls {
    fn create(&self, _data: Bytes) -> ObjectRef {
        let n = self.created.fetch_add(1, Ordering::SeqCst);
        ObjectRef::new(format!("blob:test/{n}"))
    }

    fn revoke(&self, _object_ref: &ObjectRef) {
        self.revoked.fetch_add(1, Ordering::SeqCst);
    }
}
