use std::collections::HashMap;
use std::sync::Mutex;

use bytes::Bytes;
use ep_core::asset::ObjectRef;
use ep_core::ports::ObjectUrlPort;
use tracing::{debug, warn};

const OBJECT_REF_SCHEME: &str = "blob:exampad/";

/// Process-local registry of playable blob references.
///
/// `create` pins the bytes under a fresh `blob:exampad/<uuid>` reference until
/// `revoke` releases them. A player resolves the reference through
/// [`InMemoryObjectUrls::resolve`].
#[derive(Default)]
pub struct InMemoryObjectUrls {
    entries: Mutex<HashMap<String, Bytes>>,
}

impl InMemoryObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, object_ref: &ObjectRef) -> Option<Bytes> {
        match self.entries.lock() {
            Ok(entries) => entries.get(object_ref.as_str()).cloned(),
            Err(poisoned) => poisoned.into_inner().get(object_ref.as_str()).cloned(),
        }
    }

    /// Number of references currently pinned.
    pub fn live_count(&self) -> usize {
        match self.entries.lock() {
            Ok(entries) => entries.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

impl ObjectUrlPort for InMemoryObjectUrls {
    fn create(&self, data: Bytes) -> ObjectRef {
        let object_ref = ObjectRef::new(format!("{OBJECT_REF_SCHEME}{}", uuid::Uuid::new_v4()));
        let size = data.len();

        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.insert(object_ref.as_str().to_string(), data);

        debug!(object_ref = %object_ref, bytes = size, "object reference created");
        object_ref
    }

    fn revoke(&self, object_ref: &ObjectRef) {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        if entries.remove(object_ref.as_str()).is_none() {
            warn!(object_ref = %object_ref, "revoking unknown object reference");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_reference_resolves_until_revoked() {
        let registry = InMemoryObjectUrls::new();
        let object_ref = registry.create(Bytes::from_static(b"video"));

        assert!(object_ref.as_str().starts_with(OBJECT_REF_SCHEME));
        assert_eq!(registry.resolve(&object_ref), Some(Bytes::from_static(b"video")));
        assert_eq!(registry.live_count(), 1);

        registry.revoke(&object_ref);

        assert_eq!(registry.resolve(&object_ref), None);
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn references_are_unique() {
        let registry = InMemoryObjectUrls::new();
        let a = registry.create(Bytes::from_static(b"same"));
        let b = registry.create(Bytes::from_static(b"same"));

        assert_ne!(a, b);
        assert_eq!(registry.live_count(), 2);
    }
}
