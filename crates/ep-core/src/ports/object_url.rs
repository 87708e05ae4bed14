use bytes::Bytes;

use crate::asset::ObjectRef;

/// Issues playable local references for in-memory blobs.
///
/// Every reference handed out by `create` must eventually be passed to
/// `revoke`, otherwise the blob stays resident.
pub trait ObjectUrlPort: Send + Sync {
    fn create(&self, data: Bytes) -> ObjectRef;
    fn revoke(&self, object_ref: &ObjectRef);
}
