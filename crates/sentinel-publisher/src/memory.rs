//! In-process object store.
//!
//! Clones share the same underlying map, so a test can keep one handle and
//! give another to the publisher, then read back what was written.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::error::PublishError;
use crate::store::{ObjectAcl, PutObject};

/// An object as recorded by [`MemoryObjectStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object contents.
    pub body: Vec<u8>,
    /// MIME type recorded with the object.
    pub content_type: String,
    /// Access policy.
    pub acl: ObjectAcl,
}

/// Objects held in memory, keyed by object key.
#[derive(Debug, Clone)]
pub struct MemoryObjectStore {
    bucket: String,
    objects: Arc<Mutex<BTreeMap<String, StoredObject>>>,
}

impl MemoryObjectStore {
    /// Create an empty store for `bucket`.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Bucket name (informational only).
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Read back the object at `key`.
    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .ok()
            .and_then(|objects| objects.get(key).cloned())
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.lock().map_or(0, |objects| objects.len())
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn put_object(&self, object: PutObject) -> Result<(), PublishError> {
        let mut objects = self
            .objects
            .lock()
            .map_err(|e| PublishError::Store(format!("memory store lock poisoned: {e}")))?;
        objects.insert(
            object.key,
            StoredObject {
                body: object.body,
                content_type: object.content_type,
                acl: object.acl,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(key: &str, body: &[u8]) -> PutObject {
        PutObject {
            key: key.to_owned(),
            body: body.to_vec(),
            content_type: "application/json".to_owned(),
            acl: ObjectAcl::PublicRead,
        }
    }

    #[test]
    fn starts_empty() {
        let store = MemoryObjectStore::new("b");
        assert!(store.is_empty());
        assert!(store.get("anything").is_none());
    }

    #[test]
    fn writes_overwrite_previous_object() {
        let store = MemoryObjectStore::new("b");
        assert!(store.put_object(put("k", b"first")).is_ok());
        assert!(store.put_object(put("k", b"second")).is_ok());

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("k").map(|o| o.body), Some(b"second".to_vec()));
    }

    #[test]
    fn clones_share_state() {
        let store = MemoryObjectStore::new("b");
        let handle = store.clone();
        assert!(store.put_object(put("k", b"{}")).is_ok());
        assert_eq!(
            handle.get("k").map(|o| (o.content_type, o.acl)),
            Some(("application/json".to_owned(), ObjectAcl::PublicRead))
        );
    }
}
