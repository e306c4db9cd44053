//! Object store abstraction.
//!
//! Uses enum dispatch instead of trait objects because async methods are not
//! dyn-compatible. The HTTP backend talks to any S3-compatible endpoint; the
//! memory backend keeps objects in-process for tests and dry runs.

use crate::error::PublishError;
use crate::http::HttpObjectStore;
use crate::memory::MemoryObjectStore;

/// Access policy attached to a written object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectAcl {
    /// Readable only with credentials.
    Private,
    /// Readable by anyone (the dashboard fetches it anonymously).
    PublicRead,
}

impl ObjectAcl {
    /// Canned ACL value sent in the `x-amz-acl` header.
    pub const fn as_header(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
        }
    }
}

/// A single whole-object write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObject {
    /// Key inside the store's bucket.
    pub key: String,
    /// Object contents.
    pub body: Vec<u8>,
    /// MIME type recorded with the object.
    pub content_type: String,
    /// Access policy.
    pub acl: ObjectAcl,
}

/// A durable key-value object store bound to one bucket.
#[derive(Debug, Clone)]
pub enum ObjectStore {
    /// S3-compatible HTTP endpoint.
    Http(HttpObjectStore),
    /// In-process map.
    Memory(MemoryObjectStore),
}

impl ObjectStore {
    /// Write `object`, replacing anything already stored under its key.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] if the write does not succeed.
    pub async fn put_object(&self, object: PutObject) -> Result<(), PublishError> {
        match self {
            Self::Http(store) => store.put_object(object).await,
            Self::Memory(store) => store.put_object(object),
        }
    }

    /// Bucket this store writes into.
    pub fn bucket(&self) -> &str {
        match self {
            Self::Http(store) => store.bucket(),
            Self::Memory(store) => store.bucket(),
        }
    }

    /// Human-readable backend name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Memory(_) => "memory",
        }
    }
}

impl From<HttpObjectStore> for ObjectStore {
    fn from(store: HttpObjectStore) -> Self {
        Self::Http(store)
    }
}

impl From<MemoryObjectStore> for ObjectStore {
    fn from(store: MemoryObjectStore) -> Self {
        Self::Memory(store)
    }
}
