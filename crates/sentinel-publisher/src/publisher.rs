//! Snapshot publishing.
//!
//! [`SnapshotPublisher`] serializes a [`Snapshot`] and writes it to a fixed
//! key, replacing the previous snapshot. The write is bounded by an explicit
//! deadline; exceeding it is reported as [`PublishError::Timeout`]. There is
//! no retry and no fallback path.

use std::time::Duration;

use sentinel_types::Snapshot;
use tracing::{info, warn};

use crate::error::PublishError;
use crate::store::{ObjectAcl, ObjectStore, PutObject};

/// Key the dashboard polls.
pub const SNAPSHOT_KEY: &str = "dashboard/data.json";

/// MIME type of the published document.
pub const SNAPSHOT_CONTENT_TYPE: &str = "application/json";

/// Default deadline for one publish.
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(5);

/// What a successful publish wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    /// Bucket written into.
    pub bucket: String,
    /// Key written.
    pub key: String,
    /// Size of the serialized snapshot in bytes.
    pub bytes: usize,
}

/// Writes snapshots to an injected [`ObjectStore`].
#[derive(Debug, Clone)]
pub struct SnapshotPublisher {
    store: ObjectStore,
    key: String,
    timeout: Duration,
}

impl SnapshotPublisher {
    /// Publish to [`SNAPSHOT_KEY`] in `store` with the given deadline.
    pub fn new(store: impl Into<ObjectStore>, timeout: Duration) -> Self {
        Self {
            store: store.into(),
            key: SNAPSHOT_KEY.to_owned(),
            timeout,
        }
    }

    /// Override the object key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// The backing store.
    pub const fn store(&self) -> &ObjectStore {
        &self.store
    }

    /// The object key snapshots are written to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serialize and write `snapshot`, replacing any previous object.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Serialization`] if the snapshot cannot be
    /// encoded, [`PublishError::Timeout`] if the write exceeds the deadline,
    /// or whatever the store reports for a failed write.
    pub async fn publish(&self, snapshot: &Snapshot) -> Result<PublishReceipt, PublishError> {
        let body = serde_json::to_vec(snapshot)?;
        let bytes = body.len();

        let object = PutObject {
            key: self.key.clone(),
            body,
            content_type: SNAPSHOT_CONTENT_TYPE.to_owned(),
            acl: ObjectAcl::PublicRead,
        };

        match tokio::time::timeout(self.timeout, self.store.put_object(object)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(
                    backend = self.store.name(),
                    bucket = self.store.bucket(),
                    key = %self.key,
                    error = %e,
                    "snapshot write failed"
                );
                return Err(e);
            }
            Err(_) => {
                let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(
                    backend = self.store.name(),
                    bucket = self.store.bucket(),
                    key = %self.key,
                    timeout_ms,
                    "snapshot write timed out"
                );
                return Err(PublishError::Timeout { timeout_ms });
            }
        }

        info!(
            backend = self.store.name(),
            bucket = self.store.bucket(),
            key = %self.key,
            bytes,
            anomalies = snapshot.anomalies.len(),
            "snapshot published"
        );

        Ok(PublishReceipt {
            bucket: self.store.bucket().to_owned(),
            key: self.key.clone(),
            bytes,
        })
    }
}
