//! S3-compatible HTTP backend.
//!
//! Objects are written with a path-style `PUT {endpoint}/{bucket}/{key}`.
//! The canned ACL travels in `x-amz-acl`; an optional bearer token is sent
//! for gateways that front the bucket with token auth.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::error::PublishError;
use crate::store::PutObject;

/// Default endpoint for path-style writes.
pub const DEFAULT_ENDPOINT: &str = "https://s3.amazonaws.com";

/// Connection settings for [`HttpObjectStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpStoreConfig {
    /// Base URL, e.g. `https://s3.amazonaws.com` or `http://localhost:9000`.
    pub endpoint: String,
    /// Target bucket.
    pub bucket: String,
    /// Bearer token, if the endpoint requires one.
    pub token: Option<String>,
}

/// Writes objects over HTTP.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
    token: Option<String>,
}

impl HttpObjectStore {
    /// Create a store for the configured endpoint and bucket.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Config`] if the endpoint is not an HTTP(S)
    /// URL, the bucket is empty, or the HTTP client cannot be built.
    pub fn new(config: &HttpStoreConfig) -> Result<Self, PublishError> {
        if config.bucket.trim().is_empty() {
            return Err(PublishError::Config("bucket must not be empty".to_owned()));
        }
        if !(config.endpoint.starts_with("http://") || config.endpoint.starts_with("https://")) {
            return Err(PublishError::Config(format!(
                "endpoint must be an http(s) URL, got {}",
                config.endpoint
            )));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| PublishError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_owned(),
            bucket: config.bucket.clone(),
            token: config.token.clone(),
        })
    }

    /// Bucket this store writes into.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Full URL for `key`.
    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key.trim_start_matches('/'))
    }

    /// Upload `object`, overwriting any existing object at its key.
    pub(crate) async fn put_object(&self, object: PutObject) -> Result<(), PublishError> {
        let url = self.object_url(&object.key);

        let mut request = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, object.content_type)
            .header("x-amz-acl", object.acl.as_header())
            .body(object.body);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| PublishError::Transport(format!("PUT {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(url, status = status.as_u16(), "object written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str, bucket: &str) -> HttpStoreConfig {
        HttpStoreConfig {
            endpoint: endpoint.to_owned(),
            bucket: bucket.to_owned(),
            token: None,
        }
    }

    #[test]
    fn builds_path_style_urls() {
        let store = HttpObjectStore::new(&config("http://localhost:9000/", "traffic")).ok();
        assert_eq!(
            store.map(|s| s.object_url("dashboard/data.json")),
            Some("http://localhost:9000/traffic/dashboard/data.json".to_owned())
        );
    }

    #[test]
    fn rejects_empty_bucket() {
        assert!(matches!(
            HttpObjectStore::new(&config(DEFAULT_ENDPOINT, "  ")),
            Err(PublishError::Config(_))
        ));
    }

    #[test]
    fn rejects_non_http_endpoint() {
        assert!(matches!(
            HttpObjectStore::new(&config("s3://bucket", "traffic")),
            Err(PublishError::Config(_))
        ));
    }
}
