//! Configuration for the job.
//!
//! All configuration is loaded from environment variables. The only
//! required setting is the target bucket; everything else has a default.
//! Loading goes through a lookup function so tests can supply variables
//! without touching the process environment.

use std::path::PathBuf;
use std::time::Duration;

use sentinel_detector::DEFAULT_TOP_K;
use sentinel_publisher::{DEFAULT_ENDPOINT, HttpStoreConfig};
use sentinel_source::MockTrafficConfig;

use crate::error::JobError;

/// Default publish deadline in milliseconds.
const DEFAULT_PUBLISH_TIMEOUT_MS: u64 = 5000;

/// Complete job configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct JobConfig {
    /// Target bucket (container) for the snapshot.
    pub bucket: String,
    /// Object-store base URL.
    pub endpoint: String,
    /// Bearer token for the object store, if any.
    pub token: Option<String>,
    /// Deadline for the snapshot write.
    pub publish_timeout: Duration,
    /// How many summaries the snapshot keeps.
    pub top_k: usize,
    /// Replay events from this file instead of generating mock traffic.
    pub events_file: Option<PathBuf>,
    /// Mock traffic parameters (used when `events_file` is unset).
    pub mock: MockTrafficConfig,
    /// Log output format.
    pub log_format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line (for log aggregation).
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT` from the environment, falling back to text.
    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|v| Self::parse(&v).ok())
            .unwrap_or_default()
    }

    fn parse(value: &str) -> Result<Self, JobError> {
        match value.trim().to_lowercase().as_str() {
            "text" | "" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(JobError::Config(format!("unknown LOG_FORMAT: {other}"))),
        }
    }
}

impl JobConfig {
    /// Load configuration from environment variables.
    ///
    /// Required variables:
    /// - `BUCKET_NAME` -- target bucket for the snapshot
    ///
    /// Optional variables:
    /// - `OBJECT_STORE_ENDPOINT` -- object-store base URL (default `https://s3.amazonaws.com`)
    /// - `OBJECT_STORE_TOKEN` -- bearer token sent with writes
    /// - `PUBLISH_TIMEOUT_MS` -- publish deadline in milliseconds (default 5000)
    /// - `TOP_K` -- anomalies kept in the snapshot (default 5)
    /// - `EVENTS_FILE` -- replay events from this JSON file
    /// - `MOCK_ATTACK_PROBABILITY` -- chance of an attack burst (default 0.5)
    /// - `MOCK_SEED` -- seed for reproducible mock traffic
    /// - `LOG_FORMAT` -- `text` or `json` (default `text`)
    pub fn from_env() -> Result<Self, JobError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, JobError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bucket = lookup("BUCKET_NAME")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                JobError::Config("missing required env var BUCKET_NAME".to_owned())
            })?;

        let endpoint = lookup("OBJECT_STORE_ENDPOINT")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned());

        let token = lookup("OBJECT_STORE_TOKEN").filter(|v| !v.is_empty());

        let publish_timeout_ms: u64 = parse_or(&lookup, "PUBLISH_TIMEOUT_MS", DEFAULT_PUBLISH_TIMEOUT_MS)?;
        if publish_timeout_ms == 0 {
            return Err(JobError::Config(
                "PUBLISH_TIMEOUT_MS must be greater than zero".to_owned(),
            ));
        }

        let top_k: usize = parse_or(&lookup, "TOP_K", DEFAULT_TOP_K)?;

        let events_file = lookup("EVENTS_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let defaults = MockTrafficConfig::default();
        let attack_probability: f64 =
            parse_or(&lookup, "MOCK_ATTACK_PROBABILITY", defaults.attack_probability)?;
        let seed: Option<u64> = lookup("MOCK_SEED")
            .map(|v| {
                v.trim()
                    .parse()
                    .map_err(|e| JobError::Config(format!("invalid MOCK_SEED: {e}")))
            })
            .transpose()?;
        let mock = MockTrafficConfig {
            attack_probability,
            seed,
            ..defaults
        };
        mock.validate()
            .map_err(|e| JobError::Config(format!("invalid MOCK_ATTACK_PROBABILITY: {e}")))?;

        let log_format = lookup("LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            bucket,
            endpoint,
            token,
            publish_timeout: Duration::from_millis(publish_timeout_ms),
            top_k,
            events_file,
            mock,
            log_format,
        })
    }

    /// Connection settings for the HTTP object store.
    pub fn store_config(&self) -> HttpStoreConfig {
        HttpStoreConfig {
            endpoint: self.endpoint.clone(),
            bucket: self.bucket.clone(),
            token: self.token.clone(),
        }
    }
}

/// Parse an optional variable, using `default` when it is unset.
fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, JobError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name).map_or(Ok(default), |v| {
        v.trim()
            .parse()
            .map_err(|e| JobError::Config(format!("invalid {name}: {e}")))
    })
}
