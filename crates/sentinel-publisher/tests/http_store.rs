//! Integration tests for the HTTP object-store backend.
//!
//! A small Axum router stands in for an S3-compatible endpoint. It is bound
//! to an ephemeral local port and records every `PUT` it receives, so the
//! tests can check exactly what went over the wire.

#![allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::put;
use chrono::Utc;
use sentinel_publisher::{
    HttpObjectStore, HttpStoreConfig, PublishError, SNAPSHOT_KEY, SnapshotPublisher,
};
use sentinel_types::{AddressSummary, Classification, Snapshot};

#[derive(Debug, Clone)]
struct CapturedPut {
    bucket: String,
    key: String,
    content_type: Option<String>,
    acl: Option<String>,
    authorization: Option<String>,
    body: Vec<u8>,
}

#[derive(Clone)]
struct FakeStore {
    status: StatusCode,
    delay: Duration,
    captured: Arc<Mutex<Vec<CapturedPut>>>,
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
}

async fn handle_put(
    State(store): State<FakeStore>,
    Path((bucket, key)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    tokio::time::sleep(store.delay).await;
    if store.status.is_success() {
        store.captured.lock().unwrap().push(CapturedPut {
            bucket,
            key,
            content_type: header(&headers, "content-type"),
            acl: header(&headers, "x-amz-acl"),
            authorization: header(&headers, "authorization"),
            body: body.to_vec(),
        });
        (store.status, "")
    } else {
        (store.status, "AccessDenied")
    }
}

/// Start a fake store and return its base URL plus the capture log.
async fn spawn_fake_store(
    status: StatusCode,
    delay: Duration,
) -> (String, Arc<Mutex<Vec<CapturedPut>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = FakeStore {
        status,
        delay,
        captured: Arc::clone(&captured),
    };
    let app = Router::new()
        .route("/{bucket}/{*key}", put(handle_put))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{addr}"), captured)
}

fn http_publisher(endpoint: &str, token: Option<&str>, timeout: Duration) -> SnapshotPublisher {
    let store = HttpObjectStore::new(&HttpStoreConfig {
        endpoint: endpoint.to_owned(),
        bucket: "traffic-dashboard".to_owned(),
        token: token.map(ToOwned::to_owned),
    })
    .unwrap();
    SnapshotPublisher::new(store, timeout)
}

fn sample_snapshot() -> Snapshot {
    let now = Utc::now();
    Snapshot::new(
        now,
        80,
        vec![AddressSummary {
            address: "66.66.66.66".to_owned(),
            count: 30,
            classification: Classification::Critical,
            window_start: now,
        }],
    )
}

#[tokio::test]
async fn put_carries_key_content_type_and_acl() {
    let (endpoint, captured) = spawn_fake_store(StatusCode::OK, Duration::ZERO).await;
    let publisher = http_publisher(&endpoint, None, Duration::from_secs(5));

    let receipt = publisher.publish(&sample_snapshot()).await.unwrap();
    assert_eq!(receipt.key, SNAPSHOT_KEY);

    let puts = captured.lock().unwrap().clone();
    assert_eq!(puts.len(), 1);
    let put = &puts[0];
    assert_eq!(put.bucket, "traffic-dashboard");
    assert_eq!(put.key, "dashboard/data.json");
    assert_eq!(put.content_type.as_deref(), Some("application/json"));
    assert_eq!(put.acl.as_deref(), Some("public-read"));
    assert_eq!(put.authorization, None);
    assert_eq!(put.body.len(), receipt.bytes);

    let doc: serde_json::Value = serde_json::from_slice(&put.body).unwrap();
    assert_eq!(doc["total_events_processed"], 80);
    assert_eq!(doc["anomalies"][0]["ip"], "66.66.66.66");
    assert_eq!(doc["anomalies"][0]["count"], 30);
    assert_eq!(doc["anomalies"][0]["status"], "Critical - Bot Attack");
}

#[tokio::test]
async fn bearer_token_is_sent() {
    let (endpoint, captured) = spawn_fake_store(StatusCode::OK, Duration::ZERO).await;
    let publisher = http_publisher(&endpoint, Some("s3cret"), Duration::from_secs(5));

    publisher.publish(&sample_snapshot()).await.unwrap();

    let puts = captured.lock().unwrap().clone();
    assert_eq!(puts[0].authorization.as_deref(), Some("Bearer s3cret"));
}

#[tokio::test]
async fn refused_write_is_rejected() {
    let (endpoint, captured) = spawn_fake_store(StatusCode::FORBIDDEN, Duration::ZERO).await;
    let publisher = http_publisher(&endpoint, None, Duration::from_secs(5));

    let err = publisher.publish(&sample_snapshot()).await.unwrap_err();

    match err {
        PublishError::Rejected { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "AccessDenied");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert!(captured.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    // Grab a free port, then release it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let publisher = http_publisher(&format!("http://{addr}"), None, Duration::from_secs(5));
    let err = publisher.publish(&sample_snapshot()).await.unwrap_err();

    assert!(matches!(err, PublishError::Transport(_)), "got {err:?}");
    assert!(err.to_string().starts_with("transport error:"));
}

#[tokio::test]
async fn slow_store_hits_the_deadline() {
    let (endpoint, captured) = spawn_fake_store(StatusCode::OK, Duration::from_secs(5)).await;
    let publisher = http_publisher(&endpoint, None, Duration::from_millis(100));

    let err = publisher.publish(&sample_snapshot()).await.unwrap_err();

    assert!(matches!(err, PublishError::Timeout { timeout_ms: 100 }), "got {err:?}");
    assert!(captured.lock().unwrap().is_empty());
}
