//! Shared test doubles: a stub face-swap server and recording service mocks.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

use ai_photobooth::assets::AssetStorage;
use ai_photobooth::error::{AssetError, MailError, QueueError, StoreError};
use ai_photobooth::mail::{MailRelay, OutgoingMail};
use ai_photobooth::queue::QueueAcknowledger;
use ai_photobooth::store::{MetadataRecord, MetadataStore};

// ── Stub face-swap server ───────────────────────────────────────────

/// A request seen by the stub server.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub body: Value,
    pub accept: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    response: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

async fn swap_handler(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.seen.lock().unwrap().push(SeenRequest {
        body,
        accept: header("accept"),
        content_type: header("content-type"),
    });
    (state.status, state.response.clone())
}

/// Start a stub `/reactor/image` server on a random port.
///
/// Returns the port and the requests it receives.
pub async fn start_stub(status: StatusCode, response: &str) -> (u16, Arc<Mutex<Vec<SeenRequest>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        status,
        response: response.to_string(),
        seen: Arc::clone(&seen),
    };
    let app = Router::new()
        .route("/reactor/image", post(swap_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (port, seen)
}

/// A port with nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

// ── Recording mocks ─────────────────────────────────────────────────

/// Metadata keyed by work item identifier.
pub struct FixedStore {
    pub records: Vec<(String, MetadataRecord)>,
    pub lookups: Mutex<Vec<String>>,
}

impl FixedStore {
    pub fn new(records: Vec<(&str, MetadataRecord)>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|(id, record)| (id.to_string(), record))
                .collect(),
            lookups: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MetadataStore for FixedStore {
    async fn get_metadata(&self, id: &str) -> Result<Option<MetadataRecord>, StoreError> {
        self.lookups.lock().unwrap().push(id.to_string());
        Ok(self
            .records
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, record)| record.clone()))
    }
}

/// Objects keyed by S3 key; unknown keys fail like a missing object.
pub struct FixedAssets {
    pub objects: Vec<(String, Vec<u8>)>,
    pub fetches: Mutex<Vec<String>>,
}

impl FixedAssets {
    pub fn new(objects: Vec<(&str, &[u8])>) -> Self {
        Self {
            objects: objects
                .into_iter()
                .map(|(key, bytes)| (key.to_string(), bytes.to_vec()))
                .collect(),
            fetches: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AssetStorage for FixedAssets {
    async fn fetch(&self, key: &str) -> Result<Vec<u8>, AssetError> {
        self.fetches.lock().unwrap().push(key.to_string());
        self.objects
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| AssetError::Fetch {
                key: key.to_string(),
                reason: "NoSuchKey".into(),
            })
    }
}

#[derive(Default)]
pub struct RecordingRelay {
    pub sent: Mutex<Vec<OutgoingMail>>,
}

#[async_trait]
impl MailRelay for RecordingRelay {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingQueue {
    pub deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl QueueAcknowledger for RecordingQueue {
    async fn acknowledge(&self, receipt_handle: &str) -> Result<(), QueueError> {
        self.deleted.lock().unwrap().push(receipt_handle.to_string());
        Ok(())
    }
}
