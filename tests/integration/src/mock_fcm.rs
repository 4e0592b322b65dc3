//! Mock Firebase Cloud Messaging server
//!
//! Accepts the send and Instance ID endpoints, records every request and
//! answers with a configurable status and body.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode, Uri},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Request received by the mock
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Debug)]
struct Reply {
    status: StatusCode,
    body: Value,
}

#[derive(Debug, Clone)]
struct MockState {
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    reply: Arc<Mutex<Reply>>,
}

/// Running mock FCM server
pub struct MockFcm {
    pub addr: SocketAddr,
    state: MockState,
    _handle: JoinHandle<()>,
}

impl MockFcm {
    /// Start a mock that accepts every request
    pub async fn start() -> Result<Self> {
        let state = MockState {
            captured: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(Mutex::new(Reply {
                status: StatusCode::OK,
                body: json!({"success": 1, "failure": 0, "message_id": 1}),
            })),
        };

        let app = Router::new()
            .route("/fcm/send", post(capture))
            .route("/iid/v1/*rest", post(capture))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            state,
            _handle: handle,
        })
    }

    pub fn send_url(&self) -> String {
        format!("http://{}/fcm/send", self.addr)
    }

    pub fn iid_url(&self) -> String {
        format!("http://{}/iid/v1", self.addr)
    }

    /// Answer every following request with this status and body
    pub fn respond_with(&self, status: StatusCode, body: Value) {
        let mut reply = self.state.reply.lock().unwrap();
        reply.status = status;
        reply.body = body;
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.captured.lock().unwrap().clone()
    }

    /// Requests sent to the send endpoint
    pub fn sends(&self) -> Vec<CapturedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == "/fcm/send")
            .collect()
    }

    /// Requests sent to the Instance ID endpoint
    pub fn subscriptions(&self) -> Vec<CapturedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.starts_with("/iid/v1/"))
            .collect()
    }

    pub fn clear(&self) {
        self.state.captured.lock().unwrap().clear();
    }
}

async fn capture(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.captured.lock().unwrap().push(CapturedRequest {
        path: uri.path().to_string(),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body,
    });

    let reply = state.reply.lock().unwrap();
    (reply.status, Json(reply.body.clone()))
}
