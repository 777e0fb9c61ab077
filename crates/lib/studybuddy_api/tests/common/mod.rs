//! Shared helpers for router integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::Value;
use studybuddy_api::config::ApiConfig;
use studybuddy_core::completion::{
    CompletionClient, CompletionError, CompletionRequest, CompletionResponse,
};
use studybuddy_core::config::{ChatSettings, ClientConfig};
use tower::ServiceExt;
use url::Url;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Config with no client values and a static dir that does not exist.
pub fn test_config(api_key: Option<&str>, endpoint: Url) -> ApiConfig {
    ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        static_dir: PathBuf::from("does-not-exist"),
        chat: ChatSettings::new(api_key.map(str::to_string), endpoint),
        client: ClientConfig::default(),
    }
}

pub fn unused_endpoint() -> Url {
    Url::parse("http://127.0.0.1:9/v1/chat/completions").unwrap()
}

pub fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Sends one request and returns the status and raw body.
pub async fn send_raw(app: Router, req: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let resp = app.oneshot(req).await.expect("request");
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    (status, headers, body)
}

/// Sends one request and parses the body as JSON.
pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send_raw(app, req).await;
    let json = serde_json::from_slice(&body).expect("parse JSON");
    (status, json)
}

/// Completion client that counts calls and always returns the same content.
pub struct CountingClient {
    content: &'static str,
    calls: AtomicUsize,
}

impl CountingClient {
    pub fn new(content: &'static str) -> Arc<Self> {
        Arc::new(Self {
            content,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for CountingClient {
    async fn complete(
        &self,
        _api_key: &str,
        _request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CompletionResponse::with_content(self.content))
    }
}

/// What the fake upstream saw for one request.
#[derive(Debug, Clone)]
pub struct Captured {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct UpstreamState {
    status: StatusCode,
    body: &'static str,
    captured: Arc<Mutex<Vec<Captured>>>,
}

/// A completion endpoint on an ephemeral local port.
pub struct FakeUpstream {
    pub endpoint: Url,
    pub captured: Arc<Mutex<Vec<Captured>>>,
}

impl FakeUpstream {
    /// Answers every request with `status` and `body`.
    pub async fn spawn(status: StatusCode, body: &'static str) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = UpstreamState {
            status,
            body,
            captured: captured.clone(),
        };
        let app = Router::new()
            .route("/v1/chat/completions", post(upstream_handler))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake upstream");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve fake upstream");
        });

        Self {
            endpoint: Url::parse(&format!("http://{addr}/v1/chat/completions")).unwrap(),
            captured,
        }
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

async fn upstream_handler(
    State(state): State<UpstreamState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.captured.lock().unwrap().push(Captured {
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });
    (
        state.status,
        [(CONTENT_TYPE, "application/json")],
        state.body,
    )
        .into_response()
}

/// An endpoint on a port nothing listens on.
pub async fn closed_endpoint() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}/v1/chat/completions")).unwrap()
}
