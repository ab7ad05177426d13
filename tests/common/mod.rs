#![allow(dead_code)]

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use jobtrack_api::{
    build_app, config::AppConfig, events::EventSender, repositories::Repositories, AppState,
};

pub const TOKEN: &str = "mock-token-123";

/// Helper harness around a freshly seeded application.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Default configuration and fresh stores.
    pub async fn new() -> Self {
        Self::new_with(AppConfig::default()).await
    }

    pub async fn new_with(config: AppConfig) -> Self {
        let (event_sender, event_rx) = EventSender::channel(256);
        let event_task = tokio::spawn(jobtrack_api::events::process_events(event_rx));

        let state = AppState::new(config, Repositories::seeded(), event_sender);
        let router = build_app(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
        }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Send a request against the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Raw body with the JSON content type, for malformed payloads.
    pub async fn request_raw(&self, method: Method, uri: &str, raw: &str) -> Response {
        self.request_body(method, uri, raw, Some("application/json"), Some(TOKEN))
            .await
    }

    /// Arbitrary body and content type; `None` omits the header.
    pub async fn request_body(
        &self,
        method: Method,
        uri: &str,
        raw: &str,
        content_type: Option<&str>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }

        let request = builder
            .body(Body::from(raw.to_owned()))
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Convenience helper for authenticated JSON requests.
    pub async fn request_authenticated(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Response {
        self.request(method, uri, body, Some(TOKEN)).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self._event_task.abort();
    }
}

pub async fn json_body(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("parse response body")
}

pub async fn text_body(response: Response) -> String {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
