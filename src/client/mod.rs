//! Typed HTTP client for the ERP API.
//!
//! Holds the session token, records every exchange in a [`TraceLog`] and
//! reconciles milestone completion before saving.

pub mod debounce;
pub mod trace;

pub use debounce::{SearchDebouncer, SearchOutcome, SEARCH_DEBOUNCE};
pub use trace::{RequestTrace, TraceLog, DEFAULT_TRACE_CAPACITY};

use chrono::{Local, Utc};
use reqwest::{header::CONTENT_TYPE, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::LoginResponse;
use crate::handlers::common::ListResponse;
use crate::models::{
    reconcile_completion, CreatePurchaseLineRequest, Item, Job, Milestone, MilestonePatch,
    PurchaseLine, Vendor,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

#[derive(Debug, Error)]
pub enum ClientError {
    /// A 401 on an authenticated call. A rejected login is an `Api` error.
    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// HTTP status when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<String>>,
    traces: TraceLog,
}

/// Cheap to clone; clones share the token and the trace log.
#[derive(Debug, Clone)]
pub struct ErpClient {
    inner: Arc<Inner>,
}

impl ErpClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url,
                token: RwLock::new(None),
                traces: TraceLog::default(),
            }),
        })
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    pub fn clear_token(&self) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn token(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn traces(&self) -> &TraceLog {
        &self.inner.traces
    }

    /// Logs in and keeps the returned token for later calls.
    ///
    /// Rejected credentials come back as [`ClientError::Api`] with the
    /// server's message, not as an expired session.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let url = self.endpoint(&["auth", "login"]);
        let body = json!({ "username": username, "password": password });
        let (status, data) = self.send(Method::POST, url, Some(body)).await?;
        if status == StatusCode::UNAUTHORIZED {
            return Err(api_error(status, &data));
        }
        let response: LoginResponse = decode(status, data)?;
        self.set_token(response.token.clone());
        Ok(response)
    }

    pub fn logout(&self) {
        self.clear_token();
    }

    pub async fn jobs(&self, search: Option<&str>) -> Result<Vec<Job>, ClientError> {
        let mut url = self.endpoint(&["jobs"]);
        url.query_pairs_mut()
            .append_pair("search", search.unwrap_or_default());
        self.list(url).await
    }

    pub async fn milestones(&self, job_id: &str) -> Result<Vec<Milestone>, ClientError> {
        let url = self.endpoint(&["jobs", job_id, "milestones"]);
        self.list(url).await
    }

    /// Sends the patch as is.
    pub async fn update_milestone(
        &self,
        id: i64,
        patch: &MilestonePatch,
    ) -> Result<Milestone, ClientError> {
        let url = self.endpoint(&["milestones", &id.to_string()]);
        let body = serde_json::to_value(patch).map_err(ClientError::Decode)?;
        self.request(Method::PUT, url, Some(body)).await
    }

    /// Reconciles completion against `current` using today's local date,
    /// then sends the patch.
    pub async fn save_milestone(
        &self,
        current: &Milestone,
        edits: MilestonePatch,
    ) -> Result<Milestone, ClientError> {
        let patch = reconcile_completion(current, edits, Local::now().date_naive());
        self.update_milestone(current.id, &patch).await
    }

    pub async fn items(&self) -> Result<Vec<Item>, ClientError> {
        self.list(self.endpoint(&["items"])).await
    }

    pub async fn vendors(&self) -> Result<Vec<Vendor>, ClientError> {
        self.list(self.endpoint(&["vendors"])).await
    }

    pub async fn purchase_lines(&self) -> Result<Vec<PurchaseLine>, ClientError> {
        self.list(self.endpoint(&["purchase-lines"])).await
    }

    pub async fn create_purchase_line(
        &self,
        request: &CreatePurchaseLineRequest,
    ) -> Result<PurchaseLine, ClientError> {
        let url = self.endpoint(&["purchase-lines"]);
        let body = serde_json::to_value(request).map_err(ClientError::Decode)?;
        self.request(Method::POST, url, Some(body)).await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        // Checked in the constructor.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, ClientError> {
        let page: ListResponse<T> = self.request(Method::GET, url, None).await?;
        Ok(page.items)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<T, ClientError> {
        let (status, data) = self.send(method, url, body).await?;
        decode(status, data)
    }

    /// Performs the exchange and records it. Only transport failures are
    /// errors here; the status is left to the caller.
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value), ClientError> {
        let started_at = Utc::now();
        let clock = Instant::now();

        let mut builder = self
            .inner
            .http
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        }
        .await;

        let record = |status: Option<u16>, response_body: Value| {
            self.inner.traces.record(RequestTrace {
                started_at,
                ms: u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX),
                method: method.to_string(),
                url: url.to_string(),
                request_body: body.clone(),
                status,
                response_body,
            });
        };

        let (status, text) = match exchange {
            Ok(parts) => parts,
            Err(e) => {
                warn!(%method, %url, error = %e, "request failed before a response");
                record(None, Value::String(e.to_string()));
                return Err(ClientError::Transport(e));
            }
        };

        let data = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        record(Some(status.as_u16()), data.clone());
        debug!(%method, %url, status = status.as_u16(), "response received");

        Ok((status, data))
    }
}

fn api_error(status: StatusCode, data: &Value) -> ClientError {
    let message = data
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("Request failed ({})", status.as_u16()));
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

fn decode<T: DeserializeOwned>(status: StatusCode, data: Value) -> Result<T, ClientError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized);
    }
    if !status.is_success() {
        return Err(api_error(status, &data));
    }
    serde_json::from_value(data).map_err(ClientError::Decode)
}
