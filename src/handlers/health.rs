use axum::{response::IntoResponse, Json};
use serde_json::json;

pub async fn root() -> &'static str {
    "Mock ERP API - see /health"
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
