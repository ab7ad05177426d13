//! Mock ERP backend: job search, milestone tracking and purchase-line
//! sourcing over swappable in-memory stores, plus a typed client.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod seed;
pub mod services;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::SessionStore;
use crate::events::EventSender;
use crate::repositories::Repositories;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub sessions: Arc<SessionStore>,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(config: config::AppConfig, repos: Repositories, event_sender: EventSender) -> Self {
        let sessions = Arc::new(SessionStore::from_config(&config));
        let services = handlers::AppServices::new(
            Arc::new(repos),
            event_sender,
            config.enforce_completion_invariant,
        );
        Self {
            config,
            sessions,
            services,
        }
    }
}

/// All routes. Everything except `/`, `/health` and `/auth/login` requires
/// the session bearer token.
pub fn app_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/jobs", get(handlers::jobs::list_jobs))
        .route(
            "/jobs/:job_id/milestones",
            get(handlers::jobs::list_job_milestones),
        )
        .route(
            "/milestones/:id",
            put(handlers::milestones::update_milestone),
        )
        .route("/items", get(handlers::catalog::list_items))
        .route("/vendors", get(handlers::catalog::list_vendors))
        .route(
            "/purchase-lines",
            get(handlers::purchase_lines::list_purchase_lines)
                .post(handlers::purchase_lines::create_purchase_line),
        )
        .route_layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/auth/login", post(handlers::auth::login))
        .merge(protected)
        .with_state(state)
}

/// Build CORS layer from config; permissive unless origins are listed.
pub fn cors_layer(config: &config::AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Router with request tracing and CORS, as served by the binary.
pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    app_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
