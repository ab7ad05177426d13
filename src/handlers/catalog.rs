use axum::{extract::State, response::Response};

use super::common::list_response;
use crate::{errors::ServiceError, handlers::AppState};

/// `GET /items`
pub async fn list_items(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(list_response(state.services.query.list_items().await?))
}

/// `GET /vendors`
pub async fn list_vendors(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(list_response(state.services.query.list_vendors().await?))
}
