use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    Json,
};

use tracing::debug;

use super::common::{created_response, list_response};
use crate::{errors::ServiceError, handlers::AppState, models::CreatePurchaseLineRequest};

/// `POST /purchase-lines`
///
/// An unreadable body is checked as an empty request, so it gets the shape
/// message like any other incomplete line.
pub async fn create_purchase_line(
    State(state): State<AppState>,
    payload: Result<Json<CreatePurchaseLineRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "unreadable purchase line body");
            CreatePurchaseLineRequest::default()
        }
    };
    let line = state
        .services
        .purchase_lines
        .create_purchase_line(request)
        .await?;
    Ok(created_response(line))
}

/// `GET /purchase-lines`
pub async fn list_purchase_lines(
    State(state): State<AppState>,
) -> Result<Response, ServiceError> {
    Ok(list_response(
        state.services.query.list_purchase_lines().await?,
    ))
}
