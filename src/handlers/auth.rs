use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    Json,
};
use tracing::debug;

use super::common::success_response;
use crate::{auth::LoginRequest, errors::ServiceError, handlers::AppState};

/// `POST /auth/login`
///
/// Answers 200 or 401 only; an unreadable body counts as empty credentials.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "unreadable login body");
            LoginRequest::default()
        }
    };
    let response = state.sessions.login(body.username(), body.password())?;
    Ok(success_response(response))
}
