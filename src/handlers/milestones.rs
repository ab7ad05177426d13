use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Response,
    Json,
};

use super::common::success_response;
use crate::{
    errors::ServiceError, handlers::AppState, models::MilestonePatch,
    services::milestones::MILESTONE_NOT_FOUND,
};

/// `PUT /milestones/:id`
///
/// A non-numeric id cannot name a milestone, so it is reported as not found.
pub async fn update_milestone(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<MilestonePatch>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let id: i64 = raw_id
        .trim()
        .parse()
        .map_err(|_| ServiceError::NotFound(MILESTONE_NOT_FOUND.to_string()))?;
    let Json(patch) = payload?;

    let updated = state.services.milestones.update_milestone(id, patch).await?;
    Ok(success_response(updated))
}
