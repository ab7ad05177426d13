use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use serde::Deserialize;

use super::common::list_response;
use crate::{errors::ServiceError, handlers::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct JobSearch {
    pub search: Option<String>,
}

/// `GET /jobs?search=<text>`
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobSearch>,
) -> Result<Response, ServiceError> {
    let jobs = state
        .services
        .query
        .list_jobs(params.search.as_deref())
        .await?;
    Ok(list_response(jobs))
}

/// `GET /jobs/:job_id/milestones`
pub async fn list_job_milestones(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Response, ServiceError> {
    let milestones = state.services.query.list_milestones(&job_id).await?;
    Ok(list_response(milestones))
}
