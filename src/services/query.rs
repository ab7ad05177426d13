use std::sync::Arc;
use tracing::instrument;

use crate::errors::ServiceError;
use crate::models::{Item, Job, Milestone, PurchaseLine, Vendor};
use crate::repositories::Repositories;

/// Read-only projections over the stores.
#[derive(Clone)]
pub struct QueryService {
    repos: Arc<Repositories>,
}

impl QueryService {
    pub fn new(repos: Arc<Repositories>) -> Self {
        Self { repos }
    }

    /// Jobs whose id, customer or description contains `search`, ignoring
    /// case. Absent or blank search returns every job in store order.
    #[instrument(skip(self))]
    pub async fn list_jobs(&self, search: Option<&str>) -> Result<Vec<Job>, ServiceError> {
        let jobs = self.repos.catalog.list_jobs().await?;
        Ok(match search {
            Some(needle) if !needle.is_empty() => {
                jobs.into_iter().filter(|job| job.matches(needle)).collect()
            }
            _ => jobs,
        })
    }

    /// Milestones of one job; an unknown job yields an empty list.
    #[instrument(skip(self))]
    pub async fn list_milestones(&self, job_id: &str) -> Result<Vec<Milestone>, ServiceError> {
        self.repos.milestones.list_by_job(job_id).await
    }

    pub async fn list_items(&self) -> Result<Vec<Item>, ServiceError> {
        self.repos.catalog.list_items().await
    }

    pub async fn list_vendors(&self) -> Result<Vec<Vendor>, ServiceError> {
        self.repos.catalog.list_vendors().await
    }

    pub async fn list_purchase_lines(&self) -> Result<Vec<PurchaseLine>, ServiceError> {
        self.repos.purchase_lines.list().await
    }
}
