//! Storage seams for the service layer.
//!
//! Services only see these traits, so a persistent backend can replace the
//! in-memory one and every test can build its own isolated store.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::ServiceError;
use crate::models::{Item, Job, Milestone, NewPurchaseLine, PurchaseLine, Vendor};

pub mod memory;

pub use memory::{InMemoryCatalog, InMemoryMilestoneStore, InMemoryPurchaseLedger};

/// Read-only jobs, items and vendors.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// All jobs in insertion order.
    async fn list_jobs(&self) -> Result<Vec<Job>, ServiceError>;
    async fn list_items(&self) -> Result<Vec<Item>, ServiceError>;
    async fn list_vendors(&self) -> Result<Vec<Vendor>, ServiceError>;
    async fn find_item(&self, part_number: &str) -> Result<Option<Item>, ServiceError>;
    async fn find_vendor(&self, vendor_code: &str) -> Result<Option<Vendor>, ServiceError>;
}

#[async_trait]
pub trait MilestoneRepository: Send + Sync {
    async fn get(&self, id: i64) -> Result<Option<Milestone>, ServiceError>;
    /// Milestones whose job id equals `job_id` exactly, in insertion order.
    async fn list_by_job(&self, job_id: &str) -> Result<Vec<Milestone>, ServiceError>;
    /// Replaces the record with the same id, or appends it.
    async fn upsert(&self, milestone: Milestone) -> Result<Milestone, ServiceError>;
}

/// Append-only purchase-line storage.
#[async_trait]
pub trait PurchaseLineRepository: Send + Sync {
    /// Assigns the next sequential id (starting at 1) and stores the line.
    async fn append(&self, line: NewPurchaseLine) -> Result<PurchaseLine, ServiceError>;
    async fn list(&self) -> Result<Vec<PurchaseLine>, ServiceError>;
}

/// The set of stores one application instance works against.
#[derive(Clone)]
pub struct Repositories {
    pub catalog: Arc<dyn CatalogRepository>,
    pub milestones: Arc<dyn MilestoneRepository>,
    pub purchase_lines: Arc<dyn PurchaseLineRepository>,
}

impl Repositories {
    /// Fresh in-memory stores loaded with the demo data set.
    pub fn seeded() -> Self {
        Self {
            catalog: Arc::new(InMemoryCatalog::new(
                crate::seed::jobs(),
                crate::seed::items(),
                crate::seed::vendors(),
            )),
            milestones: Arc::new(InMemoryMilestoneStore::new(crate::seed::milestones())),
            purchase_lines: Arc::new(InMemoryPurchaseLedger::new()),
        }
    }
}
