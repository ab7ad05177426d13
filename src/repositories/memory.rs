use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CatalogRepository, MilestoneRepository, PurchaseLineRepository};
use crate::errors::ServiceError;
use crate::models::{Item, Job, Milestone, NewPurchaseLine, PurchaseLine, Vendor};

/// Catalog backed by fixed vectors.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    jobs: Vec<Job>,
    items: Vec<Item>,
    vendors: Vec<Vendor>,
}

impl InMemoryCatalog {
    pub fn new(jobs: Vec<Job>, items: Vec<Item>, vendors: Vec<Vendor>) -> Self {
        Self {
            jobs,
            items,
            vendors,
        }
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn list_jobs(&self) -> Result<Vec<Job>, ServiceError> {
        Ok(self.jobs.clone())
    }

    async fn list_items(&self) -> Result<Vec<Item>, ServiceError> {
        Ok(self.items.clone())
    }

    async fn list_vendors(&self) -> Result<Vec<Vendor>, ServiceError> {
        Ok(self.vendors.clone())
    }

    async fn find_item(&self, part_number: &str) -> Result<Option<Item>, ServiceError> {
        Ok(self
            .items
            .iter()
            .find(|item| item.part_number == part_number)
            .cloned())
    }

    async fn find_vendor(&self, vendor_code: &str) -> Result<Option<Vendor>, ServiceError> {
        Ok(self
            .vendors
            .iter()
            .find(|vendor| vendor.vendor_code == vendor_code)
            .cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryMilestoneStore {
    records: RwLock<Vec<Milestone>>,
}

impl InMemoryMilestoneStore {
    pub fn new(records: Vec<Milestone>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl MilestoneRepository for InMemoryMilestoneStore {
    async fn get(&self, id: i64) -> Result<Option<Milestone>, ServiceError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|m| m.id == id).cloned())
    }

    async fn list_by_job(&self, job_id: &str) -> Result<Vec<Milestone>, ServiceError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|m| m.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn upsert(&self, milestone: Milestone) -> Result<Milestone, ServiceError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|m| m.id == milestone.id) {
            Some(existing) => *existing = milestone.clone(),
            None => records.push(milestone.clone()),
        }
        Ok(milestone)
    }
}

#[derive(Debug)]
struct Ledger {
    next_id: u64,
    lines: Vec<PurchaseLine>,
}

#[derive(Debug)]
pub struct InMemoryPurchaseLedger {
    ledger: RwLock<Ledger>,
}

impl InMemoryPurchaseLedger {
    pub fn new() -> Self {
        Self {
            ledger: RwLock::new(Ledger {
                next_id: 1,
                lines: Vec::new(),
            }),
        }
    }
}

impl Default for InMemoryPurchaseLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PurchaseLineRepository for InMemoryPurchaseLedger {
    async fn append(&self, line: NewPurchaseLine) -> Result<PurchaseLine, ServiceError> {
        let mut ledger = self.ledger.write().await;
        let stored = PurchaseLine {
            id: ledger.next_id,
            part_number: line.part_number,
            vendor_code: line.vendor_code,
            quantity: line.quantity,
        };
        ledger.next_id += 1;
        ledger.lines.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<PurchaseLine>, ServiceError> {
        Ok(self.ledger.read().await.lines.clone())
    }
}
