use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::purchase_line::{
    INVALID_PART_NUMBER, INVALID_VENDOR_CODE, METAL_REQUIRES_QUEBEC,
};
use crate::models::{CreatePurchaseLineRequest, Item, PurchaseLine, Vendor};
use crate::repositories::{CatalogRepository, PurchaseLineRepository};

/// Metal parts may only be bought from Quebec vendors.
pub fn check_sourcing(item: &Item, vendor: &Vendor) -> Result<(), ServiceError> {
    if item.is_metal() && !vendor.is_quebec() {
        return Err(ServiceError::InvalidArgument(
            METAL_REQUIRES_QUEBEC.to_string(),
        ));
    }
    Ok(())
}

/// Validates and records purchase lines.
#[derive(Clone)]
pub struct PurchaseLineService {
    catalog: Arc<dyn CatalogRepository>,
    ledger: Arc<dyn PurchaseLineRepository>,
    event_sender: EventSender,
    write_gate: Arc<Mutex<()>>,
}

impl PurchaseLineService {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        ledger: Arc<dyn PurchaseLineRepository>,
        event_sender: EventSender,
    ) -> Self {
        Self {
            catalog,
            ledger,
            event_sender,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Checks run in a fixed order and the first failure wins: shape, part
    /// reference, vendor reference, then the sourcing rule.
    #[instrument(skip(self))]
    pub async fn create_purchase_line(
        &self,
        request: CreatePurchaseLineRequest,
    ) -> Result<PurchaseLine, ServiceError> {
        let result = self.try_create(request).await;
        if let Err(e) = &result {
            warn!(error = %e, "purchase line rejected");
        }
        result
    }

    async fn try_create(
        &self,
        request: CreatePurchaseLineRequest,
    ) -> Result<PurchaseLine, ServiceError> {
        let line = request.validate_shape()?;

        let item = self
            .catalog
            .find_item(&line.part_number)
            .await?
            .ok_or_else(|| ServiceError::InvalidArgument(INVALID_PART_NUMBER.to_string()))?;
        let vendor = self
            .catalog
            .find_vendor(&line.vendor_code)
            .await?
            .ok_or_else(|| ServiceError::InvalidArgument(INVALID_VENDOR_CODE.to_string()))?;
        check_sourcing(&item, &vendor)?;

        let _guard = self.write_gate.lock().await;
        let stored = self.ledger.append(line).await?;

        info!(
            id = stored.id,
            part_number = %stored.part_number,
            vendor_code = %stored.vendor_code,
            quantity = stored.quantity,
            "purchase line created"
        );
        self.event_sender.send(Event::PurchaseLineCreated {
            line_id: stored.id,
            part_number: stored.part_number.clone(),
            vendor_code: stored.vendor_code.clone(),
            quantity: stored.quantity,
        });

        Ok(stored)
    }
}
