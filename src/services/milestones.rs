use chrono::{Local, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{reconcile_completion, Milestone, MilestonePatch};
use crate::repositories::MilestoneRepository;

pub const MILESTONE_NOT_FOUND: &str = "Milestone not found";

/// Applies partial updates to milestones.
#[derive(Clone)]
pub struct MilestoneService {
    store: Arc<dyn MilestoneRepository>,
    event_sender: EventSender,
    enforce_completion_invariant: bool,
    // One update in flight at a time.
    write_gate: Arc<Mutex<()>>,
}

impl MilestoneService {
    pub fn new(
        store: Arc<dyn MilestoneRepository>,
        event_sender: EventSender,
        enforce_completion_invariant: bool,
    ) -> Self {
        Self {
            store,
            event_sender,
            enforce_completion_invariant,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Validates `patch`, merges it onto milestone `id` and returns the
    /// stored record. Nothing is written when validation fails.
    #[instrument(skip(self, patch))]
    pub async fn update_milestone(
        &self,
        id: i64,
        patch: MilestonePatch,
    ) -> Result<Milestone, ServiceError> {
        let _guard = self.write_gate.lock().await;

        let mut milestone = self.store.get(id).await?.ok_or_else(|| {
            warn!(id, "milestone not found");
            ServiceError::NotFound(MILESTONE_NOT_FOUND.to_string())
        })?;

        patch.validate().map_err(|e| {
            warn!(id, error = %e, "milestone patch rejected");
            e
        })?;

        let patch = if self.enforce_completion_invariant {
            reconcile_completion(&milestone, patch, Local::now().date_naive())
        } else {
            patch
        };

        milestone.apply(&patch, Utc::now());
        let saved = self.store.upsert(milestone).await?;

        info!(
            id,
            job_id = %saved.job_id,
            is_complete = saved.is_complete,
            "milestone updated"
        );
        self.event_sender.send(Event::MilestoneUpdated {
            milestone_id: saved.id,
            job_id: saved.job_id.clone(),
            is_complete: saved.is_complete,
        });

        Ok(saved)
    }
}
