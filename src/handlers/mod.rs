pub mod auth;
pub mod catalog;
pub mod common;
pub mod health;
pub mod jobs;
pub mod milestones;
pub mod purchase_lines;

use std::sync::Arc;

use crate::events::EventSender;
use crate::repositories::Repositories;
use crate::services::{MilestoneService, PurchaseLineService, QueryService};

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub query: Arc<QueryService>,
    pub milestones: Arc<MilestoneService>,
    pub purchase_lines: Arc<PurchaseLineService>,
}

impl AppServices {
    pub fn new(
        repos: Arc<Repositories>,
        event_sender: EventSender,
        enforce_completion_invariant: bool,
    ) -> Self {
        let query = Arc::new(QueryService::new(repos.clone()));
        let milestones = Arc::new(MilestoneService::new(
            repos.milestones.clone(),
            event_sender.clone(),
            enforce_completion_invariant,
        ));
        let purchase_lines = Arc::new(PurchaseLineService::new(
            repos.catalog.clone(),
            repos.purchase_lines.clone(),
            event_sender,
        ));

        Self {
            query,
            milestones,
            purchase_lines,
        }
    }
}
