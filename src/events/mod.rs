use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Domain events raised after a mutation has been applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    MilestoneUpdated {
        milestone_id: i64,
        job_id: String,
        is_complete: bool,
    },
    PurchaseLineCreated {
        line_id: u64,
        part_number: String,
        vendor_code: String,
        quantity: f64,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Creates a sender together with the receiver for [`process_events`].
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self::new(tx), rx)
    }

    /// Enqueues an event without waiting. A full or closed channel is logged
    /// and otherwise ignored; the mutation that raised it has already landed.
    pub fn send(&self, event: Event) {
        if let Err(e) = self.sender.try_send(event) {
            warn!("Failed to send event: {}", e);
        }
    }
}

/// Drains the event channel until every sender is dropped.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match event {
            Event::MilestoneUpdated {
                milestone_id,
                job_id,
                is_complete,
            } => {
                info!(milestone_id, %job_id, is_complete, "milestone updated");
            }
            Event::PurchaseLineCreated {
                line_id,
                part_number,
                vendor_code,
                quantity,
            } => {
                info!(line_id, %part_number, %vendor_code, quantity, "purchase line created");
            }
        }
    }

    info!("Event processing loop stopped");
}
