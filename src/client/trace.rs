use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use tokio::sync::broadcast;

pub const DEFAULT_TRACE_CAPACITY: usize = 20;

/// One request/response exchange as seen by the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestTrace {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub started_at: DateTime<Utc>,
    pub ms: u64,
    pub method: String,
    pub url: String,
    pub request_body: Option<Value>,
    /// `None` when the request never got a response.
    pub status: Option<u16>,
    pub response_body: Value,
}

/// Bounded log of recent exchanges with live subscribers.
///
/// Oldest entries are evicted once `capacity` is reached. Each client owns
/// its own log.
#[derive(Debug)]
pub struct TraceLog {
    capacity: usize,
    entries: Mutex<VecDeque<RequestTrace>>,
    tx: broadcast::Sender<RequestTrace>,
}

impl TraceLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _) = broadcast::channel(capacity);
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            tx,
        }
    }

    pub fn record(&self, trace: RequestTrace) {
        {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            if entries.len() == self.capacity {
                entries.pop_front();
            }
            entries.push_back(trace.clone());
        }
        // No subscribers is fine.
        let _ = self.tx.send(trace);
    }

    pub fn last(&self) -> Option<RequestTrace> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .back()
            .cloned()
    }

    /// Oldest first.
    pub fn recent(&self) -> Vec<RequestTrace> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RequestTrace> {
        self.tx.subscribe()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for TraceLog {
    fn default() -> Self {
        Self::new(DEFAULT_TRACE_CAPACITY)
    }
}
