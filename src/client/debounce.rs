use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use super::{ClientError, ErpClient};
use crate::models::Job;

/// Quiet period after the last keystroke before jobs are searched.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub struct SearchOutcome {
    pub query: String,
    pub result: Result<Vec<Job>, ClientError>,
}

/// Debounced job search.
///
/// Each [`input`](Self::input) supersedes the previous one. A superseded
/// lookup that has not started is dropped; one already in flight runs to
/// completion but its result is discarded. Only the latest query's outcome
/// reaches the receiver.
#[derive(Debug)]
pub struct SearchDebouncer {
    client: ErpClient,
    delay: Duration,
    generation: Arc<AtomicU64>,
    tx: mpsc::Sender<SearchOutcome>,
}

impl SearchDebouncer {
    pub fn new(client: ErpClient, delay: Duration) -> (Self, mpsc::Receiver<SearchOutcome>) {
        let (tx, rx) = mpsc::channel(16);
        let debouncer = Self {
            client,
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            tx,
        };
        (debouncer, rx)
    }

    /// Must be called from within a tokio runtime.
    pub fn input(&self, text: impl Into<String>) {
        let query = text.into();
        let mine = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let client = self.client.clone();
        let delay = self.delay;
        let tx = self.tx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if generation.load(Ordering::SeqCst) != mine {
                return;
            }

            let result = client.jobs(Some(&query)).await;

            if generation.load(Ordering::SeqCst) != mine {
                debug!(query = %query, "discarding superseded search result");
                return;
            }
            let _ = tx.send(SearchOutcome { query, result }).await;
        });
    }
}
