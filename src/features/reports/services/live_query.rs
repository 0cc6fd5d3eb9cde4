use std::sync::Arc;
use tokio::sync::{watch, Mutex};

use crate::features::reports::models::Report;
use crate::features::reports::services::ReportStore;

/// One delivery of the live query. Each snapshot is the complete record set;
/// consumers replace their working set with it.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    /// Records ordered by `timestamp` descending
    pub reports: Arc<Vec<Report>>,
    /// Set when the latest read failed
    pub error: Option<String>,
    /// True until the first read settles
    pub loading: bool,
}

impl FeedSnapshot {
    fn pending() -> Self {
        Self {
            reports: Arc::new(Vec::new()),
            error: None,
            loading: true,
        }
    }

    pub fn ready(reports: Vec<Report>) -> Self {
        Self {
            reports: Arc::new(reports),
            error: None,
            loading: false,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            reports: Arc::new(Vec::new()),
            error: Some(error),
            loading: false,
        }
    }
}

/// Process-wide live query over the report store.
///
/// Holds the latest snapshot in a watch channel; every subscriber sees each
/// refresh as a new full snapshot. Refreshes are serialized so a slow read can
/// never publish over a newer one.
pub struct LiveQuery {
    store: Arc<dyn ReportStore>,
    sender: watch::Sender<FeedSnapshot>,
    refresh_lock: Mutex<()>,
}

impl LiveQuery {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        let (sender, _receiver) = watch::channel(FeedSnapshot::pending());
        Self {
            store,
            sender,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.sender.subscribe()
    }

    pub fn current(&self) -> FeedSnapshot {
        self.sender.borrow().clone()
    }

    /// Re-read the full ordered set and publish it
    pub async fn refresh(&self) {
        let _guard = self.refresh_lock.lock().await;

        let snapshot = match self.store.list_newest_first().await {
            Ok(reports) => {
                tracing::debug!("Live query refreshed with {} reports", reports.len());
                FeedSnapshot::ready(reports)
            }
            Err(e) => {
                tracing::error!("Error fetching reports: {}", e);
                FeedSnapshot::failed(e.to_string())
            }
        };

        self.sender.send_replace(snapshot);
    }

    /// Publish an empty snapshot carrying `error`, e.g. when the change feed is lost
    pub async fn fail(&self, error: String) {
        let _guard = self.refresh_lock.lock().await;
        self.sender.send_replace(FeedSnapshot::failed(error));
    }
}
