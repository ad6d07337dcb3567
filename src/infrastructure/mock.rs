use crate::domain::game::FeedSnapshot;
use crate::domain::ports::FeedProvider;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::info;

/// Feed provider serving a fixed in-memory document.
#[derive(Clone)]
pub struct MockFeedProvider {
    snapshot: Arc<RwLock<Option<FeedSnapshot>>>,
    fetches: Arc<AtomicUsize>,
}

impl MockFeedProvider {
    pub fn new(snapshot: FeedSnapshot) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(Some(snapshot))),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A provider whose every fetch fails.
    pub fn unavailable() -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(None)),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the served document; `None` simulates an outage.
    pub async fn set_snapshot(&self, snapshot: Option<FeedSnapshot>) {
        *self.snapshot.write().await = snapshot;
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl Default for MockFeedProvider {
    fn default() -> Self {
        Self::new(FeedSnapshot::default())
    }
}

#[async_trait]
impl FeedProvider for MockFeedProvider {
    async fn fetch_snapshot(&self) -> Option<FeedSnapshot> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        let snapshot = self.snapshot.read().await.clone();
        if snapshot.is_none() {
            info!("MockFeedProvider: simulated outage");
        }
        snapshot
    }
}
