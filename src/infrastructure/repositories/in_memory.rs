//! In-memory prediction history.
//!
//! One bounded, most-recent-first log per feed type, shared behind an
//! async `RwLock`. Contents are lost when the process exits.

use crate::domain::game::{FeedType, Outcome};
use crate::domain::history::{HistoryEntry, MAX_HISTORY};
use crate::domain::repositories::HistoryRepository;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

type HistorySlots = HashMap<FeedType, VecDeque<HistoryEntry>>;

pub struct InMemoryHistoryRepository {
    slots: Arc<RwLock<HistorySlots>>,
    capacity: usize,
    predictor_tag: String,
}

impl InMemoryHistoryRepository {
    pub fn new(predictor_tag: impl Into<String>) -> Self {
        Self::with_capacity(predictor_tag, MAX_HISTORY)
    }

    pub fn with_capacity(predictor_tag: impl Into<String>, capacity: usize) -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            capacity,
            predictor_tag: predictor_tag.into(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn record(
        &self,
        feed: FeedType,
        round: i64,
        prediction: Outcome,
        confidence: u8,
    ) -> HistoryEntry {
        let entry = HistoryEntry::new(round, prediction, confidence, &self.predictor_tag);

        let mut slots = self.slots.write().await;
        let log = slots.entry(feed).or_default();
        log.push_front(entry.clone());
        log.truncate(self.capacity);

        debug!(
            "InMemoryHistoryRepository: [{}] stored round {} ({} entries)",
            feed,
            entry.round,
            log.len()
        );
        entry
    }

    async fn snapshot(&self, feed: FeedType) -> Vec<HistoryEntry> {
        self.slots
            .read()
            .await
            .get(&feed)
            .map(|log| log.iter().cloned().collect())
            .unwrap_or_default()
    }
}
