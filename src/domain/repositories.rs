//! Repository abstractions for prediction history.
//!
//! The only implementation today is the in-memory store in
//! `infrastructure::repositories`, which lives for the process lifetime.
//!
//! # Example
//!
//! ```rust,no_run
//! use taixiu_oracle::domain::game::{FeedType, Outcome};
//! use taixiu_oracle::domain::repositories::HistoryRepository;
//! use taixiu_oracle::infrastructure::InMemoryHistoryRepository;
//!
//! # async {
//! let repo = InMemoryHistoryRepository::new("@tag");
//! let entry = repo.record(FeedType::Hu, 1024, Outcome::Tai, 64).await;
//! assert_eq!(entry.prediction, "tai");
//! # };
//! ```

use crate::domain::game::{FeedType, Outcome};
use crate::domain::history::HistoryEntry;
use async_trait::async_trait;

/// Append-only, capacity-bounded log of predictions per feed type
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Prepend a new entry for `feed` and return it. Entries past capacity are dropped.
    async fn record(
        &self,
        feed: FeedType,
        round: i64,
        prediction: Outcome,
        confidence: u8,
    ) -> HistoryEntry;

    /// Every stored entry for `feed`, most recent first
    async fn snapshot(&self, feed: FeedType) -> Vec<HistoryEntry>;
}
