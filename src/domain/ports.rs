use crate::domain::game::FeedSnapshot;
use async_trait::async_trait;

/// Source of upstream result documents.
#[async_trait]
pub trait FeedProvider: Send + Sync {
    /// Fetch the latest document. Failures are logged by the provider and
    /// surface as `None`.
    async fn fetch_snapshot(&self) -> Option<FeedSnapshot>;
}

/// Random adjustment applied to the folded confidence score.
pub trait JitterSource: Send + Sync {
    /// Returns a value within `[-MAX_JITTER, MAX_JITTER]`.
    fn next_jitter(&self) -> f64;
}

/// Largest absolute jitter a source may produce.
pub const MAX_JITTER: f64 = 3.0;
