use crate::domain::game::FeedType;
use thiserror::Error;

/// User-facing message for data retrieval failures.
pub const FEED_UNAVAILABLE_MESSAGE: &str = "Không thể lấy dữ liệu";
/// User-facing message for anything else.
pub const SERVER_ERROR_MESSAGE: &str = "Lỗi server";

/// Errors raised while serving a prediction request
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Upstream feed unavailable")]
    FeedUnavailable,

    #[error("Upstream feed {feed} returned no records")]
    EmptyFeed { feed: FeedType },

    #[error("Upstream feed {feed} has malformed records: {reason}")]
    MalformedFeed { feed: FeedType, reason: String },

    #[error("Round id {round} cannot be advanced")]
    RoundOverflow { round: i64 },
}

impl PredictionError {
    /// Localized message returned to API callers.
    pub fn user_message(&self) -> &'static str {
        match self {
            PredictionError::FeedUnavailable
            | PredictionError::EmptyFeed { .. }
            | PredictionError::MalformedFeed { .. } => FEED_UNAVAILABLE_MESSAGE,
            PredictionError::RoundOverflow { .. } => SERVER_ERROR_MESSAGE,
        }
    }
}
