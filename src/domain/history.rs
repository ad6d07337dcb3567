use crate::domain::game::{FeedType, Outcome};
use crate::domain::prediction::format_confidence;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Maximum number of entries kept per feed type.
pub const MAX_HISTORY: usize = 100;

/// One stored prediction. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    #[serde(rename = "phien")]
    pub round: String,
    #[serde(rename = "du_doan")]
    pub prediction: String,
    #[serde(rename = "ti_le")]
    pub confidence: String,
    #[serde(rename = "id")]
    pub predictor_tag: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(round: i64, prediction: Outcome, confidence: u8, predictor_tag: &str) -> Self {
        Self {
            round: round.to_string(),
            prediction: prediction.canonical().to_string(),
            confidence: format_confidence(confidence),
            predictor_tag: predictor_tag.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Full dump of one feed's history.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryReport {
    #[serde(rename = "type")]
    pub title: String,
    pub history: Vec<HistoryEntry>,
    pub total: usize,
}

impl HistoryReport {
    pub fn new(feed: FeedType, history: Vec<HistoryEntry>) -> Self {
        Self {
            title: feed.title().to_string(),
            total: history.len(),
            history,
        }
    }
}
