//! Request-level orchestration: fetch, predict, record.
//!
//! The service owns no global state. The feed provider, history store and
//! jitter source are injected so each piece can be replaced in tests.

use crate::application::predictor::PredictionEngine;
use crate::domain::errors::PredictionError;
use crate::domain::game::{FeedType, OutcomeRecord};
use crate::domain::history::HistoryReport;
use crate::domain::ports::{FeedProvider, JitterSource};
use crate::domain::prediction::{Prediction, RoundForecast};
use crate::domain::repositories::HistoryRepository;
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct PredictionService {
    feed: Arc<dyn FeedProvider>,
    history: Arc<dyn HistoryRepository>,
    engine: PredictionEngine,
}

impl PredictionService {
    pub fn new(
        feed: Arc<dyn FeedProvider>,
        history: Arc<dyn HistoryRepository>,
        jitter: Arc<dyn JitterSource>,
    ) -> Self {
        Self {
            feed,
            history,
            engine: PredictionEngine::new(jitter),
        }
    }

    /// Predict the next round of `feed` and append it to that feed's history.
    ///
    /// Nothing is recorded when the upstream data cannot be used.
    pub async fn predict_next(&self, feed: FeedType) -> Result<RoundForecast, PredictionError> {
        let records = self.load_records(feed).await?;

        let latest = records[0].round;
        let next_round = latest
            .checked_add(1)
            .ok_or(PredictionError::RoundOverflow { round: latest })?;

        let prediction = self.engine.predict(&records);
        let entry = self
            .history
            .record(feed, next_round, prediction.prediction, prediction.confidence)
            .await;

        info!(
            "PredictionService: [{}] round {} -> {} ({}) factors={:?}",
            feed, entry.round, entry.prediction, entry.confidence, prediction.factors
        );

        Ok(RoundForecast {
            phien: entry.round,
            du_doan: entry.prediction,
            ti_le: entry.confidence,
            id: entry.predictor_tag,
        })
    }

    /// Full engine output for `feed`, without touching history.
    pub async fn analyze(&self, feed: FeedType) -> Result<Prediction, PredictionError> {
        let records = self.load_records(feed).await?;
        let prediction = self.engine.predict(&records);

        info!(
            "PredictionService: [{}] analysis over {} rounds -> {} ({}%)",
            feed,
            records.len(),
            prediction.prediction,
            prediction.confidence
        );

        Ok(prediction)
    }

    pub async fn history(&self, feed: FeedType) -> HistoryReport {
        HistoryReport::new(feed, self.history.snapshot(feed).await)
    }

    async fn load_records(&self, feed: FeedType) -> Result<Vec<OutcomeRecord>, PredictionError> {
        let snapshot = self
            .feed
            .fetch_snapshot()
            .await
            .ok_or(PredictionError::FeedUnavailable)?;

        let records = snapshot.records(feed).map_err(|e| {
            error!("PredictionService: [{}] cannot decode upstream records: {}", feed, e);
            PredictionError::MalformedFeed {
                feed,
                reason: e.to_string(),
            }
        })?;

        if records.is_empty() {
            warn!("PredictionService: [{}] upstream returned no records", feed);
            return Err(PredictionError::EmptyFeed { feed });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::game::{FeedSnapshot, Outcome};
    use crate::infrastructure::mock::MockFeedProvider;
    use crate::infrastructure::repositories::InMemoryHistoryRepository;
    use crate::infrastructure::simulation::NoJitter;

    fn record(round: i64, result: Outcome) -> OutcomeRecord {
        OutcomeRecord {
            round,
            result,
            die_1: 2,
            die_2: 4,
            die_3: 4,
            sum: 10,
        }
    }

    type Fixture = (PredictionService, Arc<InMemoryHistoryRepository>);

    fn service(snapshot: Option<FeedSnapshot>) -> Fixture {
        let history = Arc::new(InMemoryHistoryRepository::new("@test"));
        let feed = match snapshot {
            Some(snapshot) => MockFeedProvider::new(snapshot),
            None => MockFeedProvider::unavailable(),
        };
        let service = PredictionService::new(Arc::new(feed), history.clone(), Arc::new(NoJitter));
        (service, history)
    }

    #[tokio::test]
    async fn test_predict_next_advances_round_and_records() {
        let snapshot = FeedSnapshot::from_records(
            Some(vec![
                record(500, Outcome::Tai),
                record(499, Outcome::Tai),
                record(498, Outcome::Xiu),
                record(497, Outcome::Xiu),
            ]),
            None,
        );
        let (service, history) = service(Some(snapshot));

        let forecast = service.predict_next(FeedType::Hu).await.unwrap();

        assert_eq!(forecast.phien, "501");
        assert_eq!(forecast.du_doan, "xiu");
        assert_eq!(forecast.ti_le, "50%");
        assert_eq!(forecast.id, "@test");
        let stored = history.snapshot(FeedType::Hu).await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].predictor_tag, forecast.id);
        assert!(history.snapshot(FeedType::Md5).await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_feed_is_not_recorded() {
        let snapshot =
            FeedSnapshot::from_records(Some(vec![record(10, Outcome::Tai)]), Some(vec![]));
        let (service, history) = service(Some(snapshot));

        let err = service.predict_next(FeedType::Md5).await.unwrap_err();

        assert!(matches!(err, PredictionError::EmptyFeed { feed: FeedType::Md5 }));
        assert!(history.snapshot(FeedType::Md5).await.is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_feed() {
        let (service, _) = service(None);

        let err = service.analyze(FeedType::Hu).await.unwrap_err();
        assert!(matches!(err, PredictionError::FeedUnavailable));
    }

    #[tokio::test]
    async fn test_round_overflow_is_reported() {
        let snapshot = FeedSnapshot::from_records(Some(vec![record(i64::MAX, Outcome::Tai)]), None);
        let (service, history) = service(Some(snapshot));

        let err = service.predict_next(FeedType::Hu).await.unwrap_err();

        assert!(matches!(err, PredictionError::RoundOverflow { .. }));
        assert!(history.snapshot(FeedType::Hu).await.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_does_not_record() {
        let snapshot = FeedSnapshot::from_records(
            None,
            Some(vec![record(3, Outcome::Xiu), record(2, Outcome::Tai)]),
        );
        let (service, history) = service(Some(snapshot));

        let prediction = service.analyze(FeedType::Md5).await.unwrap();

        assert_eq!(prediction.prediction, Outcome::Tai);
        assert!(history.snapshot(FeedType::Md5).await.is_empty());
        assert_eq!(service.history(FeedType::Md5).await.total, 0);
    }

    #[tokio::test]
    async fn test_forecast_id_comes_from_history_store() {
        let history = Arc::new(InMemoryHistoryRepository::new("@store"));
        let feed = MockFeedProvider::new(FeedSnapshot::from_records(
            Some(vec![record(20, Outcome::Xiu), record(19, Outcome::Tai)]),
            None,
        ));
        let service = PredictionService::new(Arc::new(feed), history.clone(), Arc::new(NoJitter));

        let forecast = service.predict_next(FeedType::Hu).await.unwrap();
        let report = service.history(FeedType::Hu).await;

        assert_eq!(forecast.id, "@store");
        assert_eq!(report.history[0].predictor_tag, forecast.id);
    }

    #[tokio::test]
    async fn test_malformed_feed_is_isolated() {
        let snapshot: FeedSnapshot = serde_json::from_value(serde_json::json!({
            "taixiu": [{
                "Phien": 70, "Ket_qua": "Tài",
                "Xuc_xac_1": 5, "Xuc_xac_2": 5, "Xuc_xac_3": 2, "Tong": 12
            }],
            "taixiumd5": [{
                "Phien": 33, "Ket_qua": "Xỉu",
                "Xuc_xac_1": 1, "Xuc_xac_2": 2, "Xuc_xac_3": 2, "Tong": null
            }]
        }))
        .unwrap();
        let (service, history) = service(Some(snapshot));

        let err = service.predict_next(FeedType::Md5).await.unwrap_err();
        assert!(matches!(err, PredictionError::MalformedFeed { feed: FeedType::Md5, .. }));
        assert!(history.snapshot(FeedType::Md5).await.is_empty());

        let forecast = service.predict_next(FeedType::Hu).await.unwrap();
        assert_eq!(forecast.phien, "71");
    }
}
