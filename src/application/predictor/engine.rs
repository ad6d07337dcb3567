use super::detectors::{
    analyze_alternating, analyze_dice_patterns, analyze_distribution, analyze_double_pairs,
    analyze_recent_window, analyze_streak, analyze_sum_trend, analyze_triple, detect_bridge,
    detect_zigzag_break,
};
use crate::domain::game::{Outcome, OutcomeRecord};
use crate::domain::ports::{JitterSource, MAX_JITTER};
use crate::domain::prediction::{Findings, Prediction, TrendDirection};
use std::sync::Arc;
use tracing::debug;

/// Number of most recent rounds every detector looks at.
pub const ANALYSIS_WINDOW: usize = 50;
pub const BASE_CONFIDENCE: i64 = 50;
pub const MIN_CONFIDENCE: u8 = 50;
pub const MAX_CONFIDENCE: u8 = 85;

const STREAK_MIN: usize = 4;
const DISTRIBUTION_SKEW_PCT: f64 = 15.0;
const HIGH_AVERAGE_SUM: f64 = 11.5;
const LOW_AVERAGE_SUM: f64 = 9.5;
const SUM_TREND_MIN_STRENGTH: f64 = 0.4;
const VOLATILITY_MIN_DELTA: f64 = 0.3;

/// Running state of the detector fold.
#[derive(Debug, Default)]
struct Vote {
    prediction: Option<Outcome>,
    score: i64,
    factors: Vec<String>,
}

impl Vote {
    /// Pattern-break detectors take precedence over anything set before them.
    fn overwrite(&mut self, outcome: Outcome) {
        self.prediction = Some(outcome);
    }

    /// Distributional detectors only fill an empty slot.
    fn suggest(&mut self, outcome: Outcome) {
        if self.prediction.is_none() {
            self.prediction = Some(outcome);
        }
    }

    fn add(&mut self, points: i64, factor: String) {
        self.score += points;
        self.factors.push(factor);
    }
}

/// Folds the pattern detectors into a single next-round prediction.
pub struct PredictionEngine {
    jitter: Arc<dyn JitterSource>,
}

impl PredictionEngine {
    pub fn new(jitter: Arc<dyn JitterSource>) -> Self {
        Self { jitter }
    }

    /// Predict the round following `records[0]`.
    ///
    /// `records` must be most-recent-first. Any length is accepted; detectors
    /// without enough data report a neutral finding.
    pub fn predict(&self, records: &[OutcomeRecord]) -> Prediction {
        let window = &records[..records.len().min(ANALYSIS_WINDOW)];
        let results: Vec<Outcome> = window.iter().map(|r| r.result).collect();

        let mut vote = Vote {
            score: BASE_CONFIDENCE,
            ..Vote::default()
        };

        let streak = analyze_streak(&results);
        if let Some(kind) = streak.kind.filter(|_| streak.length >= STREAK_MIN) {
            vote.overwrite(kind.opposite());
            vote.add(
                (streak.length as i64 * 3).min(15),
                format!("Cầu bệt {} phiên", streak.length),
            );
        }

        let alternating = analyze_alternating(&results);
        if alternating.is_alternating {
            vote.overwrite(results[0].opposite());
            vote.add(
                (alternating.length as i64 * 2).min(10),
                format!("Cầu 1-1 ({} phiên)", alternating.length),
            );
        }

        let double_pairs = analyze_double_pairs(&results);
        if double_pairs.is_double_pair {
            vote.overwrite(results[0]);
            vote.add(
                8,
                format!("Cầu 2-2 ({} cặp)", double_pairs.pair_count.unwrap_or_default()),
            );
        }

        let triple = analyze_triple(&results);
        if let (Some(0), Some(kind)) = (triple.position, triple.kind) {
            vote.overwrite(kind.opposite());
            vote.add(12, "Cầu 3 phiên liên tiếp".to_string());
        }

        let distribution = analyze_distribution(window);
        if distribution.total > 0 && (distribution.tai_percent - 50.0).abs() > DISTRIBUTION_SKEW_PCT
        {
            let dominant = if distribution.tai_percent > 50.0 {
                Outcome::Tai
            } else {
                Outcome::Xiu
            };
            vote.suggest(dominant.opposite());
            vote.add(
                5,
                format!("Phân bố lệch ({}: {:.1}%)", dominant, distribution.tai_percent),
            );
        }

        let dice_patterns = analyze_dice_patterns(window);
        if dice_patterns.samples > 0 {
            if dice_patterns.average_sum > HIGH_AVERAGE_SUM {
                vote.suggest(Outcome::Xiu);
                vote.add(
                    3,
                    format!("Tổng trung bình cao ({:.1})", dice_patterns.average_sum),
                );
            } else if dice_patterns.average_sum < LOW_AVERAGE_SUM {
                vote.suggest(Outcome::Tai);
                vote.add(
                    3,
                    format!("Tổng trung bình thấp ({:.1})", dice_patterns.average_sum),
                );
            }
        }

        let sum_trend = analyze_sum_trend(window);
        if sum_trend.strength > SUM_TREND_MIN_STRENGTH {
            let (outcome, word) = match sum_trend.trend {
                TrendDirection::Increasing => (Outcome::Tai, "tăng"),
                TrendDirection::Decreasing => (Outcome::Xiu, "giảm"),
            };
            vote.suggest(outcome);
            vote.add(
                (sum_trend.strength * 5.0).round() as i64,
                format!("Xu hướng tổng {word}"),
            );
        }

        let recent_window5 = analyze_recent_window(&results, 5);
        let recent_window10 = analyze_recent_window(&results, 10);
        if (recent_window5.tai_ratio - recent_window10.tai_ratio).abs() > VOLATILITY_MIN_DELTA {
            vote.suggest(recent_window5.dominant.opposite());
            vote.add(4, "Biến động ngắn hạn".to_string());
        }

        let bridge = detect_bridge(&results);
        if let Some(next) = bridge.next_likely {
            vote.suggest(next);
            vote.add(6, "Cầu cầu đảo".to_string());
        }

        let zigzag_break = detect_zigzag_break(&results);
        if let Some(direction) = zigzag_break.break_direction {
            vote.suggest(direction);
            vote.add(5, "Phá cầu zigzag".to_string());
        }

        let prediction = match vote.prediction {
            Some(outcome) => outcome,
            None => {
                let recent_tai = results.iter().take(3).filter(|r| **r == Outcome::Tai).count();
                vote.factors.push("Phân tích mặc định".to_string());
                if recent_tai >= 2 {
                    Outcome::Xiu
                } else {
                    Outcome::Tai
                }
            }
        };

        let jitter = self.jitter.next_jitter().clamp(-MAX_JITTER, MAX_JITTER);
        let confidence = clamp_confidence(vote.score as f64 + jitter);

        debug!(
            "Engine: {} rounds, raw score {}, jitter {:.2} -> {} @ {}%",
            window.len(),
            vote.score,
            jitter,
            prediction,
            confidence
        );

        Prediction {
            prediction,
            confidence,
            factors: vote.factors,
            analysis: Findings {
                streak,
                alternating,
                double_pairs,
                triple,
                distribution,
                dice_patterns,
                sum_trend,
                recent_window5,
                recent_window10,
                bridge,
                zigzag_break,
            },
        }
    }
}

/// Rounds to the nearest integer and bounds to the displayable range.
fn clamp_confidence(raw: f64) -> u8 {
    if raw.is_nan() {
        return MIN_CONFIDENCE;
    }
    raw.round()
        .clamp(f64::from(MIN_CONFIDENCE), f64::from(MAX_CONFIDENCE)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::simulation::{FixedJitter, NoJitter};

    fn records(pattern: &str) -> Vec<OutcomeRecord> {
        pattern
            .chars()
            .enumerate()
            .map(|(i, c)| OutcomeRecord {
                round: 1000 - i as i64,
                result: if c == 'T' { Outcome::Tai } else { Outcome::Xiu },
                die_1: 3,
                die_2: 3,
                die_3: 4,
                sum: 10,
            })
            .collect()
    }

    fn engine() -> PredictionEngine {
        PredictionEngine::new(Arc::new(NoJitter))
    }

    #[test]
    fn test_default_analysis_when_nothing_fires() {
        let prediction = engine().predict(&records("TTXX"));

        assert_eq!(prediction.prediction, Outcome::Xiu);
        assert_eq!(prediction.confidence, 50);
        assert_eq!(prediction.factors, vec!["Phân tích mặc định".to_string()]);
    }

    #[test]
    fn test_distribution_suggests_minority() {
        let prediction = engine().predict(&records("XTXXTXXTXX"));

        assert_eq!(prediction.prediction, Outcome::Tai);
        assert_eq!(prediction.confidence, 55);
        assert_eq!(prediction.factors, vec!["Phân bố lệch (Xỉu: 30.0%)".to_string()]);
    }

    #[test]
    fn test_alternation_overrides_to_opposite_of_head() {
        let prediction = engine().predict(&records("TXTXTX"));

        assert!(prediction.analysis.alternating.is_alternating);
        assert_eq!(prediction.analysis.alternating.length, 6);
        assert_eq!(prediction.prediction, Outcome::Xiu);
        assert_eq!(prediction.factors[0], "Cầu 1-1 (6 phiên)");
    }

    #[test]
    fn test_triple_overrides_double_pairs() {
        // Streak of 4 followed by pairs: double pairs votes Tài, triple flips back to Xỉu.
        let prediction = engine().predict(&records("TTTTXXTTXXTX"));

        assert!(prediction.analysis.double_pairs.is_double_pair);
        assert_eq!(prediction.analysis.triple.position, Some(0));
        assert_eq!(prediction.prediction, Outcome::Xiu);
        assert_eq!(
            &prediction.factors[..3],
            &[
                "Cầu bệt 4 phiên".to_string(),
                "Cầu 2-2 (5 cặp)".to_string(),
                "Cầu 3 phiên liên tiếp".to_string(),
            ]
        );
    }

    #[test]
    fn test_window_is_capped_at_fifty_rounds() {
        let pattern = "TX".repeat(40);
        let prediction = engine().predict(&records(&pattern));

        assert_eq!(prediction.analysis.distribution.total, ANALYSIS_WINDOW);
        assert_eq!(prediction.analysis.alternating.length, ANALYSIS_WINDOW);
    }

    #[test]
    fn test_jitter_is_rounded_and_clamped() {
        let up = PredictionEngine::new(Arc::new(FixedJitter::new(2.6)));
        assert_eq!(up.predict(&records("TTXX")).confidence, 53);

        let down = PredictionEngine::new(Arc::new(FixedJitter::new(-3.0)));
        assert_eq!(down.predict(&records("TTXX")).confidence, MIN_CONFIDENCE);

        let wild = PredictionEngine::new(Arc::new(FixedJitter::new(40.0)));
        assert_eq!(wild.predict(&records("TTXX")).confidence, 53);
    }

    #[test]
    fn test_confidence_caps_at_maximum() {
        let prediction = PredictionEngine::new(Arc::new(FixedJitter::new(3.0)))
            .predict(&records(&"T".repeat(50)));

        assert_eq!(prediction.prediction, Outcome::Xiu);
        assert_eq!(prediction.confidence, MAX_CONFIDENCE);
    }

    #[test]
    fn test_empty_input_falls_back_to_default() {
        let prediction = engine().predict(&[]);

        assert_eq!(prediction.prediction, Outcome::Tai);
        assert_eq!(prediction.confidence, MIN_CONFIDENCE);
        assert_eq!(prediction.analysis.streak.kind, None);
    }

    #[test]
    fn test_clamp_confidence_handles_nan() {
        assert_eq!(clamp_confidence(f64::NAN), MIN_CONFIDENCE);
        assert_eq!(clamp_confidence(67.5), 68);
    }
}
