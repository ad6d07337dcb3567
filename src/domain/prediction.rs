use crate::domain::game::Outcome;
use serde::Serialize;

/// Current run of identical results from the most recent round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreakFinding {
    /// `None` when fewer than two rounds are available.
    #[serde(rename = "type")]
    pub kind: Option<Outcome>,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternatingFinding {
    pub is_alternating: bool,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoublePairFinding {
    pub is_double_pair: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripleFinding {
    pub has_triple: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<Outcome>,
}

impl TripleFinding {
    pub fn absent() -> Self {
        Self {
            has_triple: false,
            position: None,
            kind: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionFinding {
    pub tai_percent: f64,
    pub xiu_percent: f64,
    pub tai_count: usize,
    pub xiu_count: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SumLevel {
    High,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DicePatternFinding {
    pub high_dice_ratio: f64,
    pub low_dice_ratio: f64,
    pub average_sum: f64,
    pub sum_trend: SumLevel,
    /// Rounds the averages were taken over.
    pub samples: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SumTrendFinding {
    pub trend: TrendDirection,
    pub strength: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentWindowFinding {
    pub window_size: usize,
    pub tai_ratio: f64,
    pub xiu_ratio: f64,
    pub dominant: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeFinding {
    pub has_bridge: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_likely: Option<Outcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZigzagBreakFinding {
    pub has_zigzag_break: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_direction: Option<Outcome>,
}

/// Raw output of every detector for one prediction run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Findings {
    pub streak: StreakFinding,
    pub alternating: AlternatingFinding,
    pub double_pairs: DoublePairFinding,
    pub triple: TripleFinding,
    pub distribution: DistributionFinding,
    pub dice_patterns: DicePatternFinding,
    pub sum_trend: SumTrendFinding,
    pub recent_window5: RecentWindowFinding,
    pub recent_window10: RecentWindowFinding,
    pub bridge: BridgeFinding,
    pub zigzag_break: ZigzagBreakFinding,
}

/// Folded engine output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub prediction: Outcome,
    /// Always within `[MIN_CONFIDENCE, MAX_CONFIDENCE]`.
    pub confidence: u8,
    pub factors: Vec<String>,
    pub analysis: Findings,
}

/// Confidence rendered as a percentage string, e.g. `"67%"`.
pub fn format_confidence(confidence: u8) -> String {
    format!("{confidence}%")
}

/// Public answer of the `/hu` and `/md5` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundForecast {
    pub phien: String,
    pub du_doan: String,
    pub ti_le: String,
    pub id: String,
}
