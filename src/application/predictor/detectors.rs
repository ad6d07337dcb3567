//! Pattern detectors over a most-recent-first result window.
//!
//! Every detector is a pure function. Each one guards its own minimum input
//! length and returns a neutral finding when there is not enough data.

use crate::domain::game::{Outcome, OutcomeRecord};
use crate::domain::prediction::{
    AlternatingFinding, BridgeFinding, DicePatternFinding, DistributionFinding, DoublePairFinding,
    RecentWindowFinding, StreakFinding, SumLevel, SumTrendFinding, TrendDirection, TripleFinding,
    ZigzagBreakFinding,
};

const DICE_WINDOW: usize = 10;
const SUM_TREND_WINDOW: usize = 15;
const HIGH_FACE: u8 = 4;
const SUM_LEVEL_PIVOT: f64 = 10.5;

/// Length of the run of identical results starting at the most recent round.
pub fn analyze_streak(results: &[Outcome]) -> StreakFinding {
    if results.len() < 2 {
        return StreakFinding {
            kind: None,
            length: 0,
        };
    }

    let head = results[0];
    let length = results.iter().take_while(|r| **r == head).count();

    StreakFinding {
        kind: Some(head),
        length,
    }
}

/// Length of the perfectly alternating run starting at the most recent round.
pub fn analyze_alternating(results: &[Outcome]) -> AlternatingFinding {
    if results.len() < 4 {
        return AlternatingFinding {
            is_alternating: false,
            length: 0,
        };
    }

    let length = 1 + results
        .windows(2)
        .take_while(|pair| pair[0] != pair[1])
        .count();

    AlternatingFinding {
        is_alternating: length >= 4,
        length,
    }
}

/// Counts AABB... pairs stepping by two from the most recent round.
pub fn analyze_double_pairs(results: &[Outcome]) -> DoublePairFinding {
    if results.len() < 8 {
        return DoublePairFinding {
            is_double_pair: false,
            pair_count: None,
        };
    }

    let pair_count = results
        .chunks_exact(2)
        .take_while(|pair| pair[0] == pair[1])
        .count();

    DoublePairFinding {
        is_double_pair: pair_count >= 2,
        pair_count: Some(pair_count),
    }
}

/// First position holding three identical results in a row.
pub fn analyze_triple(results: &[Outcome]) -> TripleFinding {
    if results.len() < 6 {
        return TripleFinding::absent();
    }

    results
        .windows(3)
        .position(|w| w[0] == w[1] && w[1] == w[2])
        .map(|position| TripleFinding {
            has_triple: true,
            position: Some(position),
            kind: Some(results[position]),
        })
        .unwrap_or_else(TripleFinding::absent)
}

pub fn analyze_distribution(records: &[OutcomeRecord]) -> DistributionFinding {
    let total = records.len();
    let tai_count = records.iter().filter(|r| r.result == Outcome::Tai).count();
    let xiu_count = total - tai_count;

    let percent = |count: usize| {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        }
    };

    DistributionFinding {
        tai_percent: percent(tai_count),
        xiu_percent: percent(xiu_count),
        tai_count,
        xiu_count,
        total,
    }
}

/// Face and sum statistics over the 10 most recent rounds.
pub fn analyze_dice_patterns(records: &[OutcomeRecord]) -> DicePatternFinding {
    let recent = &records[..records.len().min(DICE_WINDOW)];

    let (high, low) = recent
        .iter()
        .flat_map(OutcomeRecord::dice)
        .fold((0usize, 0usize), |(high, low), face| {
            if face >= HIGH_FACE {
                (high + 1, low)
            } else {
                (high, low + 1)
            }
        });
    let faces = high + low;
    let total_sum: u64 = recent.iter().map(|r| u64::from(r.sum)).sum();

    let (high_dice_ratio, low_dice_ratio) = if faces == 0 {
        (0.0, 0.0)
    } else {
        (high as f64 / faces as f64, low as f64 / faces as f64)
    };
    let average_sum = if recent.is_empty() {
        0.0
    } else {
        total_sum as f64 / recent.len() as f64
    };

    DicePatternFinding {
        high_dice_ratio,
        low_dice_ratio,
        average_sum,
        sum_trend: if average_sum > SUM_LEVEL_PIVOT {
            SumLevel::High
        } else {
            SumLevel::Low
        },
        samples: recent.len(),
    }
}

/// Balance of rising versus falling sums between consecutive rounds.
pub fn analyze_sum_trend(records: &[OutcomeRecord]) -> SumTrendFinding {
    let sums: Vec<u32> = records.iter().take(SUM_TREND_WINDOW).map(|r| r.sum).collect();

    let mut increasing = 0usize;
    let mut decreasing = 0usize;
    for pair in sums.windows(2) {
        match pair[0].cmp(&pair[1]) {
            std::cmp::Ordering::Less => increasing += 1,
            std::cmp::Ordering::Greater => decreasing += 1,
            std::cmp::Ordering::Equal => {}
        }
    }

    let strength = if sums.len() < 2 {
        0.0
    } else {
        increasing.abs_diff(decreasing) as f64 / (sums.len() - 1) as f64
    };

    SumTrendFinding {
        trend: if increasing > decreasing {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        },
        strength,
    }
}

/// Tài share of the `window_size` most recent rounds.
///
/// Ratios are taken over the nominal window size even when fewer rounds exist.
pub fn analyze_recent_window(results: &[Outcome], window_size: usize) -> RecentWindowFinding {
    let tai_count = results
        .iter()
        .take(window_size)
        .filter(|r| **r == Outcome::Tai)
        .count();
    let size = window_size.max(1) as f64;

    RecentWindowFinding {
        window_size,
        tai_ratio: tai_count as f64 / size,
        xiu_ratio: (window_size.saturating_sub(tai_count)) as f64 / size,
        dominant: if tai_count as f64 > window_size as f64 / 2.0 {
            Outcome::Tai
        } else {
            Outcome::Xiu
        },
    }
}

/// Matches the XX YY Z shape (Z differing from Y) at the head of the window.
pub fn detect_bridge(results: &[Outcome]) -> BridgeFinding {
    if results.len() < 6 {
        return BridgeFinding {
            has_bridge: false,
            next_likely: None,
        };
    }

    let p = &results[..6];
    if p[0] == p[1] && p[2] != p[1] && p[3] == p[2] && p[4] != p[3] {
        BridgeFinding {
            has_bridge: true,
            next_likely: Some(p[0]),
        }
    } else {
        BridgeFinding {
            has_bridge: false,
            next_likely: None,
        }
    }
}

/// A leading pair breaking an otherwise zig-zagging head of five rounds.
pub fn detect_zigzag_break(results: &[Outcome]) -> ZigzagBreakFinding {
    if results.len() < 5 {
        return ZigzagBreakFinding {
            has_zigzag_break: false,
            break_direction: None,
        };
    }

    let changes = results[..5]
        .windows(2)
        .filter(|pair| pair[0] != pair[1])
        .count();

    if changes >= 3 && results[0] == results[1] {
        ZigzagBreakFinding {
            has_zigzag_break: true,
            break_direction: Some(results[0]),
        }
    } else {
        ZigzagBreakFinding {
            has_zigzag_break: false,
            break_direction: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pattern: &str) -> Vec<Outcome> {
        pattern
            .chars()
            .map(|c| match c {
                'T' => Outcome::Tai,
                _ => Outcome::Xiu,
            })
            .collect()
    }

    fn record(sum: u32, dice: [u8; 3]) -> OutcomeRecord {
        OutcomeRecord {
            round: 1,
            result: if sum >= 11 { Outcome::Tai } else { Outcome::Xiu },
            die_1: dice[0],
            die_2: dice[1],
            die_3: dice[2],
            sum,
        }
    }

    #[test]
    fn test_streak_counts_leading_run() {
        let finding = analyze_streak(&labels("TTTTTXTX"));
        assert_eq!(finding.kind, Some(Outcome::Tai));
        assert_eq!(finding.length, 5);
    }

    #[test]
    fn test_streak_needs_two_rounds() {
        let finding = analyze_streak(&labels("X"));
        assert_eq!(finding.kind, None);
        assert_eq!(finding.length, 0);
    }

    #[test]
    fn test_alternating_full_window() {
        let finding = analyze_alternating(&labels("TXTXTX"));
        assert!(finding.is_alternating);
        assert_eq!(finding.length, 6);
    }

    #[test]
    fn test_alternating_stops_at_repeat() {
        let finding = analyze_alternating(&labels("TXTTXT"));
        assert!(!finding.is_alternating);
        assert_eq!(finding.length, 3);
    }

    #[test]
    fn test_double_pairs_count() {
        let finding = analyze_double_pairs(&labels("TTXXTTXT"));
        assert!(finding.is_double_pair);
        assert_eq!(finding.pair_count, Some(3));

        let short = analyze_double_pairs(&labels("TTXXTT"));
        assert!(!short.is_double_pair);
        assert_eq!(short.pair_count, None);
    }

    #[test]
    fn test_triple_reports_first_position() {
        let finding = analyze_triple(&labels("TXXXTT"));
        assert!(finding.has_triple);
        assert_eq!(finding.position, Some(1));
        assert_eq!(finding.kind, Some(Outcome::Xiu));

        assert!(!analyze_triple(&labels("TXTXTX")).has_triple);
    }

    #[test]
    fn test_dice_patterns_average_and_ratio() {
        let records = vec![record(15, [6, 5, 4]), record(6, [1, 2, 3])];
        let finding = analyze_dice_patterns(&records);

        assert!((finding.average_sum - 10.5).abs() < 1e-9);
        assert!((finding.high_dice_ratio - 0.5).abs() < 1e-9);
        assert_eq!(finding.sum_trend, SumLevel::Low);
        assert_eq!(finding.samples, 2);
    }

    #[test]
    fn test_dice_patterns_only_uses_ten_rounds() {
        let mut records = vec![record(17, [6, 6, 5]); 10];
        records.extend(vec![record(3, [1, 1, 1]); 20]);
        let finding = analyze_dice_patterns(&records);

        assert!((finding.average_sum - 17.0).abs() < 1e-9);
        assert_eq!(finding.sum_trend, SumLevel::High);
    }

    #[test]
    fn test_sum_trend_strength() {
        // Index order: 5 -> 8 -> 12 -> 9 is inc, inc, dec.
        let records: Vec<_> = [5, 8, 12, 9]
            .iter()
            .map(|s| record(*s, [1, 1, 1]))
            .collect();
        let finding = analyze_sum_trend(&records);

        assert_eq!(finding.trend, TrendDirection::Increasing);
        assert!((finding.strength - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_sum_trend_single_round_is_flat() {
        let finding = analyze_sum_trend(&[record(10, [3, 3, 4])]);
        assert_eq!(finding.strength, 0.0);
        assert_eq!(finding.trend, TrendDirection::Decreasing);
    }

    #[test]
    fn test_recent_window_divides_by_nominal_size() {
        let finding = analyze_recent_window(&labels("TTT"), 5);
        assert!((finding.tai_ratio - 0.6).abs() < 1e-9);
        assert_eq!(finding.dominant, Outcome::Tai);

        let even = analyze_recent_window(&labels("TTXXTTXXTX"), 10);
        assert_eq!(even.dominant, Outcome::Xiu);
    }

    #[test]
    fn test_bridge_shape() {
        let finding = detect_bridge(&labels("TTXXTX"));
        assert!(finding.has_bridge);
        assert_eq!(finding.next_likely, Some(Outcome::Tai));

        assert!(!detect_bridge(&labels("TTXXXT")).has_bridge);
    }

    #[test]
    fn test_zigzag_break() {
        let finding = detect_zigzag_break(&labels("XXTXTT"));
        assert!(finding.has_zigzag_break);
        assert_eq!(finding.break_direction, Some(Outcome::Xiu));

        assert!(!detect_zigzag_break(&labels("XTXTX")).has_zigzag_break);
    }
}
