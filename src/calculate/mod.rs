//! Statistics calculation engine.
//!
//! Pure derivations over fetched rows:
//! - Record string parsing ("W-L-D" with optional no-contest suffix)
//! - Method-of-victory totals across per-promotion record slices
//! - Striking and takedown accuracy

use serde::{Deserialize, Serialize};

use crate::models::{FighterRecord, MethodBreakdown, StrikingStats, WinLossRecord};

/// Parse a "W-L-D" record string.
///
/// Anything after the first comma (e.g. ", 1 NC") is discarded. Segments
/// that are missing or not integers count as 0.
pub fn parse_record(raw: Option<&str>) -> WinLossRecord {
    let Some(raw) = raw else {
        return WinLossRecord::default();
    };

    let head = raw.split(',').next().unwrap_or("");
    let mut parts = head.split('-').map(parse_segment);

    WinLossRecord::new(
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
    )
}

/// Leading-digit parse: "3 " -> 3, "x" -> 0.
fn parse_segment(segment: &str) -> u32 {
    let digits: String = segment
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Method-of-result totals summed over every per-promotion slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodTotals {
    pub wins: MethodBreakdown,
    pub losses: MethodBreakdown,
}

impl MethodTotals {
    pub fn ko_tko(&self) -> u32 {
        self.wins.ko_tko
    }

    pub fn submissions(&self) -> u32 {
        self.wins.submissions
    }

    pub fn decisions(&self) -> u32 {
        self.wins.decisions
    }
}

/// Sum win and loss methods across all record slices.
///
/// Overlapping date ranges are not deduplicated.
pub fn aggregate_methods(records: &[FighterRecord]) -> MethodTotals {
    let mut totals = MethodTotals::default();
    for record in records {
        totals.wins += record.win_methods();
        totals.losses += record.loss_methods();
    }
    totals
}

/// Accuracy as a whole percentage in [0, 100].
pub fn accuracy(landed: u32, attempted: u32) -> u32 {
    if attempted == 0 {
        return 0;
    }
    let pct = (f64::from(landed) * 100.0 / f64::from(attempted)).round();
    pct.clamp(0.0, 100.0) as u32
}

/// Resolve an accuracy figure, preferring a non-zero value supplied by the source.
pub fn resolve_accuracy(
    precomputed: Option<u32>,
    landed: Option<u32>,
    attempted: Option<u32>,
) -> u32 {
    match precomputed {
        Some(value) if value > 0 => value.min(100),
        _ => match (landed, attempted) {
            (Some(l), Some(a)) => accuracy(l, a),
            _ => 0,
        },
    }
}

/// Significant-strike accuracy.
pub fn striking_accuracy(stats: &StrikingStats) -> u32 {
    resolve_accuracy(
        stats.significant_strike_accuracy,
        stats.significant_strikes_landed,
        stats.significant_strikes_attempted,
    )
}

/// Takedown accuracy.
pub fn takedown_accuracy(stats: &StrikingStats) -> u32 {
    resolve_accuracy(
        stats.takedown_accuracy,
        stats.takedowns_landed,
        stats.takedowns_attempted,
    )
}

/// Whether any striking data exists at all, so callers can tell
/// "0% accuracy" apart from "no data".
pub fn has_striking_data(stats: &StrikingStats) -> bool {
    stats.significant_strike_accuracy.is_some() || stats.significant_strikes_attempted.is_some()
}

pub fn has_takedown_data(stats: &StrikingStats) -> bool {
    stats.takedown_accuracy.is_some() || stats.takedowns_attempted.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(win_ko: u32, win_sub: u32, win_decision: u32) -> FighterRecord {
        FighterRecord {
            win_ko,
            win_sub,
            win_decision,
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_record_basic() {
        assert_eq!(parse_record(Some("22-6-0")), WinLossRecord::new(22, 6, 0));
        assert_eq!(parse_record(Some("22-6-0")).total_fights(), 28);
    }

    #[test]
    fn test_parse_record_discards_no_contest_suffix() {
        assert_eq!(parse_record(Some("12-3-1,1 NC")), parse_record(Some("12-3-1")));
        assert_eq!(
            parse_record(Some("12-3-1, 2 NC")),
            WinLossRecord::new(12, 3, 1)
        );
    }

    #[test]
    fn test_parse_record_empty_and_missing() {
        assert_eq!(parse_record(None), WinLossRecord::default());
        assert_eq!(parse_record(Some("")), WinLossRecord::default());
    }

    #[test]
    fn test_parse_record_bad_segments_default_to_zero() {
        assert_eq!(parse_record(Some("x-3-1")), WinLossRecord::new(0, 3, 1));
        assert_eq!(parse_record(Some("10-2")), WinLossRecord::new(10, 2, 0));
        assert_eq!(parse_record(Some("abc")), WinLossRecord::default());
        assert_eq!(parse_record(Some(" 9 - 2 - 0 ")), WinLossRecord::new(9, 2, 0));
    }

    #[test]
    fn test_aggregate_methods_empty() {
        let totals = aggregate_methods(&[]);
        assert_eq!(totals.ko_tko(), 0);
        assert_eq!(totals.submissions(), 0);
        assert_eq!(totals.decisions(), 0);
    }

    #[test]
    fn test_aggregate_methods_sums_slices() {
        let totals = aggregate_methods(&[slice(2, 0, 1), slice(3, 1, 0)]);
        assert_eq!(totals.ko_tko(), 5);
        assert_eq!(totals.submissions(), 1);
        assert_eq!(totals.decisions(), 1);
    }

    #[test]
    fn test_aggregate_methods_order_independent() {
        let a = aggregate_methods(&[slice(1, 2, 3), slice(4, 5, 6)]);
        let b = aggregate_methods(&[slice(4, 5, 6), slice(1, 2, 3)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_aggregate_methods_losses() {
        let mut record = slice(0, 0, 0);
        record.loss_ko = 2;
        record.loss_dq = 1;
        let totals = aggregate_methods(&[record.clone(), record]);
        assert_eq!(totals.losses.ko_tko, 4);
        assert_eq!(totals.losses.disqualifications, 2);
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(50, 100), 50);
        assert_eq!(accuracy(10, 0), 0);
        assert_eq!(accuracy(0, 40), 0);
        assert_eq!(accuracy(1, 3), 33);
        assert_eq!(accuracy(2, 3), 67);
        assert_eq!(accuracy(120, 100), 100);
    }

    #[test]
    fn test_striking_accuracy_computed() {
        let stats = StrikingStats {
            significant_strikes_landed: Some(50),
            significant_strikes_attempted: Some(100),
            ..Default::default()
        };
        assert_eq!(striking_accuracy(&stats), 50);
        assert!(has_striking_data(&stats));
    }

    #[test]
    fn test_precomputed_accuracy_preferred() {
        let stats = StrikingStats {
            significant_strikes_landed: Some(50),
            significant_strikes_attempted: Some(100),
            significant_strike_accuracy: Some(61),
            takedowns_landed: Some(1),
            takedowns_attempted: Some(4),
            takedown_accuracy: Some(0),
        };
        assert_eq!(striking_accuracy(&stats), 61);
        // zero counts as absent
        assert_eq!(takedown_accuracy(&stats), 25);
    }

    #[test]
    fn test_accuracy_without_data() {
        let stats = StrikingStats::default();
        assert_eq!(striking_accuracy(&stats), 0);
        assert_eq!(takedown_accuracy(&stats), 0);
        assert!(!has_striking_data(&stats));
        assert!(!has_takedown_data(&stats));
    }
}
