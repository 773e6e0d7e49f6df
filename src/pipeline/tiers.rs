//! Tiered win-rate aggregation.
//!
//! Buckets first-half point totals into three fixed half-open ranges and
//! reports the win rate inside each. An empty bucket reports `None` rather
//! than a fabricated rate.

use serde::Serialize;

use super::dataset::Observation;

/// Fixed tier boundaries, as (low, high] half-open ranges.
pub const TIER_BOUNDS: [(f64, f64); 3] = [(0.0, 10.0), (10.0, 20.0), (20.0, 40.0)];

/// Aggregate win rate for one point-range bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierWinRate {
    /// e.g. "(10, 20]"
    pub label: String,
    /// Mean outcome × 100, or `None` when no observation landed in range.
    pub win_rate_pct: Option<f64>,
    pub samples: usize,
}

fn tier_label(bounds: (f64, f64)) -> String {
    format!("({:.0}, {:.0}]", bounds.0, bounds.1)
}

/// Compute per-tier win rates over the full dataset. Always returns exactly
/// three entries in the fixed tier order.
pub fn aggregate(dataset: &[Observation]) -> Vec<TierWinRate> {
    TIER_BOUNDS
        .iter()
        .map(|&(lo, hi)| {
            let mut wins = 0usize;
            let mut samples = 0usize;
            for row in dataset {
                if row.first_half_points > lo && row.first_half_points <= hi {
                    samples += 1;
                    wins += row.outcome as usize;
                }
            }
            let win_rate_pct = if samples > 0 {
                Some(wins as f64 / samples as f64 * 100.0)
            } else {
                None
            };
            TierWinRate {
                label: tier_label((lo, hi)),
                win_rate_pct,
                samples,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(points: f64, outcome: u8) -> Observation {
        Observation {
            player: "SGA".into(),
            first_half_points: points,
            outcome,
        }
    }

    #[test]
    fn always_three_tiers_in_fixed_order() {
        let tiers = aggregate(&[]);
        let labels: Vec<_> = tiers.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["(0, 10]", "(10, 20]", "(20, 40]"]);
    }

    #[test]
    fn empty_tier_reports_missing_not_zero() {
        let tiers = aggregate(&[row(15.0, 1)]);
        assert_eq!(tiers[0].win_rate_pct, None);
        assert_eq!(tiers[0].samples, 0);
        assert_eq!(tiers[1].win_rate_pct, Some(100.0));
        assert_eq!(tiers[2].win_rate_pct, None);
    }

    #[test]
    fn win_rates_are_percentages() {
        let tiers = aggregate(&[
            row(5.0, 0),
            row(8.0, 1),
            row(12.0, 1),
            row(18.0, 1),
            row(19.0, 0),
            row(25.0, 1),
        ]);
        assert_relative_eq!(tiers[0].win_rate_pct.unwrap(), 50.0, epsilon = 1e-9);
        assert_relative_eq!(
            tiers[1].win_rate_pct.unwrap(),
            200.0 / 3.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(tiers[2].win_rate_pct.unwrap(), 100.0, epsilon = 1e-9);
        for t in &tiers {
            if let Some(pct) = t.win_rate_pct {
                assert!((0.0..=100.0).contains(&pct));
            }
        }
    }

    #[test]
    fn empty_tier_serializes_as_json_null() {
        // The dashboard relies on `win_rate_pct: null` (not 0) to render an
        // empty bucket as "no data".
        let tiers = aggregate(&[row(15.0, 1)]);
        let json = serde_json::to_value(&tiers).expect("serialize");
        assert!(json[0]["win_rate_pct"].is_null());
        assert_eq!(json[1]["win_rate_pct"], serde_json::json!(100.0));
        assert_eq!(json[0]["label"], "(0, 10]");
    }

    #[test]
    fn bucket_edges_are_half_open() {
        // 10.0 belongs to (0, 10], 10.1 to (10, 20], 20.0 to (10, 20].
        let tiers = aggregate(&[row(10.0, 1), row(10.1, 0), row(20.0, 0)]);
        assert_eq!(tiers[0].samples, 1);
        assert_eq!(tiers[1].samples, 2);
        assert_eq!(tiers[2].samples, 0);
    }
}
