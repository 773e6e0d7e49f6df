//! The synthesize → adjust → fit → aggregate pipeline.
//!
//! Everything downstream of the HTTP layer lives here and is free of any
//! web or rendering dependency. All randomness flows through an explicit
//! seeded RNG so a run is reproducible from its seed alone.

pub mod dataset;
pub mod model;
pub mod tiers;

pub use dataset::{DatasetParams, Observation, ROSTER};
pub use model::{FitError, LogisticModel};
pub use tiers::TierWinRate;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// Everything one pipeline run produces. Immutable once built; the
/// dashboard shares it read-only across requests.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub dataset: Vec<Observation>,
    pub model: LogisticModel,
    pub tiers: Vec<TierWinRate>,
    pub seed: u64,
    pub generated_at: DateTime<Utc>,
}

/// Run the full pipeline from a seed: generate the dataset, apply the win
/// override, fit the logistic model and compute the tier table.
pub fn run(params: &DatasetParams, seed: u64) -> Result<PipelineOutput, FitError> {
    let mut rng = StdRng::seed_from_u64(seed);

    let raw = dataset::synthesize(params, &mut rng);
    let adjusted = dataset::adjust(raw, params, &mut rng);

    let samples: Vec<(f64, f64)> = adjusted
        .iter()
        .map(|o| (o.first_half_points, o.outcome as f64))
        .collect();
    let model = LogisticModel::fit(&samples)?;

    let tiers = tiers::aggregate(&adjusted);

    let wins = adjusted.iter().filter(|o| o.outcome == 1).count();
    info!(
        "Pipeline complete: {} rows, {} wins, weight={:.4}, log-loss={:.4} (seed {})",
        adjusted.len(),
        wins,
        model.weight(),
        model.log_loss(&samples),
        seed
    );

    Ok(PipelineOutput {
        dataset: adjusted,
        model,
        tiers,
        seed,
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_produces_positive_momentum_curve() {
        let out = run(&DatasetParams::default(), 2026).expect("pipeline");
        assert_eq!(out.dataset.len(), 100);
        assert_eq!(out.tiers.len(), 3);
        // The win override makes high scoring correlate with winning, so
        // the curve must rise across the slider range.
        assert!(out.model.predict(0.0) < out.model.predict(40.0));
    }

    #[test]
    fn certain_override_orders_the_tiers() {
        // With the override probability at 1.0 every qualifying row is a
        // win, so the top tier must beat the bottom tier outright.
        let params = DatasetParams {
            rows_per_player: 200,
            boost_probability: 1.0,
            ..DatasetParams::default()
        };
        let out = run(&params, 11).expect("pipeline");
        let low = out.tiers[0].win_rate_pct.expect("low tier populated");
        let high = out.tiers[2].win_rate_pct.expect("high tier populated");
        assert!(
            high > low,
            "(20, 40] win rate {:.1} should exceed (0, 10] win rate {:.1}",
            high,
            low
        );
    }

    #[test]
    fn same_seed_same_output() {
        let params = DatasetParams::default();
        let a = run(&params, 5).expect("pipeline");
        let b = run(&params, 5).expect("pipeline");
        assert_eq!(a.dataset, b.dataset);
        assert_eq!(a.tiers, b.tiers);
        assert_eq!(
            a.model.predict(15.0).to_bits(),
            b.model.predict(15.0).to_bits()
        );
    }

    #[test]
    fn predictions_rise_across_probe_points() {
        let out = run(&DatasetParams::default(), 77).expect("pipeline");
        let probe = [0.0, 10.0, 20.0, 30.0, 40.0];
        for pair in probe.windows(2) {
            assert!(out.model.predict(pair[1]) >= out.model.predict(pair[0]));
        }
    }
}
