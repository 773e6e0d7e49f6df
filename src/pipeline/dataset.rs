//! Synthetic dataset generation.
//!
//! Fabricates the labeled table the rest of the pipeline runs on: one row
//! per (player, game) with the player's first-half point total and a binary
//! win/loss outcome. Outcomes start as fair coin flips; `adjust` then
//! injects a scoring-biased correlation so high-scoring halves tend to end
//! in wins.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;

/// Fixed roster: the five star scorers the dashboard tracks.
pub const ROSTER: [&str; 5] = [
    "Luka Doncic",
    "SGA",
    "Tyrese Maxey",
    "Donovan Mitchell",
    "Nikola Jokic",
];

/// Mean of the first-half points draw.
const POINTS_MEAN: f64 = 16.0;
/// Standard deviation of the first-half points draw.
const POINTS_STD_DEV: f64 = 5.0;
/// Points are clipped to this closed range after the normal draw.
pub const POINTS_RANGE: (f64, f64) = (5.0, 35.0);

/// One synthetic (player, game) row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub player: String,
    pub first_half_points: f64,
    /// 1 = win, 0 = loss
    pub outcome: u8,
}

/// Knobs for the generation and adjustment steps.
#[derive(Debug, Clone, Copy)]
pub struct DatasetParams {
    /// Rows generated per roster player.
    pub rows_per_player: usize,
    /// Point total above which the win override can trigger (strict `>`).
    pub boost_threshold: f64,
    /// Probability that a qualifying row is forced to a win.
    pub boost_probability: f64,
}

impl Default for DatasetParams {
    fn default() -> Self {
        Self {
            rows_per_player: 20,
            boost_threshold: 18.0,
            boost_probability: 0.8,
        }
    }
}

/// Generate the raw dataset: `rows_per_player` rows for each roster name,
/// points ~ Normal(16, 5) clipped to [5, 35], outcome a fair coin flip.
pub fn synthesize<R: Rng>(params: &DatasetParams, rng: &mut R) -> Vec<Observation> {
    // Normal::new only fails on a non-finite or negative std dev.
    let points_dist =
        Normal::new(POINTS_MEAN, POINTS_STD_DEV).expect("constant distribution parameters");

    let mut rows = Vec::with_capacity(ROSTER.len() * params.rows_per_player);
    for player in ROSTER {
        for _ in 0..params.rows_per_player {
            let points: f64 = points_dist.sample(rng);
            rows.push(Observation {
                player: player.to_string(),
                first_half_points: points.clamp(POINTS_RANGE.0, POINTS_RANGE.1),
                outcome: rng.gen_range(0..=1u8),
            });
        }
    }
    rows
}

/// Apply the win override: rows strictly above `boost_threshold` are forced
/// to a win with probability `boost_probability`, everything else keeps its
/// coin-flip outcome. The uniform draw is consumed only for qualifying rows
/// so non-qualifying rows never advance the RNG.
pub fn adjust<R: Rng>(
    mut dataset: Vec<Observation>,
    params: &DatasetParams,
    rng: &mut R,
) -> Vec<Observation> {
    for row in &mut dataset {
        if row.first_half_points > params.boost_threshold
            && rng.gen::<f64>() < params.boost_probability
        {
            row.outcome = 1;
        }
    }
    dataset
}
