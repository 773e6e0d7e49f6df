//! One-feature logistic regression: first-half points → P(win).
//!
//! The model is `p = sigmoid(weight * z + bias)` where `z` is the
//! standardized point total. Fitting is plain gradient descent on the
//! logistic loss with a small L2 penalty on the weight; the feature is
//! standardized internally so the step size is stable regardless of the
//! raw point scale.

use thiserror::Error;

const EPS: f64 = 1e-9;
const MAX_ITERS: usize = 2000;
const LEARNING_RATE: f64 = 0.5;
const L2: f64 = 1e-4;

#[derive(Debug, Error)]
pub enum FitError {
    #[error("cannot fit model on an empty dataset")]
    EmptyDataset,
    /// All labels belong to one class; the unregularized optimum is at
    /// infinity and the fitted curve would carry no information.
    #[error("cannot fit model: all {0} outcomes are the same class")]
    DegenerateLabels(usize),
    #[error("fit diverged: non-finite parameters after {0} iterations")]
    Diverged(usize),
}

/// A fitted win-probability model. Inference is pure: the same input always
/// maps to the same probability.
#[derive(Debug, Clone, Copy)]
pub struct LogisticModel {
    weight: f64,
    bias: f64,
    x_mean: f64,
    x_std: f64,
}

/// Numerically stable sigmoid.
fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

impl LogisticModel {
    /// Fit on (points, outcome) pairs, outcome in {0.0, 1.0}.
    pub fn fit(samples: &[(f64, f64)]) -> Result<Self, FitError> {
        if samples.is_empty() {
            return Err(FitError::EmptyDataset);
        }
        let positives = samples.iter().filter(|(_, y)| *y > 0.5).count();
        if positives == 0 || positives == samples.len() {
            return Err(FitError::DegenerateLabels(samples.len()));
        }

        let n = samples.len() as f64;
        let x_mean = samples.iter().map(|(x, _)| x).sum::<f64>() / n;
        let variance = samples.iter().map(|(x, _)| (x - x_mean).powi(2)).sum::<f64>() / n;
        let x_std = variance.sqrt().max(EPS);

        let mut weight = 0.0f64;
        let mut bias = 0.0f64;

        for i in 0..MAX_ITERS {
            let lr = LEARNING_RATE / (1.0 + 0.01 * i as f64);
            let mut grad_w = 0.0;
            let mut grad_b = 0.0;
            for (x, y) in samples {
                let z = (x - x_mean) / x_std;
                let p = sigmoid(weight * z + bias);
                let err = p - y;
                grad_w += err * z;
                grad_b += err;
            }
            grad_w = grad_w / n + L2 * weight;
            grad_b /= n;
            weight -= lr * grad_w;
            bias -= lr * grad_b;
            if !weight.is_finite() || !bias.is_finite() {
                return Err(FitError::Diverged(i + 1));
            }
        }

        Ok(Self {
            weight,
            bias,
            x_mean,
            x_std,
        })
    }

    /// Predicted win probability at a point total, in [0, 1]. Out-of-range
    /// inputs are passed straight through the sigmoid, never clamped.
    pub fn predict(&self, points: f64) -> f64 {
        let z = (points - self.x_mean) / self.x_std;
        sigmoid(self.weight * z + self.bias)
    }

    /// Slope of the fitted curve in standardized feature units. Positive
    /// when higher scoring correlates with winning.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Mean logistic loss of the model over a sample set.
    pub fn log_loss(&self, samples: &[(f64, f64)]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let total: f64 = samples
            .iter()
            .map(|(x, y)| {
                let p = self.predict(*x).clamp(EPS, 1.0 - EPS);
                -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
            })
            .sum();
        total / samples.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Clearly separated classes: losses at low point totals, wins high.
    fn separated_samples() -> Vec<(f64, f64)> {
        let mut samples = Vec::new();
        for i in 0..40 {
            let x = 5.0 + i as f64 * 0.75; // 5.0 .. 34.25
            let y = if x > 18.0 { 1.0 } else { 0.0 };
            samples.push((x, y));
        }
        // A few contrarian rows so the data is not perfectly separable.
        samples.push((8.0, 1.0));
        samples.push((30.0, 0.0));
        samples
    }

    #[test]
    fn sigmoid_properties() {
        assert_relative_eq!(sigmoid(0.0), 0.5, epsilon = 1e-12);
        assert!(sigmoid(20.0) > 0.999);
        assert!(sigmoid(-20.0) < 0.001);
        // No overflow at extremes.
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(800.0) <= 1.0);
    }

    #[test]
    fn fit_recovers_positive_slope() {
        let model = LogisticModel::fit(&separated_samples()).expect("fit");
        assert!(model.weight() > 0.0, "weight = {}", model.weight());
        assert!(model.predict(25.0) > 0.8);
        assert!(model.predict(8.0) < 0.2);
    }

    #[test]
    fn predictions_are_monotone_non_decreasing() {
        let model = LogisticModel::fit(&separated_samples()).expect("fit");
        let probe = [0.0, 10.0, 20.0, 30.0, 40.0];
        for pair in probe.windows(2) {
            assert!(
                model.predict(pair[1]) >= model.predict(pair[0]),
                "p({}) < p({})",
                pair[1],
                pair[0]
            );
        }
    }

    #[test]
    fn inference_is_deterministic() {
        let model = LogisticModel::fit(&separated_samples()).expect("fit");
        let a = model.predict(17.3);
        let b = model.predict(17.3);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn predictions_stay_in_unit_interval() {
        let model = LogisticModel::fit(&separated_samples()).expect("fit");
        for x in [-100.0, -1.0, 0.0, 18.0, 40.0, 500.0] {
            let p = model.predict(x);
            assert!((0.0..=1.0).contains(&p), "p({}) = {}", x, p);
        }
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(matches!(
            LogisticModel::fit(&[]),
            Err(FitError::EmptyDataset)
        ));
    }

    #[test]
    fn single_class_labels_are_rejected() {
        let all_wins: Vec<_> = (0..20).map(|i| (10.0 + i as f64, 1.0)).collect();
        assert!(matches!(
            LogisticModel::fit(&all_wins),
            Err(FitError::DegenerateLabels(20))
        ));
        let all_losses: Vec<_> = (0..20).map(|i| (10.0 + i as f64, 0.0)).collect();
        assert!(matches!(
            LogisticModel::fit(&all_losses),
            Err(FitError::DegenerateLabels(20))
        ));
    }

    #[test]
    fn fit_beats_a_coin_flip_on_training_loss() {
        let samples = separated_samples();
        let model = LogisticModel::fit(&samples).expect("fit");
        // ln(2) is the loss of always predicting 0.5.
        assert!(model.log_loss(&samples) < std::f64::consts::LN_2);
    }
}
