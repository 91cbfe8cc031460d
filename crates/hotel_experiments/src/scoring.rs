//! Weighted scoring of simulation results.
//!
//! Each metric is min-max normalized across the compared results, then
//! combined into a single score. Higher is better.

use crate::metrics::SimulationResult;

/// Contribution of each metric to the overall score.
///
/// # Default Weights
///
/// - Acceptance rate: 0.35
/// - Revenue: 0.35
/// - Weighted occupancy: 0.2
/// - Upgrades: 0.1 (inverted, fewer upgrades give away less)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub acceptance_weight: f64,
    pub revenue_weight: f64,
    pub occupancy_weight: f64,
    pub upgrade_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            acceptance_weight: 0.35,
            revenue_weight: 0.35,
            occupancy_weight: 0.2,
            upgrade_weight: 0.1,
        }
    }
}

impl ScoreWeights {
    pub fn new(
        acceptance_weight: f64,
        revenue_weight: f64,
        occupancy_weight: f64,
        upgrade_weight: f64,
    ) -> Self {
        Self {
            acceptance_weight,
            revenue_weight,
            occupancy_weight,
            upgrade_weight,
        }
    }

    /// Only revenue counts.
    pub fn revenue_only() -> Self {
        Self::new(0.0, 1.0, 0.0, 0.0)
    }
}

/// `(value - min) / (max - min)` clamped to [0, 1]; 0.5 when min == max.
fn normalize_metric(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        0.5
    } else {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    }
}

fn bounds(results: &[SimulationResult], metric: impl Fn(&SimulationResult) -> f64) -> (f64, f64) {
    results
        .iter()
        .map(metric)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(v), max.max(v))
        })
}

/// Scores for `results`, in input order.
pub fn calculate_scores(results: &[SimulationResult], weights: &ScoreWeights) -> Vec<f64> {
    if results.is_empty() {
        return vec![];
    }

    let acceptance = bounds(results, |r| r.acceptance_rate);
    let revenue = bounds(results, |r| r.revenue as f64);
    let occupancy = bounds(results, |r| r.weighted_occupancy);
    let upgrades = bounds(results, |r| r.upgrades as f64);

    results
        .iter()
        .map(|result| {
            let acceptance_norm = normalize_metric(result.acceptance_rate, acceptance.0, acceptance.1);
            let revenue_norm = normalize_metric(result.revenue as f64, revenue.0, revenue.1);
            let occupancy_norm =
                normalize_metric(result.weighted_occupancy, occupancy.0, occupancy.1);
            let upgrade_norm = 1.0 - normalize_metric(result.upgrades as f64, upgrades.0, upgrades.1);

            acceptance_norm * weights.acceptance_weight
                + revenue_norm * weights.revenue_weight
                + occupancy_norm * weights.occupancy_weight
                + upgrade_norm * weights.upgrade_weight
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::sample_result;

    #[test]
    fn test_normalize_metric() {
        assert_eq!(normalize_metric(50.0, 0.0, 100.0), 0.5);
        assert_eq!(normalize_metric(0.0, 0.0, 100.0), 0.0);
        assert_eq!(normalize_metric(150.0, 0.0, 100.0), 1.0);
        assert_eq!(normalize_metric(50.0, 50.0, 50.0), 0.5);
    }

    #[test]
    fn better_run_scores_higher() {
        let results = vec![
            sample_result(0.6, 50_000, 0.4, 10),
            sample_result(0.9, 90_000, 0.8, 0),
        ];
        let scores = calculate_scores(&results, &ScoreWeights::default());
        assert_eq!(scores.len(), 2);
        assert!(scores[1] > scores[0]);
        assert!((scores[1] - 1.0).abs() < 1e-12);
        assert!(scores[0].abs() < 1e-12);
    }

    #[test]
    fn identical_results_score_the_same() {
        let results = vec![sample_result(0.5, 1000, 0.5, 1); 3];
        let scores = calculate_scores(&results, &ScoreWeights::default());
        assert!(scores.windows(2).all(|w| w[0] == w[1]));
        assert!(calculate_scores(&[], &ScoreWeights::default()).is_empty());
    }

    #[test]
    fn revenue_only_ignores_acceptance() {
        let results = vec![
            sample_result(0.9, 10_000, 0.5, 0),
            sample_result(0.3, 20_000, 0.5, 0),
        ];
        let scores = calculate_scores(&results, &ScoreWeights::revenue_only());
        assert!(scores[1] > scores[0]);
    }
}
