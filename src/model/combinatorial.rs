//! Combinatorial digit-distance observation model
//!
//! Closed-form alternative to the O(n^2) pairwise table when the distance is
//! plain digit mismatch count: there are `C(D, i) * 9^i` codes at digit
//! distance `i` from any fixed code, out of `10^D` total, so the likelihood
//! of landing at distance `i` is `C(D, i) * 9^i / 10^D`. The weights sum to 1
//! for every digit count by the binomial theorem. Distance-encouragement
//! weighting has no closed form here and is not supported.

use crate::distribution::Code;
use crate::model::distance::digit_distance;
use crate::model::ObservationModel;

/// Binomial coefficient `C(n, r)` as f64, multiplicative form.
pub fn n_choose_r(n: u32, r: u32) -> f64 {
    if r > n {
        return 0.0;
    }
    let r = r.min(n - r);
    let mut result = 1.0;
    for i in 0..r {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result
}

/// Likelihood keyed by digit-distance, precomputed per digit count.
#[derive(Debug, Clone)]
pub struct CombinatorialModel {
    digit_count: usize,
    /// `weights[i]` is the probability of observing a code at digit
    /// distance `i` from the true one.
    weights: Vec<f64>,
}

impl CombinatorialModel {
    /// Precompute the distance weights for a `digit_count`-digit lock.
    pub fn new(digit_count: usize) -> Self {
        let space_size = 10f64.powi(digit_count as i32);
        let mut weights = Vec::with_capacity(digit_count + 1);
        let mut multiplier = 1.0;
        for i in 0..=digit_count {
            weights.push(n_choose_r(digit_count as u32, i as u32) * multiplier / space_size);
            multiplier *= 9.0;
        }
        Self {
            digit_count,
            weights,
        }
    }

    /// The per-distance weight row (sums to 1).
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl ObservationModel for CombinatorialModel {
    fn likelihood(&self, observed: Code, candidate: Code) -> f64 {
        let d = digit_distance(observed, candidate, self.digit_count) as usize;
        self.weights[d]
    }
}
