//! Uniform-penalty observation model
//!
//! The crudest model: the one code a careful owner never leaves on the dial
//! is the true one. Observing the candidate itself has probability
//! `1/10^D`; observing anything else is uniformly likely at `1 - 1/10^D`.

use crate::distribution::Code;
use crate::model::ObservationModel;

/// Binary hit/miss likelihood.
#[derive(Debug, Clone, Copy)]
pub struct UniformPenaltyModel {
    hit: f64,
    miss: f64,
}

impl UniformPenaltyModel {
    /// Model for a `digit_count`-digit lock: `hit = 1 / 10^digit_count`.
    pub fn new(digit_count: usize) -> Self {
        let hit = 10f64.powi(-(digit_count as i32));
        Self {
            hit,
            miss: 1.0 - hit,
        }
    }
}

impl ObservationModel for UniformPenaltyModel {
    fn likelihood(&self, observed: Code, candidate: Code) -> f64 {
        if observed == candidate {
            self.hit
        } else {
            self.miss
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_and_miss() {
        let model = UniformPenaltyModel::new(2);
        assert!((model.likelihood(42, 42) - 0.01).abs() < 1e-12);
        assert!((model.likelihood(42, 43) - 0.99).abs() < 1e-12);
    }
}
