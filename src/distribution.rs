//! Normalized belief distribution over the hypothesis space
//!
//! A [`Distribution`] maps hypotheses (lock codes) to probability masses that
//! sum to 1 within [`MASS_TOLERANCE`] after every mutating operation. Missing
//! keys read as mass 0, never an error.
//!
//! Updates never mutate a shared snapshot: the Bayesian update and the
//! neighbor expander accumulate into a [`DistributionBuilder`] and produce a
//! fresh normalized distribution, so a prior being iterated is never aliased
//! by the posterior being written.

use std::collections::HashMap;

use crate::errors::CrackError;
use crate::topk;

/// A hypothesis: one D-digit lock code, as an integer in `[0, 10^D)`.
pub type Code = u64;

/// Tolerance within which a mass total counts as already normalized.
pub const MASS_TOLERANCE: f64 = 1e-8;

fn check_mass(mass: f64) -> Result<(), CrackError> {
    if !mass.is_finite() || mass < 0.0 {
        return Err(CrackError::InvalidMass { value: mass });
    }
    Ok(())
}

/// Normalized probability mass over `Code` hypotheses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    masses: HashMap<Code, f64>,
}

impl Distribution {
    /// Build a distribution from arbitrary non-negative weights, normalizing.
    ///
    /// Fails on non-finite or negative weights, and on an all-zero non-empty
    /// weighting (normalizing that would manufacture NaNs).
    pub fn from_weights(weights: HashMap<Code, f64>) -> Result<Self, CrackError> {
        for &w in weights.values() {
            check_mass(w)?;
        }
        let mut dist = Self { masses: weights };
        dist.normalize()?;
        Ok(dist)
    }

    /// Uniform prior over the hypothesis space `[0, space_size)`.
    pub fn uniform_over(space_size: u64) -> Self {
        if space_size == 0 {
            return Self::default();
        }
        let mass = 1.0 / space_size as f64;
        let masses = (0..space_size).map(|code| (code, mass)).collect();
        Self { masses }
    }

    /// Total mass currently assigned.
    fn total(&self) -> f64 {
        self.masses.values().sum()
    }

    /// Rescale all masses to sum to 1.
    ///
    /// No-op when the total is already within [`MASS_TOLERANCE`] of 1 or the
    /// distribution is empty. A zero total is a fatal error.
    pub fn normalize(&mut self) -> Result<(), CrackError> {
        if self.masses.is_empty() {
            return Ok(());
        }
        let total = self.total();
        if (total - 1.0).abs() < MASS_TOLERANCE {
            return Ok(());
        }
        if total <= 0.0 {
            return Err(CrackError::ZeroSumDistribution);
        }
        for mass in self.masses.values_mut() {
            *mass /= total;
        }
        Ok(())
    }

    /// Assign a mass to a key, optionally renormalizing immediately.
    ///
    /// Internal mutation primitive; external callers should prefer deriving a
    /// new distribution through [`DistributionBuilder`].
    pub fn set(&mut self, key: Code, mass: f64, renormalize: bool) -> Result<(), CrackError> {
        check_mass(mass)?;
        self.masses.insert(key, mass);
        if renormalize {
            self.normalize()?;
        }
        Ok(())
    }

    /// Mass assigned to a key, or 0 for absent keys. Total function.
    #[inline]
    pub fn prob(&self, key: Code) -> f64 {
        self.masses.get(&key).copied().unwrap_or(0.0)
    }

    /// All keys achieving the maximal mass, ascending. Empty on an empty
    /// distribution.
    pub fn modes(&self) -> Vec<Code> {
        let mut best = f64::NEG_INFINITY;
        let mut modes = Vec::new();
        for (&key, &mass) in &self.masses {
            if mass > best {
                best = mass;
                modes.clear();
                modes.push(key);
            } else if mass == best {
                modes.push(key);
            }
        }
        modes.sort_unstable();
        modes
    }

    /// First moment, treating keys as real values. 0 on an empty distribution.
    pub fn expectation(&self) -> f64 {
        self.masses
            .iter()
            .map(|(&key, &mass)| key as f64 * mass)
            .sum()
    }

    /// Second central moment. 0 on an empty distribution.
    pub fn variance(&self) -> f64 {
        let mean = self.expectation();
        self.masses
            .iter()
            .map(|(&key, &mass)| {
                let d = key as f64 - mean;
                d * d * mass
            })
            .sum()
    }

    /// Pushforward through `f`, summing masses of colliding images.
    ///
    /// Mass is conserved, so the result is normalized by construction. This is
    /// the primitive per-digit marginals project through.
    pub fn map<F>(&self, f: F) -> Distribution
    where
        F: Fn(Code) -> Code,
    {
        let mut masses: HashMap<Code, f64> = HashMap::new();
        for (&key, &mass) in &self.masses {
            *masses.entry(f(key)).or_insert(0.0) += mass;
        }
        Distribution { masses }
    }

    /// The `k` keys of highest mass, descending, ties broken by ascending key.
    pub fn top_k(&self, k: usize) -> Vec<Code> {
        topk::top_k_by(self.masses.keys().copied(), k, |code| self.prob(code))
    }

    /// Number of keys carrying mass entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Whether the distribution has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Iterate over `(code, mass)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (Code, f64)> + '_ {
        self.masses.iter().map(|(&k, &m)| (k, m))
    }
}

/// Accumulator for deriving a new normalized [`Distribution`].
///
/// `add` sums into existing entries, so histogram-style accumulation (one key
/// touched many times) needs no pre-aggregation by the caller.
#[derive(Debug, Default)]
pub struct DistributionBuilder {
    weights: HashMap<Code, f64>,
}

impl DistributionBuilder {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an accumulator sized for `capacity` distinct keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            weights: HashMap::with_capacity(capacity),
        }
    }

    /// Accumulate `weight` onto `key`.
    #[inline]
    pub fn add(&mut self, key: Code, weight: f64) {
        *self.weights.entry(key).or_insert(0.0) += weight;
    }

    /// Normalize the accumulated weights into a distribution.
    pub fn build(self) -> Result<Distribution, CrackError> {
        Distribution::from_weights(self.weights)
    }
}
