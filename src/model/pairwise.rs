//! Pairwise-distance observation model
//!
//! The general case: for every (candidate, observation) pair the configured
//! distance is evaluated exhaustively, accumulating one histogram over
//! distance values per candidate. Each occurrence weighs `1 + w(distance)`
//! where `w` is zero unless distance encouragement is enabled. The histogram
//! is normalized into a probability-over-distance row, and the likelihood of
//! a single observation is its distance class's mass divided by the class
//! size, so each row is a calibrated conditional over observations (sums to
//! 1) rather than a distribution over distance classes.
//!
//! The build is O(n^2) in the hypothesis-space size and dominates everything
//! else this crate does; the resulting [`PairwiseTable`] is the artifact the
//! cache layer persists, keyed by [`PairwiseConfig::cache_key`]. Rows are
//! independent, so with the `rayon` feature the build partitions candidates
//! across threads with no synchronization.

use std::collections::HashMap;

#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::distribution::{Code, Distribution};
use crate::errors::CrackError;
use crate::model::distance::DistanceKind;
use crate::model::ObservationModel;

/// Configuration identifying one pairwise table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairwiseConfig {
    /// Number of digits in the lock combination.
    pub digit_count: usize,
    /// Which distance function to evaluate between codes.
    pub distance: DistanceKind,
    /// Whether larger distances get extra weight (shufflers shy away from
    /// the true code).
    pub encourage_distance: bool,
}

impl PairwiseConfig {
    /// Stable key for the external table cache.
    pub fn cache_key(&self) -> String {
        format!(
            "{}_{}digits_{}",
            self.distance.cache_name(),
            self.digit_count,
            if self.encourage_distance {
                "encdist"
            } else {
                "noencdist"
            }
        )
    }
}

/// Extra weight granted to an occurrence at `distance`.
///
/// Grows slower than linearly at first, then the exponential term takes over
/// around distance 16. Truncated to an integer. A tuning policy, not a law:
/// replace this function to change the encouragement curve.
fn encouragement_weight(distance: u32) -> f64 {
    let d = distance as f64;
    (d.powf(1.7) + 2.1f64.powf(d) / 1000.0).floor()
}

/// Largest distance the configured function can produce for one digit pair.
fn max_distance_per_digit(distance: DistanceKind) -> u32 {
    (0..10u8)
        .flat_map(|a| (0..10u8).map(move |b| (a, b)))
        .map(|(a, b)| distance.distance(a as Code, b as Code, 1))
        .max()
        .unwrap_or(0)
}

/// One candidate's conditional: per-observation likelihood and class mass,
/// both keyed by distance value.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CandidateRow {
    /// Likelihood of one observation at each distance (class mass / class
    /// size). Summing this over all observation codes gives 1.
    per_code: HashMap<u32, f64>,
}

/// Exhaustively built likelihood table: one normalized conditional row per
/// candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairwiseTable {
    config: PairwiseConfig,
    rows: Vec<CandidateRow>,
}

impl PairwiseTable {
    /// Build the table from scratch. O(n^2); prefer a cache hit.
    pub fn build(config: PairwiseConfig) -> Result<Self, CrackError> {
        let space_size = 10u64.pow(config.digit_count as u32);
        log::info!(
            "building pairwise table {} over {} candidates",
            config.cache_key(),
            space_size
        );

        // Memoize the encouragement weight once per reachable distance value.
        let max_distance = config.digit_count as u32 * max_distance_per_digit(config.distance);
        let encouragement: Vec<f64> = (0..=max_distance)
            .map(|d| {
                if config.encourage_distance {
                    encouragement_weight(d)
                } else {
                    0.0
                }
            })
            .collect();

        #[cfg(feature = "rayon")]
        let rows = (0..space_size)
            .into_par_iter()
            .map(|candidate| Self::build_row(candidate, space_size, &config, &encouragement))
            .collect::<Result<Vec<_>, CrackError>>()?;

        #[cfg(not(feature = "rayon"))]
        let rows = (0..space_size)
            .map(|candidate| Self::build_row(candidate, space_size, &config, &encouragement))
            .collect::<Result<Vec<_>, CrackError>>()?;

        log::info!("pairwise table {} built", config.cache_key());
        Ok(Self { config, rows })
    }

    fn build_row(
        candidate: Code,
        space_size: u64,
        config: &PairwiseConfig,
        encouragement: &[f64],
    ) -> Result<CandidateRow, CrackError> {
        let mut class_sizes: HashMap<u32, u64> = HashMap::new();
        let mut histogram: HashMap<Code, f64> = HashMap::new();
        for observation in 0..space_size {
            let d = config
                .distance
                .distance(observation, candidate, config.digit_count);
            *class_sizes.entry(d).or_insert(0) += 1;
            *histogram.entry(d as Code).or_insert(0.0) += 1.0 + encouragement[d as usize];
        }
        let class_masses = Distribution::from_weights(histogram)?;
        let per_code = class_masses
            .iter()
            .map(|(d, mass)| {
                let d = d as u32;
                (d, mass / class_sizes[&d] as f64)
            })
            .collect();
        Ok(CandidateRow { per_code })
    }

    /// The configuration this table was built for.
    pub fn config(&self) -> &PairwiseConfig {
        &self.config
    }

    /// A candidate's per-observation likelihood keyed by distance value.
    pub fn row(&self, candidate: Code) -> Option<&HashMap<u32, f64>> {
        self.rows.get(candidate as usize).map(|row| &row.per_code)
    }
}

impl ObservationModel for PairwiseTable {
    fn likelihood(&self, observed: Code, candidate: Code) -> f64 {
        let d = self
            .config
            .distance
            .distance(observed, candidate, self.config.digit_count);
        self.row(candidate)
            .and_then(|row| row.get(&d).copied())
            .unwrap_or(0.0)
    }
}
