//! Observation-likelihood models
//!
//! Every model answers the same question: how likely is it to read `observed`
//! off the dial when `candidate` is the true combination? The engine uses the
//! answer as the multiplicative factor of one Bayesian update; factors need
//! not be normalized across candidates because the engine renormalizes the
//! joint afterwards.
//!
//! - [`uniform`] - binary hit/miss penalty
//! - [`combinatorial`] - closed-form digit-distance likelihood
//! - [`pairwise`] - exhaustive per-pair distance table, the expensive one
//! - [`distance`] - digit-distance and rotation edit-cost primitives
//!
//! [`build_model`] is the factory: it selects a strategy from [`ModelConfig`]
//! and, for pairwise tables, consults the cache before paying for the O(n^2)
//! build. Call sites depend only on [`ObservationModel`].

pub mod combinatorial;
pub mod distance;
pub mod pairwise;
pub mod uniform;

use crate::cache::TableCache;
use crate::distribution::Code;
use crate::errors::CrackError;

pub use combinatorial::CombinatorialModel;
pub use distance::DistanceKind;
pub use pairwise::{PairwiseConfig, PairwiseTable};
pub use uniform::UniformPenaltyModel;

/// Probability of reading `observed` off the lock given `candidate` is the
/// true combination. Always in `[0, 1]`.
pub trait ObservationModel {
    /// The per-candidate Bayesian update factor.
    fn likelihood(&self, observed: Code, candidate: Code) -> f64;
}

/// Strategy selection for [`build_model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelConfig {
    /// Uniform-penalty model.
    UniformPenalty {
        /// Number of digits in the combination.
        digit_count: usize,
    },
    /// Closed-form combinatorial digit-distance model.
    Combinatorial {
        /// Number of digits in the combination.
        digit_count: usize,
    },
    /// Exhaustive pairwise-distance table.
    Pairwise(PairwiseConfig),
}

impl ModelConfig {
    /// The digit count this configuration targets.
    pub fn digit_count(&self) -> usize {
        match *self {
            ModelConfig::UniformPenalty { digit_count } => digit_count,
            ModelConfig::Combinatorial { digit_count } => digit_count,
            ModelConfig::Pairwise(config) => config.digit_count,
        }
    }
}

/// Largest supported digit count. 10^9 hypotheses is already far past what
/// the O(n^2) pairwise build can enumerate.
pub const MAX_DIGIT_COUNT: usize = 9;

pub(crate) fn check_digit_count(digit_count: usize) -> Result<(), CrackError> {
    if digit_count == 0 || digit_count > MAX_DIGIT_COUNT {
        return Err(CrackError::Configuration {
            description: format!(
                "digit count must be in 1..={}, got {}",
                MAX_DIGIT_COUNT, digit_count
            ),
        });
    }
    Ok(())
}

/// Build an observation model, consulting `cache` before an expensive
/// pairwise build and writing the table back after a miss.
///
/// Cache misses and corrupt entries are not errors; they fall through to a
/// from-scratch build.
pub fn build_model(
    config: &ModelConfig,
    cache: Option<&dyn TableCache>,
) -> Result<Box<dyn ObservationModel>, CrackError> {
    check_digit_count(config.digit_count())?;
    match *config {
        ModelConfig::UniformPenalty { digit_count } => {
            Ok(Box::new(UniformPenaltyModel::new(digit_count)))
        }
        ModelConfig::Combinatorial { digit_count } => {
            Ok(Box::new(CombinatorialModel::new(digit_count)))
        }
        ModelConfig::Pairwise(pairwise_config) => {
            let key = pairwise_config.cache_key();
            if let Some(cache) = cache {
                if let Some(table) = cache.load(&key) {
                    // A table stored under the right key but built for a
                    // different configuration counts as corruption.
                    if *table.config() == pairwise_config {
                        log::debug!("pairwise table {} loaded from cache", key);
                        return Ok(Box::new(table));
                    }
                    log::warn!("cached table {} does not match its key, rebuilding", key);
                }
            }
            let table = PairwiseTable::build(pairwise_config)?;
            if let Some(cache) = cache {
                cache.store(&key, &table);
            }
            Ok(Box::new(table))
        }
    }
}
