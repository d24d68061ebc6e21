//! The inference engine: sequential Bayesian updates over the code space
//!
//! [`LockCracker`] owns the current posterior over all D-digit combinations
//! and folds observations into it one at a time through the configured
//! observation model. Queries are valid at any point; each one reads the
//! posterior as it stands after the observations accepted so far.
//!
//! The update is deliberately greedy: every observation is folded in
//! independently, with no modeling of correlation between successive
//! shuffles (someone who never re-enters their last shuffle, say). That is a
//! stated limitation of the approach, not an oversight.

use crate::cache::TableCache;
use crate::distribution::{Code, Distribution, DistributionBuilder};
use crate::errors::CrackError;
use crate::model::{self, ModelConfig, ObservationModel};
use crate::neighbors;

/// Outcome of a batch observation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObserveTally {
    /// Observations accepted and folded into the posterior.
    pub succeeded: usize,
    /// Observations rejected by validation and skipped.
    pub failed: usize,
}

/// Bayesian cracker for a D-digit combination lock.
pub struct LockCracker {
    digit_count: usize,
    space_size: u64,
    model: Box<dyn ObservationModel>,
    posterior: Distribution,
    /// Append-only log of accepted observations (raw codes, in order).
    observations: Vec<Code>,
}

impl LockCracker {
    /// Engine over `[0, 10^digit_count)` with a caller-supplied model and a
    /// uniform prior.
    pub fn new(digit_count: usize, model: Box<dyn ObservationModel>) -> Result<Self, CrackError> {
        model::check_digit_count(digit_count)?;
        let space_size = 10u64.pow(digit_count as u32);
        Ok(Self {
            digit_count,
            space_size,
            model,
            posterior: Distribution::uniform_over(space_size),
            observations: Vec::new(),
        })
    }

    /// Engine whose model is built by the factory, cache-first.
    pub fn with_config(
        config: &ModelConfig,
        cache: Option<&dyn TableCache>,
    ) -> Result<Self, CrackError> {
        let model = model::build_model(config, cache)?;
        Self::new(config.digit_count(), model)
    }

    /// Number of digits in the combination.
    #[inline]
    pub fn digit_count(&self) -> usize {
        self.digit_count
    }

    /// Accepted observations, in the order they were folded in.
    pub fn observations(&self) -> &[Code] {
        &self.observations
    }

    /// The current posterior.
    pub fn posterior(&self) -> &Distribution {
        &self.posterior
    }

    /// Validate a raw observation: decimal digits only, printed length at
    /// most the digit count. No silent coercion.
    fn validate(&self, raw: &str) -> Result<Code, CrackError> {
        let rejected = || CrackError::InvalidObservation {
            value: raw.to_string(),
            digit_count: self.digit_count,
        };
        if raw.is_empty() || raw.len() > self.digit_count {
            return Err(rejected());
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(rejected());
        }
        raw.parse::<Code>().map_err(|_| rejected())
    }

    /// Fold one raw observation into the posterior.
    ///
    /// On validation failure the posterior is untouched and the error is
    /// local to this observation. The update derives a fresh distribution
    /// from the current one; the prior snapshot is never mutated mid-pass.
    pub fn observe(&mut self, raw: &str) -> Result<(), CrackError> {
        let observed = self.validate(raw)?;
        let mut builder = DistributionBuilder::with_capacity(self.posterior.len());
        for (candidate, prior_mass) in self.posterior.iter() {
            builder.add(
                candidate,
                self.model.likelihood(observed, candidate) * prior_mass,
            );
        }
        self.posterior = builder.build()?;
        self.observations.push(observed);
        Ok(())
    }

    /// Observe an integer code through the string path, so over-length
    /// values are rejected exactly as their textual form would be.
    pub fn observe_code(&mut self, code: Code) -> Result<(), CrackError> {
        self.observe(&code.to_string())
    }

    /// Apply [`observe`](Self::observe) to each element, tolerating
    /// individual failures and reporting the tally.
    pub fn observe_all<'a, I>(&mut self, observations: I) -> ObserveTally
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tally = ObserveTally::default();
        for raw in observations {
            match self.observe(raw) {
                Ok(()) => tally.succeeded += 1,
                Err(e) => {
                    tally.failed += 1;
                    log::warn!("skipped observation: {}", e);
                }
            }
        }
        log::info!(
            "observed {} of {}",
            tally.succeeded,
            tally.succeeded + tally.failed
        );
        tally
    }

    /// Batch variant of [`observe_code`](Self::observe_code).
    pub fn observe_all_codes(&mut self, codes: &[Code]) -> ObserveTally {
        let mut tally = ObserveTally::default();
        for &code in codes {
            match self.observe_code(code) {
                Ok(()) => tally.succeeded += 1,
                Err(e) => {
                    tally.failed += 1;
                    log::warn!("skipped observation: {}", e);
                }
            }
        }
        log::info!(
            "observed {} of {}",
            tally.succeeded,
            tally.succeeded + tally.failed
        );
        tally
    }

    /// Discard the observation log and restore the uniform prior.
    pub fn reset(&mut self) {
        self.posterior = Distribution::uniform_over(self.space_size);
        self.observations.clear();
    }

    /// Posterior mass of one code.
    #[inline]
    pub fn probability_of(&self, code: Code) -> f64 {
        self.posterior.prob(code)
    }

    /// All codes at maximal posterior mass.
    pub fn modes(&self) -> Vec<Code> {
        self.posterior.modes()
    }

    /// Posterior mean, treating codes as integers.
    pub fn expectation(&self) -> f64 {
        self.posterior.expectation()
    }

    /// Posterior variance, treating codes as integers.
    pub fn variance(&self) -> f64 {
        self.posterior.variance()
    }

    /// The `k` most probable codes with their posterior masses, descending.
    pub fn most_probable(&self, k: usize) -> Vec<(Code, f64)> {
        self.posterior
            .top_k(k)
            .into_iter()
            .map(|code| (code, self.posterior.prob(code)))
            .collect()
    }

    /// The `k` most probable codes after neighbor smoothing at `max_radius`
    /// (clamped to `[1, 9]`), with their smoothed masses.
    pub fn most_probable_smoothed(
        &self,
        k: usize,
        max_radius: u32,
    ) -> Result<Vec<(Code, f64)>, CrackError> {
        let smoothed = neighbors::smooth(&self.posterior, self.digit_count, max_radius)?;
        Ok(smoothed
            .top_k(k)
            .into_iter()
            .map(|code| (code, smoothed.prob(code)))
            .collect())
    }

    /// Marginal distribution of the digit at `index` (0 = most significant),
    /// projected out of the posterior through the pushforward primitive.
    pub fn digit_marginal(&self, index: usize) -> Result<Distribution, CrackError> {
        if index >= self.digit_count {
            return Err(CrackError::Configuration {
                description: format!(
                    "digit index {} out of range for {} digit(s)",
                    index, self.digit_count
                ),
            });
        }
        let divisor = 10u64.pow((self.digit_count - 1 - index) as u32);
        Ok(self.posterior.map(|code| (code / divisor) % 10))
    }

    /// Per position, the `k` most probable digits with their marginal masses.
    pub fn most_probable_digits(&self, k: usize) -> Result<Vec<Vec<(u8, f64)>>, CrackError> {
        (0..self.digit_count)
            .map(|index| {
                let marginal = self.digit_marginal(index)?;
                Ok(marginal
                    .top_k(k)
                    .into_iter()
                    .map(|digit| (digit as u8, marginal.prob(digit)))
                    .collect())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UniformPenaltyModel;

    fn cracker(digit_count: usize) -> LockCracker {
        LockCracker::new(
            digit_count,
            Box::new(UniformPenaltyModel::new(digit_count)),
        )
        .unwrap()
    }

    #[test]
    fn test_starts_uniform() {
        let engine = cracker(2);
        assert!((engine.probability_of(37) - 0.01).abs() < 1e-12);
        assert_eq!(engine.modes().len(), 100);
        assert!(engine.observations().is_empty());
    }

    #[test]
    fn test_rejects_overlength_and_garbage() {
        let mut engine = cracker(2);
        assert!(matches!(
            engine.observe("123"),
            Err(CrackError::InvalidObservation { .. })
        ));
        assert!(engine.observe("4x").is_err());
        assert!(engine.observe("").is_err());
        assert!(engine.observe_code(123).is_err());
        assert!((engine.probability_of(37) - 0.01).abs() < 1e-12);
        assert!(engine.observations().is_empty());
    }

    #[test]
    fn test_accepts_short_observation_as_padded() {
        let mut engine = cracker(4);
        // "53" reads as 0053
        engine.observe("53").unwrap();
        assert_eq!(engine.observations(), &[53]);
    }

    #[test]
    fn test_posterior_sums_to_one_after_observe() {
        let mut engine = cracker(2);
        engine.observe("11").unwrap();
        engine.observe("42").unwrap();
        let total: f64 = engine.posterior().iter().map(|(_, m)| m).sum();
        assert!((total - 1.0).abs() < 1e-8);
    }

    #[test]
    fn test_reset_restores_prior() {
        let mut engine = cracker(2);
        engine.observe("11").unwrap();
        assert!(!engine.observations().is_empty());
        engine.reset();
        assert!(engine.observations().is_empty());
        assert!((engine.probability_of(11) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_observe_all_tallies_failures() {
        let mut engine = cracker(2);
        let tally = engine.observe_all(["11", "999", "22", "abc", "33"]);
        assert_eq!(
            tally,
            ObserveTally {
                succeeded: 3,
                failed: 2
            }
        );
        assert_eq!(engine.observations(), &[11, 22, 33]);
    }

    #[test]
    fn test_digit_marginal_is_projection() {
        let mut engine = cracker(2);
        engine.observe("11").unwrap();
        let tens = engine.digit_marginal(0).unwrap();
        let total: f64 = tens.iter().map(|(_, m)| m).sum();
        assert!((total - 1.0).abs() < 1e-8);
        assert_eq!(tens.len(), 10);
        // Digit 1 lost mass in the tens position after observing 11
        assert!(tens.prob(1) < tens.prob(2));
        assert!(engine.digit_marginal(2).is_err());
    }

    #[test]
    fn test_most_probable_digits_shape() {
        let engine = cracker(3);
        let digits = engine.most_probable_digits(4).unwrap();
        assert_eq!(digits.len(), 3);
        for position in &digits {
            assert_eq!(position.len(), 4);
        }
    }

    #[test]
    fn test_digit_count_validated() {
        assert!(LockCracker::new(0, Box::new(UniformPenaltyModel::new(1))).is_err());
    }
}
