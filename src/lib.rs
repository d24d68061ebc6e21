/*!
# Combocrack - Bayesian combination-lock inference

Maintains a belief distribution over every D-digit lock combination and
updates it from noisy observations: codes read off the dial after the owner
shuffled it. After a handful of readings the posterior concentrates enough to
shortlist the true combination.

## Features

- Normalized discrete [`Distribution`] with Bayesian update, pushforward
  projection, and bounded top-k extraction
- Three observation-likelihood models: uniform penalty, closed-form
  combinatorial digit-distance, and an exhaustive pairwise-distance table
  with configurable edit costs
- Neighbor smoothing: mass redistribution over radius-exact edit
  neighborhoods for a more robust ranking
- Corpus loading and an on-disk cache for the expensive pairwise tables

## Modules

- [`engine`] - the [`LockCracker`] inference engine
- [`distribution`] - normalized belief distributions
- [`model`] - observation-likelihood strategies and distance primitives
- [`neighbors`] - radius-exact neighbor expansion and smoothing
- [`topk`] - bounded top-k selection
- [`corpus`] - observation-corpus loading and generation
- [`cache`] - pairwise-table persistence

## Example

```rust
use combocrack::{LockCracker, ModelConfig};

let config = ModelConfig::UniformPenalty { digit_count: 2 };
let mut cracker = LockCracker::with_config(&config, None)?;

let tally = cracker.observe_all(["11", "11", "22"]);
assert_eq!(tally.succeeded, 3);

// Codes never observed now outrank the observed ones
for (code, prob) in cracker.most_probable(5) {
    println!("{:02}: {:.6}", code, prob);
}
# Ok::<(), combocrack::CrackError>(())
```
*/

pub mod cache;
pub mod corpus;
pub mod distribution;
pub mod engine;
pub mod errors;
pub mod model;
pub mod neighbors;
pub mod topk;

pub use cache::{DirCache, TableCache};
pub use corpus::ObservationSet;
pub use distribution::{Code, Distribution, DistributionBuilder, MASS_TOLERANCE};
pub use engine::{LockCracker, ObserveTally};
pub use errors::{CorpusError, CrackError};
pub use model::{
    build_model, CombinatorialModel, DistanceKind, ModelConfig, ObservationModel, PairwiseConfig,
    PairwiseTable, UniformPenaltyModel,
};
