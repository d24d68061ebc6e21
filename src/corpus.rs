//! Observation corpora: the line-oriented file boundary
//!
//! A corpus file starts with a header `CODE:{code},{digit_count}` naming the
//! true combination (for scoring) and the digit count, followed by one
//! decimal observation per line, leading zeros optional. The inference core
//! never parses this format; it consumes the decoded [`ObservationSet`].
//!
//! Synthetic corpora are drawn uniformly over the space, re-rolling any draw
//! that lands on the true code (a shuffled lock is never left on its true
//! combination in this data).

use std::fs;
use std::path::Path;

use rand::Rng;

use crate::distribution::Code;
use crate::errors::CorpusError;

/// A decoded corpus: the ground-truth code, the digit count, and the
/// recorded observations in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationSet {
    /// The true combination (known for study corpora).
    pub true_code: Code,
    /// Number of digits in the combination.
    pub digit_count: usize,
    /// Observed shuffled codes.
    pub observations: Vec<Code>,
}

impl ObservationSet {
    /// Load a corpus from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let content = fs::read_to_string(path)?;
        let mut lines = content.lines();
        let header = lines.next().unwrap_or("");
        let (true_code, digit_count) = parse_header(header)?;
        let mut observations = Vec::new();
        for (index, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let code = line
                .trim()
                .parse::<Code>()
                .map_err(|_| CorpusError::MalformedObservation {
                    // 1-based, counting the header
                    line_number: index + 2,
                    content: line.to_string(),
                })?;
            observations.push(code);
        }
        Ok(Self {
            true_code,
            digit_count,
            observations,
        })
    }

    /// Write the corpus back in the same line format.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), CorpusError> {
        let mut out = format!("CODE:{},{}\n", self.true_code, self.digit_count);
        for code in &self.observations {
            out.push_str(&code.to_string());
            out.push('\n');
        }
        fs::write(path, out)?;
        Ok(())
    }

    /// Draw `count` random observations for a `digit_count`-digit lock,
    /// never producing the true code itself.
    pub fn generate_random<R: Rng>(
        true_code: Code,
        digit_count: usize,
        count: usize,
        rng: &mut R,
    ) -> Self {
        let space_size = 10u64.pow(digit_count as u32);
        let observations = (0..count)
            .map(|_| {
                let mut draw = rng.gen_range(0..space_size);
                while draw == true_code {
                    draw = rng.gen_range(0..space_size);
                }
                draw
            })
            .collect();
        Self {
            true_code,
            digit_count,
            observations,
        }
    }
}

fn parse_header(line: &str) -> Result<(Code, usize), CorpusError> {
    let malformed = || CorpusError::MalformedHeader {
        line: line.to_string(),
    };
    let rest = line.strip_prefix("CODE:").ok_or_else(malformed)?;
    let (code, digits) = rest.split_once(',').ok_or_else(malformed)?;
    let true_code = code.trim().parse::<Code>().map_err(|_| malformed())?;
    let digit_count = digits.trim().parse::<usize>().map_err(|_| malformed())?;
    Ok((true_code, digit_count))
}
