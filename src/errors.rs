//! Error types for the inference core and the corpus boundary
//!
//! This module provides proper error handling instead of panics.

use std::fmt;

/// Errors that can occur during inference
#[derive(Debug, Clone)]
pub enum CrackError {
    /// Observation rejected during validation (non-fatal, per-observation)
    InvalidObservation {
        /// The raw observation as received
        value: String,
        /// The configured digit count it was checked against
        digit_count: usize,
    },

    /// A mass value was non-finite or negative
    InvalidMass {
        /// The offending value
        value: f64,
    },

    /// Normalizing a distribution whose masses sum to zero
    ZeroSumDistribution,

    /// Construction-time misuse (zero digit count, digit index out of range, ...)
    Configuration {
        /// Description of the configuration issue
        description: String,
    },
}

impl fmt::Display for CrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrackError::InvalidObservation { value, digit_count } => {
                write!(
                    f,
                    "Invalid observation {:?} for {} digit(s)",
                    value, digit_count
                )
            }
            CrackError::InvalidMass { value } => {
                write!(f, "Invalid mass: {} (must be finite and >= 0)", value)
            }
            CrackError::ZeroSumDistribution => {
                write!(f, "Cannot normalize a distribution with zero total mass")
            }
            CrackError::Configuration { description } => {
                write!(f, "Configuration error: {}", description)
            }
        }
    }
}

impl std::error::Error for CrackError {}

/// Errors that can occur while loading or writing an observation corpus
#[derive(Debug)]
pub enum CorpusError {
    /// Underlying file I/O failed
    Io(std::io::Error),

    /// The header line did not match `CODE:{code},{digit_count}`
    MalformedHeader {
        /// The header line as read
        line: String,
    },

    /// An observation line was not a decimal integer
    MalformedObservation {
        /// 1-based line number in the file
        line_number: usize,
        /// The line content as read
        content: String,
    },
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusError::Io(e) => write!(f, "Corpus I/O failed: {}", e),
            CorpusError::MalformedHeader { line } => {
                write!(f, "Malformed corpus header: {:?}", line)
            }
            CorpusError::MalformedObservation {
                line_number,
                content,
            } => {
                write!(
                    f,
                    "Malformed observation on line {}: {:?}",
                    line_number, content
                )
            }
        }
    }
}

impl std::error::Error for CorpusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CorpusError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CorpusError {
    fn from(e: std::io::Error) -> Self {
        CorpusError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crack_error_display() {
        let err = CrackError::InvalidObservation {
            value: "12345".to_string(),
            digit_count: 4,
        };
        assert!(err.to_string().contains("12345"));
        assert!(err.to_string().contains('4'));

        let err = CrackError::InvalidMass { value: -0.5 };
        assert!(err.to_string().contains("-0.5"));

        let err = CrackError::ZeroSumDistribution;
        assert!(err.to_string().contains("zero total mass"));
    }

    #[test]
    fn test_corpus_error_display() {
        let err = CorpusError::MalformedHeader {
            line: "CODE:abc".to_string(),
        };
        assert!(err.to_string().contains("CODE:abc"));

        let err = CorpusError::MalformedObservation {
            line_number: 7,
            content: "12x4".to_string(),
        };
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CorpusError = io.into();
        assert!(matches!(err, CorpusError::Io(_)));
    }
}
