//! Distance and edit-cost primitives over D-digit codes
//!
//! Codes compare position by position on their zero-padded decimal
//! representations (integer 53 with D=4 reads as "0053"). The edit distance
//! here is positional: the digit count is fixed, so only substitutions exist,
//! never insertions or deletions.

use smallvec::SmallVec;

use crate::distribution::Code;

/// Digits of `code`, most significant first, zero-padded to `digit_count`.
pub fn code_digits(code: Code, digit_count: usize) -> SmallVec<[u8; 9]> {
    let mut digits: SmallVec<[u8; 9]> = SmallVec::from_elem(0, digit_count);
    let mut rest = code;
    for slot in digits.iter_mut().rev() {
        *slot = (rest % 10) as u8;
        rest /= 10;
    }
    digits
}

/// Reassemble a code from most-significant-first digits.
pub fn digits_to_code(digits: &[u8]) -> Code {
    digits.iter().fold(0, |acc, &d| acc * 10 + d as Code)
}

/// Zero-padded decimal rendering, e.g. `format_code(53, 4) == "0053"`.
pub fn format_code(code: Code, digit_count: usize) -> String {
    format!("{:0width$}", code, width = digit_count)
}

/// Number of digit positions where two zero-padded codes differ.
pub fn digit_distance(observed: Code, actual: Code, digit_count: usize) -> u32 {
    let obs = code_digits(observed, digit_count);
    let act = code_digits(actual, digit_count);
    obs.iter().zip(act.iter()).filter(|(a, b)| a != b).count() as u32
}

/// Cost of rotating one digit into another on the 0..9 ring.
///
/// `cost_down` is the unit cost of one decrementing step, `cost_up` of one
/// incrementing step; the result is the cheaper full rotation. The rotation
/// never passes the starting digit twice (nobody spins a full turn to reach
/// a digit one notch away).
pub fn rotation_cost(from: u8, to: u8, cost_down: u32, cost_up: u32) -> u32 {
    debug_assert!(from < 10 && to < 10);
    if from == to {
        return 0;
    }
    let down_steps = (from as u32 + 10 - to as u32) % 10;
    let up_steps = (to as u32 + 10 - from as u32) % 10;
    (down_steps * cost_down).min(up_steps * cost_up)
}

/// Per-position rotation edit distance between two zero-padded codes.
pub fn edit_distance(
    observed: Code,
    actual: Code,
    digit_count: usize,
    cost_down: u32,
    cost_up: u32,
) -> u32 {
    let obs = code_digits(observed, digit_count);
    let act = code_digits(actual, digit_count);
    act.iter()
        .zip(obs.iter())
        .map(|(&a, &o)| rotation_cost(a, o, cost_down, cost_up))
        .sum()
}

/// Identity of a distance function, used to key cached likelihood tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DistanceKind {
    /// Count of differing digit positions (Hamming over digits).
    DigitMismatch,
    /// Sum of per-position cyclic rotation costs, with per-direction unit
    /// costs (symmetric when both are 1).
    Rotation {
        /// Unit cost of decrementing a digit by one (with wraparound).
        cost_down: u32,
        /// Unit cost of incrementing a digit by one (with wraparound).
        cost_up: u32,
    },
}

impl DistanceKind {
    /// Symmetric rotation distance (both directions cost 1 per step).
    pub fn rotation() -> Self {
        DistanceKind::Rotation {
            cost_down: 1,
            cost_up: 1,
        }
    }

    /// Evaluate this distance between an observation and a candidate.
    pub fn distance(&self, observed: Code, actual: Code, digit_count: usize) -> u32 {
        match *self {
            DistanceKind::DigitMismatch => digit_distance(observed, actual, digit_count),
            DistanceKind::Rotation { cost_down, cost_up } => {
                edit_distance(observed, actual, digit_count, cost_down, cost_up)
            }
        }
    }

    /// Stable name for cache keys.
    pub fn cache_name(&self) -> String {
        match *self {
            DistanceKind::DigitMismatch => "digit_mismatch".to_string(),
            DistanceKind::Rotation { cost_down, cost_up } => {
                format!("rot_cl{}_ch{}", cost_down, cost_up)
            }
        }
    }
}
