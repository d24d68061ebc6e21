//! Radius-exact neighbor expansion and posterior smoothing
//!
//! A sharply peaked posterior can peak on the wrong code; smoothing hedges
//! the ranking by letting every hypothesis lend mass to the codes near it on
//! the dial. "Near" means reachable by single-digit ±1 moves (mod 10), and
//! the neighbor sets are radius-exact: a code counted at radius `r-1` is
//! never re-counted at radius `r`.
//!
//! Expansion is an explicit breadth-first frontier walk over the digit-code
//! graph (nodes are codes, edges are single ±1 moves) with a visited set, so
//! there is no recursion and no exponential re-visiting.

use std::collections::HashSet;

use smallvec::SmallVec;

use crate::distribution::{Code, Distribution, DistributionBuilder};
use crate::errors::CrackError;
use crate::model::distance::{code_digits, digits_to_code};

/// Smoothing radii only make sense on the 0..9 digit ring.
const MAX_RADIUS: u32 = 9;

/// All codes one ±1 digit move away from `code` (2 per position, with
/// duplicates when two positions produce the same code - the callers
/// deduplicate through sets).
fn single_edits(code: Code, digit_count: usize) -> SmallVec<[Code; 18]> {
    let digits = code_digits(code, digit_count);
    let mut edits = SmallVec::new();
    for position in 0..digit_count {
        let original = digits[position];
        for replacement in [(original + 1) % 10, (original + 9) % 10] {
            let mut edited = digits.clone();
            edited[position] = replacement;
            edits.push(digits_to_code(&edited));
        }
    }
    edits
}

/// Codes reachable by exactly `radius` single-digit ±1 moves from `code`,
/// excluding everything reachable in fewer moves (and `code` itself).
pub fn radius_exact_neighbors(code: Code, digit_count: usize, radius: u32) -> HashSet<Code> {
    let mut visited: HashSet<Code> = HashSet::from([code]);
    let mut frontier: HashSet<Code> = HashSet::from([code]);
    for _ in 0..radius {
        let mut next = HashSet::new();
        for &current in &frontier {
            for edit in single_edits(current, digit_count) {
                if !visited.contains(&edit) {
                    next.insert(edit);
                }
            }
        }
        visited.extend(next.iter().copied());
        frontier = next;
    }
    if radius == 0 {
        frontier.clear();
    }
    frontier
}

/// Redistribute each hypothesis's mass over its edit-neighborhood and return
/// the renormalized result.
///
/// Every hypothesis keeps its full mass on itself and grants `p / r` to each
/// radius-`r` exact neighbor, `r` up to `max_radius` (clamped to `[1, 9]`).
/// The 1/r attenuation is a fixed design choice, not derived from any
/// observation model.
pub fn smooth(
    dist: &Distribution,
    digit_count: usize,
    max_radius: u32,
) -> Result<Distribution, CrackError> {
    let max_radius = max_radius.clamp(1, MAX_RADIUS);
    let mut builder = DistributionBuilder::with_capacity(dist.len());
    for (code, mass) in dist.iter() {
        builder.add(code, mass);
        let mut visited: HashSet<Code> = HashSet::from([code]);
        let mut frontier: Vec<Code> = vec![code];
        for radius in 1..=max_radius {
            let mut next: HashSet<Code> = HashSet::new();
            for &current in &frontier {
                for edit in single_edits(current, digit_count) {
                    if !visited.contains(&edit) {
                        next.insert(edit);
                    }
                }
            }
            let share = mass / radius as f64;
            for &neighbor in &next {
                builder.add(neighbor, share);
            }
            visited.extend(next.iter().copied());
            frontier = next.into_iter().collect();
        }
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_one_neighbors_of_00() {
        let neighbors = radius_exact_neighbors(0, 2, 1);
        let expected: HashSet<Code> = HashSet::from([1, 10, 90, 9]);
        assert_eq!(neighbors, expected);
    }

    #[test]
    fn test_radius_zero_is_empty() {
        assert!(radius_exact_neighbors(0, 2, 0).is_empty());
    }

    #[test]
    fn test_radius_two_excludes_smaller_radii() {
        let r1 = radius_exact_neighbors(0, 2, 1);
        let r2 = radius_exact_neighbors(0, 2, 2);
        assert!(!r2.contains(&0));
        assert!(r1.is_disjoint(&r2));
        // Two moves on the same digit, or one on each
        assert!(r2.contains(&2));
        assert!(r2.contains(&11));
        assert!(r2.contains(&99));
        assert!(r2.contains(&20));
    }

    #[test]
    fn test_neighbor_count_single_digit_ring() {
        // On a single digit, exactly two codes sit at each radius 1..4 and
        // one at radius 5 (the opposite side of the ring)
        for radius in 1..=4 {
            assert_eq!(radius_exact_neighbors(3, 1, radius).len(), 2);
        }
        assert_eq!(radius_exact_neighbors(3, 1, 5).len(), 1);
        assert!(radius_exact_neighbors(3, 1, 6).is_empty());
    }

    #[test]
    fn test_smooth_normalizes() {
        let dist = Distribution::uniform_over(100);
        let smoothed = smooth(&dist, 2, 2).unwrap();
        let total: f64 = smoothed.iter().map(|(_, m)| m).sum();
        assert!((total - 1.0).abs() < 1e-8);
    }

    #[test]
    fn test_smooth_spreads_point_mass() {
        let mut dist = Distribution::default();
        dist.set(50, 1.0, false).unwrap();
        let smoothed = smooth(&dist, 2, 1).unwrap();
        // 50 keeps weight 1, each of its four neighbors gets 1; total 5
        assert!((smoothed.prob(50) - 0.2).abs() < 1e-12);
        assert!((smoothed.prob(51) - 0.2).abs() < 1e-12);
        assert!((smoothed.prob(40) - 0.2).abs() < 1e-12);
        assert_eq!(smoothed.prob(77), 0.0);
    }

    #[test]
    fn test_smooth_clamps_radius() {
        let dist = Distribution::uniform_over(10);
        // Radius 0 behaves as radius 1, radius 99 as radius 9
        let low = smooth(&dist, 1, 0).unwrap();
        let one = smooth(&dist, 1, 1).unwrap();
        assert_eq!(low, one);
        let high = smooth(&dist, 1, 99).unwrap();
        let nine = smooth(&dist, 1, 9).unwrap();
        assert_eq!(high, nine);
    }
}
