//! Bounded top-k selection
//!
//! Selects the k highest-scoring keys in `O(n log k)` by streaming all keys
//! through a min-heap capped at k entries, instead of sorting the whole
//! hypothesis space (n reaches 10^5..10^6 while k is usually tens).
//!
//! Tie-break is deterministic: equal scores order by ascending key, so ranking
//! under a uniform prior (where ties are everywhere) is reproducible.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::distribution::Code;

/// Heap entry ordered so the WORST candidate sits at the top of a max-heap:
/// lower score is "greater", and for equal scores a larger key is "greater".
/// Popping the max therefore evicts the current loser.
#[derive(Debug, Clone, Copy)]
struct Loser {
    score: f64,
    key: Code,
}

impl PartialEq for Loser {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Loser {}

impl PartialOrd for Loser {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Loser {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.key.cmp(&other.key))
    }
}

/// Return the `k` highest-scoring keys in descending score order.
///
/// Equal scores break ties by ascending key. If fewer than `k` keys exist,
/// all of them are returned. The scoring closure is read-only; nothing is
/// mutated.
pub fn top_k_by<I, F>(keys: I, k: usize, score: F) -> Vec<Code>
where
    I: IntoIterator<Item = Code>,
    F: Fn(Code) -> f64,
{
    if k == 0 {
        return Vec::new();
    }
    let mut heap: BinaryHeap<Loser> = BinaryHeap::with_capacity(k + 1);
    for key in keys {
        heap.push(Loser {
            score: score(key),
            key,
        });
        if heap.len() > k {
            heap.pop();
        }
    }
    // Popping yields worst-first; reverse into descending-score order.
    let mut winners: Vec<Loser> = Vec::with_capacity(heap.len());
    while let Some(entry) = heap.pop() {
        winners.push(entry);
    }
    winners.reverse();
    winners.into_iter().map(|entry| entry.key).collect()
}
