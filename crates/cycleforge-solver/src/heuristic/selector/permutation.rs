//! Lazy seeded permutation of an index range.
//!
//! Runs Fisher-Yates one step per `next()`, recording only the slots that
//! were displaced, so taking a prefix of a huge neighborhood costs only
//! that prefix.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Yields every index of `0..len` exactly once in seeded random order.
///
/// # Example
///
/// ```
/// use cycleforge_solver::heuristic::SeededPermutation;
///
/// let mut order: Vec<usize> = SeededPermutation::new(6, 42).collect();
/// order.sort_unstable();
/// assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
/// ```
#[derive(Debug, Clone)]
pub struct SeededPermutation {
    len: usize,
    next: usize,
    displaced: HashMap<usize, usize>,
    rng: ChaCha8Rng,
}

impl SeededPermutation {
    pub fn new(len: usize, seed: u64) -> Self {
        Self {
            len,
            next: 0,
            displaced: HashMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Iterator for SeededPermutation {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next >= self.len {
            return None;
        }
        let slot = self.next;
        self.next += 1;

        let target = self.rng.random_range(slot..self.len);
        let current = self.displaced.remove(&slot).unwrap_or(slot);
        if target == slot {
            return Some(current);
        }
        Some(self.displaced.insert(target, current).unwrap_or(target))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SeededPermutation {}
