//! Full neighborhood in seeded random order.
//!
//! Moves are addressed by a dense index: first the `m * (n - m)`
//! replacements ordered by (position, unused node), then the intra-tour
//! position pairs `i < j` in row-major order. A [`SeededPermutation`] over
//! that index range yields the pass order without materializing any move.

use cycleforge_config::IntraMoveKind;
use cycleforge_core::{NodeId, ProblemData, Tour};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{MoveSelector, SeededPermutation};
use crate::heuristic::r#move::RouteMove;

/// Enumerates every valid move of a tour.
///
/// Each pass draws a fresh permutation seed, so greedy search explores the
/// neighborhood in a different order every time while staying reproducible
/// for a fixed construction seed.
#[derive(Debug)]
pub struct FullNeighborhood {
    intra: IntraMoveKind,
    rng: ChaCha8Rng,
}

impl FullNeighborhood {
    pub fn new(intra: IntraMoveKind, seed: u64) -> Self {
        Self {
            intra,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn intra(&self) -> IntraMoveKind {
        self.intra
    }

    /// Moves of one pass over `tour`.
    pub fn moves<'a>(&mut self, tour: &'a Tour, data: &ProblemData) -> FullMoves<'a> {
        let mut in_tour = vec![false; data.total_nodes()];
        for &id in tour.node_ids() {
            in_tour[id] = true;
        }
        let unused: Vec<NodeId> = (0..data.total_nodes()).filter(|&id| !in_tour[id]).collect();
        let replace_count = tour.len() * unused.len();
        let total = replace_count + intra_count(self.intra, tour.len());

        FullMoves {
            tour,
            unused,
            replace_count,
            intra: self.intra,
            order: SeededPermutation::new(total, self.rng.random()),
        }
    }
}

impl MoveSelector for FullNeighborhood {
    fn iter_moves<'a>(
        &'a mut self,
        tour: &'a Tour,
        data: &'a ProblemData,
    ) -> impl Iterator<Item = RouteMove> + 'a {
        self.moves(tour, data)
    }

    fn size(&self, tour: &Tour, data: &ProblemData) -> usize {
        let m = tour.len();
        m * (data.total_nodes() - m) + intra_count(self.intra, m)
    }
}

/// Number of intra-tour moves on a tour of `len` positions.
fn intra_count(intra: IntraMoveKind, len: usize) -> usize {
    let pairs = len * len.saturating_sub(1) / 2;
    match intra {
        // (0, len - 1) reverses the whole cycle.
        IntraMoveKind::EdgeSwap => pairs.saturating_sub(1),
        IntraMoveKind::NodeSwap => pairs,
    }
}

/// Number of pairs `(i, j)` with `i < j < len` whose first element is below `i`.
#[inline]
fn row_offset(i: usize, len: usize) -> usize {
    i * (2 * len - i - 1) / 2
}

/// Decodes the `k`-th pair `(i, j)`, `i < j < len`, in row-major order.
fn pair_at(k: usize, len: usize) -> (usize, usize) {
    let b = (2 * len - 1) as f64;
    let estimate = ((b - (b * b - 8.0 * k as f64).sqrt()) / 2.0).floor();
    let mut i = if estimate > 0.0 {
        (estimate as usize).min(len - 2)
    } else {
        0
    };
    while i > 0 && row_offset(i, len) > k {
        i -= 1;
    }
    while row_offset(i + 1, len) <= k {
        i += 1;
    }
    (i, i + 1 + (k - row_offset(i, len)))
}

/// Moves of one [`FullNeighborhood`] pass.
pub struct FullMoves<'a> {
    tour: &'a Tour,
    unused: Vec<NodeId>,
    replace_count: usize,
    intra: IntraMoveKind,
    order: SeededPermutation,
}

impl FullMoves<'_> {
    fn decode(&self, index: usize) -> RouteMove {
        if index < self.replace_count {
            let width = self.unused.len();
            return RouteMove::replace(index / width, self.unused[index % width]);
        }
        let len = self.tour.len();
        let k = index - self.replace_count;
        match self.intra {
            IntraMoveKind::EdgeSwap => {
                // Skip the pair (0, len - 1), which sits at index len - 2.
                let k = if k >= len - 2 { k + 1 } else { k };
                let (i, j) = pair_at(k, len);
                RouteMove::swap_edges(i, j)
            }
            IntraMoveKind::NodeSwap => {
                let (i, j) = pair_at(k, len);
                RouteMove::swap_nodes(i, j)
            }
        }
    }
}

impl Iterator for FullMoves<'_> {
    type Item = RouteMove;

    #[inline]
    fn next(&mut self) -> Option<RouteMove> {
        let index = self.order.next()?;
        Some(self.decode(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}
