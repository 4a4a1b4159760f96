//! Candidate-restricted neighborhood.
//!
//! Only moves that create at least one candidate edge for the nodes around
//! a position (the node itself, its predecessor or its successor) are
//! generated. This trims a pass from O(n·m + m²) moves to roughly O(m·k),
//! at the price of missing improving moves whose new edges are not
//! candidate edges of any endpoint.
//!
//! Membership only depends on the nodes a move touches: a 2-opt belongs to
//! the neighborhood when one of the two edges it adds is a candidate edge,
//! wherever the cycle happens to start. Moves are produced position by
//! position in a deterministic order.

use std::collections::HashSet;
use std::sync::Arc;

use cycleforge_config::IntraMoveKind;
use cycleforge_core::{ProblemData, Tour};
use smallvec::SmallVec;

use super::{CandidateIndex, MoveSelector};
use crate::heuristic::r#move::RouteMove;

const NOT_IN_TOUR: usize = usize::MAX;

/// Neighborhood generating only candidate-edge moves.
#[derive(Debug, Clone)]
pub struct CandidateNeighborhood {
    intra: IntraMoveKind,
    index: Arc<CandidateIndex>,
}

impl CandidateNeighborhood {
    pub fn new(intra: IntraMoveKind, index: Arc<CandidateIndex>) -> Self {
        Self { intra, index }
    }

    pub fn intra(&self) -> IntraMoveKind {
        self.intra
    }

    pub fn index(&self) -> &CandidateIndex {
        &self.index
    }

    /// Moves of one pass over `tour`.
    pub fn moves<'a>(&'a self, tour: &'a Tour) -> CandidateMoves<'a> {
        let mut positions = vec![NOT_IN_TOUR; self.index.node_count()];
        for (position, &id) in tour.node_ids().iter().enumerate() {
            positions[id] = position;
        }
        CandidateMoves {
            tour,
            index: &self.index,
            intra: self.intra,
            positions,
            position: 0,
            buffer: SmallVec::new(),
            cursor: 0,
            seen_pairs: HashSet::new(),
        }
    }
}

impl MoveSelector for CandidateNeighborhood {
    fn iter_moves<'a>(
        &'a mut self,
        tour: &'a Tour,
        _data: &'a ProblemData,
    ) -> impl Iterator<Item = RouteMove> + 'a {
        self.moves(tour)
    }

    fn size(&self, tour: &Tour, _data: &ProblemData) -> usize {
        // Upper bound: replacements from three sources plus two intra sources.
        tour.len() * self.index.candidate_count() * 5
    }
}

/// Moves of one [`CandidateNeighborhood`] pass.
pub struct CandidateMoves<'a> {
    tour: &'a Tour,
    index: &'a CandidateIndex,
    intra: IntraMoveKind,
    positions: Vec<usize>,
    position: usize,
    buffer: SmallVec<[RouteMove; 32]>,
    cursor: usize,
    seen_pairs: HashSet<(usize, usize)>,
}

impl CandidateMoves<'_> {
    /// Refills the buffer with the moves anchored at position `i`.
    fn fill(&mut self, i: usize) {
        self.buffer.clear();
        self.cursor = 0;

        let tour = self.tour;
        let index = self.index;
        let current = tour.node_at(i);
        let prev = tour.node_at(tour.prev_position(i));
        let next = tour.node_at(tour.next_position(i));

        let mut sources: SmallVec<[usize; 3]> = SmallVec::new();
        for source in [current, prev, next] {
            if !sources.contains(&source) {
                sources.push(source);
            }
        }
        for &source in &sources {
            for &candidate in index.neighbors_of(source) {
                if self.positions[candidate] != NOT_IN_TOUR {
                    continue;
                }
                let m = RouteMove::replace(i, candidate);
                if !self.buffer.contains(&m) {
                    self.buffer.push(m);
                }
            }
        }

        if tour.len() < 2 {
            return;
        }
        match self.intra {
            IntraMoveKind::EdgeSwap => self.fill_edge_swaps(i, current, prev),
            IntraMoveKind::NodeSwap => self.fill_node_swaps(i, current, prev, next),
        }
    }

    /// Reversals `[i, j]` creating `(prev, candidate)` or `(current, candidate)`.
    fn fill_edge_swaps(&mut self, i: usize, current: usize, prev: usize) {
        let index = self.index;
        let tour = self.tour;
        let len = tour.len();
        // New edge (prev(i), t[j]) when t[j] is a candidate of prev(i).
        for &candidate in index.neighbors_of(prev) {
            let p = self.positions[candidate];
            if p != NOT_IN_TOUR {
                self.push_edge_swap(i, p, len);
            }
        }
        // New edge (t[i], t[next(j)]) when t[next(j)] is a candidate of t[i].
        for &candidate in index.neighbors_of(current) {
            let p = self.positions[candidate];
            if p != NOT_IN_TOUR {
                self.push_edge_swap(i, tour.prev_position(p), len);
            }
        }
    }

    /// Pushes the reversal of the cyclic range from `i` to `j`, expressed
    /// through its complement when the range wraps.
    fn push_edge_swap(&mut self, i: usize, j: usize, len: usize) {
        let reversed = (j + len - i) % len + 1;
        // One position, or len - 1 and more, only mirrors the cycle.
        if reversed < 2 || reversed + 2 > len {
            return;
        }
        let key = if i <= j { (i, j) } else { (j + 1, i - 1) };
        if self.seen_pairs.insert(key) {
            self.buffer.push(RouteMove::swap_edges(key.0, key.1));
        }
    }

    /// Exchanges placing `t[i]` next to one of its candidates, or a
    /// candidate of a neighbour of `i` at position `i`.
    fn fill_node_swaps(&mut self, i: usize, current: usize, prev: usize, next: usize) {
        let index = self.index;
        let tour = self.tour;
        for &candidate in index.neighbors_of(current) {
            let p = self.positions[candidate];
            if p == NOT_IN_TOUR {
                continue;
            }
            self.push_node_swap(i, tour.prev_position(p));
            self.push_node_swap(i, tour.next_position(p));
        }
        for source in [prev, next] {
            for &candidate in index.neighbors_of(source) {
                let p = self.positions[candidate];
                if p != NOT_IN_TOUR {
                    self.push_node_swap(i, p);
                }
            }
        }
    }

    fn push_node_swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let key = (i.min(j), i.max(j));
        if self.seen_pairs.insert(key) {
            self.buffer.push(RouteMove::swap_nodes(key.0, key.1));
        }
    }
}

impl Iterator for CandidateMoves<'_> {
    type Item = RouteMove;

    fn next(&mut self) -> Option<RouteMove> {
        loop {
            if let Some(&m) = self.buffer.get(self.cursor) {
                self.cursor += 1;
                return Some(m);
            }
            if self.position >= self.tour.len() {
                return None;
            }
            let i = self.position;
            self.position += 1;
            self.fill(i);
        }
    }
}
