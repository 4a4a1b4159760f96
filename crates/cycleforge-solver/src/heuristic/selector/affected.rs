//! Moves an applied move may have created or altered.
//!
//! After a move is applied, every other move of a neighborhood either
//! keeps its identity and delta, or touches the rewritten part of the
//! tour: a node whose neighbours changed, a node that entered or left the
//! tour, a new edge, or a pair of edges on opposite sides of a reversed
//! range (the pair now reconnects the other way). [`Neighborhood::moves_after`]
//! lists a superset of the second kind, which keeps a collection of
//! improving moves complete without rescanning the whole neighborhood.

use cycleforge_config::IntraMoveKind;
use cycleforge_core::{NodeId, ProblemData, Tour};

use super::{CandidateIndex, Neighborhood};
use crate::heuristic::r#move::{RouteMove, TourChange};

const NOT_IN_TOUR: usize = usize::MAX;

impl Neighborhood {
    /// Moves of this neighborhood on `tour` that `change` may have created
    /// or altered.
    ///
    /// `tour` is the tour after the change. The result may repeat moves.
    /// Intra-tour moves are only listed for edge-swap neighborhoods.
    pub fn moves_after(
        &self,
        tour: &Tour,
        data: &ProblemData,
        change: TourChange,
    ) -> Vec<RouteMove> {
        let (intra, index) = match self {
            Neighborhood::Full(n) => (n.intra(), None),
            Neighborhood::Candidate(n) => (n.intra(), Some(n.index())),
        };
        let mut affected = Affected::new(tour, data, index);
        affected.collect(change, intra == IntraMoveKind::EdgeSwap);
        affected.moves
    }
}

struct Affected<'a> {
    tour: &'a Tour,
    index: Option<&'a CandidateIndex>,
    positions: Vec<usize>,
    unused: Vec<NodeId>,
    moves: Vec<RouteMove>,
}

impl<'a> Affected<'a> {
    fn new(tour: &'a Tour, data: &ProblemData, index: Option<&'a CandidateIndex>) -> Self {
        let mut positions = vec![NOT_IN_TOUR; data.total_nodes()];
        for (position, &id) in tour.node_ids().iter().enumerate() {
            positions[id] = position;
        }
        let unused = (0..data.total_nodes())
            .filter(|&id| positions[id] == NOT_IN_TOUR)
            .collect();
        Self {
            tour,
            index,
            positions,
            unused,
            moves: Vec::new(),
        }
    }

    fn collect(&mut self, change: TourChange, edge_swaps: bool) {
        let tour = self.tour;
        if tour.len() < 2 {
            return;
        }
        match change {
            TourChange::Replaced { position, removed } => {
                let dirty = [
                    tour.prev_position(position),
                    position,
                    tour.next_position(position),
                ];
                for p in dirty {
                    self.replacements_at(p);
                }
                self.insertions_of(removed);
                if edge_swaps {
                    for p in dirty {
                        self.edge_swaps_at(p);
                    }
                }
            }
            TourChange::Reversed { start, end } => {
                let dirty = [
                    tour.prev_position(start),
                    start,
                    end,
                    tour.next_position(end),
                ];
                for p in dirty {
                    self.replacements_at(p);
                }
                if edge_swaps {
                    for p in dirty {
                        self.edge_swaps_at(p);
                    }
                    self.edge_swaps_across(start, end);
                }
            }
        }
    }

    /// Replacements of the node at position `p`.
    fn replacements_at(&mut self, p: usize) {
        let tour = self.tour;
        match self.index {
            None => {
                for &node in &self.unused {
                    self.moves.push(RouteMove::replace(p, node));
                }
            }
            Some(index) => {
                let sources = [
                    tour.node_at(p),
                    tour.node_at(tour.prev_position(p)),
                    tour.node_at(tour.next_position(p)),
                ];
                for source in sources {
                    for &candidate in index.neighbors_of(source) {
                        if self.positions[candidate] == NOT_IN_TOUR {
                            self.moves.push(RouteMove::replace(p, candidate));
                        }
                    }
                }
            }
        }
    }

    /// Replacements bringing the unused node `node` into the tour.
    fn insertions_of(&mut self, node: NodeId) {
        let tour = self.tour;
        match self.index {
            None => {
                for p in 0..tour.len() {
                    self.moves.push(RouteMove::replace(p, node));
                }
            }
            Some(index) => {
                for &source in index.listed_by(node) {
                    let q = self.positions[source];
                    if q == NOT_IN_TOUR {
                        continue;
                    }
                    for p in [tour.prev_position(q), q, tour.next_position(q)] {
                        self.moves.push(RouteMove::replace(p, node));
                    }
                }
            }
        }
    }

    /// 2-opts removing an edge of the node at position `p`.
    fn edge_swaps_at(&mut self, p: usize) {
        let tour = self.tour;
        match self.index {
            None => {
                for anchor in [p, tour.next_position(p)] {
                    for other in 0..tour.len() {
                        self.push_edge_swap(anchor, other);
                    }
                }
            }
            Some(index) => {
                for related in index.related(tour.node_at(p)) {
                    let q = self.positions[related];
                    if q != NOT_IN_TOUR {
                        self.push_joining(p, q);
                    }
                }
            }
        }
    }

    /// 2-opts pairing an edge inside the reversed range `start..=end` with
    /// an edge outside it.
    fn edge_swaps_across(&mut self, start: usize, end: usize) {
        let tour = self.tour;
        let len = tour.len();
        match self.index {
            None => {
                for inside in (start + 1)..=end {
                    for outside in (0..len).filter(|&q| q < start || q > end + 1) {
                        self.push_edge_swap(inside, outside);
                    }
                }
            }
            Some(index) => {
                let is_inside = |q: usize| (start..=end).contains(&q);
                let inside_smaller = 2 * (end - start + 1) <= len;
                for p in (0..len).filter(|&p| is_inside(p) == inside_smaller) {
                    for related in index.related(tour.node_at(p)) {
                        let q = self.positions[related];
                        if q != NOT_IN_TOUR && is_inside(q) != inside_smaller {
                            self.push_joining(p, q);
                        }
                    }
                }
            }
        }
    }

    /// Both 2-opts adding the edge between the nodes at positions `p` and `q`.
    fn push_joining(&mut self, p: usize, q: usize) {
        let tour = self.tour;
        self.push_edge_swap(p, q);
        self.push_edge_swap(tour.next_position(p), tour.next_position(q));
    }

    /// The 2-opt removing the edges ending at positions `a` and `b`.
    fn push_edge_swap(&mut self, a: usize, b: usize) {
        let (lo, hi) = (a.min(b), a.max(b));
        let len = self.tour.len();
        // Adjacent edges only mirror part of the cycle.
        if hi - lo < 2 || hi - lo + 2 > len {
            return;
        }
        self.moves.push(RouteMove::swap_edges(lo, hi - 1));
    }
}
