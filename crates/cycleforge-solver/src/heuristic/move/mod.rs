//! Move system for tour local search.
//!
//! Moves reference tour positions, never node identities, so that their
//! delta can be evaluated in O(1) against the current tour without
//! rebuilding any state.
//!
//! # Architecture
//!
//! - [`TourMove`] - delta evaluation and application for one move type
//! - [`RouteMove`] - closed union of all move types, dispatched by match
//! - [`MoveKey`] - node-based identity of a move, independent of where the
//!   cycle starts and which way it is traversed

mod replace_node;
mod swap_edges;
mod swap_nodes;

#[cfg(test)]
mod tests;

use std::fmt::Debug;

use cycleforge_core::{NodeId, ProblemData, Tour};

pub use replace_node::ReplaceNode;
pub use swap_edges::SwapEdges;
pub use swap_nodes::SwapNodes;

/// A perturbation of a tour with an O(1) objective delta.
///
/// Implementations must guarantee
/// `full_cost(m.apply(tour).node_ids()) == tour.objective() + m.delta(tour)`
/// for every move where [`is_doable`](TourMove::is_doable) holds.
pub trait TourMove: Copy + Debug + PartialEq {
    /// Returns true if the move references valid positions of `tour`.
    fn is_doable(&self, tour: &Tour, data: &ProblemData) -> bool;

    /// Signed change of the objective if the move were applied.
    fn delta(&self, tour: &Tour, data: &ProblemData) -> i64;

    /// Returns the tour with this move applied.
    ///
    /// The objective of the result is `tour.objective() + delta`.
    fn apply(&self, tour: &Tour, data: &ProblemData) -> Tour;
}

/// Any route move, dispatched by match in the delta evaluation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteMove {
    Replace(ReplaceNode),
    SwapEdges(SwapEdges),
    SwapNodes(SwapNodes),
}

impl RouteMove {
    pub fn replace(position: usize, node: usize) -> Self {
        RouteMove::Replace(ReplaceNode::new(position, node))
    }

    pub fn swap_edges(i: usize, j: usize) -> Self {
        RouteMove::SwapEdges(SwapEdges::new(i, j))
    }

    pub fn swap_nodes(i: usize, j: usize) -> Self {
        RouteMove::SwapNodes(SwapNodes::new(i, j))
    }

    /// Short label used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            RouteMove::Replace(_) => "replace",
            RouteMove::SwapEdges(_) => "swap_edges",
            RouteMove::SwapNodes(_) => "swap_nodes",
        }
    }

    /// Identity of this move on `tour`.
    ///
    /// Two moves share a key exactly when they turn the cycle of `tour`
    /// into the same cycle, whatever positions they are expressed in.
    pub fn key(&self, tour: &Tour) -> MoveKey {
        match self {
            RouteMove::Replace(m) => {
                let position = m.position();
                MoveKey::replace(
                    tour.node_at(tour.prev_position(position)),
                    tour.node_at(position),
                    tour.node_at(tour.next_position(position)),
                    m.node(),
                )
            }
            RouteMove::SwapEdges(m) => MoveKey::edge_swap(
                (
                    tour.node_at(tour.prev_position(m.start())),
                    tour.node_at(m.start()),
                ),
                (
                    tour.node_at(m.end()),
                    tour.node_at(tour.next_position(m.end())),
                ),
            ),
            RouteMove::SwapNodes(m) => {
                let a = tour.node_at(m.first());
                let b = tour.node_at(m.second());
                MoveKey::NodeSwap([a.min(b), a.max(b)])
            }
        }
    }

    /// Describes what applying this move to `before` rewrites.
    ///
    /// Node swaps are not described.
    pub fn change(&self, before: &Tour) -> Option<TourChange> {
        match self {
            RouteMove::Replace(m) => Some(TourChange::Replaced {
                position: m.position(),
                removed: before.node_at(m.position()),
            }),
            RouteMove::SwapEdges(m) => Some(TourChange::Reversed {
                start: m.start(),
                end: m.end(),
            }),
            RouteMove::SwapNodes(_) => None,
        }
    }
}

/// Node-based identity of a move.
///
/// Ordered, so that ties between equally improving moves can be broken the
/// same way no matter in which order the moves were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoveKey {
    /// `[prev, removed, next, inserted]`, neighbours in either order.
    Replace([NodeId; 4]),
    /// `[a, b, c, d]` for removed edges `(a, b)`, `(c, d)` and added edges
    /// `(a, c)`, `(b, d)`.
    EdgeSwap([NodeId; 4]),
    /// The two exchanged nodes, ascending.
    NodeSwap([NodeId; 2]),
}

impl MoveKey {
    pub fn replace(prev: NodeId, removed: NodeId, next: NodeId, inserted: NodeId) -> Self {
        MoveKey::Replace(std::cmp::min(
            [prev, removed, next, inserted],
            [next, removed, prev, inserted],
        ))
    }

    /// Key of the 2-opt removing `(a, b)` and `(c, d)` and adding `(a, c)`
    /// and `(b, d)`.
    pub fn edge_swap((a, b): (NodeId, NodeId), (c, d): (NodeId, NodeId)) -> Self {
        // Reflection and complement describe the same reconnection.
        let forms = [[a, b, c, d], [d, c, b, a], [c, d, a, b], [b, a, d, c]];
        MoveKey::EdgeSwap(forms.into_iter().min().unwrap_or([a, b, c, d]))
    }
}

/// Part of a tour rewritten by an applied move, in positions of the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourChange {
    /// `removed` left the tour; a new node now sits at `position`.
    Replaced { position: usize, removed: NodeId },
    /// The range `start..=end` was reversed.
    Reversed { start: usize, end: usize },
}

impl TourMove for RouteMove {
    #[inline]
    fn is_doable(&self, tour: &Tour, data: &ProblemData) -> bool {
        match self {
            RouteMove::Replace(m) => m.is_doable(tour, data),
            RouteMove::SwapEdges(m) => m.is_doable(tour, data),
            RouteMove::SwapNodes(m) => m.is_doable(tour, data),
        }
    }

    #[inline]
    fn delta(&self, tour: &Tour, data: &ProblemData) -> i64 {
        match self {
            RouteMove::Replace(m) => m.delta(tour, data),
            RouteMove::SwapEdges(m) => m.delta(tour, data),
            RouteMove::SwapNodes(m) => m.delta(tour, data),
        }
    }

    fn apply(&self, tour: &Tour, data: &ProblemData) -> Tour {
        match self {
            RouteMove::Replace(m) => m.apply(tour, data),
            RouteMove::SwapEdges(m) => m.apply(tour, data),
            RouteMove::SwapNodes(m) => m.apply(tour, data),
        }
    }
}

impl From<ReplaceNode> for RouteMove {
    fn from(m: ReplaceNode) -> Self {
        RouteMove::Replace(m)
    }
}

impl From<SwapEdges> for RouteMove {
    fn from(m: SwapEdges) -> Self {
        RouteMove::SwapEdges(m)
    }
}

impl From<SwapNodes> for RouteMove {
    fn from(m: SwapNodes) -> Self {
        RouteMove::SwapNodes(m)
    }
}

/// Builds the successor tour of a move from an edited node buffer.
pub(crate) fn rebuild(tour: &Tour, node_ids: Vec<usize>, delta: i64) -> Tour {
    Tour::with_objective(
        node_ids,
        tour.objective() + delta,
        tour.algorithm(),
        tour.start_node(),
    )
}
