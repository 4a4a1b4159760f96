//! ReplaceNode - exchange a selected node for an unused one.

use cycleforge_core::{NodeId, ProblemData, Tour};

use super::{rebuild, TourMove};

/// Replaces the node at `position` with the unused node `node`.
///
/// Removes the two edges touching `position` and the old node's visiting
/// cost, then adds the two edges to `node` and its cost.
///
/// # Example
///
/// ```
/// use cycleforge_core::{ProblemData, Tour};
/// use cycleforge_solver::heuristic::{ReplaceNode, TourMove};
///
/// let data = ProblemData::from_coordinates(
///     "line",
///     &[(0.0, 0.0, 0), (10.0, 0.0, 0), (20.0, 0.0, 50), (5.0, 0.0, 0)],
/// )
/// .unwrap();
/// let tour = Tour::new(vec![0, 2], &data, "seed", 0);
///
/// let m = ReplaceNode::new(1, 3);
/// assert_eq!(m.delta(&tour, &data), (5 + 5) - (20 + 20 + 50));
/// assert_eq!(m.apply(&tour, &data).node_ids(), &[0, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplaceNode {
    position: usize,
    node: NodeId,
}

impl ReplaceNode {
    pub fn new(position: usize, node: NodeId) -> Self {
        Self { position, node }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The incoming node.
    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl TourMove for ReplaceNode {
    fn is_doable(&self, tour: &Tour, data: &ProblemData) -> bool {
        self.position < tour.len()
            && self.node < data.total_nodes()
            && !tour.contains(self.node)
    }

    fn delta(&self, tour: &Tour, data: &ProblemData) -> i64 {
        let outgoing = tour.node_at(self.position);
        let incoming = self.node;
        let cost_change = data.cost(incoming) - data.cost(outgoing);
        if tour.len() == 1 {
            return cost_change;
        }
        let prev = tour.node_at(tour.prev_position(self.position));
        let next = tour.node_at(tour.next_position(self.position));
        cost_change + data.distance(prev, incoming) + data.distance(incoming, next)
            - data.distance(prev, outgoing)
            - data.distance(outgoing, next)
    }

    fn apply(&self, tour: &Tour, data: &ProblemData) -> Tour {
        let delta = self.delta(tour, data);
        let mut node_ids = tour.node_ids().to_vec();
        node_ids[self.position] = self.node;
        rebuild(tour, node_ids, delta)
    }
}
