//! ProblemData - immutable node set with a precomputed distance matrix.

use std::sync::atomic::{AtomicU64, Ordering};

use super::{Node, NodeId};
use crate::error::{InstanceError, Result};

static NEXT_PROBLEM_ID: AtomicU64 = AtomicU64::new(1);

/// Largest accepted coordinate magnitude.
///
/// Keeps every rounded distance, and any tour objective built from them,
/// well inside `i64`.
pub const MAX_COORDINATE: f64 = 1e12;

/// Immutable problem data shared by reference across a search.
///
/// Holds the nodes (index = identifier), a square integer distance matrix
/// (symmetric, zero diagonal, rounded Euclidean) and the derived selection
/// size `ceil(n / 2)`.
///
/// Every instance receives a process-unique id so derived structures such
/// as candidate indexes can be cached per problem.
///
/// # Examples
///
/// ```
/// use cycleforge_core::ProblemData;
///
/// let data = ProblemData::from_coordinates(
///     "square",
///     &[(0.0, 0.0, 0), (10.0, 0.0, 0), (10.0, 10.0, 0), (0.0, 10.0, 0), (5.0, 5.0, 100)],
/// )
/// .unwrap();
///
/// assert_eq!(data.total_nodes(), 5);
/// assert_eq!(data.selection_size(), 3);
/// assert_eq!(data.distance(0, 2), 14);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemData {
    id: u64,
    name: String,
    nodes: Vec<Node>,
    distances: Vec<i64>,
    selection_size: usize,
}

impl ProblemData {
    /// Builds problem data from nodes whose ids match their index.
    pub fn new(name: impl Into<String>, nodes: Vec<Node>) -> Result<Self> {
        if nodes.is_empty() {
            return Err(InstanceError::Empty.into());
        }
        for (index, node) in nodes.iter().enumerate() {
            if node.id() != index {
                return Err(InstanceError::NodeIdMismatch {
                    expected: index,
                    found: node.id(),
                }
                .into());
            }
            let in_range = |v: f64| v.is_finite() && v.abs() <= MAX_COORDINATE;
            if !in_range(node.x()) || !in_range(node.y()) {
                return Err(InstanceError::InvalidCoordinate { node: index }.into());
            }
            if node.cost() < 0 {
                return Err(InstanceError::NegativeCost {
                    node: index,
                    cost: node.cost(),
                }
                .into());
            }
        }

        let n = nodes.len();
        let mut distances = vec![0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = nodes[i].distance_to(&nodes[j]);
                distances[i * n + j] = d;
                distances[j * n + i] = d;
            }
        }

        Ok(Self {
            id: NEXT_PROBLEM_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            nodes,
            distances,
            selection_size: n.div_ceil(2),
        })
    }

    /// Builds problem data from `(x, y, cost)` triples, assigning ids in order.
    pub fn from_coordinates(name: impl Into<String>, points: &[(f64, f64, i64)]) -> Result<Self> {
        let nodes = points
            .iter()
            .enumerate()
            .map(|(id, &(x, y, cost))| Node::new(id, x, y, cost))
            .collect();
        Self::new(name, nodes)
    }

    /// Process-unique identity of this problem instance.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn total_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes a valid tour must contain.
    pub fn selection_size(&self) -> usize {
        self.selection_size
    }

    #[inline]
    pub fn distance(&self, a: NodeId, b: NodeId) -> i64 {
        self.distances[a * self.nodes.len() + b]
    }

    #[inline]
    pub fn cost(&self, id: NodeId) -> i64 {
        self.nodes[id].cost()
    }

    /// Distance from `from` to `to` plus the visiting cost of `to`.
    #[inline]
    pub fn weighted_distance(&self, from: NodeId, to: NodeId) -> i64 {
        self.distance(from, to) + self.cost(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CycleForgeError;

    #[test]
    fn test_distance_matrix_is_symmetric() {
        let data =
            ProblemData::from_coordinates("t", &[(0.0, 0.0, 0), (3.0, 4.0, 1), (6.0, 8.0, 2)])
                .unwrap();
        for a in 0..3 {
            assert_eq!(data.distance(a, a), 0);
            for b in 0..3 {
                assert_eq!(data.distance(a, b), data.distance(b, a));
            }
        }
        assert_eq!(data.distance(0, 2), 10);
        assert_eq!(data.weighted_distance(0, 2), 12);
    }

    #[test]
    fn test_selection_size_rounds_up() {
        let one = ProblemData::from_coordinates("t", &[(0.0, 0.0, 0)]).unwrap();
        assert_eq!(one.selection_size(), 1);

        let points: Vec<_> = (0..7).map(|i| (i as f64, 0.0, 0)).collect();
        let seven = ProblemData::from_coordinates("t", &points).unwrap();
        assert_eq!(seven.selection_size(), 4);
    }

    #[test]
    fn test_ids_are_unique_per_instance() {
        let a = ProblemData::from_coordinates("a", &[(0.0, 0.0, 0)]).unwrap();
        let b = ProblemData::from_coordinates("b", &[(0.0, 0.0, 0)]).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_rejects_invalid_nodes() {
        assert!(matches!(
            ProblemData::new("t", Vec::new()),
            Err(CycleForgeError::Instance(InstanceError::Empty))
        ));
        assert!(matches!(
            ProblemData::new("t", vec![Node::new(1, 0.0, 0.0, 0)]),
            Err(CycleForgeError::Instance(InstanceError::NodeIdMismatch { .. }))
        ));
        assert!(matches!(
            ProblemData::new("t", vec![Node::new(0, 0.0, 0.0, -3)]),
            Err(CycleForgeError::Instance(InstanceError::NegativeCost { .. }))
        ));
    }

    #[test]
    fn test_rejects_unusable_coordinates() {
        for (x, y) in [
            (f64::INFINITY, 0.0),
            (0.0, f64::NEG_INFINITY),
            (f64::NAN, 0.0),
            (0.0, 2.0 * MAX_COORDINATE),
        ] {
            let result =
                ProblemData::from_coordinates("t", &[(0.0, 0.0, 0), (x, y, 0), (0.0, 1.0, 0)]);
            assert!(
                matches!(
                    result,
                    Err(CycleForgeError::Instance(InstanceError::InvalidCoordinate { node: 1 }))
                ),
                "({x}, {y})"
            );
        }

        let edge = ProblemData::from_coordinates(
            "t",
            &[(-MAX_COORDINATE, 0.0, 0), (MAX_COORDINATE, 0.0, 0)],
        )
        .unwrap();
        assert_eq!(edge.distance(0, 1), 2_000_000_000_000);
    }
}
