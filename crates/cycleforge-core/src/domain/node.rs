//! Node - a selectable point with a visiting cost.

/// Dense, 0-based node identifier.
pub type NodeId = usize;

/// A node of the problem: 2D coordinate plus non-negative visiting cost.
///
/// Nodes are immutable once loaded.
///
/// # Examples
///
/// ```
/// use cycleforge_core::Node;
///
/// let a = Node::new(0, 0.0, 0.0, 5);
/// let b = Node::new(1, 3.0, 4.0, 7);
/// assert_eq!(a.distance_to(&b), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    id: NodeId,
    x: f64,
    y: f64,
    cost: i64,
}

impl Node {
    pub fn new(id: NodeId, x: f64, y: f64, cost: i64) -> Self {
        Self { id, x, y, cost }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Euclidean distance to `other`, rounded to the nearest integer.
    pub fn distance_to(&self, other: &Node) -> i64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy).round() as i64
    }
}
