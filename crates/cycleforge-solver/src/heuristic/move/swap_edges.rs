//! SwapEdges - the 2-opt move.
//!
//! Reversing the closed range `[i, j]` of a cycle removes the edges
//! `(prev(i), i)` and `(j, next(j))` and reconnects them as
//! `(prev(i), j)` and `(i, next(j))`. Everything inside the range keeps its
//! edges (distances are symmetric), so the delta touches four nodes.

use cycleforge_core::{ProblemData, Tour};

use super::{rebuild, TourMove};

/// Reverses the tour segment between positions `i` and `j` inclusive.
///
/// The pair `(0, len - 1)` reverses the whole cycle, which is the same
/// cycle; its delta is zero and neighborhoods never generate it.
///
/// # Example
///
/// ```
/// use cycleforge_core::{ProblemData, Tour};
/// use cycleforge_solver::heuristic::{SwapEdges, TourMove};
///
/// let data = ProblemData::from_coordinates(
///     "square",
///     &[
///         (0.0, 0.0, 0), (10.0, 0.0, 0), (10.0, 10.0, 0), (0.0, 10.0, 0),
///         (50.0, 50.0, 0), (60.0, 50.0, 0), (60.0, 60.0, 0), (50.0, 60.0, 0),
///     ],
/// )
/// .unwrap();
/// // Crossed cycle 0 -> 2 -> 1 -> 3 -> 0.
/// let tour = Tour::new(vec![0, 2, 1, 3], &data, "seed", 0);
/// let m = SwapEdges::new(1, 2);
///
/// assert_eq!(m.delta(&tour, &data), 40 - 48);
/// assert_eq!(m.apply(&tour, &data).node_ids(), &[0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapEdges {
    i: usize,
    j: usize,
}

impl SwapEdges {
    /// Creates the move for the range `[min(i, j), max(i, j)]`.
    pub fn new(i: usize, j: usize) -> Self {
        if i <= j {
            Self { i, j }
        } else {
            Self { i: j, j: i }
        }
    }

    /// First position of the reversed range.
    pub fn start(&self) -> usize {
        self.i
    }

    /// Last position of the reversed range.
    pub fn end(&self) -> usize {
        self.j
    }

    /// Returns true for moves that leave the cycle unchanged.
    pub fn is_degenerate(&self, len: usize) -> bool {
        self.i == self.j || (self.i == 0 && self.j + 1 == len)
    }
}

impl TourMove for SwapEdges {
    fn is_doable(&self, tour: &Tour, _data: &ProblemData) -> bool {
        self.j < tour.len() && !self.is_degenerate(tour.len())
    }

    fn delta(&self, tour: &Tour, data: &ProblemData) -> i64 {
        if self.is_degenerate(tour.len()) {
            return 0;
        }
        let before = tour.node_at(tour.prev_position(self.i));
        let first = tour.node_at(self.i);
        let last = tour.node_at(self.j);
        let after = tour.node_at(tour.next_position(self.j));
        data.distance(before, last) + data.distance(first, after)
            - data.distance(before, first)
            - data.distance(last, after)
    }

    fn apply(&self, tour: &Tour, data: &ProblemData) -> Tour {
        let delta = self.delta(tour, data);
        let mut node_ids = tour.node_ids().to_vec();
        node_ids[self.i..=self.j].reverse();
        rebuild(tour, node_ids, delta)
    }
}
