//! SwapNodes - exchange the nodes at two positions without reversal.

use cycleforge_core::{ProblemData, Tour};

use super::{rebuild, TourMove};

/// Exchanges the tour members at positions `i` and `j`.
///
/// Adjacent positions (including the wrap-around pair `(0, len - 1)`) share
/// an edge that survives the swap, so only two distances change on each
/// side. On cycles of three or fewer nodes every exchange yields the same
/// cycle and the delta is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapNodes {
    i: usize,
    j: usize,
}

impl SwapNodes {
    /// Creates the move, normalised so that `first() <= second()`.
    pub fn new(i: usize, j: usize) -> Self {
        if i <= j {
            Self { i, j }
        } else {
            Self { i: j, j: i }
        }
    }

    pub fn first(&self) -> usize {
        self.i
    }

    pub fn second(&self) -> usize {
        self.j
    }
}

impl TourMove for SwapNodes {
    fn is_doable(&self, tour: &Tour, _data: &ProblemData) -> bool {
        self.i != self.j && self.j < tour.len()
    }

    fn delta(&self, tour: &Tour, data: &ProblemData) -> i64 {
        let len = tour.len();
        if self.i == self.j || len <= 3 {
            return 0;
        }

        // Orient adjacent pairs so that `left` directly precedes `right`.
        let adjacent = if self.j == self.i + 1 {
            Some((self.i, self.j))
        } else if self.i == 0 && self.j + 1 == len {
            Some((self.j, self.i))
        } else {
            None
        };

        if let Some((left, right)) = adjacent {
            let before = tour.node_at(tour.prev_position(left));
            let x = tour.node_at(left);
            let y = tour.node_at(right);
            let after = tour.node_at(tour.next_position(right));
            return data.distance(before, y) + data.distance(x, after)
                - data.distance(before, x)
                - data.distance(y, after);
        }

        let x = tour.node_at(self.i);
        let y = tour.node_at(self.j);
        let x_prev = tour.node_at(tour.prev_position(self.i));
        let x_next = tour.node_at(tour.next_position(self.i));
        let y_prev = tour.node_at(tour.prev_position(self.j));
        let y_next = tour.node_at(tour.next_position(self.j));

        let removed = data.distance(x_prev, x)
            + data.distance(x, x_next)
            + data.distance(y_prev, y)
            + data.distance(y, y_next);
        let added = data.distance(x_prev, y)
            + data.distance(y, x_next)
            + data.distance(y_prev, x)
            + data.distance(x, y_next);
        added - removed
    }

    fn apply(&self, tour: &Tour, data: &ProblemData) -> Tour {
        let delta = self.delta(tour, data);
        let mut node_ids = tour.node_ids().to_vec();
        node_ids.swap(self.i, self.j);
        rebuild(tour, node_ids, delta)
    }
}
