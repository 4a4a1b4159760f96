//! Construction heuristics
//!
//! Seeders that build a tour of the required size from a start node. Every
//! seeder implements [`Solver`](crate::Solver), so any of them can feed a
//! local search.
//!
//! # Seeders
//!
//! - [`RandomSeeder`] - seeded random selection
//! - [`NearestNeighborEnd`] - grows a path at its end
//! - [`NearestNeighborAnyPosition`] - grows a path at its cheapest position
//! - [`GreedyCycle`] - grows a cycle by cheapest insertion
//! - [`Regret2GreedyCycle`] - grows a cycle by weighted 2-regret

mod greedy_cycle;
mod nearest_neighbor;
mod random;
mod regret;

#[cfg(test)]
mod tests;

use std::time::Instant;

use cycleforge_core::{CycleForgeError, NodeId, ProblemData, Result, Tour};

pub use greedy_cycle::GreedyCycle;
pub use nearest_neighbor::{NearestNeighborAnyPosition, NearestNeighborEnd};
pub use random::RandomSeeder;
pub use regret::Regret2GreedyCycle;

/// Best and second-best cyclic insertion of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CyclicInsertion {
    pub increase: i64,
    pub position: usize,
    pub second_increase: Option<i64>,
}

/// A tour under construction: the chosen nodes plus a visited flag per node.
#[derive(Debug)]
pub(crate) struct PartialTour {
    nodes: Vec<NodeId>,
    visited: Vec<bool>,
    required: usize,
    started: Instant,
}

impl PartialTour {
    /// Begins a tour at `start_node`.
    pub fn start(data: &ProblemData, start_node: NodeId) -> Result<Self> {
        let n = data.total_nodes();
        if start_node >= n {
            return Err(CycleForgeError::InvalidTour(format!(
                "start node {start_node} out of range for {n} nodes"
            )));
        }
        let mut visited = vec![false; n];
        visited[start_node] = true;
        Ok(Self {
            nodes: vec![start_node],
            visited,
            required: data.selection_size(),
            started: Instant::now(),
        })
    }

    pub fn is_complete(&self) -> bool {
        self.nodes.len() >= self.required
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn last(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn unvisited(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.visited
            .iter()
            .enumerate()
            .filter(|&(_, &seen)| !seen)
            .map(|(id, _)| id)
    }

    pub fn push(&mut self, node: NodeId) {
        self.insert(self.nodes.len(), node);
    }

    pub fn insert(&mut self, position: usize, node: NodeId) {
        debug_assert!(!self.visited[node]);
        self.nodes.insert(position, node);
        self.visited[node] = true;
    }

    /// Error for a construction that ran out of nodes to place.
    pub fn exhausted(&self) -> CycleForgeError {
        CycleForgeError::SearchExhausted {
            placed: self.nodes.len(),
            required: self.required,
        }
    }

    /// Unvisited node minimizing `distance(from, c) + cost(c)`, lowest id on ties.
    pub fn nearest_unvisited(&self, data: &ProblemData, from: NodeId) -> Option<NodeId> {
        self.unvisited()
            .min_by_key(|&c| (data.weighted_distance(from, c), c))
    }

    /// Cheapest insertion of `candidate` between two cycle neighbours.
    ///
    /// Position `i + 1` places the node after the i-th cycle node.
    pub fn cyclic_insertion(&self, data: &ProblemData, candidate: NodeId) -> CyclicInsertion {
        let len = self.nodes.len();
        let mut best = CyclicInsertion {
            increase: i64::MAX,
            position: len,
            second_increase: None,
        };
        for i in 0..len {
            let current = self.nodes[i];
            let next = self.nodes[(i + 1) % len];
            let increase = data.distance(current, candidate) + data.distance(candidate, next)
                - data.distance(current, next)
                + data.cost(candidate);
            if increase < best.increase {
                if best.increase != i64::MAX {
                    best.second_increase = Some(best.increase);
                }
                best.increase = increase;
                best.position = i + 1;
            } else {
                match best.second_increase {
                    Some(second) if second <= increase => {}
                    _ => best.second_increase = Some(increase),
                }
            }
        }
        best
    }

    pub fn finish(self, data: &ProblemData, algorithm: String, start_node: NodeId) -> Tour {
        Tour::new(self.nodes, data, algorithm, start_node).with_execution_time(self.started.elapsed())
    }
}
