//! Nearest-neighbour path construction.
//!
//! Both variants grow an open path from the start node; the tour closes it.

use cycleforge_core::{insertion_cost, NodeId, ProblemData, Result, Tour};

use super::PartialTour;
use crate::solver::Solver;

/// Appends the unvisited node minimizing `distance(last, c) + cost(c)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighborEnd;

impl NearestNeighborEnd {
    pub fn new() -> Self {
        Self
    }
}

impl Solver for NearestNeighborEnd {
    fn solve(&mut self, data: &ProblemData, start_node: NodeId) -> Result<Tour> {
        let mut path = PartialTour::start(data, start_node)?;
        while !path.is_complete() {
            let next = path
                .nearest_unvisited(data, path.last())
                .ok_or_else(|| path.exhausted())?;
            path.push(next);
        }
        Ok(path.finish(data, self.name(), start_node))
    }

    fn name(&self) -> String {
        "Nearest Neighbor (End)".to_string()
    }
}

/// Inserts the (node, position) pair with the lowest open-path insertion cost.
///
/// Positions range over both path ends and every interior gap.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighborAnyPosition;

impl NearestNeighborAnyPosition {
    pub fn new() -> Self {
        Self
    }
}

impl Solver for NearestNeighborAnyPosition {
    fn solve(&mut self, data: &ProblemData, start_node: NodeId) -> Result<Tour> {
        let mut path = PartialTour::start(data, start_node)?;
        while !path.is_complete() {
            let mut best: Option<(i64, NodeId, usize)> = None;
            for candidate in path.unvisited() {
                for position in 0..=path.nodes().len() {
                    let increase = insertion_cost(data, path.nodes(), candidate, position);
                    match best {
                        Some((lowest, _, _)) if lowest <= increase => {}
                        _ => best = Some((increase, candidate, position)),
                    }
                }
            }
            let (_, node, position) = best.ok_or_else(|| path.exhausted())?;
            path.insert(position, node);
        }
        Ok(path.finish(data, self.name(), start_node))
    }

    fn name(&self) -> String {
        "Nearest Neighbor (Any Position)".to_string()
    }
}
