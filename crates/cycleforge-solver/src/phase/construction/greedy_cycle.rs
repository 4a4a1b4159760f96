//! Greedy cycle construction.

use cycleforge_core::{NodeId, ProblemData, Result, Tour};

use super::PartialTour;
use crate::solver::Solver;

/// Grows a cycle by cheapest insertion.
///
/// Starts from the start node and its nearest node (by distance plus
/// cost), closes a triangle with the node of lowest triangle objective and
/// then repeatedly inserts the node whose best cyclic insertion increases
/// the objective least.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyCycle;

impl GreedyCycle {
    pub fn new() -> Self {
        Self
    }
}

impl Solver for GreedyCycle {
    fn solve(&mut self, data: &ProblemData, start_node: NodeId) -> Result<Tour> {
        let mut cycle = PartialTour::start(data, start_node)?;

        if !cycle.is_complete() {
            let second = cycle
                .nearest_unvisited(data, start_node)
                .ok_or_else(|| cycle.exhausted())?;
            cycle.push(second);
        }

        if !cycle.is_complete() {
            let (a, b) = (cycle.nodes()[0], cycle.nodes()[1]);
            // The (a, b) leg and both costs are shared by every triangle.
            let third = cycle
                .unvisited()
                .min_by_key(|&c| (data.distance(b, c) + data.distance(c, a) + data.cost(c), c))
                .ok_or_else(|| cycle.exhausted())?;
            cycle.push(third);
        }

        while !cycle.is_complete() {
            let mut best: Option<(i64, NodeId, usize)> = None;
            for candidate in cycle.unvisited() {
                let insertion = cycle.cyclic_insertion(data, candidate);
                match best {
                    Some((lowest, _, _)) if lowest <= insertion.increase => {}
                    _ => best = Some((insertion.increase, candidate, insertion.position)),
                }
            }
            let (_, node, position) = best.ok_or_else(|| cycle.exhausted())?;
            cycle.insert(position, node);
        }

        Ok(cycle.finish(data, self.name(), start_node))
    }

    fn name(&self) -> String {
        "Greedy Cycle".to_string()
    }
}
