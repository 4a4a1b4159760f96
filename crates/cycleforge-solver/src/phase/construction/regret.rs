//! Weighted 2-regret cycle construction.

use cycleforge_core::{CycleForgeError, NodeId, ProblemData, Result, Tour};

use super::PartialTour;
use crate::solver::Solver;

/// Grows a cycle by the node with the lowest weighted 2-regret score.
///
/// For each unvisited node, `best` and `second` are its two cheapest cyclic
/// insertion increases. The score is
/// `greed_weight * best - regret_weight * (second - best)`; a node with a
/// single possible insertion has zero regret. The chosen node goes to its
/// best position.
///
/// # Example
///
/// ```
/// use cycleforge_solver::{Regret2GreedyCycle, Solver};
/// use cycleforge_test::square::{square_with_decoys, PERIMETER_OBJECTIVE};
///
/// let data = square_with_decoys();
/// let mut seeder = Regret2GreedyCycle::new(1.0, 1.0).unwrap();
/// assert_eq!(seeder.solve(&data, 0).unwrap().objective(), PERIMETER_OBJECTIVE);
/// assert!(Regret2GreedyCycle::new(-1.0, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Regret2GreedyCycle {
    greed_weight: f64,
    regret_weight: f64,
}

impl Regret2GreedyCycle {
    /// # Errors
    ///
    /// Returns [`CycleForgeError::Config`] if a weight is negative or NaN.
    pub fn new(greed_weight: f64, regret_weight: f64) -> Result<Self> {
        if !(greed_weight >= 0.0 && regret_weight >= 0.0) {
            return Err(CycleForgeError::Config(format!(
                "regret weights must be non-negative, got greed {greed_weight} and regret {regret_weight}"
            )));
        }
        Ok(Self {
            greed_weight,
            regret_weight,
        })
    }

    pub fn greed_weight(&self) -> f64 {
        self.greed_weight
    }

    pub fn regret_weight(&self) -> f64 {
        self.regret_weight
    }
}

impl Default for Regret2GreedyCycle {
    fn default() -> Self {
        Self {
            greed_weight: 1.0,
            regret_weight: 1.0,
        }
    }
}

impl Solver for Regret2GreedyCycle {
    fn solve(&mut self, data: &ProblemData, start_node: NodeId) -> Result<Tour> {
        let mut cycle = PartialTour::start(data, start_node)?;

        if !cycle.is_complete() {
            let second = cycle
                .nearest_unvisited(data, start_node)
                .ok_or_else(|| cycle.exhausted())?;
            cycle.push(second);
        }

        while !cycle.is_complete() {
            let mut best: Option<(f64, NodeId, usize)> = None;
            for candidate in cycle.unvisited() {
                let insertion = cycle.cyclic_insertion(data, candidate);
                let regret = insertion
                    .second_increase
                    .map_or(0, |second| second - insertion.increase);
                let score = self.greed_weight * insertion.increase as f64
                    - self.regret_weight * regret as f64;
                match best {
                    Some((lowest, _, _)) if lowest <= score => {}
                    _ => best = Some((score, candidate, insertion.position)),
                }
            }
            let (_, node, position) = best.ok_or_else(|| cycle.exhausted())?;
            cycle.insert(position, node);
        }

        Ok(cycle.finish(data, self.name(), start_node))
    }

    fn name(&self) -> String {
        format!(
            "Greedy 2-Regret Cycle (greed {:.2}, regret {:.2})",
            self.greed_weight, self.regret_weight
        )
    }
}
