//! Foragers for local search move selection
//!
//! Foragers collect improving moves during a neighborhood pass and pick
//! the one to apply.

use std::fmt::Debug;

use cycleforge_config::SearchStrategy;
use cycleforge_core::Tour;

use crate::heuristic::RouteMove;

/// Trait for collecting and selecting moves in local search.
///
/// Only improving moves (negative delta) are offered to a forager.
pub trait LocalSearchForager: Send + Debug {
    /// Called at the start of each pass to reset state.
    fn step_started(&mut self);

    /// Adds an improving move found on `tour` to the forager.
    fn add_move(&mut self, m: RouteMove, delta: i64, tour: &Tour);

    /// Returns true if the forager wants to stop evaluating more moves.
    fn is_quit_early(&self) -> bool;

    /// Picks the move to apply, or None if no move improved.
    fn pick_move(&mut self) -> Option<(RouteMove, i64)>;
}

/// Keeps the most improving move of a full pass (steepest descent).
///
/// Ties go to the move with the smallest [`MoveKey`](crate::heuristic::MoveKey),
/// so the pick does not depend on the order of the pass.
#[derive(Debug, Default, Clone)]
pub struct BestImprovingForager {
    best: Option<(RouteMove, i64)>,
}

impl BestImprovingForager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalSearchForager for BestImprovingForager {
    fn step_started(&mut self) {
        self.best = None;
    }

    fn add_move(&mut self, m: RouteMove, delta: i64, tour: &Tour) {
        let replace = match self.best {
            None => true,
            Some((best, best_delta)) => {
                delta < best_delta || (delta == best_delta && m.key(tour) < best.key(tour))
            }
        };
        if replace {
            self.best = Some((m, delta));
        }
    }

    fn is_quit_early(&self) -> bool {
        false
    }

    fn pick_move(&mut self) -> Option<(RouteMove, i64)> {
        self.best.take()
    }
}

/// Takes the first improving move (greedy descent).
#[derive(Debug, Default, Clone)]
pub struct FirstImprovingForager {
    accepted: Option<(RouteMove, i64)>,
}

impl FirstImprovingForager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalSearchForager for FirstImprovingForager {
    fn step_started(&mut self) {
        self.accepted = None;
    }

    fn add_move(&mut self, m: RouteMove, delta: i64, _tour: &Tour) {
        if self.accepted.is_none() {
            self.accepted = Some((m, delta));
        }
    }

    fn is_quit_early(&self) -> bool {
        self.accepted.is_some()
    }

    fn pick_move(&mut self) -> Option<(RouteMove, i64)> {
        self.accepted.take()
    }
}

/// Forager chosen from a [`SearchStrategy`].
#[derive(Debug, Clone)]
pub enum StrategyForager {
    Steepest(BestImprovingForager),
    Greedy(FirstImprovingForager),
}

impl StrategyForager {
    pub fn for_strategy(strategy: SearchStrategy) -> Self {
        match strategy {
            SearchStrategy::Steepest => StrategyForager::Steepest(BestImprovingForager::new()),
            SearchStrategy::Greedy => StrategyForager::Greedy(FirstImprovingForager::new()),
        }
    }
}

impl LocalSearchForager for StrategyForager {
    fn step_started(&mut self) {
        match self {
            StrategyForager::Steepest(f) => f.step_started(),
            StrategyForager::Greedy(f) => f.step_started(),
        }
    }

    #[inline]
    fn add_move(&mut self, m: RouteMove, delta: i64, tour: &Tour) {
        match self {
            StrategyForager::Steepest(f) => f.add_move(m, delta, tour),
            StrategyForager::Greedy(f) => f.add_move(m, delta, tour),
        }
    }

    #[inline]
    fn is_quit_early(&self) -> bool {
        match self {
            StrategyForager::Steepest(f) => f.is_quit_early(),
            StrategyForager::Greedy(f) => f.is_quit_early(),
        }
    }

    fn pick_move(&mut self) -> Option<(RouteMove, i64)> {
        match self {
            StrategyForager::Steepest(f) => f.pick_move(),
            StrategyForager::Greedy(f) => f.pick_move(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cycleforge_test::{random_instance, random_tour};

    #[test]
    fn test_best_improving_keeps_minimum() {
        let data = random_instance(20, 1);
        let tour = random_tour(&data, 1);
        let mut forager = BestImprovingForager::new();
        forager.step_started();
        forager.add_move(RouteMove::swap_edges(0, 2), -3, &tour);
        forager.add_move(RouteMove::swap_edges(1, 3), -7, &tour);
        forager.add_move(RouteMove::replace(0, 9), -1, &tour);
        assert!(!forager.is_quit_early());
        assert_eq!(forager.pick_move(), Some((RouteMove::swap_edges(1, 3), -7)));
        assert_eq!(forager.pick_move(), None);
    }

    #[test]
    fn test_best_improving_breaks_ties_by_key() {
        let data = random_instance(20, 1);
        let tour = random_tour(&data, 1);
        let a = RouteMove::swap_edges(1, 3);
        let b = RouteMove::swap_edges(2, 5);
        let smaller = if a.key(&tour) < b.key(&tour) { a } else { b };

        for order in [[a, b], [b, a]] {
            let mut forager = BestImprovingForager::new();
            forager.step_started();
            for m in order {
                forager.add_move(m, -7, &tour);
            }
            assert_eq!(forager.pick_move(), Some((smaller, -7)));
        }
    }

    #[test]
    fn test_first_improving_quits_early() {
        let mut forager = StrategyForager::for_strategy(SearchStrategy::Greedy);
        let data = random_instance(20, 1);
        let tour = random_tour(&data, 1);
        forager.step_started();
        assert!(!forager.is_quit_early());
        forager.add_move(RouteMove::replace(2, 5), -1, &tour);
        assert!(forager.is_quit_early());
        forager.add_move(RouteMove::replace(3, 5), -10, &tour);
        assert_eq!(forager.pick_move(), Some((RouteMove::replace(2, 5), -1)));
    }

    #[test]
    fn test_step_started_resets() {
        let mut forager = StrategyForager::for_strategy(SearchStrategy::Steepest);
        let data = random_instance(20, 1);
        let tour = random_tour(&data, 1);
        forager.add_move(RouteMove::swap_nodes(0, 1), -4, &tour);
        forager.step_started();
        assert_eq!(forager.pick_move(), None);
    }
}
