//! Multi-start local search.

use cycleforge_config::LocalSearchConfig;
use cycleforge_core::{CycleForgeError, NodeId, ProblemData, Result, Tour};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::phase::construction::RandomSeeder;
use crate::phase::localsearch::LocalSearch;
use crate::solver::Solver;
use crate::stats::SearchStats;

/// Runs the configured local search from `iterations` random seed tours
/// and keeps the best result.
///
/// Per-iteration seeds come from a master stream seeded with `seed`, so a
/// solve is fully reproducible. All iterations share one candidate index.
#[derive(Debug)]
pub struct MultiStartLocalSearch {
    engine: LocalSearch,
    iterations: usize,
    seed: u64,
}

impl MultiStartLocalSearch {
    /// # Errors
    ///
    /// Returns [`CycleForgeError::Config`] if `iterations` is zero or the
    /// local search configuration is invalid.
    pub fn new(config: LocalSearchConfig, iterations: usize, seed: u64) -> Result<Self> {
        if iterations == 0 {
            return Err(CycleForgeError::Config(
                "multi-start needs at least one iteration".to_string(),
            ));
        }
        let engine = LocalSearch::new(RandomSeeder::new(seed), config)?;
        Ok(Self {
            engine,
            iterations,
            seed,
        })
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Statistics summed over every iteration of the most recent solve.
    pub fn stats(&self) -> &SearchStats {
        self.engine.stats()
    }
}

impl Solver for MultiStartLocalSearch {
    fn solve(&mut self, data: &ProblemData, start_node: NodeId) -> Result<Tour> {
        let mut master = ChaCha8Rng::seed_from_u64(self.seed);
        self.engine.reseed(self.seed);
        self.engine.reset_stats();
        info!(
            event = "solve_start",
            solver = %self.name(),
            total_nodes = data.total_nodes(),
            selection_size = data.selection_size(),
            iterations = self.iterations,
        );

        let mut best: Option<Tour> = None;
        for iteration in 0..self.iterations {
            let iteration_seed: u64 = master.random();
            let seed_tour = RandomSeeder::new(iteration_seed).solve(data, start_node)?;
            let tour = self.engine.improve(data, seed_tour)?;
            match &best {
                Some(incumbent) if incumbent.objective() <= tour.objective() => {}
                _ => {
                    debug!(
                        event = "progress",
                        iteration = iteration,
                        objective = tour.objective(),
                    );
                    best = Some(tour);
                }
            }
        }
        let best = best.ok_or(CycleForgeError::SearchExhausted {
            placed: 0,
            required: data.selection_size(),
        })?;

        let stats = self.engine.stats();
        let elapsed = stats.elapsed();
        info!(
            event = "solve_end",
            duration_ms = elapsed.as_millis() as u64,
            steps = stats.steps,
            moves_evaluated = stats.moves_evaluated,
            speed = stats.moves_per_second(),
            objective = best.objective(),
        );
        Ok(best
            .relabeled(self.name(), start_node)
            .with_execution_time(elapsed))
    }

    fn name(&self) -> String {
        format!(
            "Multi-Start Local Search ({} iterations) - {}",
            self.iterations,
            self.engine.name()
        )
    }
}
