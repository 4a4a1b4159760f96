//! Iterated local search with double-bridge perturbation.

use std::time::{Duration, Instant};

use cycleforge_config::LocalSearchConfig;
use cycleforge_core::{CycleForgeError, NodeId, ProblemData, Result, Tour};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::phase::construction::RandomSeeder;
use crate::phase::localsearch::LocalSearch;
use crate::solver::Solver;
use crate::stats::SearchStats;

/// Cuts the tour into four non-empty segments `A|B|C|D` and reconnects
/// them as `A|D|C|B`.
///
/// Returns None for tours shorter than four nodes.
///
/// # Example
///
/// ```
/// use cycleforge_core::Tour;
/// use cycleforge_solver::meta::double_bridge;
/// use cycleforge_test::random_instance;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let data = random_instance(20, 1);
/// let tour = Tour::new((0..10).collect(), &data, "seed", 0);
/// let mut rng = ChaCha8Rng::seed_from_u64(4);
/// let kicked = double_bridge(&tour, &data, &mut rng).unwrap();
///
/// assert_eq!(kicked.node_ids()[0], 0);
/// assert_eq!(kicked.len(), tour.len());
/// ```
pub fn double_bridge<R: Rng + ?Sized>(tour: &Tour, data: &ProblemData, rng: &mut R) -> Option<Tour> {
    let len = tour.len();
    if len < 4 {
        return None;
    }
    let mut cuts: Vec<usize> = rand::seq::index::sample(rng, len - 1, 3)
        .into_iter()
        .map(|cut| cut + 1)
        .collect();
    cuts.sort_unstable();
    let (first, second, third) = (cuts[0], cuts[1], cuts[2]);

    let ids = tour.node_ids();
    let mut kicked = Vec::with_capacity(len);
    kicked.extend_from_slice(&ids[..first]);
    kicked.extend_from_slice(&ids[third..]);
    kicked.extend_from_slice(&ids[second..third]);
    kicked.extend_from_slice(&ids[first..second]);
    Some(Tour::new(kicked, data, "Double Bridge", tour.start_node()))
}

/// Perturbs the current tour and re-runs the local search until the time
/// limit expires.
///
/// Starts from a random tour refined by the local search. A refined
/// perturbation replaces the current tour when it is not worse; the best
/// tour seen is returned.
#[derive(Debug)]
pub struct IteratedLocalSearch {
    engine: LocalSearch,
    time_limit: Duration,
    seed: u64,
    local_search_runs: u64,
}

impl IteratedLocalSearch {
    /// # Errors
    ///
    /// Returns [`CycleForgeError::Config`] if `time_limit` is zero or the
    /// local search configuration is invalid.
    pub fn new(config: LocalSearchConfig, time_limit: Duration, seed: u64) -> Result<Self> {
        if time_limit.is_zero() {
            return Err(CycleForgeError::Config(
                "iterated local search needs a positive time limit".to_string(),
            ));
        }
        let engine = LocalSearch::new(RandomSeeder::new(seed), config)?;
        Ok(Self {
            engine,
            time_limit,
            seed,
            local_search_runs: 0,
        })
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Local search runs of the most recent solve, including the first.
    pub fn local_search_runs(&self) -> u64 {
        self.local_search_runs
    }

    /// Statistics summed over every local search run of the most recent solve.
    pub fn stats(&self) -> &SearchStats {
        self.engine.stats()
    }
}

impl Solver for IteratedLocalSearch {
    fn solve(&mut self, data: &ProblemData, start_node: NodeId) -> Result<Tour> {
        let started = Instant::now();
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.engine.reseed(self.seed);
        self.engine.reset_stats();
        self.local_search_runs = 0;
        info!(
            event = "solve_start",
            solver = %self.name(),
            total_nodes = data.total_nodes(),
            selection_size = data.selection_size(),
            time_limit_ms = self.time_limit.as_millis() as u64,
        );

        let seed_tour = RandomSeeder::new(self.seed).solve(data, start_node)?;
        let mut current = self.engine.improve(data, seed_tour)?;
        self.local_search_runs += 1;
        let mut best = current.clone();

        while started.elapsed() < self.time_limit {
            let Some(kicked) = double_bridge(&current, data, &mut rng) else {
                break;
            };
            let refined = self.engine.improve(data, kicked)?;
            self.local_search_runs += 1;
            if refined.objective() <= current.objective() {
                current = refined;
                if current.objective() < best.objective() {
                    debug!(
                        event = "progress",
                        runs = self.local_search_runs,
                        objective = current.objective(),
                    );
                    best = current.clone();
                }
            }
        }

        let stats = self.engine.stats();
        info!(
            event = "solve_end",
            duration_ms = started.elapsed().as_millis() as u64,
            runs = self.local_search_runs,
            steps = stats.steps,
            moves_evaluated = stats.moves_evaluated,
            speed = stats.moves_per_second(),
            objective = best.objective(),
        );
        Ok(best
            .relabeled(self.name(), start_node)
            .with_execution_time(started.elapsed()))
    }

    fn name(&self) -> String {
        format!(
            "Iterated Local Search ({} ms) - {}",
            self.time_limit.as_millis(),
            self.engine.name()
        )
    }
}
