//! Repeated solving from rotating start nodes with an aggregate summary.

use std::fmt;
use std::time::Duration;

use cycleforge_config::SolverConfig;
use cycleforge_core::{CycleForgeError, ProblemData, Result, Tour};
use cycleforge_solver::SolverBuilder;
use tracing::debug;

/// Aggregate objective and timing figures over a batch of runs.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub runs: usize,
    pub min_objective: i64,
    pub max_objective: i64,
    pub avg_objective: f64,
    pub min_time: Duration,
    pub max_time: Duration,
    pub avg_time: Duration,
    /// Lowest-objective tour; the earliest run wins ties.
    pub best: Tour,
}

impl RunSummary {
    /// Summarizes `tours`, or `None` when there are none.
    pub fn from_tours(tours: &[Tour]) -> Option<Self> {
        let first = tours.first()?;
        let mut best = first;
        let mut max_objective = first.objective();
        let mut min_time = first.execution_time();
        let mut max_time = first.execution_time();
        let mut total_time = Duration::ZERO;
        let mut total_objective = 0i128;

        for tour in tours {
            if tour.objective() < best.objective() {
                best = tour;
            }
            max_objective = max_objective.max(tour.objective());
            min_time = min_time.min(tour.execution_time());
            max_time = max_time.max(tour.execution_time());
            total_time += tour.execution_time();
            total_objective += i128::from(tour.objective());
        }

        let runs = tours.len();
        Some(Self {
            runs,
            min_objective: best.objective(),
            max_objective,
            avg_objective: total_objective as f64 / runs as f64,
            min_time,
            max_time,
            avg_time: Duration::from_nanos((total_time.as_nanos() / runs as u128) as u64),
            best: best.clone(),
        })
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} runs)", self.best.algorithm(), self.runs)?;
        writeln!(
            f,
            "  objective: min {} / avg {:.2} / max {}",
            self.min_objective, self.avg_objective, self.max_objective
        )?;
        writeln!(
            f,
            "  time (ms): min {} / avg {} / max {}",
            self.min_time.as_millis(),
            self.avg_time.as_millis(),
            self.max_time.as_millis()
        )?;
        write!(f, "  best: {}", self.best)
    }
}

/// Solves `data` `runs` times and summarizes the results.
///
/// Run `i` starts from node `i % total_nodes` and is built with seed
/// `base + i`, where `base` is the configured `random_seed` (0 if unset),
/// so a batch replays exactly.
pub fn run_experiment(data: &ProblemData, config: &SolverConfig, runs: usize) -> Result<RunSummary> {
    if runs == 0 {
        return Err(CycleForgeError::Config(
            "an experiment needs at least one run".to_string(),
        ));
    }
    config.validate()?;

    #[cfg(feature = "console")]
    cycleforge_console::init();

    let base = config.random_seed.unwrap_or(0);
    let mut tours = Vec::with_capacity(runs);
    for run in 0..runs {
        let start_node = run % data.total_nodes();
        let mut solver = SolverBuilder::build_with_seed(config, base.wrapping_add(run as u64))?;
        let tour = solver.solve(data, start_node)?;
        tour.validate(data)?;
        debug!(
            "run {}/{} from node {}: objective {} in {} ms",
            run + 1,
            runs,
            start_node,
            tour.objective(),
            tour.execution_time_ms()
        );
        tours.push(tour);
    }

    RunSummary::from_tours(&tours)
        .ok_or_else(|| CycleForgeError::Config("experiment produced no tours".to_string()))
}
