//! Solver entry point that hides all internal wiring.

use std::path::Path;

use cycleforge_config::SolverConfig;
use cycleforge_core::{NodeId, ProblemData, Result, Tour};
use cycleforge_solver::SolverBuilder;
use tracing::debug;

const CONFIG_FILE: &str = "solver.toml";

/// Solves `data` from `start_node` with the configuration in `solver.toml`.
///
/// Falls back to [`SolverConfig::default`] when the file is absent. A file
/// that exists but does not parse is reported as a configuration error.
pub fn run_solver(data: &ProblemData, start_node: NodeId) -> Result<Tour> {
    let config = if Path::new(CONFIG_FILE).exists() {
        SolverConfig::load(CONFIG_FILE)?
    } else {
        debug!(event = "build", config = "default");
        SolverConfig::default()
    };
    run_solver_with_config(data, &config, start_node)
}

/// Solves `data` from `start_node` with an explicit configuration.
///
/// The returned tour has been validated against `data`.
pub fn run_solver_with_config(
    data: &ProblemData,
    config: &SolverConfig,
    start_node: NodeId,
) -> Result<Tour> {
    #[cfg(feature = "console")]
    cycleforge_console::init();

    let mut solver = SolverBuilder::build(config)?;
    let tour = solver.solve(data, start_node)?;
    tour.validate(data)?;
    Ok(tour)
}
