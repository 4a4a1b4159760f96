//! Builder module for constructing solvers from configuration
//!
//! This module provides the wiring between configuration types and the
//! seeders, local search and wrappers. Configuration is validated here,
//! before any search starts.

use cycleforge_config::{LocalSearchConfig, MetaConfig, SeederConfig, SolverConfig};
use cycleforge_core::Result;
use tracing::{debug, warn};

use crate::meta::{IteratedLocalSearch, MultiStartLocalSearch};
use crate::phase::construction::{
    GreedyCycle, NearestNeighborAnyPosition, NearestNeighborEnd, RandomSeeder, Regret2GreedyCycle,
};
use crate::phase::localsearch::LocalSearch;
use crate::solver::Solver;

/// Builder for constructing seeders from configuration.
pub struct SeederBuilder;

impl SeederBuilder {
    /// Builds a seeder; `seed` only affects random seeding.
    pub fn build(config: &SeederConfig, seed: u64) -> Result<Box<dyn Solver>> {
        config.validate()?;
        Ok(match config {
            SeederConfig::Random => Box::new(RandomSeeder::new(seed)),
            SeederConfig::NearestNeighborEnd => Box::new(NearestNeighborEnd::new()),
            SeederConfig::NearestNeighborAny => Box::new(NearestNeighborAnyPosition::new()),
            SeederConfig::GreedyCycle => Box::new(GreedyCycle::new()),
            SeederConfig::Regret(regret) => Box::new(Regret2GreedyCycle::new(
                regret.greed_weight,
                regret.regret_weight,
            )?),
        })
    }
}

/// Builder for constructing the local search engine from configuration.
pub struct LocalSearchBuilder;

impl LocalSearchBuilder {
    pub fn build(
        seeder: &SeederConfig,
        config: &LocalSearchConfig,
        seed: u64,
    ) -> Result<LocalSearch> {
        let seeder = SeederBuilder::build(seeder, seed)?;
        Ok(LocalSearch::new(seeder, config.clone())?.with_seed(seed))
    }
}

/// Builder for constructing the complete solver from configuration.
///
/// # Example
///
/// ```
/// use cycleforge_config::SolverConfig;
/// use cycleforge_solver::SolverBuilder;
/// use cycleforge_test::square::{square_with_decoys, PERIMETER_OBJECTIVE};
///
/// let config = SolverConfig::from_toml_str(
///     r#"
///     random_seed = 3
///
///     [seeder]
///     type = "greedy_cycle"
///
///     [local_search]
///     intra_move = "node-swap"
///     strategy = "greedy"
///     "#,
/// )
/// .unwrap();
///
/// let mut solver = SolverBuilder::build(&config).unwrap();
/// let tour = solver.solve(&square_with_decoys(), 0).unwrap();
/// assert_eq!(tour.objective(), PERIMETER_OBJECTIVE);
/// ```
pub struct SolverBuilder;

impl SolverBuilder {
    /// Builds the solver described by `config`.
    ///
    /// Without a configured `random_seed` a fresh one is drawn.
    pub fn build(config: &SolverConfig) -> Result<Box<dyn Solver>> {
        let seed = config.random_seed.unwrap_or_else(rand::random);
        Self::build_with_seed(config, seed)
    }

    /// Builds the solver described by `config`, overriding its seed.
    pub fn build_with_seed(config: &SolverConfig, seed: u64) -> Result<Box<dyn Solver>> {
        config.validate()?;
        debug!(event = "build", seed = seed, meta = config.meta.is_some());

        let Some(meta) = &config.meta else {
            let search = LocalSearchBuilder::build(&config.seeder, &config.local_search, seed)?;
            return Ok(Box::new(search));
        };

        if config.seeder != SeederConfig::Random {
            warn!(
                "{:?} seeder is ignored: metaheuristics start from random tours",
                config.seeder
            );
        }
        Ok(match meta {
            MetaConfig::MultiStart(multi) => Box::new(MultiStartLocalSearch::new(
                config.local_search.clone(),
                multi.iterations,
                seed,
            )?),
            MetaConfig::Iterated(iterated) => Box::new(IteratedLocalSearch::new(
                config.local_search.clone(),
                iterated.time_limit(),
                seed,
            )?),
        })
    }
}
