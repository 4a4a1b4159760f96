//! CycleForge - local search for selective cycle problems
//!
//! Pick `selection_size` of an instance's nodes and order them into a
//! cycle minimizing rounded Euclidean travel plus per-node visiting costs.
//!
//! # Example
//!
//! ```rust
//! use cycleforge::prelude::*;
//!
//! let data = ProblemData::from_coordinates(
//!     "square",
//!     &[
//!         (0.0, 0.0, 0),
//!         (10.0, 0.0, 0),
//!         (10.0, 10.0, 0),
//!         (0.0, 10.0, 0),
//!         (5.0, 5.0, 100),
//!         (20.0, 20.0, 100),
//!         (30.0, 30.0, 100),
//!     ],
//! )
//! .unwrap();
//!
//! let config = SolverConfig::default().with_random_seed(42);
//! let tour = run_solver_with_config(&data, &config, 0).unwrap();
//! assert_eq!(tour.objective(), 40);
//! ```

pub use cycleforge_core::{
    full_cost, insertion_cost, parse_instance, read_instance, CycleForgeError, InstanceError,
    Node, NodeId, ProblemData, Result, Tour,
};

pub use cycleforge_config::{
    ConfigError, IntraMoveKind, IteratedConfig, LocalSearchConfig, MetaConfig,
    MultiStartConfig, NeighborhoodConfig, NeighborhoodKind, RegretConfig, SearchStrategy,
    SeederConfig, SolverConfig,
};

pub use cycleforge_solver::{
    FixedTour, GreedyCycle, IteratedLocalSearch, LocalSearch, MultiStartLocalSearch,
    NearestNeighborAnyPosition, NearestNeighborEnd, RandomSeeder, Regret2GreedyCycle,
    SearchStats, Solver, SolverBuilder,
};

#[cfg(feature = "console")]
pub use cycleforge_console as console;

mod experiment;
mod solver;

pub use experiment::{run_experiment, RunSummary};
pub use solver::{run_solver, run_solver_with_config};

pub mod prelude {
    pub use super::{
        read_instance, run_solver, run_solver_with_config, ProblemData, Solver, SolverConfig,
        Tour,
    };
}
