//! CycleForge Solver Engine
//!
//! This crate provides the local search engine for selective cycle
//! problems: choose `selection_size` of the instance's nodes and order them
//! into a cycle minimizing travel distance plus visiting costs.
//!
//! - Move system: node replacement, 2-opt edge swaps and node swaps with
//!   O(1) deltas
//! - Neighborhoods: full (seeded random order) and candidate-edge pruned
//! - Local search with greedy or steepest descent and optional move memory
//! - Construction heuristics used as seeders
//! - Multi-start and iterated local search wrappers
//! - Configuration wiring (builder module)
//!
//! # Example
//!
//! ```
//! use cycleforge_config::{LocalSearchConfig, NeighborhoodConfig};
//! use cycleforge_solver::{GreedyCycle, LocalSearch, Solver};
//! use cycleforge_test::random_instance;
//!
//! let data = random_instance(50, 7);
//! let config = LocalSearchConfig::default()
//!     .with_neighborhood(NeighborhoodConfig::candidate(10))
//!     .with_move_memory(true);
//! let mut search = LocalSearch::new(GreedyCycle::new(), config).unwrap();
//!
//! let tour = search.solve(&data, 0).unwrap();
//! assert_eq!(tour.len(), data.selection_size());
//! ```

pub mod builder;
pub mod heuristic;
pub mod meta;
pub mod phase;
pub mod solver;
pub mod stats;

pub use builder::{LocalSearchBuilder, SeederBuilder, SolverBuilder};
pub use heuristic::{
    CandidateIndex, CandidateNeighborhood, FullNeighborhood, MoveKey, MoveSelector, Neighborhood,
    ReplaceNode, RouteMove, SwapEdges, SwapNodes, TourChange, TourMove,
};
pub use meta::{double_bridge, IteratedLocalSearch, MultiStartLocalSearch};
pub use phase::construction::{
    GreedyCycle, NearestNeighborAnyPosition, NearestNeighborEnd, RandomSeeder, Regret2GreedyCycle,
};
pub use phase::localsearch::{
    BestImprovingForager, FirstImprovingForager, LocalSearch, LocalSearchForager, MemoryEntry,
    MoveMemory, StrategyForager,
};
pub use solver::{FixedTour, Solver};
pub use stats::SearchStats;
