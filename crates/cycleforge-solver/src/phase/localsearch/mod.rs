//! Local search phase
//!
//! Improves a seed tour by applying improving moves until none is left.
//! Each step scans a neighborhood pass and lets a forager pick the move;
//! with move memory enabled, remembered moves are tried before rescanning.

mod forager;
mod memory;
mod phase;


pub use forager::{
    BestImprovingForager, FirstImprovingForager, LocalSearchForager, StrategyForager,
};
pub use memory::{MemoryEntry, MoveMemory};
pub use phase::LocalSearch;
