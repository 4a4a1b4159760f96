//! Metaheuristic wrappers around the local search.
//!
//! - [`MultiStartLocalSearch`] - best of many randomly seeded descents
//! - [`IteratedLocalSearch`] - perturb and re-descend until a time limit

mod iterated;
mod multi_start;

#[cfg(test)]
mod tests;

pub use iterated::{double_bridge, IteratedLocalSearch};
pub use multi_start::MultiStartLocalSearch;
