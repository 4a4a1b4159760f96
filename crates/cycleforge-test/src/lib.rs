//! Shared test fixtures for CycleForge crates.
//!
//! This crate provides problem instances and tour helpers for testing.
//!
//! - [`square`] - hand-built instances with a known optimum
//! - [`random`] - deterministic pseudo-random instances and tours
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! cycleforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use cycleforge_test::square::{square_with_decoys, PERIMETER_OBJECTIVE};
//!
//! let data = square_with_decoys();
//! assert_eq!(data.selection_size(), 4);
//! assert_eq!(PERIMETER_OBJECTIVE, 40);
//! ```

pub mod random;
pub mod square;

pub use random::{random_instance, random_tour};
pub use square::{square_with_decoys, CORNERS, PERIMETER_OBJECTIVE};

use std::collections::HashSet;

use cycleforge_core::{full_cost, NodeId, ProblemData, Tour};

/// Asserts every structural invariant of `tour` against `data`.
pub fn assert_valid_tour(tour: &Tour, data: &ProblemData) {
    assert_eq!(
        tour.len(),
        data.selection_size(),
        "tour has wrong length: {tour}"
    );
    let distinct: HashSet<NodeId> = tour.node_ids().iter().copied().collect();
    assert_eq!(distinct.len(), tour.len(), "tour repeats a node: {tour}");
    assert!(
        tour.node_ids().iter().all(|&id| id < data.total_nodes()),
        "tour has out-of-range node: {tour}"
    );
    assert_eq!(
        tour.objective(),
        full_cost(data, tour.node_ids()),
        "cached objective is stale: {tour}"
    );
}

/// Normalises a cycle up to rotation and reflection.
///
/// The result starts at the smallest id and continues towards the smaller
/// of its two neighbours.
pub fn canonical_cycle(node_ids: &[NodeId]) -> Vec<NodeId> {
    let len = node_ids.len();
    if len < 3 {
        let mut sorted = node_ids.to_vec();
        sorted.sort_unstable();
        return sorted;
    }
    let start = (0..len).min_by_key(|&i| node_ids[i]).unwrap_or(0);
    let forward = node_ids[(start + 1) % len];
    let backward = node_ids[(start + len - 1) % len];
    if forward <= backward {
        (0..len).map(|k| node_ids[(start + k) % len]).collect()
    } else {
        (0..len).map(|k| node_ids[(start + len - k) % len]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_cycle() {
        assert_eq!(canonical_cycle(&[2, 3, 0, 1]), vec![0, 1, 2, 3]);
        assert_eq!(canonical_cycle(&[3, 2, 1, 0]), vec![0, 1, 2, 3]);
        assert_eq!(canonical_cycle(&[1, 0, 3, 2]), vec![0, 1, 2, 3]);
        assert_eq!(canonical_cycle(&[5]), vec![5]);
    }
}
