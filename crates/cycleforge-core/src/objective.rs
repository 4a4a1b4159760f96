//! Objective evaluation.
//!
//! The objective of a tour is the travel distance around the cycle plus the
//! visiting cost of every selected node. Both functions here are pure.

use crate::domain::{NodeId, ProblemData};

/// Total cost of the cycle through `node_ids`.
///
/// Returns 0 for an empty sequence. A single node costs its visiting cost.
///
/// # Examples
///
/// ```
/// use cycleforge_core::{full_cost, ProblemData};
///
/// let data = ProblemData::from_coordinates(
///     "line",
///     &[(0.0, 0.0, 1), (3.0, 4.0, 2)],
/// )
/// .unwrap();
/// assert_eq!(full_cost(&data, &[0, 1]), 1 + 2 + 5 + 5);
/// ```
pub fn full_cost(data: &ProblemData, node_ids: &[NodeId]) -> i64 {
    let Some(&last) = node_ids.last() else {
        return 0;
    };
    let mut total = 0;
    let mut prev = last;
    for &id in node_ids {
        total += data.cost(id) + data.distance(prev, id);
        prev = id;
    }
    total
}

/// Cost increase of inserting `new_node` at `position` in an open path.
///
/// `position` ranges over `0..=path.len()`. Inserting at either end adds a
/// single edge; an interior insertion replaces one edge by two. The visiting
/// cost of `new_node` is always included.
pub fn insertion_cost(
    data: &ProblemData,
    path: &[NodeId],
    new_node: NodeId,
    position: usize,
) -> i64 {
    let cost = data.cost(new_node);
    if path.is_empty() {
        return cost;
    }
    if position == 0 {
        return cost + data.distance(new_node, path[0]);
    }
    if position >= path.len() {
        return cost + data.distance(path[path.len() - 1], new_node);
    }
    let before = path[position - 1];
    let after = path[position];
    cost + data.distance(before, new_node) + data.distance(new_node, after)
        - data.distance(before, after)
}
