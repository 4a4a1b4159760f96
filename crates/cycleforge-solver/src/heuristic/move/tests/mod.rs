//! Tests for route moves.

mod route_move;

use cycleforge_core::{full_cost, ProblemData, Tour};

use super::TourMove;

/// Asserts that applying `m` changes the objective by exactly its delta.
pub(super) fn assert_delta_exact<M: TourMove>(m: M, tour: &Tour, data: &ProblemData) {
    let delta = m.delta(tour, data);
    let next = m.apply(tour, data);
    assert_eq!(
        full_cost(data, next.node_ids()),
        tour.objective() + delta,
        "delta mismatch for {m:?} on {tour}"
    );
    assert_eq!(next.objective(), tour.objective() + delta);
}
