//! Exhaustive delta and invariant checks over every move of small tours.

use cycleforge_core::Tour;
use cycleforge_test::{assert_valid_tour, canonical_cycle, random_instance, random_tour};

use super::assert_delta_exact;
use crate::heuristic::r#move::{MoveKey, RouteMove, TourChange, TourMove};

fn every_move(len: usize, total: usize, node_ids: &[usize]) -> Vec<RouteMove> {
    let mut moves = Vec::new();
    for position in 0..len {
        for node in (0..total).filter(|n| !node_ids.contains(n)) {
            moves.push(RouteMove::replace(position, node));
        }
    }
    for i in 0..len {
        for j in (i + 1)..len {
            moves.push(RouteMove::swap_edges(i, j));
            moves.push(RouteMove::swap_nodes(i, j));
        }
    }
    moves
}

#[test]
fn test_delta_matches_full_cost_for_every_move() {
    for (n, seed) in [(2, 1), (4, 2), (6, 3), (7, 4), (9, 5), (12, 6), (15, 7)] {
        let data = random_instance(n, seed);
        let tour = random_tour(&data, seed * 31);
        for m in every_move(tour.len(), n, tour.node_ids()) {
            assert_delta_exact(m, &tour, &data);
        }
    }
}

#[test]
fn test_every_doable_move_preserves_invariants() {
    let data = random_instance(11, 17);
    let tour = random_tour(&data, 99);
    for m in every_move(tour.len(), data.total_nodes(), tour.node_ids()) {
        if !m.is_doable(&tour, &data) {
            continue;
        }
        let next = m.apply(&tour, &data);
        assert_valid_tour(&next, &data);
    }
}

#[test]
fn test_apply_does_not_mutate_input() {
    let data = random_instance(10, 3);
    let tour = random_tour(&data, 4);
    let before = tour.clone();
    let _ = RouteMove::swap_edges(1, 3).apply(&tour, &data);
    let _ = RouteMove::swap_nodes(0, 2).apply(&tour, &data);
    assert_eq!(tour, before);
}

#[test]
fn test_kind_labels() {
    assert_eq!(RouteMove::replace(0, 1).kind(), "replace");
    assert_eq!(RouteMove::swap_edges(0, 1).kind(), "swap_edges");
    assert_eq!(RouteMove::swap_nodes(0, 1).kind(), "swap_nodes");
}

#[test]
fn test_key_identifies_resulting_cycle() {
    let data = random_instance(16, 8);
    let tour = random_tour(&data, 5);
    let len = tour.len();
    // Same cycle, started elsewhere and walked the other way.
    let mut mirrored: Vec<usize> = tour.node_ids().to_vec();
    mirrored.rotate_left(3);
    mirrored.reverse();
    let mirrored = Tour::new(mirrored, &data, "seed", 0);

    let mut outcomes: Vec<(MoveKey, Vec<usize>)> = Vec::new();
    for t in [&tour, &mirrored] {
        for m in every_move(len, data.total_nodes(), t.node_ids()) {
            let keep = match m {
                RouteMove::Replace(_) => true,
                // Reversing one or len - 1 positions leaves the cycle as is.
                RouteMove::SwapEdges(swap) => {
                    let reversed = swap.end() - swap.start() + 1;
                    (2..=len - 2).contains(&reversed)
                }
                RouteMove::SwapNodes(_) => false,
            };
            if keep {
                outcomes.push((m.key(t), canonical_cycle(m.apply(t, &data).node_ids())));
            }
        }
    }

    for (key_a, cycle_a) in &outcomes {
        for (key_b, cycle_b) in &outcomes {
            assert_eq!(key_a == key_b, cycle_a == cycle_b, "{key_a:?} vs {key_b:?}");
        }
    }
}

#[test]
fn test_node_swap_key_ignores_order() {
    let data = random_instance(10, 2);
    let tour = random_tour(&data, 1);
    let a = RouteMove::swap_nodes(1, 3).key(&tour);
    let b = RouteMove::swap_nodes(3, 1).key(&tour);
    assert_eq!(a, b);
    let (x, y) = (tour.node_at(1), tour.node_at(3));
    assert_eq!(a, MoveKey::NodeSwap([x.min(y), x.max(y)]));
}

#[test]
fn test_change_describes_rewritten_positions() {
    let data = random_instance(10, 2);
    let tour = random_tour(&data, 1);
    assert_eq!(
        RouteMove::replace(2, 9).change(&tour),
        Some(TourChange::Replaced {
            position: 2,
            removed: tour.node_at(2)
        })
    );
    assert_eq!(
        RouteMove::swap_edges(3, 1).change(&tour),
        Some(TourChange::Reversed { start: 1, end: 3 })
    );
    assert_eq!(RouteMove::swap_nodes(0, 2).change(&tour), None);
}
