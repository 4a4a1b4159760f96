//! Tests for neighborhood selectors.

use std::collections::HashSet;
use std::sync::Arc;

use cycleforge_config::IntraMoveKind;
use cycleforge_core::{ProblemData, Tour};
use cycleforge_test::square::square_with_decoys;
use cycleforge_test::{random_instance, random_tour};

use super::*;
use crate::heuristic::r#move::{MoveKey, TourMove};

fn full_set(intra: IntraMoveKind, tour: &Tour, data: &ProblemData) -> Vec<RouteMove> {
    FullNeighborhood::new(intra, 7).moves(tour, data).collect()
}

#[test]
fn test_full_neighborhood_is_complete_and_unique() {
    let data = random_instance(13, 1);
    let tour = random_tour(&data, 2);
    let m = tour.len();
    let n = data.total_nodes();

    for intra in [IntraMoveKind::EdgeSwap, IntraMoveKind::NodeSwap] {
        let moves = full_set(intra, &tour, &data);
        let unique: HashSet<RouteMove> = moves.iter().copied().collect();
        assert_eq!(unique.len(), moves.len());

        let pairs = m * (m - 1) / 2;
        let intra_moves = match intra {
            IntraMoveKind::EdgeSwap => pairs - 1,
            IntraMoveKind::NodeSwap => pairs,
        };
        assert_eq!(moves.len(), m * (n - m) + intra_moves);
        assert!(moves.iter().all(|mv| mv.is_doable(&tour, &data)));
        assert!(!unique.contains(&RouteMove::swap_edges(0, m - 1)));
    }
}

#[test]
fn test_full_neighborhood_size_matches_pass() {
    let data = random_instance(9, 4);
    let tour = random_tour(&data, 5);
    let mut selector = FullNeighborhood::new(IntraMoveKind::EdgeSwap, 1);
    let expected = selector.size(&tour, &data);
    assert_eq!(selector.iter_moves(&tour, &data).count(), expected);
}

#[test]
fn test_full_neighborhood_order_is_seeded() {
    let data = random_instance(12, 3);
    let tour = random_tour(&data, 3);
    let a: Vec<_> = FullNeighborhood::new(IntraMoveKind::EdgeSwap, 5)
        .moves(&tour, &data)
        .collect();
    let b: Vec<_> = FullNeighborhood::new(IntraMoveKind::EdgeSwap, 5)
        .moves(&tour, &data)
        .collect();
    assert_eq!(a, b);

    // Consecutive passes of one selector use different orders.
    let mut selector = FullNeighborhood::new(IntraMoveKind::EdgeSwap, 5);
    let first: Vec<_> = selector.moves(&tour, &data).collect();
    let second: Vec<_> = selector.moves(&tour, &data).collect();
    assert_ne!(first, second);
    let first_set: HashSet<_> = first.into_iter().collect();
    let second_set: HashSet<_> = second.into_iter().collect();
    assert_eq!(first_set, second_set);
}

#[test]
fn test_candidate_moves_are_subset_of_full() {
    for (n, seed, k) in [(10, 1, 3), (17, 2, 5), (25, 3, 4), (40, 4, 10)] {
        let data = random_instance(n, seed);
        let index = Arc::new(CandidateIndex::build(&data, k));
        let tour = random_tour(&data, seed + 100);

        for intra in [IntraMoveKind::EdgeSwap, IntraMoveKind::NodeSwap] {
            let full: HashSet<RouteMove> = full_set(intra, &tour, &data).into_iter().collect();
            let candidate = CandidateNeighborhood::new(intra, index.clone());
            let moves: Vec<RouteMove> = candidate.moves(&tour).collect();
            assert!(!moves.is_empty());

            let unique: HashSet<RouteMove> = moves.iter().copied().collect();
            assert_eq!(unique.len(), moves.len(), "duplicate candidate move");
            for mv in &moves {
                assert!(full.contains(mv), "{mv:?} not in full neighborhood");
            }
        }
    }
}

#[test]
fn test_candidate_moves_create_candidate_edges() {
    let data = random_instance(20, 8);
    let index = Arc::new(CandidateIndex::build(&data, 4));
    let tour = random_tour(&data, 9);
    let neighborhood = CandidateNeighborhood::new(IntraMoveKind::EdgeSwap, index.clone());

    for mv in neighborhood.moves(&tour) {
        if let RouteMove::Replace(replace) = mv {
            let i = replace.position();
            let sources = [
                tour.node_at(i),
                tour.node_at(tour.prev_position(i)),
                tour.node_at(tour.next_position(i)),
            ];
            assert!(sources
                .iter()
                .any(|&source| index.is_candidate(source, replace.node())));
            continue;
        }
        let next = mv.apply(&tour, &data);
        let before: HashSet<(usize, usize)> = edges(&tour).collect();
        let created: Vec<(usize, usize)> =
            edges(&next).filter(|edge| !before.contains(edge)).collect();
        assert!(
            created.iter().any(|&(a, b)| index.is_candidate_edge(a, b)),
            "{mv:?} creates no candidate edge"
        );
    }
}

fn edges(tour: &Tour) -> impl Iterator<Item = (usize, usize)> + '_ {
    let ids = tour.node_ids();
    (0..ids.len()).map(move |i| {
        let a = ids[i];
        let b = ids[(i + 1) % ids.len()];
        (a.min(b), a.max(b))
    })
}

#[test]
fn test_candidate_order_is_deterministic() {
    let data = random_instance(15, 6);
    let index = Arc::new(CandidateIndex::build(&data, 5));
    let tour = random_tour(&data, 6);
    let neighborhood = CandidateNeighborhood::new(IntraMoveKind::NodeSwap, index);
    let a: Vec<_> = neighborhood.moves(&tour).collect();
    let b: Vec<_> = neighborhood.moves(&tour).collect();
    assert_eq!(a, b);
}

#[test]
fn test_candidate_neighborhood_finds_uncrossing_move() {
    let data = square_with_decoys();
    let index = Arc::new(CandidateIndex::build(&data, 3));
    let bowtie = Tour::new(vec![0, 2, 1, 3], &data, "seed", 0);
    let neighborhood = CandidateNeighborhood::new(IntraMoveKind::EdgeSwap, index);
    let moves: Vec<_> = neighborhood.moves(&bowtie).collect();
    assert!(moves.contains(&RouteMove::swap_edges(1, 2)));
}

/// Reversing len - 1 positions only mirrors the cycle.
fn mirrors(m: &RouteMove, len: usize) -> bool {
    matches!(m, RouteMove::SwapEdges(swap) if swap.end() - swap.start() + 2 >= len)
}

fn pass_keys(neighborhood: &mut Neighborhood, tour: &Tour, data: &ProblemData) -> HashSet<MoveKey> {
    let len = tour.len();
    neighborhood
        .moves(tour, data)
        .filter(|m| !mirrors(m, len))
        .map(|m| m.key(tour))
        .collect()
}

#[test]
fn test_candidate_neighborhood_ignores_where_the_cycle_starts() {
    let data = random_instance(40, 5);
    let index = Arc::new(CandidateIndex::build(&data, 5));
    let tour = random_tour(&data, 6);
    let mut ids = tour.node_ids().to_vec();
    ids.rotate_left(7);
    ids.reverse();
    let mirrored = Tour::new(ids, &data, "seed", 0);

    let mut neighborhood = Neighborhood::Candidate(CandidateNeighborhood::new(
        IntraMoveKind::EdgeSwap,
        index,
    ));
    let forward = pass_keys(&mut neighborhood, &tour, &data);
    let backward = pass_keys(&mut neighborhood, &mirrored, &data);
    assert!(!forward.is_empty());
    assert_eq!(forward, backward);
}

#[test]
fn test_moves_after_cover_every_new_move() {
    for (n, seed) in [(12, 1), (30, 2), (61, 3)] {
        let data = random_instance(n, seed);
        let index = Arc::new(CandidateIndex::build(&data, 6));
        let tour = random_tour(&data, seed + 10);
        let len = tour.len();
        let applied: Vec<RouteMove> = full_set(IntraMoveKind::EdgeSwap, &tour, &data)
            .into_iter()
            .filter(|m| !mirrors(m, len))
            .step_by(7)
            .collect();
        let mut neighborhoods = [
            Neighborhood::Full(FullNeighborhood::new(IntraMoveKind::EdgeSwap, 1)),
            Neighborhood::Candidate(CandidateNeighborhood::new(IntraMoveKind::EdgeSwap, index)),
        ];

        for neighborhood in &mut neighborhoods {
            let before = pass_keys(neighborhood, &tour, &data);
            for m in &applied {
                let next = m.apply(&tour, &data);
                let change = m.change(&tour).unwrap();
                let listed: HashSet<MoveKey> = neighborhood
                    .moves_after(&next, &data, change)
                    .into_iter()
                    .map(|affected| {
                        assert!(affected.is_doable(&next, &data), "{affected:?}");
                        affected.key(&next)
                    })
                    .collect();
                let after = pass_keys(neighborhood, &next, &data);

                assert!(listed.is_subset(&after), "{m:?} lists foreign moves");
                for key in after.difference(&before) {
                    assert!(listed.contains(key), "{m:?} misses {key:?}");
                }
            }
        }
    }
}

#[test]
fn test_neighborhood_label() {
    let data = square_with_decoys();
    let index = Arc::new(CandidateIndex::build(&data, 3));
    let candidate = Neighborhood::Candidate(CandidateNeighborhood::new(
        IntraMoveKind::EdgeSwap,
        index,
    ));
    let full = Neighborhood::Full(FullNeighborhood::new(IntraMoveKind::EdgeSwap, 0));
    assert_eq!(candidate.label(), "candidate(3)");
    assert_eq!(full.label(), "full");
}
