//! Tests for the metaheuristic wrappers.

use std::collections::HashSet;
use std::time::Duration;

use cycleforge_config::{LocalSearchConfig, NeighborhoodConfig};
use cycleforge_core::{CycleForgeError, Tour};
use cycleforge_test::square::{single_node, square_with_decoys, PERIMETER_OBJECTIVE};
use cycleforge_test::{assert_valid_tour, canonical_cycle, random_instance, CORNERS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::phase::construction::RandomSeeder;
use crate::phase::localsearch::LocalSearch;
use crate::solver::Solver;

#[test]
fn test_double_bridge_keeps_the_selection() {
    let data = random_instance(30, 1);
    let tour = Tour::new((0..12).collect(), &data, "seed", 0);
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    for _ in 0..50 {
        let kicked = double_bridge(&tour, &data, &mut rng).unwrap();
        let before: HashSet<_> = tour.node_ids().iter().collect();
        let after: HashSet<_> = kicked.node_ids().iter().collect();
        assert_eq!(before, after);
        assert_eq!(kicked.node_ids()[0], 0);
        assert_eq!(kicked.start_node(), tour.start_node());
        assert_eq!(kicked.objective(), cycleforge_core::full_cost(&data, kicked.node_ids()));
    }
}

#[test]
fn test_double_bridge_reorders_segments() {
    let data = random_instance(10, 3);
    let tour = Tour::new(vec![0, 1, 2, 3, 4], &data, "seed", 0);
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let kicked = double_bridge(&tour, &data, &mut rng).unwrap();

    // Every kick of [0..5) is A|D|C|B for some cuts 1 <= a < b < c <= 4.
    let expected: Vec<Vec<usize>> = (1..=4)
        .flat_map(|a| ((a + 1)..=4).flat_map(move |b| ((b + 1)..=4).map(move |c| (a, b, c))))
        .map(|(a, b, c)| {
            let ids = [0, 1, 2, 3, 4];
            let mut v = ids[..a].to_vec();
            v.extend_from_slice(&ids[c..]);
            v.extend_from_slice(&ids[b..c]);
            v.extend_from_slice(&ids[a..b]);
            v
        })
        .collect();
    assert!(expected.contains(&kicked.node_ids().to_vec()));
}

#[test]
fn test_double_bridge_needs_four_nodes() {
    let data = random_instance(10, 4);
    let tour = Tour::new(vec![3, 1, 2], &data, "seed", 3);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    assert!(double_bridge(&tour, &data, &mut rng).is_none());
}

#[test]
fn test_multi_start_is_reproducible_and_no_worse() {
    let data = random_instance(40, 12);
    let config = LocalSearchConfig::default().with_neighborhood(NeighborhoodConfig::candidate(8));
    let mut wrapper = MultiStartLocalSearch::new(config.clone(), 6, 42).unwrap();
    let first = wrapper.solve(&data, 0).unwrap();
    let second = wrapper.solve(&data, 0).unwrap();
    assert_valid_tour(&first, &data);
    assert_eq!(first.node_ids(), second.node_ids());
    assert!(wrapper.stats().full_scans >= 6);

    // Candidate descents are deterministic, so the first iteration can be replayed.
    let first_seed: u64 = ChaCha8Rng::seed_from_u64(42).random();
    let mut single = LocalSearch::new(RandomSeeder::new(first_seed), config).unwrap();
    let one = single.solve(&data, 0).unwrap();
    assert!(first.objective() <= one.objective());
}

#[test]
fn test_multi_start_on_square() {
    let data = square_with_decoys();
    let mut wrapper = MultiStartLocalSearch::new(LocalSearchConfig::default(), 3, 7).unwrap();
    let tour = wrapper.solve(&data, 2).unwrap();
    assert_eq!(tour.objective(), PERIMETER_OBJECTIVE);
    assert_eq!(canonical_cycle(tour.node_ids()), CORNERS.to_vec());
    assert_eq!(tour.start_node(), 2);
    assert!(tour.algorithm().starts_with("Multi-Start Local Search (3 iterations)"));
}

#[test]
fn test_iterated_improves_on_its_first_descent() {
    let data = random_instance(60, 5);
    let config = LocalSearchConfig::default()
        .with_neighborhood(NeighborhoodConfig::candidate(10))
        .with_move_memory(true);

    let mut first_descent = LocalSearch::new(RandomSeeder::new(17), config.clone())
        .unwrap()
        .with_seed(17);
    let baseline = first_descent.solve(&data, 0).unwrap();

    let mut wrapper = IteratedLocalSearch::new(config, Duration::from_millis(100), 17).unwrap();
    let tour = wrapper.solve(&data, 0).unwrap();
    assert_valid_tour(&tour, &data);
    assert!(tour.objective() <= baseline.objective());
    assert!(wrapper.local_search_runs() >= 1);
    assert!(tour.execution_time() >= Duration::from_millis(100));
}

#[test]
fn test_iterated_stops_when_perturbation_is_impossible() {
    let data = single_node();
    let mut wrapper =
        IteratedLocalSearch::new(LocalSearchConfig::default(), Duration::from_secs(60), 3)
            .unwrap();
    let tour = wrapper.solve(&data, 0).unwrap();
    assert_eq!(tour.node_ids(), &[0]);
    assert_eq!(wrapper.local_search_runs(), 1);
}

#[test]
fn test_wrappers_reject_empty_budgets() {
    assert!(matches!(
        MultiStartLocalSearch::new(LocalSearchConfig::default(), 0, 1),
        Err(CycleForgeError::Config(_))
    ));
    assert!(matches!(
        IteratedLocalSearch::new(LocalSearchConfig::default(), Duration::ZERO, 1),
        Err(CycleForgeError::Config(_))
    ));
    let broken = LocalSearchConfig::default().with_neighborhood(NeighborhoodConfig::candidate(0));
    assert!(matches!(
        MultiStartLocalSearch::new(broken, 3, 1),
        Err(CycleForgeError::Config(_))
    ));
}
