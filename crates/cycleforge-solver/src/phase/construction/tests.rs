//! Tests for construction heuristics.

use cycleforge_core::{CycleForgeError, ProblemData};
use cycleforge_test::square::{single_node, square_with_decoys, two_nodes, PERIMETER_OBJECTIVE};
use cycleforge_test::{assert_valid_tour, canonical_cycle, random_instance, CORNERS};

use super::*;
use crate::solver::Solver;

fn seeders() -> Vec<Box<dyn Solver>> {
    vec![
        Box::new(RandomSeeder::new(5)),
        Box::new(NearestNeighborEnd::new()),
        Box::new(NearestNeighborAnyPosition::new()),
        Box::new(GreedyCycle::new()),
        Box::new(Regret2GreedyCycle::default()),
        Box::new(Regret2GreedyCycle::new(0.0, 1.0).unwrap()),
    ]
}

fn line(n: usize) -> ProblemData {
    let points: Vec<(f64, f64, i64)> = (0..n).map(|x| (x as f64, 0.0, 0)).collect();
    ProblemData::from_coordinates("line", &points).unwrap()
}

#[test]
fn test_every_seeder_builds_valid_tours() {
    for n in [3, 4, 7, 30] {
        let data = random_instance(n, n as u64);
        for mut seeder in seeders() {
            for start in [0, n / 2, n - 1] {
                let tour = seeder.solve(&data, start).unwrap();
                assert_valid_tour(&tour, &data);
                assert_eq!(tour.start_node(), start);
                assert_eq!(tour.algorithm(), seeder.name());
            }
        }
    }
}

#[test]
fn test_deterministic_seeders_keep_the_start_node() {
    let data = random_instance(21, 3);
    for mut seeder in seeders().into_iter().skip(1) {
        for start in 0..data.total_nodes() {
            let tour = seeder.solve(&data, start).unwrap();
            assert!(tour.contains(start), "{}", seeder.name());
        }
    }
}

#[test]
fn test_single_selection_short_circuits() {
    let single = single_node();
    let pair = two_nodes();
    for mut seeder in seeders() {
        let tour = seeder.solve(&single, 0).unwrap();
        assert_eq!(tour.node_ids(), &[0]);
        assert_eq!(tour.objective(), 7);

        let tour = seeder.solve(&pair, 1).unwrap();
        assert_eq!(tour.node_ids(), &[1]);
        assert_eq!(tour.objective(), 4);
    }
}

#[test]
fn test_start_node_out_of_range() {
    let data = square_with_decoys();
    for mut seeder in seeders() {
        assert!(matches!(
            seeder.solve(&data, 8),
            Err(CycleForgeError::InvalidTour(_))
        ));
    }
}

#[test]
fn test_random_seeder_replays_by_seed() {
    let data = random_instance(30, 2);
    let mut a = RandomSeeder::new(99);
    let mut b = RandomSeeder::new(99);
    let first = a.solve(&data, 0).unwrap();
    assert_eq!(first.node_ids(), b.solve(&data, 0).unwrap().node_ids());
    assert_ne!(first.node_ids(), a.solve(&data, 0).unwrap().node_ids());
}

#[test]
fn test_nearest_neighbor_end_walks_the_line() {
    let data = line(8);
    let tour = NearestNeighborEnd::new().solve(&data, 0).unwrap();
    assert_eq!(tour.node_ids(), &[0, 1, 2, 3]);
    assert_eq!(tour.objective(), 6);
}

#[test]
fn test_nearest_neighbor_end_weighs_cost() {
    let data = ProblemData::from_coordinates(
        "row",
        &[(0.0, 0.0, 0), (1.0, 0.0, 50), (4.0, 0.0, 0), (9.0, 0.0, 0)],
    )
    .unwrap();
    let tour = NearestNeighborEnd::new().solve(&data, 0).unwrap();
    assert_eq!(tour.node_ids(), &[0, 2]);
}

#[test]
fn test_nearest_neighbor_any_grows_both_ends() {
    let data = line(10);
    let tour = NearestNeighborAnyPosition::new().solve(&data, 5).unwrap();
    assert_eq!(tour.node_ids(), &[1, 2, 3, 4, 5]);
    assert_eq!(tour.objective(), 8);
}

#[test]
fn test_cycle_builders_find_the_square_perimeter() {
    let data = square_with_decoys();
    let mut builders: Vec<Box<dyn Solver>> = vec![
        Box::new(GreedyCycle::new()),
        Box::new(Regret2GreedyCycle::default()),
    ];
    for builder in &mut builders {
        for start in CORNERS {
            let tour = builder.solve(&data, start).unwrap();
            assert_eq!(tour.objective(), PERIMETER_OBJECTIVE, "{}", builder.name());
            assert_eq!(canonical_cycle(tour.node_ids()), CORNERS.to_vec());
        }
    }
}

#[test]
fn test_regret_rejects_negative_weights() {
    for (greed, regret) in [(-0.5, 1.0), (1.0, -2.0), (f64::NAN, 1.0)] {
        assert!(matches!(
            Regret2GreedyCycle::new(greed, regret),
            Err(CycleForgeError::Config(_))
        ));
    }
    assert!(Regret2GreedyCycle::new(0.0, 0.0).is_ok());
}

#[test]
fn test_cyclic_insertion_tracks_two_cheapest() {
    let data = square_with_decoys();
    let mut cycle = PartialTour::start(&data, 0).unwrap();
    cycle.push(2);
    cycle.push(1);

    let insertion = cycle.cyclic_insertion(&data, 3);
    assert_eq!(insertion.increase, 6);
    assert_eq!(insertion.position, 1);
    assert_eq!(insertion.second_increase, Some(14));

    let single = PartialTour::start(&data, 0).unwrap();
    let insertion = single.cyclic_insertion(&data, 1);
    assert_eq!(insertion.increase, 20);
    assert_eq!(insertion.second_increase, None);
}

#[test]
fn test_partial_tour_tracks_visited_nodes() {
    let data = square_with_decoys();
    let mut partial = PartialTour::start(&data, 3).unwrap();
    partial.insert(0, 5);
    assert_eq!(partial.nodes(), &[5, 3]);
    assert_eq!(partial.last(), 3);
    assert_eq!(partial.unvisited().collect::<Vec<_>>(), vec![0, 1, 2, 4, 6, 7]);
    assert!(!partial.is_complete());
    assert!(matches!(
        partial.exhausted(),
        CycleForgeError::SearchExhausted {
            placed: 2,
            required: 4
        }
    ));
}
