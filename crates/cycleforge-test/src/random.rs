//! Deterministic pseudo-random instances.

use cycleforge_core::{Node, ProblemData, Tour};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `n` nodes with coordinates in `[0, 1000)` and costs in `[0, 500)`.
pub fn random_instance(n: usize, seed: u64) -> ProblemData {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let nodes = (0..n)
        .map(|id| {
            let x = rng.random_range(0..1000) as f64;
            let y = rng.random_range(0..1000) as f64;
            let cost = rng.random_range(0..500);
            Node::new(id, x, y, cost)
        })
        .collect();
    ProblemData::new(format!("random-{n}-{seed}"), nodes).expect("random fixture is valid")
}

/// A random valid tour for `data`.
pub fn random_tour(data: &ProblemData, seed: u64) -> Tour {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ids: Vec<usize> = (0..data.total_nodes()).collect();
    ids.shuffle(&mut rng);
    ids.truncate(data.selection_size());
    let start = ids[0];
    Tour::new(ids, data, "fixture", start)
}
