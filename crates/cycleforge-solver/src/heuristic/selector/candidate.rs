//! Candidate index: the k cheapest neighbours of every node.
//!
//! Neighbour cost is `distance(a, b) + cost(b)`, so an expensive node close
//! by can rank behind a cheap node further away. Candidacy is directional:
//! `b` being a candidate of `a` says nothing about `a` being one of `b`.

use cycleforge_core::{NodeId, ProblemData};

/// Precomputed k-nearest-neighbour lists, built once per problem instance.
///
/// # Example
///
/// ```
/// use cycleforge_core::ProblemData;
/// use cycleforge_solver::heuristic::CandidateIndex;
///
/// let data = ProblemData::from_coordinates(
///     "row",
///     &[(0.0, 0.0, 0), (1.0, 0.0, 50), (2.0, 0.0, 0), (9.0, 0.0, 0)],
/// )
/// .unwrap();
/// let index = CandidateIndex::build(&data, 2);
///
/// // Node 1 is closest to node 0 but its cost pushes it behind 2 and 3.
/// assert_eq!(index.neighbors_of(0), &[2, 3]);
/// assert!(index.is_candidate(0, 3));
/// assert!(!index.is_candidate(0, 1));
/// ```
#[derive(Debug, Clone)]
pub struct CandidateIndex {
    problem_id: u64,
    candidate_count: usize,
    neighbors: Vec<Vec<NodeId>>,
    /// Nodes listing each node among their candidates.
    listed_by: Vec<Vec<NodeId>>,
}

impl CandidateIndex {
    /// Builds the index in O(n² log n).
    ///
    /// Ties are broken by node id so the index is deterministic.
    pub fn build(data: &ProblemData, candidate_count: usize) -> Self {
        let n = data.total_nodes();
        let neighbors: Vec<Vec<NodeId>> = (0..n)
            .map(|from| {
                let mut ranked: Vec<(i64, NodeId)> = (0..n)
                    .filter(|&to| to != from)
                    .map(|to| (data.weighted_distance(from, to), to))
                    .collect();
                ranked.sort_unstable();
                ranked.truncate(candidate_count);
                ranked.into_iter().map(|(_, to)| to).collect()
            })
            .collect();
        let mut listed_by = vec![Vec::new(); n];
        for (from, list) in neighbors.iter().enumerate() {
            for &to in list {
                listed_by[to].push(from);
            }
        }

        Self {
            problem_id: data.id(),
            candidate_count,
            neighbors,
            listed_by,
        }
    }

    /// Id of the problem instance this index was built for.
    pub fn problem_id(&self) -> u64 {
        self.problem_id
    }

    pub fn candidate_count(&self) -> usize {
        self.candidate_count
    }

    /// Number of nodes covered by the index.
    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns true if this index was built for `data` with `candidate_count`.
    pub fn is_built_for(&self, data: &ProblemData, candidate_count: usize) -> bool {
        self.problem_id == data.id() && self.candidate_count == candidate_count
    }

    /// Candidates of `node`, cheapest first.
    #[inline]
    pub fn neighbors_of(&self, node: NodeId) -> &[NodeId] {
        &self.neighbors[node]
    }

    /// Nodes having `node` among their candidates, ascending by id.
    #[inline]
    pub fn listed_by(&self, node: NodeId) -> &[NodeId] {
        &self.listed_by[node]
    }

    /// Nodes sharing a candidate edge with `node`, possibly repeated.
    pub fn related(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors[node]
            .iter()
            .chain(&self.listed_by[node])
            .copied()
    }

    /// Returns true if `b` is among the candidates of `a`.
    #[inline]
    pub fn is_candidate(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors[a].contains(&b)
    }

    /// Returns true if the edge `{a, b}` is a candidate edge of either endpoint.
    #[inline]
    pub fn is_candidate_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.is_candidate(a, b) || self.is_candidate(b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cycleforge_test::random_instance;
    use cycleforge_test::square::square_with_decoys;

    #[test]
    fn test_neighbors_are_sorted_by_weighted_distance() {
        let data = random_instance(30, 12);
        let index = CandidateIndex::build(&data, 6);
        for from in 0..data.total_nodes() {
            let neighbors = index.neighbors_of(from);
            assert_eq!(neighbors.len(), 6);
            assert!(!neighbors.contains(&from));
            for pair in neighbors.windows(2) {
                assert!(
                    data.weighted_distance(from, pair[0]) <= data.weighted_distance(from, pair[1])
                );
            }
            let worst = data.weighted_distance(from, neighbors[5]);
            for other in (0..data.total_nodes()).filter(|o| *o != from && !neighbors.contains(o)) {
                assert!(data.weighted_distance(from, other) >= worst);
            }
        }
    }

    #[test]
    fn test_candidate_count_larger_than_instance() {
        let data = square_with_decoys();
        let index = CandidateIndex::build(&data, 50);
        assert_eq!(index.neighbors_of(0).len(), 7);
    }

    #[test]
    fn test_corners_rank_before_decoys() {
        let data = square_with_decoys();
        let index = CandidateIndex::build(&data, 3);
        assert_eq!(index.neighbors_of(0), &[1, 3, 2]);
        assert!(index.is_candidate_edge(2, 0));
        assert!(!index.is_candidate(0, 4));
    }

    #[test]
    fn test_listed_by_inverts_neighbors() {
        let data = random_instance(25, 3);
        let index = CandidateIndex::build(&data, 4);
        for a in 0..data.total_nodes() {
            for b in 0..data.total_nodes() {
                assert_eq!(index.listed_by(b).contains(&a), index.is_candidate(a, b));
            }
            for b in index.related(a) {
                assert!(index.is_candidate_edge(a, b));
            }
        }
    }

    #[test]
    fn test_is_built_for() {
        let data = square_with_decoys();
        let other = square_with_decoys();
        let index = CandidateIndex::build(&data, 3);
        assert!(index.is_built_for(&data, 3));
        assert!(!index.is_built_for(&data, 4));
        assert!(!index.is_built_for(&other, 3));
    }
}
