//! Neighborhood selectors.
//!
//! A selector enumerates the moves of one neighborhood pass over the
//! current tour as a lazy, single-pass iterator.
//!
//! - [`FullNeighborhood`] - every valid move in seeded random order
//! - [`CandidateNeighborhood`] - only moves creating a candidate edge
//! - [`Neighborhood`] - either of the two, chosen from configuration
//!
//! [`Neighborhood::moves_after`] lists the moves an applied move may have
//! changed, for callers that keep improving moves between passes.

mod affected;
mod candidate;
mod candidate_neighborhood;
mod full;
mod permutation;

#[cfg(test)]
mod tests;

use std::fmt::Debug;

use cycleforge_config::NeighborhoodConfig;
use cycleforge_core::{ProblemData, Tour};

pub use candidate::CandidateIndex;
pub use candidate_neighborhood::{CandidateMoves, CandidateNeighborhood};
pub use full::{FullMoves, FullNeighborhood};
pub use permutation::SeededPermutation;

use crate::heuristic::r#move::RouteMove;

/// Produces the moves of one neighborhood pass.
pub trait MoveSelector: Send + Debug {
    /// Returns the moves for `tour`.
    ///
    /// Every call starts a fresh pass; the iterator is consumed once.
    fn iter_moves<'a>(
        &'a mut self,
        tour: &'a Tour,
        data: &'a ProblemData,
    ) -> impl Iterator<Item = RouteMove> + 'a;

    /// Returns the approximate number of moves in a pass.
    fn size(&self, tour: &Tour, data: &ProblemData) -> usize;
}

/// Full or candidate neighborhood, as selected by configuration.
#[derive(Debug)]
pub enum Neighborhood {
    Full(FullNeighborhood),
    Candidate(CandidateNeighborhood),
}

/// Moves of one [`Neighborhood`] pass.
pub enum NeighborhoodMoves<'a> {
    Full(FullMoves<'a>),
    Candidate(CandidateMoves<'a>),
}

impl Iterator for NeighborhoodMoves<'_> {
    type Item = RouteMove;

    #[inline]
    fn next(&mut self) -> Option<RouteMove> {
        match self {
            NeighborhoodMoves::Full(moves) => moves.next(),
            NeighborhoodMoves::Candidate(moves) => moves.next(),
        }
    }
}

impl Neighborhood {
    /// Label used in solver names and log events.
    pub fn label(&self) -> String {
        let config = match self {
            Neighborhood::Full(_) => NeighborhoodConfig::full(),
            Neighborhood::Candidate(n) => NeighborhoodConfig::candidate(n.index().candidate_count()),
        };
        config.to_string()
    }

    /// Concrete moves of one pass.
    pub fn moves<'a>(&'a mut self, tour: &'a Tour, data: &'a ProblemData) -> NeighborhoodMoves<'a> {
        match self {
            Neighborhood::Full(n) => NeighborhoodMoves::Full(n.moves(tour, data)),
            Neighborhood::Candidate(n) => NeighborhoodMoves::Candidate(n.moves(tour)),
        }
    }
}

impl MoveSelector for Neighborhood {
    fn iter_moves<'a>(
        &'a mut self,
        tour: &'a Tour,
        data: &'a ProblemData,
    ) -> impl Iterator<Item = RouteMove> + 'a {
        self.moves(tour, data)
    }

    fn size(&self, tour: &Tour, data: &ProblemData) -> usize {
        match self {
            Neighborhood::Full(n) => n.size(tour, data),
            Neighborhood::Candidate(n) => n.size(tour, data),
        }
    }
}
