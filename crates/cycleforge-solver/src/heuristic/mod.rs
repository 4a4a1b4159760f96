//! Heuristic building blocks: moves and neighborhood selectors.

pub mod r#move;
pub mod selector;

pub use r#move::{
    MoveKey, ReplaceNode, RouteMove, SwapEdges, SwapNodes, TourChange, TourMove,
};
pub use selector::{
    CandidateIndex, CandidateNeighborhood, FullNeighborhood, MoveSelector, Neighborhood,
    NeighborhoodMoves, SeededPermutation,
};
