//! Domain model: nodes, problem data and tours.

mod node;
mod problem;
mod tour;

pub use node::{Node, NodeId};
pub use problem::{ProblemData, MAX_COORDINATE};
pub use tour::Tour;
