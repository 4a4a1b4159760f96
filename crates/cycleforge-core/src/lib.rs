//! CycleForge Core - problem data and tour primitives
//!
//! This crate provides the fundamental abstractions for CycleForge:
//! - Nodes and the immutable problem data (distance matrix, selection size)
//! - Tours as value objects with a cached objective
//! - Objective evaluation (full cost and insertion cost)
//! - Instance loading from the `x;y;cost` text format

pub mod domain;
pub mod error;
pub mod io;
pub mod objective;

pub use domain::{Node, NodeId, ProblemData, Tour, MAX_COORDINATE};
pub use error::{CycleForgeError, InstanceError, Result};
pub use io::{parse_instance, read_instance};
pub use objective::{full_cost, insertion_cost};
