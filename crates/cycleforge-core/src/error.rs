//! Error types for CycleForge

use thiserror::Error;

/// Main error type for CycleForge operations
#[derive(Debug, Error)]
pub enum CycleForgeError {
    /// Error in solver configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error while loading or validating problem data
    #[error("Instance error: {0}")]
    Instance(#[from] InstanceError),

    /// A constructive algorithm could not place the next node
    #[error("Search exhausted: placed {placed} of {required} nodes")]
    SearchExhausted { placed: usize, required: usize },

    /// A tour violated its structural invariants
    #[error("Invalid tour: {0}")]
    InvalidTour(String),

    /// Move memory referenced state that no longer matches the tour
    /// (should not occur in normal operation)
    #[error("Inconsistent move memory: {0}")]
    InconsistentMemory(String),
}

/// Errors raised while reading or building problem data.
#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected `x;y;cost`, found `{content}`")]
    InvalidLine { line: usize, content: String },

    #[error("line {line}: invalid {field}")]
    InvalidNumber { line: usize, field: &'static str },

    #[error("instance contains no nodes")]
    Empty,

    #[error("node at index {expected} has id {found}")]
    NodeIdMismatch { expected: usize, found: usize },

    #[error("node {node} has negative cost {cost}")]
    NegativeCost { node: usize, cost: i64 },

    #[error("node {node} has a non-finite or out-of-range coordinate")]
    InvalidCoordinate { node: usize },
}

/// Result type alias for CycleForge operations
pub type Result<T> = std::result::Result<T, CycleForgeError>;
