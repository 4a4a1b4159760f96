//! Tour - an ordered cyclic selection of nodes with a cached objective.

use std::collections::HashSet;
use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use super::{NodeId, ProblemData};
use crate::error::{CycleForgeError, Result};
use crate::objective::full_cost;

/// An ordered cyclic sequence of distinct node identifiers.
///
/// Tours are value objects: moves produce new tours and never mutate the
/// caller's copy. The cached objective always equals
/// [`full_cost`](crate::objective::full_cost) of the node sequence.
///
/// Besides the nodes, a tour carries provenance: the label of the algorithm
/// that produced it, the start node it was seeded from and the elapsed
/// solve time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    node_ids: Vec<NodeId>,
    objective: i64,
    algorithm: String,
    start_node: NodeId,
    execution_time: Duration,
}

impl Tour {
    /// Builds a tour and computes its objective from scratch.
    pub fn new(
        node_ids: Vec<NodeId>,
        data: &ProblemData,
        algorithm: impl Into<String>,
        start_node: NodeId,
    ) -> Self {
        let objective = full_cost(data, &node_ids);
        Self::with_objective(node_ids, objective, algorithm, start_node)
    }

    /// Builds a tour with an objective the caller already knows.
    ///
    /// Used by move application, where the objective is `old + delta`.
    pub fn with_objective(
        node_ids: Vec<NodeId>,
        objective: i64,
        algorithm: impl Into<String>,
        start_node: NodeId,
    ) -> Self {
        Self {
            node_ids,
            objective,
            algorithm: algorithm.into(),
            start_node,
            execution_time: Duration::ZERO,
        }
    }

    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    pub fn into_node_ids(self) -> Vec<NodeId> {
        self.node_ids
    }

    pub fn len(&self) -> usize {
        self.node_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    pub fn objective(&self) -> i64 {
        self.objective
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    pub fn execution_time(&self) -> Duration {
        self.execution_time
    }

    pub fn execution_time_ms(&self) -> u64 {
        self.execution_time.as_millis() as u64
    }

    #[inline]
    pub fn node_at(&self, position: usize) -> NodeId {
        self.node_ids[position]
    }

    /// Position preceding `position` on the cycle.
    #[inline]
    pub fn prev_position(&self, position: usize) -> usize {
        if position == 0 {
            self.node_ids.len() - 1
        } else {
            position - 1
        }
    }

    /// Position following `position` on the cycle.
    #[inline]
    pub fn next_position(&self, position: usize) -> usize {
        if position + 1 == self.node_ids.len() {
            0
        } else {
            position + 1
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node_ids.contains(&id)
    }

    /// Returns a copy relabelled with a new producing algorithm and start node.
    pub fn relabeled(mut self, algorithm: impl Into<String>, start_node: NodeId) -> Self {
        self.algorithm = algorithm.into();
        self.start_node = start_node;
        self
    }

    pub fn with_execution_time(mut self, execution_time: Duration) -> Self {
        self.execution_time = execution_time;
        self
    }

    /// Checks the structural invariants against `data`.
    ///
    /// Node ids must be pairwise distinct, inside `[0, total_nodes)`, the
    /// tour must hold exactly `selection_size` nodes and the cached
    /// objective must match a full recomputation.
    pub fn validate(&self, data: &ProblemData) -> Result<()> {
        if self.node_ids.len() != data.selection_size() {
            return Err(CycleForgeError::InvalidTour(format!(
                "expected {} nodes, found {}",
                data.selection_size(),
                self.node_ids.len()
            )));
        }
        let mut seen = HashSet::with_capacity(self.node_ids.len());
        for &id in &self.node_ids {
            if id >= data.total_nodes() {
                return Err(CycleForgeError::InvalidTour(format!(
                    "node {id} out of range"
                )));
            }
            if !seen.insert(id) {
                return Err(CycleForgeError::InvalidTour(format!(
                    "node {id} appears twice"
                )));
            }
        }
        let expected = full_cost(data, &self.node_ids);
        if expected != self.objective {
            return Err(CycleForgeError::InvalidTour(format!(
                "cached objective {} differs from {}",
                self.objective, expected
            )));
        }
        Ok(())
    }

    /// Writes the tour as semicolon separated rows.
    ///
    /// Header `position;node_id;x;y;cost`, one row per visited node and a
    /// trailing summary row with the algorithm, objective and elapsed time.
    pub fn write_table<W: Write>(&self, data: &ProblemData, mut out: W) -> io::Result<()> {
        writeln!(out, "position;node_id;x;y;cost")?;
        for (position, &id) in self.node_ids.iter().enumerate() {
            let node = data.node(id);
            writeln!(
                out,
                "{};{};{};{};{}",
                position,
                id,
                node.x(),
                node.y(),
                node.cost()
            )?;
        }
        writeln!(
            out,
            "# algorithm={};start_node={};objective={};execution_time_ms={}",
            self.algorithm,
            self.start_node,
            self.objective,
            self.execution_time_ms()
        )
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (start {}): objective {} in {} ms [",
            self.algorithm,
            self.start_node,
            self.objective,
            self.execution_time_ms()
        )?;
        for (i, id) in self.node_ids.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{id}")?;
        }
        write!(f, "]")
    }
}
