//! Move memory for accelerated steepest descent.
//!
//! Improving moves found during a full pass are remembered by the edges
//! they remove, expressed as node pairs rather than positions. Positions
//! shift with every applied move but node pairs stay meaningful, so each
//! round rebuilds a node-to-position index and re-validates the remembered
//! moves in ascending delta order:
//!
//! - both removed edges present in the same orientation: the move applies
//! - both present but in opposite orientations: keep for a later round
//! - an edge missing (or, for replacements, the incoming node already
//!   in the tour): drop
//!
//! Only 2-opt moves and replacements are remembered. Entries pop by delta,
//! ties by [`MoveKey`], the same order steepest descent picks in. As long
//! as the memory holds every improving move of the current tour (a full
//! pass, then the moves each applied move affected), the first applicable
//! entry is exactly the move a full steepest pass would pick.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use cycleforge_core::{CycleForgeError, NodeId, ProblemData, Result, Tour};

use crate::heuristic::{MoveKey, ReplaceNode, RouteMove, SwapEdges, TourMove};

const NOT_IN_TOUR: usize = usize::MAX;

/// A remembered improving move, described by node identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryEntry {
    /// 2-opt removing `first` and `second` (each as `(from, to)` in tour
    /// order at the time it was found) and adding `(first.0, second.0)`
    /// and `(first.1, second.1)`.
    EdgeSwap {
        first: (NodeId, NodeId),
        second: (NodeId, NodeId),
    },
    /// Replacement of `removed`, sitting between `prev` and `next`, by the
    /// unused node `inserted`.
    Replace {
        prev: NodeId,
        removed: NodeId,
        next: NodeId,
        inserted: NodeId,
    },
}

impl MemoryEntry {
    /// Describes `m` on `tour`, or None for move kinds that are not remembered.
    pub fn from_move(m: &RouteMove, tour: &Tour) -> Option<Self> {
        match m {
            RouteMove::SwapEdges(swap) => Some(MemoryEntry::EdgeSwap {
                first: (
                    tour.node_at(tour.prev_position(swap.start())),
                    tour.node_at(swap.start()),
                ),
                second: (
                    tour.node_at(swap.end()),
                    tour.node_at(tour.next_position(swap.end())),
                ),
            }),
            RouteMove::Replace(replace) => Some(MemoryEntry::Replace {
                prev: tour.node_at(tour.prev_position(replace.position())),
                removed: tour.node_at(replace.position()),
                next: tour.node_at(tour.next_position(replace.position())),
                inserted: replace.node(),
            }),
            RouteMove::SwapNodes(_) => None,
        }
    }

    /// Identity of the remembered move, equal to [`RouteMove::key`] on the
    /// tour it was found on.
    pub fn key(&self) -> MoveKey {
        match *self {
            MemoryEntry::EdgeSwap { first, second } => MoveKey::edge_swap(first, second),
            MemoryEntry::Replace {
                prev,
                removed,
                next,
                inserted,
            } => MoveKey::replace(prev, removed, next, inserted),
        }
    }
}

#[derive(Debug)]
struct Remembered {
    delta: i64,
    key: MoveKey,
    entry: MemoryEntry,
}

impl PartialEq for Remembered {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Remembered {}

impl PartialOrd for Remembered {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Remembered {
    // Reversed: the max-heap yields the most improving, smallest key first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .delta
            .cmp(&self.delta)
            .then_with(|| other.key.cmp(&self.key))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Forward,
    Reversed,
}

enum Verdict {
    Apply(RouteMove),
    Retain,
    Drop,
}

/// Priority queue of remembered improving moves, scoped to one solve call.
#[derive(Debug, Default)]
pub struct MoveMemory {
    heap: BinaryHeap<Remembered>,
    keys: HashSet<MoveKey>,
    positions: Vec<usize>,
}

impl MoveMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Remembers the improving move `m` found on `tour`.
    ///
    /// Returns false if the move kind is not remembered or an equivalent
    /// entry is already queued.
    pub fn remember(&mut self, m: &RouteMove, delta: i64, tour: &Tour) -> bool {
        let Some(entry) = MemoryEntry::from_move(m, tour) else {
            return false;
        };
        let key = entry.key();
        if !self.keys.insert(key) {
            return false;
        }
        self.heap.push(Remembered { delta, key, entry });
        true
    }

    /// Evaluates `moves` on `tour` and remembers the improving ones.
    ///
    /// Returns the number of moves evaluated.
    pub fn remember_improving(
        &mut self,
        moves: impl IntoIterator<Item = RouteMove>,
        tour: &Tour,
        data: &ProblemData,
    ) -> u64 {
        let mut evaluated = 0;
        for m in moves {
            evaluated += 1;
            let delta = m.delta(tour, data);
            if delta < 0 {
                self.remember(&m, delta, tour);
            }
        }
        evaluated
    }

    /// Pops entries in ascending delta order until one applies to `tour`.
    ///
    /// Entries that may become applicable later are queued again; stale
    /// entries are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`CycleForgeError::InconsistentMemory`] if an entry whose
    /// edges were confirmed cannot be turned into a valid move.
    pub fn take_applicable(
        &mut self,
        tour: &Tour,
        data: &ProblemData,
    ) -> Result<Option<(RouteMove, i64)>> {
        if self.heap.is_empty() {
            return Ok(None);
        }
        self.rebuild_positions(tour, data.total_nodes());

        let mut retained = Vec::new();
        let mut found = None;
        while let Some(item) = self.heap.pop() {
            match self.check(&item.entry, tour, data)? {
                Verdict::Apply(m) => {
                    self.keys.remove(&item.key);
                    debug_assert_eq!(m.delta(tour, data), item.delta);
                    found = Some((m, item.delta));
                    break;
                }
                Verdict::Retain => retained.push(item),
                Verdict::Drop => {
                    self.keys.remove(&item.key);
                }
            }
        }
        self.heap.extend(retained);
        Ok(found)
    }

    fn rebuild_positions(&mut self, tour: &Tour, total_nodes: usize) {
        self.positions.clear();
        self.positions.resize(total_nodes, NOT_IN_TOUR);
        for (position, &id) in tour.node_ids().iter().enumerate() {
            self.positions[id] = position;
        }
    }

    fn position(&self, id: NodeId) -> usize {
        self.positions.get(id).copied().unwrap_or(NOT_IN_TOUR)
    }

    fn orientation(&self, tour: &Tour, (from, to): (NodeId, NodeId)) -> Option<Orientation> {
        let pf = self.position(from);
        let pt = self.position(to);
        if pf == NOT_IN_TOUR || pt == NOT_IN_TOUR {
            return None;
        }
        if tour.next_position(pf) == pt {
            Some(Orientation::Forward)
        } else if tour.next_position(pt) == pf {
            Some(Orientation::Reversed)
        } else {
            None
        }
    }

    fn check(&self, entry: &MemoryEntry, tour: &Tour, data: &ProblemData) -> Result<Verdict> {
        match *entry {
            MemoryEntry::EdgeSwap { first, second } => {
                match (
                    self.orientation(tour, first),
                    self.orientation(tour, second),
                ) {
                    (Some(Orientation::Forward), Some(Orientation::Forward)) => {
                        self.reconnect(tour, data, first, second).map(Verdict::Apply)
                    }
                    (Some(Orientation::Reversed), Some(Orientation::Reversed)) => self
                        .reconnect(tour, data, (second.1, second.0), (first.1, first.0))
                        .map(Verdict::Apply),
                    (Some(_), Some(_)) => Ok(Verdict::Retain),
                    _ => Ok(Verdict::Drop),
                }
            }
            MemoryEntry::Replace {
                prev,
                removed,
                next,
                inserted,
            } => {
                if self.position(inserted) != NOT_IN_TOUR {
                    return Ok(Verdict::Drop);
                }
                let position = self.position(removed);
                if position == NOT_IN_TOUR {
                    return Ok(Verdict::Drop);
                }
                let before = tour.node_at(tour.prev_position(position));
                let after = tour.node_at(tour.next_position(position));
                if (before, after) == (prev, next) || (before, after) == (next, prev) {
                    Ok(Verdict::Apply(RouteMove::Replace(ReplaceNode::new(
                        position, inserted,
                    ))))
                } else {
                    Ok(Verdict::Drop)
                }
            }
        }
    }

    /// Builds the 2-opt removing the forward edges `(a, b)` and `(c, d)`.
    ///
    /// Reverses `b..=c`, or the complement `d..=a` when that segment wraps.
    fn reconnect(
        &self,
        tour: &Tour,
        data: &ProblemData,
        (a, b): (NodeId, NodeId),
        (c, d): (NodeId, NodeId),
    ) -> Result<RouteMove> {
        let pb = self.position(b);
        let pc = self.position(c);
        let swap = if pb <= pc {
            SwapEdges::new(pb, pc)
        } else {
            SwapEdges::new(self.position(d), self.position(a))
        };
        if !swap.is_doable(tour, data) {
            return Err(CycleForgeError::InconsistentMemory(format!(
                "edges ({a}, {b}) and ({c}, {d}) map to invalid reversal {}..={}",
                swap.start(),
                swap.end()
            )));
        }
        Ok(RouteMove::SwapEdges(swap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cycleforge_test::{canonical_cycle, random_instance, random_tour};

    fn remember_exact(memory: &mut MoveMemory, m: RouteMove, tour: &Tour, data: &ProblemData) {
        memory.remember(&m, m.delta(tour, data), tour);
    }

    fn sequence(len: usize, data: &ProblemData) -> Tour {
        Tour::new((0..len).collect(), data, "seed", 0)
    }

    #[test]
    fn test_entry_from_edge_swap() {
        let data = random_instance(12, 1);
        let tour = Tour::new(vec![4, 7, 1, 9, 0, 3], &data, "seed", 4);
        let entry = MemoryEntry::from_move(&RouteMove::swap_edges(1, 3), &tour).unwrap();
        assert_eq!(
            entry,
            MemoryEntry::EdgeSwap {
                first: (4, 7),
                second: (9, 0)
            }
        );
        assert_eq!(entry.key(), RouteMove::swap_edges(1, 3).key(&tour));
        assert!(MemoryEntry::from_move(&RouteMove::swap_nodes(1, 3), &tour).is_none());

        let replace = MemoryEntry::from_move(&RouteMove::replace(0, 11), &tour).unwrap();
        assert_eq!(replace.key(), RouteMove::replace(0, 11).key(&tour));
    }

    #[test]
    fn test_equivalent_edge_swaps_share_a_key() {
        let data = random_instance(12, 1);
        let tour = Tour::new(vec![4, 7, 1, 9, 0, 3], &data, "seed", 4);
        let direct = MemoryEntry::from_move(&RouteMove::swap_edges(1, 3), &tour).unwrap();
        let complement = MemoryEntry::EdgeSwap {
            first: (9, 0),
            second: (4, 7),
        };
        assert_eq!(direct.key(), complement.key());

        let reflected = Tour::new(vec![3, 0, 9, 1, 7, 4], &data, "seed", 4);
        let mirrored = MemoryEntry::from_move(&RouteMove::swap_edges(2, 4), &reflected).unwrap();
        assert_eq!(direct.key(), mirrored.key());
    }

    #[test]
    fn test_remember_deduplicates() {
        let data = random_instance(12, 2);
        let tour = random_tour(&data, 3);
        let mut memory = MoveMemory::new();
        assert!(memory.remember(&RouteMove::swap_edges(1, 3), -5, &tour));
        assert!(!memory.remember(&RouteMove::swap_edges(1, 3), -5, &tour));
        assert!(!memory.remember(&RouteMove::swap_nodes(1, 3), -5, &tour));
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_remember_improving_skips_worsening_moves() {
        let data = random_instance(20, 4);
        let tour = random_tour(&data, 4);
        let moves: Vec<RouteMove> = (1..tour.len() - 1)
            .map(|j| RouteMove::swap_edges(0, j))
            .collect();
        let improving = moves
            .iter()
            .filter(|m| m.delta(&tour, &data) < 0)
            .count();

        let mut memory = MoveMemory::new();
        assert_eq!(
            memory.remember_improving(moves.iter().copied(), &tour, &data),
            moves.len() as u64
        );
        assert_eq!(memory.len(), improving);
    }

    #[test]
    fn test_applies_after_rotation() {
        let data = random_instance(20, 5);
        let tour = sequence(10, &data);
        let original = RouteMove::swap_edges(2, 4);
        let mut memory = MoveMemory::new();
        remember_exact(&mut memory, original, &tour, &data);

        // Rotating moves every position but keeps every edge.
        let rotated = Tour::new(vec![5, 6, 7, 8, 9, 0, 1, 2, 3, 4], &data, "seed", 0);
        let (m, delta) = memory.take_applicable(&rotated, &data).unwrap().unwrap();
        assert_eq!(m, RouteMove::swap_edges(7, 9));
        assert_eq!(delta, original.delta(&tour, &data));
        assert!(memory.is_empty());
    }

    #[test]
    fn test_wrapping_segment_uses_complement() {
        let data = random_instance(20, 6);
        let tour = sequence(8, &data);
        let original = RouteMove::swap_edges(2, 4);
        let mut memory = MoveMemory::new();
        remember_exact(&mut memory, original, &tour, &data);

        // Node 2 now sits after node 4, so 2..=4 would wrap.
        let rotated = Tour::new(vec![3, 4, 5, 6, 7, 0, 1, 2], &data, "seed", 0);
        let (m, _) = memory.take_applicable(&rotated, &data).unwrap().unwrap();
        assert_eq!(m, RouteMove::swap_edges(2, 6));

        let expected = original.apply(&tour, &data);
        let actual = m.apply(&rotated, &data);
        assert_eq!(actual.objective(), expected.objective());
        assert_eq!(
            canonical_cycle(actual.node_ids()),
            canonical_cycle(expected.node_ids())
        );
    }

    #[test]
    fn test_reversed_edges_apply() {
        let data = random_instance(20, 7);
        let tour = sequence(8, &data);
        let original = RouteMove::swap_edges(2, 4);
        let mut memory = MoveMemory::new();
        remember_exact(&mut memory, original, &tour, &data);

        let reflected = Tour::new(vec![7, 6, 5, 4, 3, 2, 1, 0], &data, "seed", 0);
        let (m, _) = memory.take_applicable(&reflected, &data).unwrap().unwrap();
        assert_eq!(m, RouteMove::swap_edges(3, 5));
        let expected = original.apply(&tour, &data);
        let actual = m.apply(&reflected, &data);
        assert_eq!(
            canonical_cycle(actual.node_ids()),
            canonical_cycle(expected.node_ids())
        );
    }

    #[test]
    fn test_mixed_orientation_is_retained() {
        let data = random_instance(20, 8);
        let tour = sequence(8, &data);
        let mut memory = MoveMemory::new();
        // Removes (1, 2) and (4, 5).
        remember_exact(&mut memory, RouteMove::swap_edges(2, 4), &tour, &data);

        // (1, 2) is still forward, (4, 5) is now traversed backwards.
        let mixed = Tour::new(vec![0, 1, 2, 6, 7, 5, 4, 3], &data, "seed", 0);
        assert!(memory.take_applicable(&mixed, &data).unwrap().is_none());
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_missing_edge_is_dropped() {
        let data = random_instance(20, 9);
        let tour = sequence(8, &data);
        let mut memory = MoveMemory::new();
        remember_exact(&mut memory, RouteMove::swap_edges(2, 4), &tour, &data);

        let broken = Tour::new(vec![0, 1, 3, 2, 4, 5, 6, 7], &data, "seed", 0);
        assert!(memory.take_applicable(&broken, &data).unwrap().is_none());
        assert!(memory.is_empty());
    }

    #[test]
    fn test_replace_entry() {
        let data = random_instance(20, 10);
        let tour = sequence(8, &data);
        let mut memory = MoveMemory::new();
        remember_exact(&mut memory, RouteMove::replace(3, 12), &tour, &data);
        remember_exact(&mut memory, RouteMove::replace(5, 13), &tour, &data);

        // Node 12 is already used, so only the second entry can apply.
        let with_twelve = Tour::new(vec![12, 1, 2, 3, 4, 5, 6, 7], &data, "seed", 0);
        let (m, _) = memory
            .take_applicable(&with_twelve, &data)
            .unwrap()
            .unwrap();
        assert_eq!(m, RouteMove::replace(5, 13));
        assert!(memory.take_applicable(&with_twelve, &data).unwrap().is_none());
        assert!(memory.is_empty());
    }

    #[test]
    fn test_replace_with_changed_neighbours_is_dropped() {
        let data = random_instance(20, 12);
        let tour = sequence(8, &data);
        let mut memory = MoveMemory::new();
        remember_exact(&mut memory, RouteMove::replace(3, 12), &tour, &data);

        let shifted = Tour::new(vec![0, 1, 2, 3, 5, 4, 6, 7], &data, "seed", 0);
        assert!(memory.take_applicable(&shifted, &data).unwrap().is_none());
        assert!(memory.is_empty());
    }

    #[test]
    fn test_pops_most_improving_first() {
        let data = random_instance(20, 11);
        let tour = sequence(10, &data);
        let moves = [
            RouteMove::replace(1, 15),
            RouteMove::replace(6, 16),
            RouteMove::replace(8, 17),
        ];
        let mut memory = MoveMemory::new();
        for m in moves {
            remember_exact(&mut memory, m, &tour, &data);
        }
        let expected = moves
            .iter()
            .copied()
            .min_by_key(|m| (m.delta(&tour, &data), m.key(&tour)))
            .unwrap();

        let (m, _) = memory.take_applicable(&tour, &data).unwrap().unwrap();
        assert_eq!(m, expected);
        assert_eq!(memory.len(), 2);
    }
}
