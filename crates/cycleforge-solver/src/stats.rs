//! Search statistics.
//!
//! Plain counters collected during one solve call.

use std::time::{Duration, Instant};

/// Counters for one local-search run.
///
/// # Example
///
/// ```
/// use cycleforge_solver::stats::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_full_scan();
/// stats.record_move();
/// stats.record_move();
/// stats.record_step();
/// stats.record_memory_hit();
/// stats.record_moves(5);
///
/// assert_eq!(stats.steps, 1);
/// assert_eq!(stats.moves_evaluated, 7);
/// assert_eq!(stats.full_scans, 1);
/// assert_eq!(stats.memory_hits, 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    start_time: Option<Instant>,
    /// Improving moves applied.
    pub steps: u64,
    /// Move deltas evaluated, in neighborhood passes and memory updates.
    pub moves_evaluated: u64,
    /// Steps served from move memory without a rescan.
    pub memory_hits: u64,
    /// Complete neighborhood passes.
    pub full_scans: u64,
}

impl SearchStats {
    /// Marks the start of solving.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Returns the elapsed time since solving started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn record_step(&mut self) {
        self.steps += 1;
    }

    pub fn record_move(&mut self) {
        self.moves_evaluated += 1;
    }

    /// Records a batch of `count` evaluated moves.
    pub fn record_moves(&mut self, count: u64) {
        self.moves_evaluated += count;
    }

    pub fn record_memory_hit(&mut self) {
        self.memory_hits += 1;
    }

    pub fn record_full_scan(&mut self) {
        self.full_scans += 1;
    }

    /// Returns the moves per second rate.
    pub fn moves_per_second(&self) -> u64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            (self.moves_evaluated as f64 / secs) as u64
        } else {
            0
        }
    }
}
