//! LocalSearch - descent driver implementing [`Solver`].

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use cycleforge_config::{LocalSearchConfig, NeighborhoodKind};
use cycleforge_core::{CycleForgeError, NodeId, ProblemData, Result, Tour};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use super::forager::{BestImprovingForager, LocalSearchForager, StrategyForager};
use super::memory::MoveMemory;
use crate::heuristic::{
    CandidateIndex, CandidateNeighborhood, FullNeighborhood, Neighborhood, RouteMove, TourMove,
};
use crate::solver::Solver;
use crate::stats::SearchStats;

/// Descent over replacement and intra-tour moves, seeded by another solver.
///
/// The search stops once a neighborhood pass yields no move with a
/// negative delta. Full neighborhoods are visited in a fresh seeded order on
/// every pass; the seed stream derives from the engine seed, so a given
/// engine, seed tour and instance always produce the same result.
///
/// # Example
///
/// ```
/// use cycleforge_config::LocalSearchConfig;
/// use cycleforge_solver::{LocalSearch, RandomSeeder, Solver};
/// use cycleforge_test::square::{square_with_decoys, PERIMETER_OBJECTIVE};
///
/// let data = square_with_decoys();
/// let mut search = LocalSearch::new(RandomSeeder::new(7), LocalSearchConfig::default())
///     .unwrap()
///     .with_seed(7);
/// let tour = search.solve(&data, 0).unwrap();
/// assert_eq!(tour.objective(), PERIMETER_OBJECTIVE);
/// ```
pub struct LocalSearch {
    seeder: Box<dyn Solver>,
    config: LocalSearchConfig,
    rng: ChaCha8Rng,
    candidates: Option<Arc<CandidateIndex>>,
    stats: SearchStats,
}

impl LocalSearch {
    /// Creates an engine refining the tours produced by `seeder`.
    ///
    /// # Errors
    ///
    /// Returns [`CycleForgeError::Config`] for an invalid combination of
    /// options, before any search runs.
    pub fn new(seeder: impl Solver + 'static, config: LocalSearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            seeder: Box::new(seeder),
            config,
            rng: ChaCha8Rng::seed_from_u64(0),
            candidates: None,
            stats: SearchStats::default(),
        })
    }

    /// Seeds the stream of full-neighborhood orders.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Shares a prebuilt candidate index.
    ///
    /// The index is only used for the instance and candidate count it was
    /// built for; otherwise it is rebuilt on demand.
    pub fn with_candidate_index(mut self, index: Arc<CandidateIndex>) -> Self {
        self.candidates = Some(index);
        self
    }

    pub(crate) fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    pub(crate) fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
        self.stats.start();
    }

    pub fn config(&self) -> &LocalSearchConfig {
        &self.config
    }

    /// Statistics of the most recent solve.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Returns the candidate index for `data`, building and caching it if needed.
    pub fn candidate_index(&mut self, data: &ProblemData) -> Arc<CandidateIndex> {
        let k = self.config.neighborhood.candidate_count;
        if let Some(index) = &self.candidates {
            if index.is_built_for(data, k) {
                return Arc::clone(index);
            }
        }
        let started = Instant::now();
        let index = Arc::new(CandidateIndex::build(data, k));
        debug!(
            event = "candidate_index",
            nodes = data.total_nodes(),
            candidate_count = k,
            duration_ms = started.elapsed().as_millis() as u64,
        );
        self.candidates = Some(Arc::clone(&index));
        index
    }

    /// Runs the descent from `tour` until no improving move remains.
    ///
    /// # Errors
    ///
    /// Returns [`CycleForgeError::InvalidTour`] if `tour` is not a valid
    /// selection for `data`, or [`CycleForgeError::InconsistentMemory`] if
    /// move memory reconstructs an invalid move.
    pub fn improve(&mut self, data: &ProblemData, tour: Tour) -> Result<Tour> {
        tour.validate(data)?;
        if tour.len() <= 1 {
            return Ok(tour);
        }

        let mut neighborhood = self.build_neighborhood(data);
        debug!(
            event = "phase_start",
            phase = "Local Search",
            neighborhood = %neighborhood.label(),
            objective = tour.objective(),
        );

        let improved = if self.config.move_memory {
            self.converge_with_memory(data, tour, &mut neighborhood)?
        } else {
            self.converge(data, tour, &mut neighborhood)
        };

        debug!(
            event = "phase_end",
            phase = "Local Search",
            steps = self.stats.steps,
            full_scans = self.stats.full_scans,
            objective = improved.objective(),
        );
        Ok(improved)
    }

    fn build_neighborhood(&mut self, data: &ProblemData) -> Neighborhood {
        let intra = self.config.intra_move;
        match self.config.neighborhood.kind {
            NeighborhoodKind::Full => {
                Neighborhood::Full(FullNeighborhood::new(intra, self.rng.random()))
            }
            NeighborhoodKind::Candidate => Neighborhood::Candidate(CandidateNeighborhood::new(
                intra,
                self.candidate_index(data),
            )),
        }
    }

    fn converge(&mut self, data: &ProblemData, tour: Tour, neighborhood: &mut Neighborhood) -> Tour {
        let mut forager = StrategyForager::for_strategy(self.config.strategy);
        let mut current = tour;
        loop {
            forager.step_started();
            self.stats.record_full_scan();
            for m in neighborhood.moves(&current, data) {
                self.stats.record_move();
                let delta = m.delta(&current, data);
                if delta < 0 {
                    forager.add_move(m, delta, &current);
                    if forager.is_quit_early() {
                        break;
                    }
                }
            }
            let Some((m, delta)) = forager.pick_move() else {
                return current;
            };
            current = self.step(data, &current, m, delta);
        }
    }

    /// Steepest descent drawing moves from a [`MoveMemory`].
    ///
    /// The memory is filled by a full pass and then brought up to date
    /// after every step with the moves the step affected, so a memory hit
    /// is always the move a full pass would have picked.
    fn converge_with_memory(
        &mut self,
        data: &ProblemData,
        tour: Tour,
        neighborhood: &mut Neighborhood,
    ) -> Result<Tour> {
        let mut memory = MoveMemory::new();
        let mut forager = BestImprovingForager::new();
        let mut current = tour;
        loop {
            let (m, delta) = match memory.take_applicable(&current, data)? {
                Some((m, delta)) => {
                    self.stats.record_memory_hit();
                    trace!(
                        event = "memory_hit",
                        kind = m.kind(),
                        delta = delta,
                        remembered = memory.len(),
                    );
                    (m, delta)
                }
                None => {
                    forager.step_started();
                    self.stats.record_full_scan();
                    for m in neighborhood.moves(&current, data) {
                        self.stats.record_move();
                        let delta = m.delta(&current, data);
                        if delta < 0 {
                            memory.remember(&m, delta, &current);
                            forager.add_move(m, delta, &current);
                        }
                    }
                    match forager.pick_move() {
                        Some(picked) => picked,
                        None => return Ok(current),
                    }
                }
            };

            let change = m.change(&current);
            current = self.step(data, &current, m, delta);
            if let Some(change) = change {
                let affected = neighborhood.moves_after(&current, data, change);
                let evaluated = memory.remember_improving(affected, &current, data);
                self.stats.record_moves(evaluated);
            }
        }
    }

    fn step(&mut self, data: &ProblemData, current: &Tour, m: RouteMove, delta: i64) -> Tour {
        let next = m.apply(current, data);
        self.stats.record_step();
        debug!(
            event = "step",
            step = self.stats.steps,
            kind = m.kind(),
            delta = delta,
            objective = next.objective(),
        );
        next
    }
}

impl Solver for LocalSearch {
    fn solve(&mut self, data: &ProblemData, start_node: NodeId) -> Result<Tour> {
        if start_node >= data.total_nodes() {
            return Err(CycleForgeError::InvalidTour(format!(
                "start node {start_node} out of range for {} nodes",
                data.total_nodes()
            )));
        }
        self.reset_stats();
        info!(
            event = "solve_start",
            solver = %self.name(),
            total_nodes = data.total_nodes(),
            selection_size = data.selection_size(),
            start_node = start_node,
        );

        let seed = self.seeder.solve(data, start_node)?;
        let initial = seed.objective();
        let improved = self.improve(data, seed)?;

        let elapsed = self.stats.elapsed();
        info!(
            event = "solve_end",
            duration_ms = elapsed.as_millis() as u64,
            steps = self.stats.steps,
            moves_evaluated = self.stats.moves_evaluated,
            memory_hits = self.stats.memory_hits,
            full_scans = self.stats.full_scans,
            speed = self.stats.moves_per_second(),
            initial = initial,
            objective = improved.objective(),
        );
        Ok(improved
            .relabeled(self.name(), start_node)
            .with_execution_time(elapsed))
    }

    fn name(&self) -> String {
        let memory = if self.config.move_memory {
            ", move memory"
        } else {
            ""
        };
        format!(
            "Local Search - {}, {}, {}, {}{}",
            self.seeder.name(),
            self.config.intra_move,
            self.config.strategy,
            self.config.neighborhood,
            memory
        )
    }
}

impl fmt::Debug for LocalSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSearch")
            .field("seeder", &self.seeder.name())
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish()
    }
}
