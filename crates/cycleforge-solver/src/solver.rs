//! The `Solver` capability shared by seeders, local search and wrappers.

use cycleforge_core::{NodeId, ProblemData, Result, Tour};

/// Anything that turns problem data and a start node into a tour.
///
/// Seeders, the local-search engine and the metaheuristic wrappers all
/// implement this, so any of them can seed any other.
pub trait Solver: Send {
    /// Produces a tour for `data`, seeded from `start_node`.
    fn solve(&mut self, data: &ProblemData, start_node: NodeId) -> Result<Tour>;

    /// Human-readable label recorded as the tour's provenance.
    fn name(&self) -> String;
}

impl<T: Solver + ?Sized> Solver for Box<T> {
    fn solve(&mut self, data: &ProblemData, start_node: NodeId) -> Result<Tour> {
        (**self).solve(data, start_node)
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

/// Adapter that always returns the same tour.
///
/// Lets a local search refine an already-found tour by using it as the seed.
///
/// # Examples
///
/// ```
/// use cycleforge_core::{ProblemData, Tour};
/// use cycleforge_solver::{FixedTour, Solver};
///
/// let data = ProblemData::from_coordinates(
///     "pair",
///     &[(0.0, 0.0, 0), (1.0, 0.0, 0), (2.0, 0.0, 0), (3.0, 0.0, 0)],
/// )
/// .unwrap();
/// let tour = Tour::new(vec![1, 0], &data, "given", 1);
/// let mut fixed = FixedTour::new(tour.clone());
/// assert_eq!(fixed.solve(&data, 3).unwrap(), tour);
/// ```
#[derive(Debug, Clone)]
pub struct FixedTour {
    tour: Tour,
}

impl FixedTour {
    pub fn new(tour: Tour) -> Self {
        Self { tour }
    }
}

impl Solver for FixedTour {
    fn solve(&mut self, _data: &ProblemData, _start_node: NodeId) -> Result<Tour> {
        Ok(self.tour.clone())
    }

    fn name(&self) -> String {
        self.tour.algorithm().to_string()
    }
}
