//! Common interface for the pipes solvers.
//!
//! The harness, benches and tests drive both algorithms through [`Solver`],
//! so adding a new strategy only needs one more implementation here.
//!
//! Contract for implementors:
//! - reject an empty grid with [`PipesError::InvalidGrid`](crate::PipesError::InvalidGrid)
//!   before doing any work,
//! - return a `Complete` path of maximum reward, or
//!   [`PipesError::NoPathExists`](crate::PipesError::NoPathExists),
//! - be deterministic: the same grid always yields the same path.

use crate::error::Result;
use crate::grid::Grid;
use crate::path::Path;

/// A strategy that finds a maximum-reward monotone path through a grid.
pub trait Solver {
    /// Short label used in reports.
    fn name(&self) -> &'static str;

    /// Whether the solver accepts a grid of this shape.
    ///
    /// Solvers with a size ceiling override this so callers can skip them
    /// instead of paying for an error.
    fn supports(&self, _rows: usize, _columns: usize) -> bool {
        true
    }

    /// Solve `grid`; the returned path borrows it.
    fn solve<'g>(&self, grid: &'g Grid) -> Result<Path<'g>>;
}

/// Exhaustive enumeration of every move sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exhaustive;

/// Table-filling dynamic program.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicProgramming;

impl Solver for Exhaustive {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn supports(&self, rows: usize, columns: usize) -> bool {
        rows > 0 && columns > 0 && rows + columns - 2 < crate::exhaustive::MAX_STEPS
    }

    fn solve<'g>(&self, grid: &'g Grid) -> Result<Path<'g>> {
        crate::exhaustive::solve_exhaustive(grid)
    }
}

impl Solver for DynamicProgramming {
    fn name(&self) -> &'static str {
        "dynamic"
    }

    fn solve<'g>(&self, grid: &'g Grid) -> Result<Path<'g>> {
        crate::dynamic::solve_dynamic(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_solvers_through_the_trait() {
        let grid: Grid = "SoX\nooo\nXoG".parse().unwrap();
        let solvers: [&dyn Solver; 2] = [&Exhaustive, &DynamicProgramming];
        for solver in solvers {
            let path = solver.solve(&grid).unwrap();
            assert_eq!(path.total_open(), 5, "{}", solver.name());
        }
    }

    #[test]
    fn exhaustive_advertises_its_ceiling() {
        assert!(Exhaustive.supports(32, 32));
        assert!(!Exhaustive.supports(33, 33));
        assert!(!Exhaustive.supports(0, 5));
        assert!(DynamicProgramming.supports(1000, 1000));
    }
}
