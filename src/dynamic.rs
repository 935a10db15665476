//! Dynamic program over a rows × columns table.
//!
//! `A[r][c]` holds the best feasible path reaching `(r, c)`, or nothing when
//! no path gets there. The recurrence:
//!
//! - `A[0][0]` is the zero-move path at start,
//! - rock cells are infeasible and feed nothing forward,
//! - any other cell extends the better of `A[r-1][c]` by a down move and
//!   `A[r][c-1]` by a right move; ties go to the cell above.
//!
//! Entries do not store whole move lists. Each one keeps its reward and the
//! single move that reached it, which names its predecessor; a path is
//! rebuilt by walking those moves back to the origin. Filling is
//! O(rows · columns) and extracting one path is O(rows + columns).

use crate::error::{PipesError, Result};
use crate::grid::Grid;
use crate::path::{Path, Step};
use crate::utils::ensure_non_empty;

/// A feasible table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Reward of the best path reaching this cell.
    pub reward: usize,
    /// Last move of that path; `None` only at the origin.
    pub via: Option<Step>,
}

/// The filled table for one grid.
#[derive(Debug, Clone)]
pub struct RewardTable<'g> {
    grid: &'g Grid,
    entries: Vec<Option<Entry>>,
}

impl<'g> RewardTable<'g> {
    /// Fill the table for `grid`.
    ///
    /// # Errors
    /// [`PipesError::InvalidGrid`] for a grid with a zero dimension.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "debug",
            skip(grid),
            fields(rows = grid.rows(), columns = grid.columns())
        )
    )]
    pub fn build(grid: &'g Grid) -> Result<Self> {
        ensure_non_empty(grid)?;
        let entries = fill(grid);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            feasible = entries.iter().filter(|e| e.is_some()).count(),
            "table filled"
        );

        Ok(Self { grid, entries })
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    /// Entry at `(row, col)`; `None` when infeasible or out of bounds.
    #[inline]
    pub fn entry(&self, row: usize, col: usize) -> Option<Entry> {
        if !self.grid.is_in_bounds(row, col) {
            return None;
        }
        self.entries[row * self.grid.columns() + col]
    }

    /// Best reward of any path reaching `(row, col)`.
    #[inline]
    pub fn reward_at(&self, row: usize, col: usize) -> Option<usize> {
        self.entry(row, col).map(|e| e.reward)
    }

    /// Number of cells some path reaches.
    pub fn feasible_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Rebuild the best path reaching `(row, col)`.
    pub fn path_to(&self, row: usize, col: usize) -> Option<Path<'g>> {
        let target = self.entry(row, col)?;
        let mut steps = Vec::with_capacity(row + col);
        let (mut r, mut c) = (row, col);
        let mut entry = target;
        while let Some(step) = entry.via {
            steps.push(step);
            match step {
                Step::Down => r -= 1,
                Step::Right => c -= 1,
            }
            entry = self.entry(r, c)?;
        }
        debug_assert_eq!((r, c), (0, 0));
        steps.reverse();

        let path = Path::from_moves(self.grid, steps);
        debug_assert!(path.is_valid());
        debug_assert_eq!(path.position(), (row, col));
        debug_assert_eq!(path.total_open(), target.reward);
        Some(path)
    }

    /// The goal's path if it is reachable, otherwise the path to the first
    /// feasible cell met scanning backward from the goal in row-major order.
    ///
    /// Returns `None` only when no cell at all is feasible.
    pub fn best_reachable(&self) -> Option<Path<'g>> {
        let columns = self.grid.columns();
        let idx = self.entries.iter().rposition(Option::is_some)?;
        self.path_to(idx / columns, idx % columns)
    }
}

/// Find a maximum-reward path with the dynamic program.
///
/// # Errors
/// - [`PipesError::InvalidGrid`] for a grid with a zero dimension,
/// - [`PipesError::NoPathExists`] when the goal cannot be reached.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip(grid),
        fields(rows = grid.rows(), columns = grid.columns())
    )
)]
pub fn solve_dynamic(grid: &Grid) -> Result<Path<'_>> {
    let table = RewardTable::build(grid)?;
    let (row, col) = grid.goal();
    let path = table.path_to(row, col).ok_or(PipesError::NoPathExists)?;
    debug_assert!(path.is_complete());
    Ok(path)
}

/// Compute one entry from its neighbors above and to the left.
#[inline]
fn relax(
    grid: &Grid,
    row: usize,
    col: usize,
    above: Option<Entry>,
    left: Option<Entry>,
) -> Option<Entry> {
    let kind = grid.get(row, col);
    if !kind.is_passable() {
        return None;
    }
    let gain = usize::from(kind.is_rewarding());
    if row == 0 && col == 0 {
        return Some(Entry {
            reward: gain,
            via: None,
        });
    }

    let from_above = above.map(|e| Entry {
        reward: e.reward + gain,
        via: Some(Step::Down),
    });
    let from_left = left.map(|e| Entry {
        reward: e.reward + gain,
        via: Some(Step::Right),
    });
    match (from_above, from_left) {
        (Some(a), Some(l)) => Some(if l.reward > a.reward { l } else { a }),
        (a, l) => a.or(l),
    }
}

/// Row-major fill.
#[cfg(not(feature = "parallel"))]
fn fill(grid: &Grid) -> Vec<Option<Entry>> {
    let (rows, columns) = (grid.rows(), grid.columns());
    let mut entries: Vec<Option<Entry>> = vec![None; rows * columns];
    for row in 0..rows {
        for col in 0..columns {
            let above = if row > 0 {
                entries[(row - 1) * columns + col]
            } else {
                None
            };
            let left = if col > 0 {
                entries[row * columns + col - 1]
            } else {
                None
            };
            entries[row * columns + col] = relax(grid, row, col, above, left);
        }
    }
    entries
}

/// Anti-diagonal fill: cells with the same `row + col` only read the previous
/// diagonal, so each diagonal is computed in parallel.
#[cfg(feature = "parallel")]
fn fill(grid: &Grid) -> Vec<Option<Entry>> {
    use rayon::prelude::*;

    let (rows, columns) = (grid.rows(), grid.columns());
    let mut entries: Vec<Option<Entry>> = vec![None; rows * columns];
    for d in 0..rows + columns - 1 {
        let lo = d.saturating_sub(columns - 1);
        let hi = d.min(rows - 1);
        let diagonal: Vec<Option<Entry>> = {
            let table = &entries;
            (lo..=hi)
                .into_par_iter()
                .map(|row| {
                    let col = d - row;
                    let above = if row > 0 {
                        table[(row - 1) * columns + col]
                    } else {
                        None
                    };
                    let left = if col > 0 {
                        table[row * columns + col - 1]
                    } else {
                        None
                    };
                    relax(grid, row, col, above, left)
                })
                .collect()
        };
        for (row, entry) in (lo..=hi).zip(diagonal) {
            entries[row * columns + d - row] = entry;
        }
    }
    entries
}
