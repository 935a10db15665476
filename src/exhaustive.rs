//! Exhaustive search over every move sequence.
//!
//! A complete path has `steps = rows + columns - 2` moves. Bit `k` of a
//! `u64` mask chooses move `k` (1 = right, 0 = down), so counting the mask
//! from `0` to `2^steps - 1` visits every sequence exactly once. Each
//! candidate is replayed through a fresh [`Path`]; the first illegal move
//! discards it. Among the complete candidates the highest reward wins and
//! ties go to the smaller mask.
//!
//! Runs in O(2^steps · steps) and is meant as a reference for
//! [`solve_dynamic`](crate::dynamic::solve_dynamic).

use crate::error::{PipesError, Result};
use crate::grid::Grid;
use crate::path::{Path, Step};
use crate::utils::{candidate_count, ensure_non_empty};

/// Smallest move count the search refuses: masks are 64 bits wide.
pub const MAX_STEPS: usize = 64;

/// A complete candidate, identified by its mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    mask: u64,
    reward: usize,
}

impl Candidate {
    /// Higher reward wins, then the smaller mask.
    ///
    /// This is a max over a total order, so it is commutative and associative
    /// and any reduction tree picks the same winner as an ascending scan.
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    fn better(self, other: Self) -> Self {
        if other.reward > self.reward || (other.reward == self.reward && other.mask < self.mask) {
            other
        } else {
            self
        }
    }
}

/// Find a maximum-reward path by trying every move sequence.
///
/// # Errors
/// - [`PipesError::InvalidGrid`] for a grid with a zero dimension,
/// - [`PipesError::UnsupportedSize`] when `rows + columns - 2 >= 64`,
/// - [`PipesError::NoPathExists`] when every sequence leaves the grid or hits rock.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip(grid),
        fields(rows = grid.rows(), columns = grid.columns())
    )
)]
pub fn solve_exhaustive(grid: &Grid) -> Result<Path<'_>> {
    ensure_non_empty(grid)?;
    let steps = grid.total_steps();
    let candidates = match candidate_count(steps) {
        Some(n) if steps < MAX_STEPS => n,
        _ => return Err(PipesError::UnsupportedSize { steps }),
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(steps, candidates, "enumerating move sequences");

    let best = best_candidate(grid, steps, candidates).ok_or(PipesError::NoPathExists)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(reward = best.reward, mask = best.mask, "best sequence");

    let path = replay(grid, steps, best.mask);
    debug_assert!(path.is_complete());
    debug_assert_eq!(path.total_open(), best.reward);
    Ok(path)
}

/// Serial scan in ascending mask order; only a strictly better reward replaces
/// the current best.
#[cfg(not(feature = "parallel"))]
fn best_candidate(grid: &Grid, steps: usize, candidates: u64) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for mask in 0..candidates {
        let Some(reward) = evaluate(grid, steps, mask) else {
            continue;
        };
        if best.map_or(true, |b| reward > b.reward) {
            best = Some(Candidate { mask, reward });
        }
    }
    best
}

#[cfg(feature = "parallel")]
fn best_candidate(grid: &Grid, steps: usize, candidates: u64) -> Option<Candidate> {
    use rayon::prelude::*;

    (0..candidates)
        .into_par_iter()
        .filter_map(|mask| evaluate(grid, steps, mask).map(|reward| Candidate { mask, reward }))
        .reduce_with(Candidate::better)
}

/// Reward of the candidate `mask`, or `None` if it is not a complete path.
fn evaluate(grid: &Grid, steps: usize, mask: u64) -> Option<usize> {
    // A complete path makes exactly `columns - 1` right moves; any other mask
    // walks off the right or bottom edge.
    if mask.count_ones() as usize != grid.columns() - 1 {
        return None;
    }
    let path = replay(grid, steps, mask);
    path.is_complete().then(|| path.total_open())
}

/// Replay `mask` from the origin; stops at the first illegal move.
fn replay(grid: &Grid, steps: usize, mask: u64) -> Path<'_> {
    Path::from_moves(
        grid,
        (0..steps).map(|k| Step::from_bit((mask >> k) & 1 == 1)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathState;

    #[test]
    fn scenario_avoids_rock_on_the_right() {
        let grid: Grid = "SoX\nooo\nXoG".parse().unwrap();
        let path = solve_exhaustive(&grid).unwrap();
        assert_eq!(path.total_open(), 5);
        assert_eq!(path.state(), PathState::Complete);
        assert!(!path.cells().contains(&(0, 2)));
        // Four complete paths are worth 5; mask 0b0101 is the smallest.
        assert_eq!(
            path.moves(),
            &[Step::Right, Step::Down, Step::Right, Step::Down]
        );
    }

    #[test]
    fn single_cell() {
        let grid = Grid::empty(1, 1).unwrap();
        let path = solve_exhaustive(&grid).unwrap();
        assert_eq!(path.total_open(), 1);
        assert!(path.moves().is_empty());
        assert!(path.is_complete());
    }

    #[test]
    fn blocked_column_has_no_path() {
        let grid: Grid = "S.X.\n..X.\n..XG".parse().unwrap();
        assert_eq!(solve_exhaustive(&grid), Err(PipesError::NoPathExists));
    }

    #[test]
    fn refuses_sixty_four_steps() {
        let grid = Grid::empty(33, 33).unwrap();
        assert_eq!(
            solve_exhaustive(&grid),
            Err(PipesError::UnsupportedSize { steps: 64 })
        );
    }

    #[test]
    fn ties_keep_the_smallest_mask() {
        // Every complete path is worth 2; mask 0b0011 is the first one that
        // makes two right moves, i.e. right, right, down, down.
        let grid = Grid::empty(3, 3).unwrap();
        let path = solve_exhaustive(&grid).unwrap();
        assert_eq!(path.total_open(), 2);
        assert_eq!(path.move_string(), ">>vv");
    }

    #[test]
    fn truncated_candidates_never_win() {
        // The only complete path hugs the left and bottom edges. The prefix
        // `>>` collects both open cells but dead-ends and must not be compared.
        let grid: Grid = "SooX\n.XXX\n...G".parse().unwrap();
        let path = solve_exhaustive(&grid).unwrap();
        assert!(path.is_complete());
        assert_eq!(path.position(), (2, 3));
        assert_eq!(path.total_open(), 2);
        assert_eq!(path.move_string(), "vv>>>");
    }

    #[test]
    fn better_is_order_independent() {
        let a = Candidate { mask: 3, reward: 4 };
        let b = Candidate { mask: 9, reward: 4 };
        let c = Candidate { mask: 12, reward: 5 };
        assert_eq!(a.better(b), b.better(a));
        assert_eq!(a.better(b), a);
        assert_eq!(a.better(b).better(c), a.better(b.better(c)));
        assert_eq!(a.better(c), c);
    }
}
