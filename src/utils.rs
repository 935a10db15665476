//! Small helpers shared by the solvers.

use crate::error::{PipesError, Result};
use crate::grid::Grid;

/// Reject grids with a zero dimension before any search starts.
#[inline]
pub fn ensure_non_empty(grid: &Grid) -> Result<()> {
    if grid.rows() == 0 || grid.columns() == 0 {
        return Err(PipesError::InvalidGrid {
            rows: grid.rows(),
            columns: grid.columns(),
        });
    }
    Ok(())
}

/// Number of move sequences the exhaustive search enumerates for `steps`
/// moves, or `None` once `2^steps` no longer fits in a `u64`.
#[inline]
pub fn candidate_count(steps: usize) -> Option<u64> {
    u32::try_from(steps)
        .ok()
        .and_then(|s| 1u64.checked_shl(s))
}

/// Number of `k`-element subsets of `n` items, saturating at `u64::MAX`.
///
/// Counts the complete monotone move sequences of a grid:
/// `binomial(rows + columns - 2, columns - 1)`.
pub fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc * u128::from(n - i) / u128::from(i + 1);
        if acc > u128::from(u64::MAX) {
            return u64::MAX;
        }
    }
    acc as u64
}
