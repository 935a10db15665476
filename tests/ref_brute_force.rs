use econ_pipes::{solve_dynamic, solve_exhaustive, CellKind, Grid, Path, PipesError};
use proptest::prelude::*;

/// Best reward of any monotone path from `(row, col)` to the goal, by plain
/// recursion over both moves.
fn reference_reward(grid: &Grid, row: usize, col: usize) -> Option<usize> {
    if !grid.is_passable(row, col) {
        return None;
    }
    let gain = usize::from(grid.get(row, col).is_rewarding());
    if (row, col) == grid.goal() {
        return Some(gain);
    }
    let down = reference_reward(grid, row + 1, col);
    let right = reference_reward(grid, row, col + 1);
    down.max(right).map(|best| best + gain)
}

fn assert_feasible(grid: &Grid, path: &Path<'_>) {
    assert!(path.is_complete());
    assert_eq!(path.moves().len(), grid.total_steps());
    let cells = path.cells();
    assert_eq!(cells.first(), Some(&(0, 0)));
    assert_eq!(cells.last(), Some(&grid.goal()));
    for w in cells.windows(2) {
        let (a, b) = (w[0], w[1]);
        assert!(
            (b.0 == a.0 + 1 && b.1 == a.1) || (b.0 == a.0 && b.1 == a.1 + 1),
            "non-monotone step {a:?} -> {b:?}"
        );
    }
    for &(row, col) in &cells {
        assert!(grid.is_in_bounds(row, col));
        assert_ne!(grid.get(row, col), CellKind::Rock);
    }
    let harvested = cells
        .iter()
        .filter(|&&(r, c)| grid.get(r, c).is_rewarding())
        .count();
    assert_eq!(path.total_open(), harvested);
    assert!(path.total_open() >= 1);
    assert!(path.total_open() <= grid.rows() + grid.columns() - 1);
}

fn cell_kind() -> impl Strategy<Value = CellKind> {
    prop_oneof![
        3 => Just(CellKind::Empty),
        2 => Just(CellKind::Open),
        1 => Just(CellKind::Rock),
    ]
}

fn small_grid() -> impl Strategy<Value = Grid> {
    (1usize..=6, 1usize..=6)
        .prop_flat_map(|(rows, columns)| {
            (
                Just(rows),
                Just(columns),
                prop::collection::vec(cell_kind(), rows * columns),
            )
        })
        .prop_map(|(rows, columns, cells)| Grid::new(rows, columns, cells).unwrap())
}

proptest! {
    #[test]
    fn exhaustive_matches_reference(grid in small_grid()) {
        match (reference_reward(&grid, 0, 0), solve_exhaustive(&grid)) {
            (Some(best), Ok(path)) => {
                prop_assert_eq!(path.total_open(), best);
                assert_feasible(&grid, &path);
            }
            (None, Err(PipesError::NoPathExists)) => {}
            (expected, got) => {
                prop_assert!(false, "expected {:?}, got {:?}", expected, got);
            }
        }
    }

    #[test]
    fn dynamic_matches_reference(grid in small_grid()) {
        match (reference_reward(&grid, 0, 0), solve_dynamic(&grid)) {
            (Some(best), Ok(path)) => {
                prop_assert_eq!(path.total_open(), best);
                assert_feasible(&grid, &path);
            }
            (None, Err(PipesError::NoPathExists)) => {}
            (expected, got) => {
                prop_assert!(false, "expected {:?}, got {:?}", expected, got);
            }
        }
    }

    #[test]
    fn solvers_agree(grid in small_grid()) {
        let exhaustive = solve_exhaustive(&grid).map(|p| p.total_open());
        let dynamic = solve_dynamic(&grid).map(|p| p.total_open());
        prop_assert_eq!(exhaustive, dynamic);
    }
}
