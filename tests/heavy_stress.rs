#![cfg(feature = "heavy")]
use econ_pipes::{solve_dynamic, solve_exhaustive, Grid};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn heavy_stress_dynamic_large_grid() {
    let mut rng = StdRng::seed_from_u64(123);
    let (rows, columns) = (1_500, 1_500);
    let cells = rows * columns;
    let grid = Grid::random(rows, columns, cells / 5, cells / 20, &mut rng).unwrap();
    if let Ok(path) = solve_dynamic(&grid) {
        assert!(path.is_complete());
        assert!(path.total_open() <= rows + columns - 1);
    }
}

#[test]
fn heavy_stress_agreement_at_exhaustive_limit() {
    let mut rng = StdRng::seed_from_u64(7);
    let (rows, columns) = (12, 12);
    let cells = rows * columns;
    let grid = Grid::random(rows, columns, cells / 5, cells / 10, &mut rng).unwrap();
    let exhaustive = solve_exhaustive(&grid).map(|p| p.total_open());
    let dynamic = solve_dynamic(&grid).map(|p| p.total_open());
    assert_eq!(exhaustive, dynamic);
}
