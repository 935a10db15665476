//! The immutable grid both solvers read.
//!
//! A grid is a row-major matrix of [`CellKind`]s. The top-left corner is
//! always [`CellKind::Start`] and the bottom-right corner is always
//! [`CellKind::Goal`]; constructors overwrite whatever was supplied there.
//!
//! Text form, one row per line:
//!
//! ```text
//! So.
//! X.o
//! ..G
//! ```
//!
//! `S` start, `G` goal, `o` open, `.` empty, `X` rock.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{PipesError, Result};

/// Classification of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Passable and worth harvesting.
    Open,
    /// Passable, contributes nothing to the reward.
    Empty,
    /// Impassable.
    Rock,
    Start,
    Goal,
}

impl CellKind {
    /// Whether a path may enter this cell.
    #[inline]
    pub fn is_passable(self) -> bool {
        !matches!(self, CellKind::Rock)
    }

    /// Whether visiting this cell adds one to a path's reward.
    #[inline]
    pub fn is_rewarding(self) -> bool {
        matches!(self, CellKind::Open | CellKind::Start | CellKind::Goal)
    }

    pub fn to_char(self) -> char {
        match self {
            CellKind::Open => 'o',
            CellKind::Empty => '.',
            CellKind::Rock => 'X',
            CellKind::Start => 'S',
            CellKind::Goal => 'G',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'o' => Some(CellKind::Open),
            '.' => Some(CellKind::Empty),
            'X' => Some(CellKind::Rock),
            'S' => Some(CellKind::Start),
            'G' => Some(CellKind::Goal),
            _ => None,
        }
    }
}

/// Immutable rectangular grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Build a grid from a row-major cell buffer.
    ///
    /// Fails with [`PipesError::InvalidGrid`] when either dimension is zero and
    /// with [`PipesError::BadCellCount`] when `cells.len() != rows * columns`.
    pub fn new(rows: usize, columns: usize, mut cells: Vec<CellKind>) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(PipesError::InvalidGrid { rows, columns });
        }
        let expected = rows * columns;
        if cells.len() != expected {
            return Err(PipesError::BadCellCount {
                expected,
                found: cells.len(),
            });
        }
        cells[expected - 1] = CellKind::Goal;
        cells[0] = CellKind::Start;
        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Build a grid from nested rows, which must all share the first row's width.
    pub fn from_rows(rows: Vec<Vec<CellKind>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(height * width);
        for (row, line) in rows.into_iter().enumerate() {
            if line.len() != width {
                return Err(PipesError::RaggedRows {
                    row,
                    expected: width,
                    found: line.len(),
                });
            }
            cells.extend(line);
        }
        Self::new(height, width, cells)
    }

    /// A grid with no open cells and no rock, only the two corners set.
    pub fn empty(rows: usize, columns: usize) -> Result<Self> {
        Self::new(rows, columns, vec![CellKind::Empty; rows * columns])
    }

    /// Scatter `open_count` open cells and `rock_count` rocks over an empty grid.
    ///
    /// Positions are drawn without replacement from the cells other than the
    /// two corners, so the same generator state always yields the same grid.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        columns: usize,
        open_count: usize,
        rock_count: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let mut grid = Self::empty(rows, columns)?;
        let total = rows * columns;
        let corners = if total == 1 { 1 } else { 2 };
        let available = total - corners;
        let requested = open_count + rock_count;
        if requested > available {
            return Err(PipesError::TooManyCells {
                requested,
                available,
            });
        }

        // Free cells are the flat indices 1..total-1 (or none for 1x1).
        let picks = rand::seq::index::sample(rng, available, requested);
        for (n, offset) in picks.into_iter().enumerate() {
            let kind = if n < open_count {
                CellKind::Open
            } else {
                CellKind::Rock
            };
            grid.cells[offset + 1] = kind;
        }
        Ok(grid)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of moves in any complete monotone path: `rows + columns - 2`.
    #[inline]
    pub fn total_steps(&self) -> usize {
        self.rows + self.columns - 2
    }

    #[inline]
    pub fn is_in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.columns
    }

    /// Kind of the cell at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> CellKind {
        assert!(
            self.is_in_bounds(row, col),
            "cell ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.columns
        );
        self.cells[row * self.columns + col]
    }

    /// In bounds and not rock.
    #[inline]
    pub fn is_passable(&self, row: usize, col: usize) -> bool {
        self.is_in_bounds(row, col) && self.get(row, col).is_passable()
    }

    /// Coordinate of the goal cell.
    #[inline]
    pub fn goal(&self) -> (usize, usize) {
        (self.rows - 1, self.columns - 1)
    }

    /// Count of cells of the given kind.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns) {
            let line: String = row.iter().map(|c| c.to_char()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = PipesError;

    fn from_str(s: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (row, line) in s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .enumerate()
        {
            let cells = line
                .chars()
                .enumerate()
                .map(|(col, ch)| {
                    CellKind::from_char(ch).ok_or(PipesError::UnknownCell { ch, row, col })
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(cells);
        }
        Self::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn corners_are_forced() {
        let g = Grid::new(2, 2, vec![CellKind::Rock; 4]).unwrap();
        assert_eq!(g.get(0, 0), CellKind::Start);
        assert_eq!(g.get(1, 1), CellKind::Goal);
        assert_eq!(g.get(0, 1), CellKind::Rock);
    }

    #[test]
    fn single_cell_is_start() {
        let g = Grid::empty(1, 1).unwrap();
        assert_eq!(g.get(0, 0), CellKind::Start);
        assert_eq!(g.total_steps(), 0);
        assert_eq!(g.goal(), (0, 0));
    }

    #[test]
    fn rejects_empty_and_mismatched_input() {
        assert_eq!(
            Grid::empty(0, 4),
            Err(PipesError::InvalidGrid {
                rows: 0,
                columns: 4
            })
        );
        assert_eq!(
            Grid::new(2, 2, vec![CellKind::Open; 3]),
            Err(PipesError::BadCellCount {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            Grid::from_rows(vec![vec![CellKind::Open; 3], vec![CellKind::Open; 2]]),
            Err(PipesError::RaggedRows {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert!(matches!(
            Grid::from_rows(Vec::new()),
            Err(PipesError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn parses_and_prints_text_form() {
        let text = "SoX\no.o\nXoG\n";
        let g: Grid = text.parse().unwrap();
        assert_eq!(g.rows(), 3);
        assert_eq!(g.columns(), 3);
        assert_eq!(g.get(0, 2), CellKind::Rock);
        assert_eq!(g.get(1, 1), CellKind::Empty);
        assert_eq!(g.to_string(), text);
    }

    #[test]
    fn parse_reports_unknown_cells() {
        let err = "S?\n.G".parse::<Grid>().unwrap_err();
        assert_eq!(
            err,
            PipesError::UnknownCell {
                ch: '?',
                row: 0,
                col: 1
            }
        );
    }

    #[test]
    fn bounds_and_passability() {
        let g: Grid = "SX\n.G".parse().unwrap();
        assert!(g.is_in_bounds(1, 1));
        assert!(!g.is_in_bounds(2, 0));
        assert!(!g.is_in_bounds(0, 2));
        assert!(!g.is_passable(0, 1));
        assert!(g.is_passable(1, 0));
        assert!(!g.is_passable(5, 5));
    }

    #[test]
    fn random_places_exact_counts() {
        let mut rng = StdRng::seed_from_u64(7);
        let g = Grid::random(6, 9, 10, 5, &mut rng).unwrap();
        assert_eq!(g.count(CellKind::Open), 10);
        assert_eq!(g.count(CellKind::Rock), 5);
        assert_eq!(g.count(CellKind::Start), 1);
        assert_eq!(g.count(CellKind::Goal), 1);
        assert_eq!(g.count(CellKind::Empty), 54 - 17);
    }

    #[test]
    fn random_is_reproducible_from_seed() {
        let a = Grid::random(5, 5, 5, 2, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = Grid::random(5, 5, 5, 2, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn random_rejects_overfull_requests() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            Grid::random(2, 2, 2, 1, &mut rng),
            Err(PipesError::TooManyCells {
                requested: 3,
                available: 2
            })
        );
        let g = Grid::random(1, 1, 0, 0, &mut rng).unwrap();
        assert_eq!(g.get(0, 0), CellKind::Start);
    }
}
