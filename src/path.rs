//! Monotone paths over a borrowed [`Grid`].
//!
//! A [`Path`] starts at the origin and grows one [`Step`] at a time. It tracks
//! its position, its reward and a small lifecycle:
//!
//! ```text
//! Building --legal move--> Building
//! Building --illegal move--> Failed
//! Building --last move--> Complete
//! ```
//!
//! `Failed` and `Complete` are terminal. Since moves only go right or down a
//! cell is never visited twice, so the reward is a plain counter.

use std::fmt;

use crate::grid::{CellKind, Grid};

/// A single move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Down,
    Right,
}

impl Step {
    /// Bit encoding used by the exhaustive search: 1 is right, 0 is down.
    #[inline]
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Step::Right
        } else {
            Step::Down
        }
    }

    /// `(row, col)` offset of the move.
    #[inline]
    pub fn delta(self) -> (usize, usize) {
        match self {
            Step::Down => (1, 0),
            Step::Right => (0, 1),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Step::Down => 'v',
            Step::Right => '>',
        }
    }
}

/// Lifecycle of a path under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    /// Still accepting moves.
    Building,
    /// A move left the grid or hit rock. Terminal.
    Failed,
    /// Reached `rows + columns - 2` moves, i.e. the goal. Terminal.
    Complete,
}

/// A monotone path from the start cell, bound to the grid it walks on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<'g> {
    grid: &'g Grid,
    moves: Vec<Step>,
    row: usize,
    col: usize,
    total_open: usize,
    state: PathState,
}

impl<'g> Path<'g> {
    /// The zero-move path at the start cell.
    ///
    /// On a 1x1 grid the path is complete immediately.
    pub fn new(grid: &'g Grid) -> Self {
        let start = grid.get(0, 0);
        let state = if !start.is_passable() {
            PathState::Failed
        } else if grid.total_steps() == 0 {
            PathState::Complete
        } else {
            PathState::Building
        };
        Self {
            grid,
            moves: Vec::with_capacity(grid.total_steps()),
            row: 0,
            col: 0,
            total_open: usize::from(start.is_rewarding()),
            state,
        }
    }

    /// Replay `moves` from the origin, stopping at the first terminal state.
    pub fn from_moves<I>(grid: &'g Grid, moves: I) -> Self
    where
        I: IntoIterator<Item = Step>,
    {
        let mut path = Self::new(grid);
        for step in moves {
            if path.push(step) != PathState::Building {
                break;
            }
        }
        path
    }

    /// Attempt one move and return the resulting state.
    ///
    /// A move that would leave the grid or land on rock is not recorded and
    /// turns the path `Failed`. Terminal paths ignore further moves.
    pub fn push(&mut self, step: Step) -> PathState {
        if self.state != PathState::Building {
            return self.state;
        }
        let (dr, dc) = step.delta();
        let (row, col) = (self.row + dr, self.col + dc);
        if !self.grid.is_passable(row, col) {
            self.state = PathState::Failed;
            return self.state;
        }

        self.moves.push(step);
        self.row = row;
        self.col = col;
        self.total_open += usize::from(self.grid.get(row, col).is_rewarding());
        if self.moves.len() == self.grid.total_steps() {
            self.state = PathState::Complete;
        }
        self.state
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    pub fn moves(&self) -> &[Step] {
        &self.moves
    }

    /// Reward: number of open, start and goal cells visited.
    #[inline]
    pub fn total_open(&self) -> usize {
        self.total_open
    }

    #[inline]
    pub fn state(&self) -> PathState {
        self.state
    }

    /// True unless some move left the grid or hit rock.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.state != PathState::Failed
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state == PathState::Complete
    }

    /// Current `(row, col)`.
    #[inline]
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Every visited coordinate, origin first.
    pub fn cells(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(self.moves.len() + 1);
        let (mut row, mut col) = (0, 0);
        out.push((row, col));
        for step in &self.moves {
            let (dr, dc) = step.delta();
            row += dr;
            col += dc;
            out.push((row, col));
        }
        out
    }

    /// Moves as a compact string, `v` for down and `>` for right.
    pub fn move_string(&self) -> String {
        self.moves.iter().map(|s| s.to_char()).collect()
    }
}

/// Header line with the reward and moves, then the grid with the path drawn
/// over it: `@` for a harvested open cell, `*` for a crossed empty cell.
impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let moves = if self.moves.is_empty() {
            "-".to_string()
        } else {
            self.move_string()
        };
        writeln!(f, "reward={} moves={}", self.total_open, moves)?;

        let columns = self.grid.columns();
        let mut on_path = vec![false; self.grid.rows() * columns];
        for (row, col) in self.cells() {
            on_path[row * columns + col] = true;
        }
        for row in 0..self.grid.rows() {
            let line: String = (0..columns)
                .map(|col| {
                    let kind = self.grid.get(row, col);
                    match (on_path[row * columns + col], kind) {
                        (true, CellKind::Open) => '@',
                        (true, CellKind::Empty) => '*',
                        _ => kind.to_char(),
                    }
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
