//! Economical pipes
//!
//! Given a rectangular grid of open, empty and rock cells, find a path from
//! the top-left corner to the bottom-right corner that only moves right or
//! down, never leaves the grid, never touches rock, and harvests as many open
//! cells as possible.
//!
//! Two solvers produce the same optimum:
//! - [`solve_exhaustive`] tries every move sequence, O(2^(rows+columns)),
//!   limited to `rows + columns - 2 < 64`;
//! - [`solve_dynamic`] fills a rows × columns table, O(rows · columns).
//!
//! ## Quick start
//! ```
//! use econ_pipes::{solve_dynamic, solve_exhaustive, Grid};
//!
//! let grid: Grid = "SoX\nooo\nXoG".parse().unwrap();
//! let fast = solve_dynamic(&grid).unwrap();
//! let slow = solve_exhaustive(&grid).unwrap();
//! assert_eq!(fast.total_open(), 5);
//! assert_eq!(fast.total_open(), slow.total_open());
//! assert_eq!(fast.position(), (2, 2));
//! ```
//!
//! ## Features
//! - `parallel`: spread the enumeration and the table fill over rayon.
//!   Results are identical to the serial build.
//! - `tracing`: emit spans and events from the solvers.

pub mod dynamic;
pub mod error;
pub mod exhaustive;
pub mod grid;
pub mod path;
pub mod traits;
pub mod utils;

pub use crate::dynamic::{solve_dynamic, RewardTable};
pub use crate::error::{PipesError, Result};
pub use crate::exhaustive::solve_exhaustive;
pub use crate::grid::{CellKind, Grid};
pub use crate::path::{Path, PathState, Step};
pub use crate::traits::{DynamicProgramming, Exhaustive, Solver};
