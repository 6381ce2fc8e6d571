//! Sudoku domain: recognized-digit grids, validity gates and solving.
//!
//! Recognition output flows through two gates before the solver is ever
//! invoked: the minimum-clue gate ([`MIN_CLUES`]) and the constraint gate
//! ([`satisfies_constraints`]).

mod solver;
mod types;
mod validate;

pub use solver::{BacktrackingSolver, SudokuSolver};
pub use types::*;
pub use validate::*;
