//! Call-recording solver wrapper for testing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::sudoku::{BacktrackingSolver, Puzzle, Solution, SudokuSolver};

/// Wraps a real solver and records how often it was invoked, so tests
/// can assert the gates kept the solver out of the loop.
pub struct RecordingSolver {
    inner: Arc<dyn SudokuSolver>,
    calls: AtomicU64,
}

impl Default for RecordingSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSolver {
    /// Wrap the default backtracking solver.
    pub fn new() -> Self {
        Self::wrapping(Arc::new(BacktrackingSolver::new()))
    }

    /// Wrap an arbitrary solver backend.
    pub fn wrapping(inner: Arc<dyn SudokuSolver>) -> Self {
        Self {
            inner,
            calls: AtomicU64::new(0),
        }
    }

    /// Number of `solve` calls observed.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SudokuSolver for RecordingSolver {
    fn name(&self) -> &str {
        "recording"
    }

    fn solve(&self, puzzle: &Puzzle, max_solutions: usize) -> Vec<Solution> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.solve(puzzle, max_solutions)
    }
}
