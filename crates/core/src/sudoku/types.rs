//! Grid types shared by recognition, validation and solving.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of the grid.
pub const GRID_SIZE: usize = 9;

/// Side length of a sub-box.
pub const BOX_SIZE: usize = 3;

/// Total number of cells.
pub const CELL_COUNT: usize = 81;

/// Errors raised when constructing grid values from untrusted cell data.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("expected {CELL_COUNT} cells, got {0}")]
    WrongCellCount(usize),

    #[error("digit out of range 1-9: {0}")]
    InvalidDigit(u8),
}

/// Flat cell index for a (row, column) pair.
pub fn cell_index(row: usize, col: usize) -> usize {
    row * GRID_SIZE + col
}

/// Index of the 3x3 box containing a (row, column) pair.
pub fn box_index(row: usize, col: usize) -> usize {
    (row / BOX_SIZE) * BOX_SIZE + col / BOX_SIZE
}

/// One recognized digit with the classifier's confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DigitPrediction {
    /// Recognized digit, 1-9.
    pub digit: u8,
    /// Classifier confidence (0.0 - 1.0).
    pub confidence: f32,
}

/// Per-cell digit predictions for one frame, row-major.
///
/// Produced once per frame by the recognition adapter and consumed
/// immediately by the validity gates; never retained across iterations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitPredictions {
    cells: Vec<Option<DigitPrediction>>,
}

impl DigitPredictions {
    /// Build predictions from raw classifier output, enforcing the
    /// 81-cell shape and the 1-9 digit range.
    pub fn from_cells(cells: Vec<Option<DigitPrediction>>) -> Result<Self, GridError> {
        if cells.len() != CELL_COUNT {
            return Err(GridError::WrongCellCount(cells.len()));
        }
        for pred in cells.iter().flatten() {
            if !(1..=9).contains(&pred.digit) {
                return Err(GridError::InvalidDigit(pred.digit));
            }
        }
        Ok(Self { cells })
    }

    /// A grid with no recognized digits.
    pub fn empty() -> Self {
        Self {
            cells: vec![None; CELL_COUNT],
        }
    }

    /// Prediction at (row, column), if any.
    pub fn get(&self, row: usize, col: usize) -> Option<&DigitPrediction> {
        self.cells[cell_index(row, col)].as_ref()
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Option<DigitPrediction>] {
        &self.cells
    }

    /// Number of populated cells.
    pub fn clue_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// The given clues accepted after validation, row-major.
///
/// A puzzle only ever reaches the solver after passing both the
/// minimum-clue gate and the constraint gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    givens: Vec<Option<u8>>,
}

impl Puzzle {
    /// Build a puzzle directly from given digits.
    pub fn from_givens(givens: Vec<Option<u8>>) -> Result<Self, GridError> {
        if givens.len() != CELL_COUNT {
            return Err(GridError::WrongCellCount(givens.len()));
        }
        for digit in givens.iter().flatten() {
            if !(1..=9).contains(digit) {
                return Err(GridError::InvalidDigit(*digit));
            }
        }
        Ok(Self { givens })
    }

    /// Build from cells whose shape and range were already validated
    /// upstream (predictions enforce both at construction).
    pub(crate) fn from_validated(givens: Vec<Option<u8>>) -> Self {
        Self { givens }
    }

    /// Given digit at a flat cell index, if any.
    pub fn given(&self, idx: usize) -> Option<u8> {
        self.givens[idx]
    }

    /// Given digit at (row, column), if any.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.givens[cell_index(row, col)]
    }

    /// All givens, row-major.
    pub fn givens(&self) -> &[Option<u8>] {
        &self.givens
    }

    /// Number of given clues.
    pub fn clue_count(&self) -> usize {
        self.givens.iter().filter(|g| g.is_some()).count()
    }
}

/// A fully filled grid returned by the solver, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    digits: Vec<u8>,
}

impl Solution {
    /// Build a solution from a complete digit grid.
    pub fn from_digits(digits: Vec<u8>) -> Result<Self, GridError> {
        if digits.len() != CELL_COUNT {
            return Err(GridError::WrongCellCount(digits.len()));
        }
        for digit in &digits {
            if !(1..=9).contains(digit) {
                return Err(GridError::InvalidDigit(*digit));
            }
        }
        Ok(Self { digits })
    }

    /// Build from a grid the search filled in completely.
    pub(crate) fn from_search(digits: Vec<u8>) -> Self {
        Self { digits }
    }

    /// Digit at (row, column).
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.digits[cell_index(row, col)]
    }

    /// All digits, row-major.
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_and_box_index() {
        assert_eq!(cell_index(0, 0), 0);
        assert_eq!(cell_index(8, 8), 80);
        assert_eq!(cell_index(1, 3), 12);
        assert_eq!(box_index(0, 0), 0);
        assert_eq!(box_index(4, 4), 4);
        assert_eq!(box_index(8, 2), 6);
        assert_eq!(box_index(3, 8), 5);
    }

    #[test]
    fn test_predictions_enforce_cell_count() {
        let err = DigitPredictions::from_cells(vec![None; 80]).unwrap_err();
        assert!(matches!(err, GridError::WrongCellCount(80)));
    }

    #[test]
    fn test_predictions_enforce_digit_range() {
        let mut cells = vec![None; CELL_COUNT];
        cells[40] = Some(DigitPrediction {
            digit: 0,
            confidence: 0.9,
        });
        let err = DigitPredictions::from_cells(cells).unwrap_err();
        assert!(matches!(err, GridError::InvalidDigit(0)));
    }

    #[test]
    fn test_clue_count() {
        let mut cells = vec![None; CELL_COUNT];
        cells[0] = Some(DigitPrediction {
            digit: 5,
            confidence: 0.8,
        });
        cells[80] = Some(DigitPrediction {
            digit: 9,
            confidence: 0.7,
        });
        let preds = DigitPredictions::from_cells(cells).unwrap();
        assert_eq!(preds.clue_count(), 2);
        assert_eq!(preds.get(0, 0).unwrap().digit, 5);
        assert_eq!(preds.get(8, 8).unwrap().digit, 9);
        assert!(preds.get(4, 4).is_none());
    }

    #[test]
    fn test_puzzle_roundtrips_serde() {
        let mut givens = vec![None; CELL_COUNT];
        givens[10] = Some(3);
        let puzzle = Puzzle::from_givens(givens).unwrap();

        let json = serde_json::to_string(&puzzle).unwrap();
        let parsed: Puzzle = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, puzzle);
        assert_eq!(parsed.get(1, 1), Some(3));
        assert_eq!(parsed.clue_count(), 1);
    }

    #[test]
    fn test_solution_rejects_incomplete_grid() {
        assert!(Solution::from_digits(vec![1; 80]).is_err());
        assert!(Solution::from_digits(vec![0; CELL_COUNT]).is_err());
        assert!(Solution::from_digits(vec![9; CELL_COUNT]).is_ok());
    }
}
