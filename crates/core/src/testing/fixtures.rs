//! Grid fixtures shared by unit and integration tests.

use crate::sudoku::{
    to_puzzle, DigitPrediction, DigitPredictions, Puzzle, Solution, GRID_SIZE,
};

/// Confidence assigned to every fixture prediction.
const FIXTURE_CONFIDENCE: f32 = 0.9;

/// Parse nine rows of digits and dots into predictions.
pub fn predictions_from_rows(rows: [&str; GRID_SIZE]) -> DigitPredictions {
    let mut cells = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
    for row in rows {
        assert_eq!(row.len(), GRID_SIZE, "fixture rows must have 9 cells");
        for ch in row.chars() {
            cells.push(match ch {
                '.' => None,
                '1'..='9' => Some(DigitPrediction {
                    digit: ch as u8 - b'0',
                    confidence: FIXTURE_CONFIDENCE,
                }),
                other => panic!("unexpected fixture cell: {other:?}"),
            });
        }
    }
    DigitPredictions::from_cells(cells).expect("fixture grids are well-formed")
}

fn solution_from_rows(rows: [&str; GRID_SIZE]) -> Solution {
    let digits = rows
        .iter()
        .flat_map(|row| row.chars())
        .map(|ch| ch as u8 - b'0')
        .collect();
    Solution::from_digits(digits).expect("fixture solutions are complete")
}

const CLASSIC_ROWS: [&str; GRID_SIZE] = [
    "53..7....",
    "6..195...",
    ".98....6.",
    "8...6...3",
    "4..8.3..1",
    "7...2...6",
    ".6....28.",
    "...419..5",
    "....8..79",
];

const CLASSIC_SOLUTION_ROWS: [&str; GRID_SIZE] = [
    "534678912",
    "672195348",
    "198342567",
    "859761423",
    "426853791",
    "713924856",
    "961537284",
    "287419635",
    "345286179",
];

/// A well-known 30-clue puzzle with a unique solution.
pub fn classic_predictions() -> DigitPredictions {
    predictions_from_rows(CLASSIC_ROWS)
}

/// [`classic_predictions`] accepted as givens.
pub fn classic_puzzle() -> Puzzle {
    to_puzzle(&classic_predictions())
}

/// The unique solution of [`classic_puzzle`].
pub fn classic_solution() -> Solution {
    solution_from_rows(CLASSIC_SOLUTION_ROWS)
}

/// The first `count` clues of the classic puzzle, row-major; the rest of
/// the grid is empty.
pub fn sparse_predictions(count: usize) -> DigitPredictions {
    let classic = classic_predictions();
    let mut kept = 0;
    let cells = classic
        .cells()
        .iter()
        .map(|cell| {
            if cell.is_some() && kept < count {
                kept += 1;
                *cell
            } else {
                None
            }
        })
        .collect();
    DigitPredictions::from_cells(cells).expect("subset of a valid grid")
}

/// The classic puzzle with a duplicated digit in the first row, as a
/// misrecognition would produce. Still 30 clues, so only the constraint
/// gate rejects it.
pub fn conflicting_predictions() -> DigitPredictions {
    let mut rows = CLASSIC_ROWS;
    rows[0] = "55..7....";
    predictions_from_rows(rows)
}

/// 77 clues with exactly two solutions: the classic solution minus an
/// unavoidable rectangle (rows 4-5, columns 6 and 9, digits 1 and 3).
pub fn ambiguous_predictions() -> DigitPredictions {
    let mut rows = CLASSIC_SOLUTION_ROWS;
    rows[3] = "85976.42.";
    rows[4] = "42685.79.";
    predictions_from_rows(rows)
}

/// 17 constraint-satisfying clues with no solution: the top-right cell
/// needs a 9 by its row, but its column and box already hold one.
pub fn unsolvable_predictions() -> DigitPredictions {
    predictions_from_rows([
        "12345678.",
        "........9",
        ".........",
        ".........",
        "234567...",
        ".........",
        "3........",
        ".4.......",
        ".........",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::satisfies_constraints;

    #[test]
    fn test_classic_has_thirty_clues() {
        assert_eq!(classic_predictions().clue_count(), 30);
        assert!(satisfies_constraints(&classic_predictions()));
    }

    #[test]
    fn test_classic_solution_extends_givens() {
        let puzzle = classic_puzzle();
        let solution = classic_solution();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                if let Some(given) = puzzle.get(row, col) {
                    assert_eq!(solution.get(row, col), given);
                }
            }
        }
    }

    #[test]
    fn test_sparse_counts() {
        assert_eq!(sparse_predictions(16).clue_count(), 16);
        assert_eq!(sparse_predictions(17).clue_count(), 17);
        assert_eq!(sparse_predictions(100).clue_count(), 30);
    }

    #[test]
    fn test_conflicting_keeps_clue_count() {
        let preds = conflicting_predictions();
        assert_eq!(preds.clue_count(), 30);
        assert!(!satisfies_constraints(&preds));
    }

    #[test]
    fn test_ambiguous_and_unsolvable_pass_the_gates() {
        assert_eq!(ambiguous_predictions().clue_count(), 77);
        assert!(satisfies_constraints(&ambiguous_predictions()));

        assert_eq!(unsolvable_predictions().clue_count(), 17);
        assert!(satisfies_constraints(&unsolvable_predictions()));
    }
}
