//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Cell, Mark};
use strum::IntoEnumIterator;
use tracing::instrument;

/// The eight winning lines in scan order: rows, columns, then the main
/// and anti diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns true if any line is fully occupied by `mark`.
fn has_line(board: &Board, mark: Mark) -> bool {
    LINES.iter().any(|line| {
        line.iter()
            .all(|&index| board.get(index) == Some(Cell::Marked(mark)))
    })
}

/// Checks if there is a winner on the board.
///
/// X is checked before O, so a crafted board with both marks completing a
/// line reports X.
#[instrument]
pub fn check_winner(board: &Board) -> Option<Mark> {
    Mark::iter().find(|&mark| has_line(board, mark))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_board(line: [usize; 3], mark: Mark) -> Board {
        line.iter()
            .fold(Board::new(), |board, &i| board.with(i, Cell::Marked(mark)))
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_every_line_wins() {
        for line in LINES {
            for mark in [Mark::X, Mark::O] {
                assert_eq!(check_winner(&line_board(line, mark)), Some(mark), "{line:?}");
            }
        }
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = Board::new()
            .with(0, Cell::Marked(Mark::X))
            .with(1, Cell::Marked(Mark::X));
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = Board::new()
            .with(0, Cell::Marked(Mark::X))
            .with(1, Cell::Marked(Mark::O))
            .with(2, Cell::Marked(Mark::X));
        assert_eq!(check_winner(&board), None);
    }

    // Unreachable through legal play; pins the scan-order policy.
    #[test]
    fn test_simultaneous_lines_report_x() {
        let board = line_board([6, 7, 8], Mark::O)
            .with(0, Cell::Marked(Mark::X))
            .with(1, Cell::Marked(Mark::X))
            .with(2, Cell::Marked(Mark::X));
        assert_eq!(check_winner(&board), Some(Mark::X));
    }
}
