//! Move selection for the non-human opponent.
//!
//! One ply deep: take the last empty cell, else complete or block the first
//! two-in-a-line found in scan order, else play a random empty cell. Forks
//! are not detected.

use crate::rules::LINES;
use crate::types::{Board, Cell};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// Returns the empty cell of a line whose other two cells share a mark.
fn completes_line(board: &Board, line: [usize; 3]) -> Option<usize> {
    let cells = line.map(|index| board.get(index).unwrap_or(Cell::Empty));
    let [a, b, c] = line;
    match cells {
        [Cell::Marked(x), Cell::Marked(y), Cell::Empty] if x == y => Some(c),
        [Cell::Empty, Cell::Marked(x), Cell::Marked(y)] if x == y => Some(a),
        [Cell::Marked(x), Cell::Empty, Cell::Marked(y)] if x == y => Some(b),
        _ => None,
    }
}

/// Scans lines in order for a completing or blocking cell.
#[instrument]
pub fn find_line_move(board: &Board) -> Option<usize> {
    LINES.iter().find_map(|&line| completes_line(board, line))
}

/// Chooses the opponent's cell, or `None` on a full board.
#[instrument(skip(rng))]
pub fn choose_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    let empty = board.empty_cells();

    if let [only] = empty.as_slice() {
        debug!(cell = *only, "Taking last empty cell");
        return Some(*only);
    }

    if let Some(cell) = find_line_move(board) {
        debug!(cell, "Completing or blocking a line");
        return Some(cell);
    }

    let cell = empty.choose(rng).copied();
    debug!(?cell, "No line in play, choosing at random");
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mark;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const X: Cell = Cell::Marked(Mark::X);
    const O: Cell = Cell::Marked(Mark::O);
    const E: Cell = Cell::Empty;

    #[test]
    fn test_full_board_has_no_move() {
        let board = Board::from_cells([X, O, X, X, O, O, O, X, X]);
        assert_eq!(choose_move(&board, &mut StdRng::seed_from_u64(1)), None);
    }

    #[test]
    fn test_last_cell_taken() {
        let board = Board::from_cells([X, O, X, X, O, O, O, X, E]);
        assert_eq!(choose_move(&board, &mut StdRng::seed_from_u64(1)), Some(8));
    }

    #[test]
    fn test_completes_own_line() {
        let board = Board::from_cells([X, E, X, E, O, E, E, O, X]);
        // Row 0 (X _ X) precedes column 1 (_ O O) in scan order.
        assert_eq!(find_line_move(&board), Some(1));
    }

    #[test]
    fn test_blocks_opponent() {
        let board = Board::from_cells([E, E, E, X, X, E, E, O, E]);
        assert_eq!(choose_move(&board, &mut StdRng::seed_from_u64(1)), Some(5));
    }

    #[test]
    fn test_scan_order_is_rows_columns_diagonals() {
        // Column 1 (X X _) and the main diagonal (X X _) both open; column wins.
        let board = Board::from_cells([X, X, O, E, X, E, E, E, E]);
        assert_eq!(find_line_move(&board), Some(7));
    }

    #[test]
    fn test_random_choice_is_empty_cell() {
        let board = Board::new().with(4, X);
        for seed in 0..32 {
            let cell = choose_move(&board, &mut StdRng::seed_from_u64(seed)).expect("open board");
            assert!(board.is_empty(cell));
        }
    }
}
