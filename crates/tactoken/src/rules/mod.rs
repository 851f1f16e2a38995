//! Terminal-state rules: win lines, full board, and their combination.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner};

use crate::types::{Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of inspecting a board for end-of-game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Evaluation {
    /// No line is complete and empty cells remain.
    InProgress,
    /// A line is complete for this mark.
    Winner(Mark),
    /// Full board, no completed line.
    Tie,
}

/// Evaluates a board: a win takes precedence over a full board.
#[instrument]
pub fn evaluate(board: &Board) -> Evaluation {
    if let Some(mark) = check_winner(board) {
        Evaluation::Winner(mark)
    } else if is_full(board) {
        Evaluation::Tie
    } else {
        Evaluation::InProgress
    }
}
