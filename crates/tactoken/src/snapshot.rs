//! The game snapshot: the complete, immutable value describing one moment
//! of a match.

use crate::rules::{Evaluation, evaluate};
use crate::types::{Board, Mark, Participant, Players, Seat};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A line was completed for this mark.
    Winner(Mark),
    /// Full board with no completed line.
    Tie,
    /// A participant left before the board decided the game.
    Abandoned,
}

impl Outcome {
    /// Returns the winning mark if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Winner(mark) => Some(*mark),
            Outcome::Tie | Outcome::Abandoned => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(mark) => write!(f, "{} wins", mark),
            Outcome::Tie => write!(f, "Tie"),
            Outcome::Abandoned => write!(f, "Abandoned"),
        }
    }
}

/// Where a snapshot stands in the match lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Waiting on the given seat.
    InProgress(Seat),
    /// No further moves are accepted.
    Finished(Outcome),
}

impl GameStatus {
    /// Returns true once no further moves are accepted.
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::Finished(_))
    }
}

/// Complete game state at one moment of a match.
///
/// Every transition takes a snapshot by value and returns a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    pub(crate) board: Board,
    pub(crate) turn: u8,
    pub(crate) turn_of: Seat,
    pub(crate) players: Players,
    pub(crate) abandoned: bool,
}

impl Snapshot {
    /// Opening snapshot: empty board, turn 1, first seat to move.
    #[instrument]
    pub fn new(players: Players) -> Self {
        Self {
            board: Board::new(),
            turn: 1,
            turn_of: Seat::First,
            players,
            abandoned: false,
        }
    }

    /// Builds a snapshot from raw parts without checking game legality.
    pub fn from_parts(board: Board, turn: u8, turn_of: Seat, players: Players, abandoned: bool) -> Self {
        Self {
            board,
            turn,
            turn_of,
            players,
            abandoned,
        }
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Turn counter (starts at 1, wraps at 256).
    pub fn turn(&self) -> u8 {
        self.turn
    }

    /// Seat due to move next.
    pub fn turn_of(&self) -> Seat {
        self.turn_of
    }

    /// The seated participants.
    pub fn players(&self) -> &Players {
        &self.players
    }

    /// Participant due to move next.
    pub fn current(&self) -> Participant {
        self.players.get(self.turn_of)
    }

    /// Returns true if a participant left the match.
    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    /// Current lifecycle status, recomputed from the board.
    #[instrument(skip(self))]
    pub fn status(&self) -> GameStatus {
        match evaluate(&self.board) {
            Evaluation::Winner(mark) => GameStatus::Finished(Outcome::Winner(mark)),
            Evaluation::Tie => GameStatus::Finished(Outcome::Tie),
            Evaluation::InProgress if self.abandoned => GameStatus::Finished(Outcome::Abandoned),
            Evaluation::InProgress => GameStatus::InProgress(self.turn_of),
        }
    }

    /// Returns true once no further moves are accepted.
    pub fn is_finished(&self) -> bool {
        self.status().is_finished()
    }

    /// Participant who holds the winning mark, if the board has a winner.
    pub fn winner(&self) -> Option<Participant> {
        match self.status() {
            GameStatus::Finished(Outcome::Winner(mark)) => Some(self.players.get(mark.seat())),
            _ => None,
        }
    }
}
