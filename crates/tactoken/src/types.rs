//! Core domain types for token-carried tic-tac-toe.

use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Identifier reserved for the non-human opponent on the wire.
///
/// Any packed identifier equal to this value decodes to
/// [`Participant::NonHuman`].
pub const NON_HUMAN_SENTINEL: u64 = 783_937_840_752_099_332;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Mark placed by a player.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter, derive_more::Display,
)]
pub enum Mark {
    /// Mark of the first seat.
    X,
    /// Mark of the second seat.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Seat that places this mark.
    pub fn seat(self) -> Seat {
        match self {
            Mark::X => Seat::First,
            Mark::O => Seat::Second,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a mark.
    Marked(Mark),
}

impl Cell {
    /// Wire value of the cell (0 empty, 1 X, 2 O).
    pub fn to_byte(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Marked(Mark::X) => 1,
            Cell::Marked(Mark::O) => 2,
        }
    }

    /// Parses a wire value, returning `None` for anything outside 0..=2.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Marked(Mark::X)),
            2 => Some(Cell::Marked(Mark::O)),
            _ => None,
        }
    }

    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Marked(mark) => Some(mark),
        }
    }
}

/// 3x3 board, cells in row-major order (0-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from explicit cells.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Returns a copy of the board with `index` set to `cell`.
    ///
    /// Out-of-range indices leave the board untouched.
    pub fn with(mut self, index: usize, cell: Cell) -> Self {
        if let Some(slot) = self.cells.get_mut(index) {
            *slot = cell;
        }
        self
    }

    /// Checks if a cell is empty. Out-of-range indices are never empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// All cells as a slice.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Indices of all empty cells, ascending.
    #[instrument(skip(self))]
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Cell::Marked(mark))
            .count()
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                let symbol = match self.cells[index] {
                    Cell::Empty => (index).to_string(),
                    Cell::Marked(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// Opaque user identifier supplied by the chat platform.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
    derive_more::From,
)]
pub struct UserId(pub u64);

/// Occupant of a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Participant {
    /// A person acting through the chat interface.
    Human(UserId),
    /// The built-in opponent driven by the heuristic.
    NonHuman,
}

impl Participant {
    /// Maps a raw wire identifier to a participant.
    pub fn from_raw(raw: u64) -> Self {
        if raw == NON_HUMAN_SENTINEL {
            Participant::NonHuman
        } else {
            Participant::Human(UserId(raw))
        }
    }

    /// Raw wire identifier of this participant.
    pub fn to_raw(self) -> u64 {
        match self {
            Participant::Human(UserId(raw)) => raw,
            Participant::NonHuman => NON_HUMAN_SENTINEL,
        }
    }

    /// Returns true for the heuristic-driven opponent.
    pub fn is_non_human(self) -> bool {
        matches!(self, Participant::NonHuman)
    }

    /// Returns true if this seat is held by `user`.
    pub fn is_user(self, user: UserId) -> bool {
        self == Participant::Human(user)
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Participant::Human(user) => write!(f, "<@{}>", user),
            Participant::NonHuman => write!(f, "Bot"),
        }
    }
}

/// One of the two seats; doubles as the turn indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// Seat 0, plays X.
    First,
    /// Seat 1, plays O.
    Second,
}

impl Seat {
    /// The other seat.
    pub fn other(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// Mark placed by this seat.
    pub fn mark(self) -> Mark {
        match self {
            Seat::First => Mark::X,
            Seat::Second => Mark::O,
        }
    }

    /// Wire bit for this seat.
    pub fn to_bit(self) -> u8 {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    /// Seat encoded by the lowest bit of `byte`.
    pub fn from_bit(byte: u8) -> Self {
        if byte & 1 == 0 { Seat::First } else { Seat::Second }
    }
}

/// Ordered pair of participants.
///
/// At most one seat may be [`Participant::NonHuman`], and no human may carry
/// the reserved sentinel identifier. Deserialization goes through
/// [`Players::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SeatedPair")]
pub struct Players {
    first: Participant,
    second: Participant,
}

/// Unchecked wire shape of [`Players`].
#[derive(Deserialize)]
struct SeatedPair {
    first: Participant,
    second: Participant,
}

impl TryFrom<SeatedPair> for Players {
    type Error = FormatError;

    fn try_from(pair: SeatedPair) -> Result<Self, Self::Error> {
        Players::new(pair.first, pair.second).ok_or(FormatError::InvalidRoster)
    }
}

impl Players {
    /// Seats two participants, rejecting unrepresentable rosters.
    pub fn new(first: Participant, second: Participant) -> Option<Self> {
        let sentinel_human = |p: Participant| p == Participant::Human(UserId(NON_HUMAN_SENTINEL));
        if first.is_non_human() && second.is_non_human() {
            return None;
        }
        if sentinel_human(first) || sentinel_human(second) {
            return None;
        }
        Some(Self { first, second })
    }

    /// Participant in the given seat.
    pub fn get(&self, seat: Seat) -> Participant {
        match seat {
            Seat::First => self.first,
            Seat::Second => self.second,
        }
    }

    /// Seat held by `user`, if any. The first seat wins when a user plays
    /// against themself.
    pub fn seat_of(&self, user: UserId) -> Option<Seat> {
        if self.first.is_user(user) {
            Some(Seat::First)
        } else if self.second.is_user(user) {
            Some(Seat::Second)
        } else {
            None
        }
    }

    /// Returns true if `user` holds either seat.
    pub fn contains(&self, user: UserId) -> bool {
        self.seat_of(user).is_some()
    }

    /// Returns the pair with seats swapped.
    pub fn swapped(self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_bytes() {
        for byte in 0..3u8 {
            assert_eq!(Cell::from_byte(byte).map(Cell::to_byte), Some(byte));
        }
        assert_eq!(Cell::from_byte(3), None);
    }

    #[test]
    fn test_sentinel_maps_to_non_human() {
        assert_eq!(Participant::from_raw(NON_HUMAN_SENTINEL), Participant::NonHuman);
        assert_eq!(Participant::from_raw(42), Participant::Human(UserId(42)));
        assert_eq!(Participant::NonHuman.to_raw(), NON_HUMAN_SENTINEL);
    }

    #[test]
    fn test_two_non_human_rejected() {
        assert!(Players::new(Participant::NonHuman, Participant::NonHuman).is_none());
    }

    #[test]
    fn test_deserialize_rejects_two_non_human_seats() {
        let err = serde_json::from_str::<Players>(r#"{"first":"NonHuman","second":"NonHuman"}"#)
            .expect_err("two bots cannot be seated");
        assert!(err.to_string().contains("Invalid player roster"), "{err}");
    }

    #[test]
    fn test_deserialize_rejects_sentinel_human() {
        let json = format!(r#"{{"first":{{"Human":1}},"second":{{"Human":{}}}}}"#, NON_HUMAN_SENTINEL);
        assert!(serde_json::from_str::<Players>(&json).is_err());
    }

    #[test]
    fn test_serde_roundtrip_valid_roster() {
        let players =
            Players::new(Participant::Human(UserId(1)), Participant::NonHuman).expect("valid roster");
        let json = serde_json::to_string(&players).expect("serializable");
        assert_eq!(serde_json::from_str::<Players>(&json).expect("valid roster"), players);
    }

    #[test]
    fn test_human_with_sentinel_rejected() {
        let fake = Participant::Human(UserId(NON_HUMAN_SENTINEL));
        assert!(Players::new(Participant::Human(UserId(1)), fake).is_none());
    }

    #[test]
    fn test_seat_of() {
        let players =
            Players::new(Participant::Human(UserId(1)), Participant::NonHuman).expect("valid roster");
        assert_eq!(players.seat_of(UserId(1)), Some(Seat::First));
        assert_eq!(players.seat_of(UserId(2)), None);
        assert_eq!(players.swapped().seat_of(UserId(1)), Some(Seat::Second));
    }

    #[test]
    fn test_participant_display() {
        assert_eq!(Participant::Human(UserId(7)).to_string(), "<@7>");
        assert_eq!(Participant::NonHuman.to_string(), "Bot");
    }

    #[test]
    fn test_empty_cells() {
        let board = Board::new()
            .with(0, Cell::Marked(Mark::X))
            .with(4, Cell::Marked(Mark::O));
        assert_eq!(board.empty_cells(), vec![1, 2, 3, 5, 6, 7, 8]);
        assert_eq!(board.count(Mark::X), 1);
    }
}
