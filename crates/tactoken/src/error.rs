//! Error types for decoding tokens and validating actions.

use crate::types::UserId;

/// A token or byte sequence failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FormatError {
    /// Symbol count is not a multiple of the block size.
    #[display("Token length {} is not a multiple of {}", symbols, block)]
    BadLength {
        /// Symbols found.
        symbols: usize,
        /// Symbols per block.
        block: usize,
    },

    /// A character outside the alphabet.
    #[display("Invalid symbol {:?} at position {}", symbol, position)]
    InvalidSymbol {
        /// Offending character.
        symbol: char,
        /// Character offset in the token.
        position: usize,
    },

    /// Padding before the final block, or data after padding.
    #[display("Misplaced padding at position {}", _0)]
    MisplacedPadding(#[error(not(source))] usize),

    /// Unused trailing bits were set; `encode` never produces this.
    #[display("Non-canonical encoding in final block")]
    NonCanonical,

    /// Decoded payload has the wrong size.
    #[display("Expected {} bytes, found {}", expected, found)]
    WrongByteCount {
        /// Required byte count.
        expected: usize,
        /// Decoded byte count.
        found: usize,
    },

    /// Board cell byte outside 0..=2.
    #[display("Invalid cell value {} at index {}", value, index)]
    InvalidCell {
        /// Cell index.
        index: usize,
        /// Raw byte.
        value: u8,
    },

    /// Turn byte has bits other than the seat and abandoned flags.
    #[display("Invalid turn flags {:#04x}", _0)]
    InvalidTurnFlags(#[error(not(source))] u8),

    /// Two non-human seats, or a human carrying the reserved identifier.
    #[display("Invalid player roster")]
    InvalidRoster,

    /// Action token has no `::` separator.
    #[display("Missing action separator")]
    MissingSeparator,

    /// Action byte is neither a cell nor the leave marker.
    #[display("Unknown action byte {}", _0)]
    UnknownAction(#[error(not(source))] u8),
}

/// A move was refused by the game rules.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The game is already won, tied or abandoned.
    #[display("Game is already over")]
    GameOver,

    /// It's not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongTurn(#[error(not(source))] UserId),

    /// Cell index outside 0..9.
    #[display("Cell {} is out of range", _0)]
    OutOfRange(#[error(not(source))] usize),

    /// The target cell is already occupied.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] usize),

    /// A transition broke a game invariant (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}

/// The acting user holds neither seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("User {} is not a participant", actor)]
pub struct UnauthorizedActor {
    /// The rejected user.
    pub actor: UserId,
}

/// Any reason an interaction is declined.
///
/// Every variant is handled at the boundary by declining without mutation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum InteractionError {
    /// Token failed to decode.
    #[display("Format error: {}", _0)]
    Format(FormatError),
    /// Move refused by the rules.
    #[display("Illegal move: {}", _0)]
    IllegalMove(MoveError),
    /// Actor is not seated.
    #[display("Unauthorized: {}", _0)]
    Unauthorized(UnauthorizedActor),
}
