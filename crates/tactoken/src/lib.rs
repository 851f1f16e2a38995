//! Tactoken - stateless tic-tac-toe for chat interfaces
//!
//! The whole game travels inside the token attached to each board button,
//! so the server keeps no game state between clicks.
//!
//! # Architecture
//!
//! - **Codec**: snapshot to 27 bytes, bytes to a pictograph token
//! - **Rules**: win lines and full-board detection
//! - **Engine**: move and leave validation over immutable snapshots
//! - **Opponent**: one-ply heuristic for the non-human seat
//! - **Protocol**: action tokens and the per-click round trip
//! - **View**: status line and button grid for the presentation layer
//!
//! # Example
//!
//! ```
//! use tactoken::{Action, GameView, UserId, compose, new_match, respond};
//!
//! let mut rng = rand::rng();
//! let game = new_match(UserId(1), None, &mut rng).unwrap();
//! let token = compose(Action::Place(4), &game);
//! let reply = respond(&token, UserId(1), &mut rng).unwrap();
//! let view = GameView::render(&reply.snapshot, Some(reply.event));
//! assert_eq!(view.status, "Turn 3 | <@1>'s turn");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod codec;
mod contracts;
mod engine;
mod error;
mod invariants;
mod opponent;
mod protocol;
mod rules;
mod snapshot;
mod types;
mod view;

// Crate-level exports - Domain types
pub use types::{Board, CELL_COUNT, Cell, Mark, NON_HUMAN_SENTINEL, Participant, Players, Seat, UserId};

// Crate-level exports - Snapshot and lifecycle
pub use snapshot::{GameStatus, Outcome, Snapshot};

// Crate-level exports - Codec
pub use codec::{
    BLOCK_BYTES, BLOCK_SYMBOLS, PACKED_LEN, PADDING, PADDING_LAST, decode, decode_snapshot, encode,
    encode_snapshot, pack, unpack,
};

// Crate-level exports - Rules
pub use rules::{Evaluation, LINES, check_winner, evaluate, is_full};

// Crate-level exports - Validation
pub use contracts::{ActorsTurn, CellIsFree, Contract, GameNotOver, IsParticipant, MoveContract, MoveRequest};
pub use engine::{apply_leave, apply_move};
pub use invariants::{
    AlternatingTurnInvariant, Invariant, InvariantSet, InvariantViolation, MonotonicBoardInvariant, Transition,
    TransitionInvariants, TurnCounterInvariant,
};

// Crate-level exports - Opponent
pub use opponent::{choose_move, find_line_move};

// Crate-level exports - Protocol
pub use protocol::{Action, Event, Reply, SEPARATOR, compose, is_action_token, new_match, parse, respond};

// Crate-level exports - View
pub use view::{CellView, GameView, LeaveView};

// Crate-level exports - Errors
pub use error::{FormatError, InteractionError, MoveError, UnauthorizedActor};
