//! Action tokens: the only carrier of game state between a rendered board
//! and the click that comes back from it.
//!
//! A token is `encode(action) :: encode(pack(snapshot))`. Each response is a
//! pure function of the presented token, the acting user and the RNG, so
//! no game state is held between requests.

use crate::codec::{decode, decode_snapshot, encode, encode_snapshot};
use crate::engine::{apply_leave, apply_move};
use crate::error::{FormatError, InteractionError};
use crate::snapshot::Snapshot;
use crate::types::{CELL_COUNT, Participant, Players, Seat, UserId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Separates the action part from the state part.
pub const SEPARATOR: &str = "::";

const LEAVE_BYTE: u8 = 0xff;

/// What a player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Place a mark on a cell (0-8).
    ///
    /// A cell index of 9 or more fails [`parse`] with
    /// [`FormatError::UnknownAction`]; [`crate::apply_move`] reports the
    /// same index as [`crate::MoveError::OutOfRange`].
    Place(usize),
    /// Leave the match.
    Leave,
}

impl Action {
    fn to_byte(self) -> u8 {
        match self {
            // Cells above 254 cannot be expressed; clamp to an invalid cell.
            Action::Place(cell) => u8::try_from(cell).unwrap_or(LEAVE_BYTE - 1).min(LEAVE_BYTE - 1),
            Action::Leave => LEAVE_BYTE,
        }
    }

    fn from_byte(byte: u8) -> Result<Self, FormatError> {
        match byte {
            LEAVE_BYTE => Ok(Action::Leave),
            b if usize::from(b) < CELL_COUNT => Ok(Action::Place(usize::from(b))),
            b => Err(FormatError::UnknownAction(b)),
        }
    }
}

/// Composes an action token for `action` against `snapshot`.
#[instrument]
pub fn compose(action: Action, snapshot: &Snapshot) -> String {
    format!("{}{}{}", encode(&[action.to_byte()]), SEPARATOR, encode_snapshot(snapshot))
}

/// Splits and decodes an action token.
#[instrument(skip(token))]
pub fn parse(token: &str) -> Result<(Action, Snapshot), FormatError> {
    let (action_part, state_part) = token.split_once(SEPARATOR).ok_or(FormatError::MissingSeparator)?;

    let action = match decode(action_part)?.as_slice() {
        [byte] => Action::from_byte(*byte)?,
        other => {
            return Err(FormatError::WrongByteCount {
                expected: 1,
                found: other.len(),
            });
        }
    };
    let snapshot = decode_snapshot(state_part)?;
    debug!(?action, turn = snapshot.turn(), "Parsed action token");
    Ok((action, snapshot))
}

/// Returns true if `custom_id` looks like an action token at all.
pub fn is_action_token(custom_id: &str) -> bool {
    custom_id.contains(SEPARATOR)
}

/// What happened during an accepted interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A move (and possibly the opponent's reply) was applied.
    Moved,
    /// The given user left the match.
    Left {
        /// The user who left.
        by: UserId,
    },
}

/// Accepted interaction: the new snapshot and what produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct Reply {
    /// Snapshot to render and embed in the next round of tokens.
    pub snapshot: Snapshot,
    /// The transition that produced it.
    pub event: Event,
}

/// Creates the opening snapshot of a match.
///
/// Against the non-human opponent the initiator always moves first;
/// between humans the seat order is a coin flip.
#[instrument(skip(rng))]
pub fn new_match<R: Rng + ?Sized>(
    initiator: UserId,
    opponent: Option<UserId>,
    rng: &mut R,
) -> Result<Snapshot, FormatError> {
    let challenger = Participant::Human(initiator);
    let players = match opponent {
        None => Players::new(challenger, Participant::NonHuman),
        Some(other) => {
            let seated = Players::new(challenger, Participant::Human(other));
            if rng.random_bool(0.5) {
                seated.map(Players::swapped)
            } else {
                seated
            }
        }
    }
    .ok_or(FormatError::InvalidRoster)?;

    info!(
        first = %players.get(Seat::First),
        second = %players.get(Seat::Second),
        "Match created"
    );
    Ok(Snapshot::new(players))
}

/// Runs one full round trip: parse the token, authorize and apply the
/// action, and return the resulting snapshot.
#[instrument(skip(token, rng))]
pub fn respond<R: Rng + ?Sized>(token: &str, actor: UserId, rng: &mut R) -> Result<Reply, InteractionError> {
    let (action, snapshot) = parse(token).inspect_err(|e| warn!(error = %e, "Undecodable token"))?;

    let reply = match action {
        Action::Place(cell) => Reply::new(apply_move(&snapshot, actor, cell, rng)?, Event::Moved),
        Action::Leave => Reply::new(apply_leave(&snapshot, actor)?, Event::Left { by: actor }),
    };
    Ok(reply)
}
