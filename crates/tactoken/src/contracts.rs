//! Contract-based validation for moves.
//!
//! Preconditions run on every move; postconditions run in debug builds.

use crate::error::{InteractionError, MoveError, UnauthorizedActor};
use crate::invariants::{InvariantSet, Transition, TransitionInvariants};
use crate::snapshot::Snapshot;
use crate::types::{CELL_COUNT, UserId};
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), InteractionError>;

    /// Checks postconditions after applying the action.
    fn post(transition: &Transition) -> Result<(), MoveError>;
}

/// A request to place the actor's mark on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct MoveRequest {
    /// Acting user.
    pub actor: UserId,
    /// Target cell index.
    pub cell: usize,
}

/// Precondition: the game is not finished.
pub struct GameNotOver;

impl GameNotOver {
    /// Rejects moves against a won, tied or abandoned snapshot.
    #[instrument(skip(snapshot))]
    pub fn check(snapshot: &Snapshot) -> Result<(), MoveError> {
        if snapshot.is_finished() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the actor holds a seat.
pub struct IsParticipant;

impl IsParticipant {
    /// Rejects users who hold neither seat.
    #[instrument(skip(snapshot))]
    pub fn check(actor: UserId, snapshot: &Snapshot) -> Result<(), UnauthorizedActor> {
        if snapshot.players().contains(actor) {
            Ok(())
        } else {
            warn!(%actor, "Non-participant attempted an action");
            Err(UnauthorizedActor { actor })
        }
    }
}

/// Precondition: it must be the actor's turn.
pub struct ActorsTurn;

impl ActorsTurn {
    /// Rejects moves by the seat that is not due.
    #[instrument(skip(snapshot))]
    pub fn check(actor: UserId, snapshot: &Snapshot) -> Result<(), MoveError> {
        if snapshot.current().is_user(actor) {
            Ok(())
        } else {
            Err(MoveError::WrongTurn(actor))
        }
    }
}

/// Precondition: the cell exists and is empty.
pub struct CellIsFree;

impl CellIsFree {
    /// Rejects out-of-range and occupied cells.
    #[instrument(skip(snapshot))]
    pub fn check(cell: usize, snapshot: &Snapshot) -> Result<(), MoveError> {
        if cell >= CELL_COUNT {
            Err(MoveError::OutOfRange(cell))
        } else if !snapshot.board().is_empty(cell) {
            Err(MoveError::CellOccupied(cell))
        } else {
            Ok(())
        }
    }
}

/// Contract for move requests.
///
/// Preconditions, in order: game not over, actor seated, actor's turn,
/// cell free. Postconditions: [`TransitionInvariants`].
pub struct MoveContract;

impl Contract<Snapshot, MoveRequest> for MoveContract {
    fn pre(snapshot: &Snapshot, request: &MoveRequest) -> Result<(), InteractionError> {
        GameNotOver::check(snapshot)?;
        IsParticipant::check(request.actor, snapshot)?;
        ActorsTurn::check(request.actor, snapshot)?;
        CellIsFree::check(request.cell, snapshot)?;
        Ok(())
    }

    fn post(transition: &Transition) -> Result<(), MoveError> {
        TransitionInvariants::check_all(transition).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::fixtures;
    use crate::types::{Board, Cell, Mark, Seat};

    #[test]
    fn test_precondition_passes_on_open_cell() {
        let game = fixtures::humans();
        assert!(MoveContract::pre(&game, &MoveRequest::new(UserId(1), 4)).is_ok());
    }

    #[test]
    fn test_precondition_occupied_cell() {
        let game = fixtures::humans();
        let game = Snapshot::from_parts(
            game.board().with(4, Cell::Marked(Mark::O)),
            2,
            Seat::First,
            *game.players(),
            false,
        );
        assert_eq!(
            MoveContract::pre(&game, &MoveRequest::new(UserId(1), 4)),
            Err(InteractionError::IllegalMove(MoveError::CellOccupied(4)))
        );
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let game = fixtures::humans();
        assert_eq!(
            MoveContract::pre(&game, &MoveRequest::new(UserId(2), 4)),
            Err(InteractionError::IllegalMove(MoveError::WrongTurn(UserId(2))))
        );
    }

    #[test]
    fn test_precondition_stranger() {
        let game = fixtures::humans();
        assert_eq!(
            MoveContract::pre(&game, &MoveRequest::new(UserId(9), 4)),
            Err(InteractionError::Unauthorized(UnauthorizedActor { actor: UserId(9) }))
        );
    }

    #[test]
    fn test_precondition_out_of_range() {
        let game = fixtures::humans();
        assert_eq!(
            MoveContract::pre(&game, &MoveRequest::new(UserId(1), 9)),
            Err(InteractionError::IllegalMove(MoveError::OutOfRange(9)))
        );
    }

    #[test]
    fn test_precondition_game_over_checked_first() {
        let game = fixtures::humans();
        let won = Board::from_cells([Cell::Marked(Mark::X); 9]);
        let game = Snapshot::from_parts(won, 10, Seat::Second, *game.players(), false);
        assert_eq!(
            MoveContract::pre(&game, &MoveRequest::new(UserId(9), 20)),
            Err(InteractionError::IllegalMove(MoveError::GameOver))
        );
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = fixtures::humans();
        let after = Snapshot::from_parts(
            before.board().with(0, Cell::Marked(Mark::X)),
            7,
            Seat::Second,
            *before.players(),
            false,
        );
        assert!(matches!(
            MoveContract::post(&Transition::new(before, after, 1)),
            Err(MoveError::InvariantViolation(_))
        ));
    }
}
