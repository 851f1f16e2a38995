//! Move validation state machine.
//!
//! A snapshot is either in progress (parameterised by the seat to move) or
//! finished. Every operation takes a snapshot and returns a new one; the
//! input is never touched, so a rejection leaves no partial mutation.

use crate::contracts::{Contract, IsParticipant, MoveContract, MoveRequest};
use crate::error::InteractionError;
use crate::invariants::Transition;
use crate::opponent::choose_move;
use crate::snapshot::{GameStatus, Snapshot};
use crate::types::{Cell, UserId};
use rand::Rng;
use tracing::{debug, info, instrument};

/// Places the mark of the seat to move on `cell`, then advances the turn.
///
/// Preconditions are the caller's responsibility.
fn place(snapshot: &Snapshot, cell: usize) -> Snapshot {
    let mut next = *snapshot;
    next.board = next.board.with(cell, Cell::Marked(next.turn_of.mark()));
    next.turn = next.turn.wrapping_add(1);
    next.turn_of = next.turn_of.other();
    next
}

/// Applies a human move and, when the non-human opponent is due next, its
/// reply.
///
/// Rejected when the game is over, the actor is not seated or not due, or
/// the cell is out of range or occupied.
#[instrument(skip(snapshot, rng), fields(turn = snapshot.turn()))]
pub fn apply_move<R: Rng + ?Sized>(
    snapshot: &Snapshot,
    actor: UserId,
    cell: usize,
    rng: &mut R,
) -> Result<Snapshot, InteractionError> {
    let request = MoveRequest::new(actor, cell);
    MoveContract::pre(snapshot, &request)?;

    let mut next = place(snapshot, cell);
    let mut plies = 1;
    debug!(%actor, cell, status = ?next.status(), "Move applied");

    if !next.is_finished() && next.current().is_non_human() {
        if let Some(reply) = choose_move(next.board(), rng) {
            next = place(&next, reply);
            plies += 1;
            debug!(cell = reply, status = ?next.status(), "Opponent replied");
        }
    }

    if cfg!(debug_assertions) {
        MoveContract::post(&Transition::new(*snapshot, next, plies))?;
    }

    if let GameStatus::Finished(outcome) = next.status() {
        info!(%outcome, turn = next.turn(), "Game finished");
    }

    Ok(next)
}

/// Ends the match on behalf of a seated participant.
///
/// The board is unchanged; the returned snapshot accepts no further moves.
#[instrument(skip(snapshot))]
pub fn apply_leave(snapshot: &Snapshot, actor: UserId) -> Result<Snapshot, InteractionError> {
    IsParticipant::check(actor, snapshot)?;
    let mut next = *snapshot;
    next.abandoned = true;
    info!(%actor, turn = next.turn(), "Participant left the game");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MoveError, UnauthorizedActor};
    use crate::invariants::fixtures;
    use crate::snapshot::Outcome;
    use crate::types::{Mark, Participant, Players, Seat};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn versus_bot() -> Snapshot {
        Snapshot::new(Players::new(Participant::Human(UserId(1)), Participant::NonHuman).expect("valid roster"))
    }

    #[test]
    fn test_move_flips_turn() {
        let game = fixtures::humans();
        let next = apply_move(&game, UserId(1), 0, &mut rng()).expect("legal move");
        assert_eq!(next.board().get(0), Some(Cell::Marked(Mark::X)));
        assert_eq!(next.turn(), 2);
        assert_eq!(next.turn_of(), Seat::Second);
    }

    #[test]
    fn test_opponent_replies_immediately() {
        let game = versus_bot();
        let next = apply_move(&game, UserId(1), 4, &mut rng()).expect("legal move");
        assert_eq!(next.turn(), 3);
        assert_eq!(next.turn_of(), Seat::First);
        assert_eq!(next.board().count(Mark::O), 1);
    }

    #[test]
    fn test_opponent_blocks() {
        let players = *versus_bot().players();
        let board = crate::types::Board::new()
            .with(0, Cell::Marked(Mark::X))
            .with(8, Cell::Marked(Mark::O));
        let game = Snapshot::from_parts(board, 3, Seat::First, players, false);
        let next = apply_move(&game, UserId(1), 1, &mut rng()).expect("legal move");
        assert_eq!(next.board().get(2), Some(Cell::Marked(Mark::O)));
        assert_eq!(next.turn(), 5);
    }

    #[test]
    fn test_no_reply_after_winning_move() {
        let players = *versus_bot().players();
        let board = crate::types::Board::new()
            .with(0, Cell::Marked(Mark::X))
            .with(1, Cell::Marked(Mark::X))
            .with(3, Cell::Marked(Mark::O))
            .with(4, Cell::Marked(Mark::O));
        let game = Snapshot::from_parts(board, 5, Seat::First, players, false);
        let next = apply_move(&game, UserId(1), 2, &mut rng()).expect("winning move");
        assert_eq!(next.status(), GameStatus::Finished(Outcome::Winner(Mark::X)));
        assert_eq!(next.turn(), 6);
        assert_eq!(next.board().count(Mark::O), 2);
    }

    #[test]
    fn test_rejection_leaves_input_untouched() {
        let game = fixtures::humans();
        let copy = game;
        assert_eq!(
            apply_move(&game, UserId(2), 0, &mut rng()),
            Err(InteractionError::IllegalMove(MoveError::WrongTurn(UserId(2))))
        );
        assert_eq!(game, copy);
    }

    #[test]
    fn test_leave_ends_game() {
        let game = fixtures::humans();
        let left = apply_leave(&game, UserId(2)).expect("participant may leave");
        assert_eq!(left.status(), GameStatus::Finished(Outcome::Abandoned));
        assert_eq!(left.board(), game.board());
        assert_eq!(
            apply_move(&left, UserId(1), 0, &mut rng()),
            Err(InteractionError::IllegalMove(MoveError::GameOver))
        );
    }

    #[test]
    fn test_stranger_cannot_leave() {
        let game = fixtures::humans();
        assert_eq!(
            apply_leave(&game, UserId(3)),
            Err(InteractionError::Unauthorized(UnauthorizedActor { actor: UserId(3) }))
        );
    }

    #[test]
    fn test_self_play_uses_both_seats() {
        let me = Participant::Human(UserId(5));
        let game = Snapshot::new(Players::new(me, me).expect("valid roster"));
        let game = apply_move(&game, UserId(5), 0, &mut rng()).expect("first seat");
        let game = apply_move(&game, UserId(5), 1, &mut rng()).expect("second seat");
        assert_eq!(game.board().get(1), Some(Cell::Marked(Mark::O)));
    }
}
