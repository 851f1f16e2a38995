//! Alternating turn invariant: the seat to move flips on every ply.

use super::{Invariant, Transition};

/// Invariant: `turn_of` flips once per accepted ply, and each ply placed
/// the mark of the seat whose turn it was.
pub struct AlternatingTurnInvariant;

impl Invariant<Transition> for AlternatingTurnInvariant {
    fn holds(t: &Transition) -> bool {
        let mut seat = t.before.turn_of();
        for _ in 0..t.plies {
            seat = seat.other();
        }
        if seat != t.after.turn_of() {
            return false;
        }

        // The mover's mark count grows by ceil(plies / 2), the other by floor.
        let mover = t.before.turn_of().mark();
        let mover_gain = t.after.board().count(mover).checked_sub(t.before.board().count(mover));
        let other_gain = t
            .after
            .board()
            .count(mover.opponent())
            .checked_sub(t.before.board().count(mover.opponent()));
        let plies = usize::from(t.plies);
        mover_gain == Some(plies.div_ceil(2)) && other_gain == Some(plies / 2)
    }

    fn description() -> &'static str {
        "Seats alternate and place their own mark"
    }
}
