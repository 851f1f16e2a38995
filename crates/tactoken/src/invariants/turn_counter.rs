//! Turn counter invariant.

use super::{Invariant, Transition};

/// Invariant: the counter advances by exactly one per accepted ply.
pub struct TurnCounterInvariant;

impl Invariant<Transition> for TurnCounterInvariant {
    fn holds(t: &Transition) -> bool {
        t.after.turn() == t.before.turn().wrapping_add(t.plies)
    }

    fn description() -> &'static str {
        "Turn counter advances once per ply"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::fixtures;
    use crate::snapshot::Snapshot;

    fn at_turn(turn: u8) -> Snapshot {
        let base = fixtures::humans();
        Snapshot::from_parts(*base.board(), turn, base.turn_of(), *base.players(), false)
    }

    #[test]
    fn test_counter_advances() {
        assert!(TurnCounterInvariant::holds(&Transition::new(at_turn(1), at_turn(3), 2)));
        assert!(!TurnCounterInvariant::holds(&Transition::new(at_turn(1), at_turn(3), 1)));
    }

    #[test]
    fn test_counter_wraps() {
        assert!(TurnCounterInvariant::holds(&Transition::new(at_turn(255), at_turn(0), 1)));
    }
}
