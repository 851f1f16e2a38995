//! First-class invariants over snapshot transitions.
//!
//! A transition pairs the snapshot a move was applied to with the snapshot
//! it produced. Invariants are checked as postconditions in debug builds
//! and are testable independently.

mod alternating_turn;
mod monotonic_board;
mod turn_counter;

pub use alternating_turn::AlternatingTurnInvariant;
pub use monotonic_board::MonotonicBoardInvariant;
pub use turn_counter::TurnCounterInvariant;

use crate::snapshot::Snapshot;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// A snapshot before and after a number of accepted plies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct Transition {
    /// Snapshot the move was applied to.
    pub before: Snapshot,
    /// Snapshot the move produced.
    pub after: Snapshot,
    /// Accepted moves between the two (1, or 2 with an opponent reply).
    pub plies: u8,
}

/// All transition invariants as a composable set.
pub type TransitionInvariants = (MonotonicBoardInvariant, TurnCounterInvariant, AlternatingTurnInvariant);

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::snapshot::Snapshot;
    use crate::types::{Participant, Players, UserId};

    pub fn humans() -> Snapshot {
        Snapshot::new(
            Players::new(Participant::Human(UserId(1)), Participant::Human(UserId(2))).expect("valid roster"),
        )
    }
}
