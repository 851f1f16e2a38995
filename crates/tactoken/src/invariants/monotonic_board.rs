//! Monotonic board invariant: cells go Empty to marked exactly once.

use super::{Invariant, Transition};
use crate::types::Cell;

/// Invariant: occupied cells never change, and exactly one cell is filled
/// per accepted ply.
pub struct MonotonicBoardInvariant;

impl Invariant<Transition> for MonotonicBoardInvariant {
    fn holds(t: &Transition) -> bool {
        let pairs = t.before.board().cells().iter().zip(t.after.board().cells());

        let mut filled = 0u8;
        for (before, after) in pairs {
            match (before, after) {
                (Cell::Empty, Cell::Marked(_)) => filled += 1,
                (b, a) if b == a => {}
                _ => return false,
            }
        }
        filled == t.plies
    }

    fn description() -> &'static str {
        "Cells are filled once per ply and never revert"
    }
}
