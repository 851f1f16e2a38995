//! Platform-neutral render model handed to the presentation layer.

use crate::protocol::{Action, Event, compose};
use crate::snapshot::{GameStatus, Outcome, Snapshot};
use crate::types::{CELL_COUNT, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One grid cell as the presentation layer should show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    /// Mark in the cell, if any.
    pub mark: Option<Mark>,
    /// Whether clicking is allowed.
    pub enabled: bool,
    /// Action token to attach to the control.
    pub token: String,
}

/// The leave control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveView {
    /// Whether clicking is allowed.
    pub enabled: bool,
    /// Action token to attach to the control.
    pub token: String,
}

/// Everything needed to draw one board message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// Human-readable status line.
    pub status: String,
    /// Rows of the 3x3 grid.
    pub grid: Vec<Vec<CellView>>,
    /// Leave control.
    pub leave: LeaveView,
}

impl GameView {
    /// Renders a snapshot; `event` selects the leave message when present.
    #[instrument(skip(snapshot))]
    pub fn render(snapshot: &Snapshot, event: Option<Event>) -> Self {
        let status = snapshot.status();
        let enabled = !status.is_finished();

        let status = match event {
            Some(Event::Left { by }) => format!("<@{}> has left the game.", by),
            _ => status_line(snapshot, status),
        };

        let cells: Vec<CellView> = (0..CELL_COUNT)
            .map(|index| CellView {
                mark: snapshot.board().get(index).and_then(|cell| cell.mark()),
                enabled,
                token: compose(Action::Place(index), snapshot),
            })
            .collect();

        Self {
            status,
            grid: cells.chunks(3).map(<[CellView]>::to_vec).collect(),
            leave: LeaveView {
                enabled,
                token: compose(Action::Leave, snapshot),
            },
        }
    }
}

fn status_line(snapshot: &Snapshot, status: GameStatus) -> String {
    match status {
        GameStatus::InProgress(seat) => {
            format!("Turn {} | {}'s turn", snapshot.turn(), snapshot.players().get(seat))
        }
        GameStatus::Finished(Outcome::Tie) => "It was a tie!".to_string(),
        GameStatus::Finished(Outcome::Abandoned) => "The game was abandoned.".to_string(),
        GameStatus::Finished(Outcome::Winner(mark)) => {
            format!("{} has won!", snapshot.players().get(mark.seat()))
        }
    }
}
