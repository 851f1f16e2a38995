//! Fixed-width binary layout of a [`Snapshot`].
//!
//! | bytes  | field                                   |
//! |--------|-----------------------------------------|
//! | 0..9   | board cells (0 empty, 1 X, 2 O)          |
//! | 9      | turn counter modulo 256                 |
//! | 10     | bit 0 seat to move, bit 1 abandoned flag |
//! | 11..19 | first participant, u64 big-endian        |
//! | 19..27 | second participant, u64 big-endian       |

use crate::error::FormatError;
use crate::snapshot::Snapshot;
use crate::types::{Board, CELL_COUNT, Cell, Participant, Players, Seat};
use tracing::instrument;

/// Length of a packed snapshot.
pub const PACKED_LEN: usize = CELL_COUNT + 1 + 1 + 8 + 8;

const TURN: usize = 9;
const FLAGS: usize = 10;
const FIRST: usize = 11;
const SECOND: usize = 19;

const ABANDONED_BIT: u8 = 0b10;

/// Packs a snapshot into its 27-byte wire form.
#[instrument]
pub fn pack(snapshot: &Snapshot) -> [u8; PACKED_LEN] {
    let mut buf = [0u8; PACKED_LEN];
    for (slot, cell) in buf.iter_mut().zip(snapshot.board().cells()) {
        *slot = cell.to_byte();
    }
    buf[TURN] = snapshot.turn();
    buf[FLAGS] = snapshot.turn_of().to_bit() | if snapshot.is_abandoned() { ABANDONED_BIT } else { 0 };
    buf[FIRST..SECOND].copy_from_slice(&snapshot.players().get(Seat::First).to_raw().to_be_bytes());
    buf[SECOND..].copy_from_slice(&snapshot.players().get(Seat::Second).to_raw().to_be_bytes());
    buf
}

/// Unpacks a snapshot. Structural checks only; game legality is not
/// inspected.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn unpack(bytes: &[u8]) -> Result<Snapshot, FormatError> {
    let buf: &[u8; PACKED_LEN] = bytes.try_into().map_err(|_| FormatError::WrongByteCount {
        expected: PACKED_LEN,
        found: bytes.len(),
    })?;

    let mut cells = [Cell::Empty; CELL_COUNT];
    for (index, (cell, &value)) in cells.iter_mut().zip(&buf[..CELL_COUNT]).enumerate() {
        *cell = Cell::from_byte(value).ok_or(FormatError::InvalidCell { index, value })?;
    }

    let flags = buf[FLAGS];
    if flags & !(ABANDONED_BIT | 1) != 0 {
        return Err(FormatError::InvalidTurnFlags(flags));
    }

    let first = Participant::from_raw(read_u64(buf, FIRST));
    let second = Participant::from_raw(read_u64(buf, SECOND));
    let players = Players::new(first, second).ok_or(FormatError::InvalidRoster)?;

    Ok(Snapshot::from_parts(
        Board::from_cells(cells),
        buf[TURN],
        Seat::from_bit(flags),
        players,
        flags & ABANDONED_BIT != 0,
    ))
}

fn read_u64(buf: &[u8; PACKED_LEN], at: usize) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&buf[at..at + 8]);
    u64::from_be_bytes(raw)
}
