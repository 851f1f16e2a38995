//! State codec: snapshot to bytes, bytes to text.

mod emoji;
mod state;

pub use emoji::{BLOCK_BYTES, BLOCK_SYMBOLS, PADDING, PADDING_LAST, decode, encode};
pub use state::{PACKED_LEN, pack, unpack};

use crate::error::FormatError;
use crate::snapshot::Snapshot;
use tracing::instrument;

/// Encodes a snapshot as a text-safe token.
#[instrument]
pub fn encode_snapshot(snapshot: &Snapshot) -> String {
    encode(&pack(snapshot))
}

/// Decodes a token produced by [`encode_snapshot`].
#[instrument(skip(token))]
pub fn decode_snapshot(token: &str) -> Result<Snapshot, FormatError> {
    unpack(&decode(token)?)
}
