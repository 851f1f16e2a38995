//! Reversible byte-to-pictograph text transform.
//!
//! Five bytes (40 bits) become four symbols of ten bits each. Symbols are
//! drawn from 1024 assigned pictographs starting at U+1F300. Unassigned
//! code points and the skin-tone modifiers U+1F3FB..U+1F3FF are skipped,
//! since clients drop the former and fuse the latter with the preceding
//! symbol. A short final block is filled with [`PADDING`]; a four-byte
//! final block ends with one of the [`PADDING_LAST`] symbols, which carries
//! the last two bits.

use crate::error::FormatError;
use tracing::{instrument, trace};

/// Bytes per block.
pub const BLOCK_BYTES: usize = 5;

/// Symbols per block.
pub const BLOCK_SYMBOLS: usize = 4;

/// Inclusive code point runs making up the alphabet, in symbol order.
const ALPHABET_RANGES: [(u32, u32); 5] = [
    (0x1F300, 0x1F3FA),
    (0x1F400, 0x1F6D7),
    (0x1F6DD, 0x1F6EC),
    (0x1F6F0, 0x1F6FC),
    (0x1F910, 0x1F91F),
];

/// Fills unused symbol slots of a short final block.
pub const PADDING: char = '\u{2615}';

/// Final symbol of a four-byte block; index is the last two bits.
pub const PADDING_LAST: [char; 4] = ['\u{2648}', '\u{2649}', '\u{264A}', '\u{264B}'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symbol {
    Data(u16),
    Pad,
    PadLast(u8),
}

fn symbol_char(value: u16) -> char {
    let mut rest = u32::from(value);
    for (start, end) in ALPHABET_RANGES {
        let len = end - start + 1;
        if rest < len {
            return char::from_u32(start + rest).unwrap_or(PADDING);
        }
        rest -= len;
    }
    // Values are ten bits wide and the ranges cover all 1024.
    PADDING
}

fn symbol_value(symbol: char) -> Option<u16> {
    let code = u32::from(symbol);
    let mut base = 0;
    for (start, end) in ALPHABET_RANGES {
        if (start..=end).contains(&code) {
            return u16::try_from(base + code - start).ok();
        }
        base += end - start + 1;
    }
    None
}

fn classify(symbol: char, position: usize) -> Result<Symbol, FormatError> {
    if let Some(value) = symbol_value(symbol) {
        return Ok(Symbol::Data(value));
    }
    if symbol == PADDING {
        return Ok(Symbol::Pad);
    }
    PADDING_LAST
        .iter()
        .position(|&c| c == symbol)
        .map(|bits| Symbol::PadLast(bits as u8))
        .ok_or(FormatError::InvalidSymbol { symbol, position })
}

/// Encodes arbitrary bytes as a pictograph token.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(BLOCK_BYTES) * BLOCK_SYMBOLS * 4);
    for chunk in bytes.chunks(BLOCK_BYTES) {
        let mut b = [0u8; BLOCK_BYTES];
        b[..chunk.len()].copy_from_slice(chunk);
        let [b0, b1, b2, b3, b4] = b.map(u16::from);

        let s0 = (b0 << 2) | (b1 >> 6);
        let s1 = ((b1 & 0x3f) << 4) | (b2 >> 4);
        let s2 = ((b2 & 0x0f) << 6) | (b3 >> 2);
        let s3 = ((b3 & 0x03) << 8) | b4;

        out.push(symbol_char(s0));
        match chunk.len() {
            1 => out.extend([PADDING; 3]),
            2 => {
                out.push(symbol_char(s1));
                out.extend([PADDING; 2]);
            }
            3 => {
                out.push(symbol_char(s1));
                out.push(symbol_char(s2));
                out.push(PADDING);
            }
            4 => {
                out.push(symbol_char(s1));
                out.push(symbol_char(s2));
                out.push(PADDING_LAST[usize::from(b3 & 0x03)]);
            }
            _ => {
                out.push(symbol_char(s1));
                out.push(symbol_char(s2));
                out.push(symbol_char(s3));
            }
        }
    }
    out
}

/// Decodes a token produced by [`encode`].
///
/// Rejects anything `encode` could not have produced.
#[instrument(skip(token))]
pub fn decode(token: &str) -> Result<Vec<u8>, FormatError> {
    let symbols = token
        .chars()
        .enumerate()
        .map(|(position, c)| classify(c, position))
        .collect::<Result<Vec<_>, _>>()?;

    if symbols.len() % BLOCK_SYMBOLS != 0 {
        return Err(FormatError::BadLength {
            symbols: symbols.len(),
            block: BLOCK_SYMBOLS,
        });
    }

    let blocks = symbols.len() / BLOCK_SYMBOLS;
    let mut out = Vec::with_capacity(blocks * BLOCK_BYTES);

    for (block, group) in symbols.chunks(BLOCK_SYMBOLS).enumerate() {
        let base = block * BLOCK_SYMBOLS;
        let is_last = block + 1 == blocks;
        let bytes = decode_block(group, base)?;
        if bytes.len() < BLOCK_BYTES && !is_last {
            return Err(FormatError::MisplacedPadding(base));
        }
        out.extend_from_slice(&bytes);
    }

    trace!(bytes = out.len(), "Decoded token");
    Ok(out)
}

fn decode_block(group: &[Symbol], base: usize) -> Result<Vec<u8>, FormatError> {
    use Symbol::{Data, Pad, PadLast};

    let byte = |v: u16| (v & 0xff) as u8;
    match *group {
        [Data(s0), Data(s1), Data(s2), Data(s3)] => Ok(vec![
            byte(s0 >> 2),
            byte(((s0 & 0x03) << 6) | (s1 >> 4)),
            byte(((s1 & 0x0f) << 4) | (s2 >> 6)),
            byte(((s2 & 0x3f) << 2) | (s3 >> 8)),
            byte(s3),
        ]),
        [Data(s0), Data(s1), Data(s2), PadLast(bits)] => Ok(vec![
            byte(s0 >> 2),
            byte(((s0 & 0x03) << 6) | (s1 >> 4)),
            byte(((s1 & 0x0f) << 4) | (s2 >> 6)),
            byte(((s2 & 0x3f) << 2) | u16::from(bits)),
        ]),
        [Data(s0), Data(s1), Data(s2), Pad] => {
            if s2 & 0x3f != 0 {
                return Err(FormatError::NonCanonical);
            }
            Ok(vec![
                byte(s0 >> 2),
                byte(((s0 & 0x03) << 6) | (s1 >> 4)),
                byte(((s1 & 0x0f) << 4) | (s2 >> 6)),
            ])
        }
        [Data(s0), Data(s1), Pad, Pad] => {
            if s1 & 0x0f != 0 {
                return Err(FormatError::NonCanonical);
            }
            Ok(vec![byte(s0 >> 2), byte(((s0 & 0x03) << 6) | (s1 >> 4))])
        }
        [Data(s0), Pad, Pad, Pad] => {
            if s0 & 0x03 != 0 {
                return Err(FormatError::NonCanonical);
            }
            Ok(vec![byte(s0 >> 2)])
        }
        _ => {
            let offset = group
                .iter()
                .position(|s| !matches!(s, Data(_)))
                .unwrap_or(0);
            Err(FormatError::MisplacedPadding(base + offset))
        }
    }
}
