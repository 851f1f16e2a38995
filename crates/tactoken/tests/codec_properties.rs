//! Property-based tests for the state codec and action tokens.

use proptest::prelude::*;
use tactoken::{
    Action, Board, Cell, FormatError, Mark, Participant, Players, Seat, Snapshot, UserId, compose, decode,
    decode_snapshot, encode, encode_snapshot, pack, parse, unpack,
};

// =============================================================================
// Strategies
// =============================================================================

fn arb_cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        Just(Cell::Empty),
        Just(Cell::Marked(Mark::X)),
        Just(Cell::Marked(Mark::O)),
    ]
}

fn arb_participant() -> impl Strategy<Value = Participant> {
    prop_oneof![
        4 => any::<u64>().prop_map(Participant::from_raw),
        1 => Just(Participant::NonHuman),
    ]
}

fn arb_players() -> impl Strategy<Value = Players> {
    (arb_participant(), arb_participant())
        .prop_filter_map("two non-human seats", |(a, b)| Players::new(a, b))
}

/// Structurally valid snapshots; game legality is irrelevant to the codec.
fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
    (
        proptest::array::uniform9(arb_cell()),
        any::<u8>(),
        any::<bool>(),
        arb_players(),
        any::<bool>(),
    )
        .prop_map(|(cells, turn, second, players, abandoned)| {
            let seat = if second { Seat::Second } else { Seat::First };
            Snapshot::from_parts(Board::from_cells(cells), turn, seat, players, abandoned)
        })
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![(0usize..9).prop_map(Action::Place), Just(Action::Leave)]
}

// =============================================================================
// Round-trip laws
// =============================================================================

proptest! {
    #[test]
    fn prop_unpack_inverts_pack(snapshot in arb_snapshot()) {
        prop_assert_eq!(unpack(&pack(&snapshot)), Ok(snapshot));
    }

    #[test]
    fn prop_decode_inverts_encode(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(decode(&encode(&bytes)), Ok(bytes));
    }

    #[test]
    fn prop_token_roundtrip(snapshot in arb_snapshot()) {
        prop_assert_eq!(decode_snapshot(&encode_snapshot(&snapshot)), Ok(snapshot));
    }

    #[test]
    fn prop_action_token_roundtrip(action in arb_action(), snapshot in arb_snapshot()) {
        prop_assert_eq!(parse(&compose(action, &snapshot)), Ok((action, snapshot)));
    }

    /// Whatever decode accepts, encode reproduces exactly.
    #[test]
    fn prop_decode_accepts_only_canonical(text in "\\PC{0,24}") {
        if let Ok(bytes) = decode(&text) {
            prop_assert_eq!(encode(&bytes), text);
        }
    }

    /// Truncating a token never panics and never yields the original.
    #[test]
    fn prop_truncated_token_rejected(snapshot in arb_snapshot(), cut in 1usize..24) {
        let token = encode_snapshot(&snapshot);
        let truncated: String = token.chars().take(token.chars().count() - cut).collect();
        prop_assert!(decode_snapshot(&truncated).is_err());
    }
}

#[test]
fn test_snapshot_token_is_24_symbols() {
    let players = Players::new(Participant::Human(UserId(1)), Participant::NonHuman).expect("valid roster");
    let token = encode_snapshot(&Snapshot::new(players));
    assert_eq!(token.chars().count(), 24);
}

#[test]
fn test_ascii_is_rejected() {
    assert!(matches!(decode_snapshot("not-a-token"), Err(FormatError::InvalidSymbol { .. })));
}
