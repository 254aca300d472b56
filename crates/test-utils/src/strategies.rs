//! `proptest` strategies for values the exit game consumes.

use alloy_primitives::Address;
use plasma_primitives::{constants::MAX_TX_INDEX, types::Token, utxo_pos::UtxoPos};
use proptest::prelude::*;

/// Any non-zero amount small enough that sums of a handful of them cannot overflow a `u64`.
pub fn arb_amount() -> impl Strategy<Value = u64> {
    1u64..=1_000_000_000_000_000_000
}

/// Either the native token or one of a few ERC20 tokens.
pub fn arb_token() -> impl Strategy<Value = Token> {
    prop_oneof![
        Just(Address::ZERO),
        (1u8..=3).prop_map(Address::repeat_byte),
    ]
}

/// A position inside a non-deposit block of a chain with the given child block interval.
pub fn arb_child_block_pos(child_block_interval: u64) -> impl Strategy<Value = UtxoPos> {
    (1u64..1_000, 0..MAX_TX_INDEX.min(1 << 16), 0u16..4).prop_map(
        move |(block, tx_index, output_index)| {
            UtxoPos::new(block * child_block_interval, tx_index, output_index)
                .expect("position is in range")
        },
    )
}
