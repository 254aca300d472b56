//! Constants that are part of the child chain encoding.

/// Multiplier applied to the block number inside a UTXO position.
pub const BLOCK_OFFSET: u64 = 1_000_000_000;

/// Multiplier applied to the transaction index inside a UTXO position.
pub const TX_OFFSET: u64 = 10_000;

/// Maximum number of transactions per child chain block.
pub const MAX_TX_INDEX: u64 = BLOCK_OFFSET / TX_OFFSET;

/// Depth of the Merkle tree committed to by each block root.
pub const MERKLE_DEPTH: usize = 16;

/// Number of leaves of a block Merkle tree.
pub const MAX_LEAVES: u64 = 1 << MERKLE_DEPTH;
