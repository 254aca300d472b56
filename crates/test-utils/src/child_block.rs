//! Child blocks and the inclusion proofs of their transactions.

use alloy_primitives::B256;
use plasma_primitives::{
    constants::{MAX_LEAVES, MERKLE_DEPTH},
    merkle::{empty_leaf, leaf_hash, node_hash},
};

/// An ordered list of encoded transactions committed to by a Merkle root.
#[derive(Debug, Clone, Default)]
pub struct ChildBlock {
    txs: Vec<Vec<u8>>,
}

impl ChildBlock {
    /// Creates a block from its transactions, in order.
    pub fn new(txs: Vec<Vec<u8>>) -> Self {
        assert!(txs.len() as u64 <= MAX_LEAVES, "too many transactions");
        Self { txs }
    }

    /// Appends a transaction and returns its index.
    pub fn push(&mut self, tx: Vec<u8>) -> u64 {
        assert!((self.txs.len() as u64) < MAX_LEAVES, "block is full");
        self.txs.push(tx);
        self.txs.len() as u64 - 1
    }

    /// Returns the transactions of the block.
    pub fn txs(&self) -> &[Vec<u8>] {
        &self.txs
    }

    /// Returns the Merkle root of the block.
    pub fn root(&self) -> B256 {
        let levels = self.levels();
        levels[MERKLE_DEPTH][0]
    }

    /// Returns the serialized inclusion proof of the transaction at `index`.
    pub fn proof(&self, index: u64) -> Vec<u8> {
        assert!(index < MAX_LEAVES, "leaf index out of range");

        let levels = self.levels();
        let empty = empty_subtrees();

        let mut proof = Vec::with_capacity(MERKLE_DEPTH * 32);
        let mut idx = index as usize;
        for depth in 0..MERKLE_DEPTH {
            let sibling = levels[depth]
                .get(idx ^ 1)
                .copied()
                .unwrap_or(empty[depth]);
            proof.extend_from_slice(sibling.as_slice());
            idx /= 2;
        }

        proof
    }

    /// Computes the occupied prefix of every level of the tree, leaves first.
    ///
    /// Nodes to the right of the occupied prefix are roots of empty subtrees and are taken from
    /// [`empty_subtrees`] instead of being materialized.
    fn levels(&self) -> Vec<Vec<B256>> {
        let empty = empty_subtrees();

        let mut levels = Vec::with_capacity(MERKLE_DEPTH + 1);
        let mut current: Vec<B256> = self.txs.iter().map(|tx| leaf_hash(tx)).collect();
        if current.is_empty() {
            current.push(empty[0]);
        }

        for depth in 0..MERKLE_DEPTH {
            let next = current
                .chunks(2)
                .map(|pair| node_hash(&pair[0], pair.get(1).unwrap_or(&empty[depth])))
                .collect();
            levels.push(current);
            current = next;
        }
        levels.push(current);

        levels
    }
}

/// The root of an empty subtree at each height, leaves first.
fn empty_subtrees() -> Vec<B256> {
    let mut hashes = Vec::with_capacity(MERKLE_DEPTH + 1);
    hashes.push(empty_leaf());
    for depth in 0..MERKLE_DEPTH {
        let below = hashes[depth];
        hashes.push(node_hash(&below, &below));
    }
    hashes
}
