//! Inclusion checks against the Merkle roots of child chain blocks.
//!
//! Blocks commit to their transactions through a binary tree of fixed depth
//! ([`MERKLE_DEPTH`]). Leaves and inner nodes are hashed with distinct one-byte salts so that an
//! inner node can never be passed off as a leaf.

use alloy_primitives::{Keccak256, B256};

use crate::{
    constants::{MAX_LEAVES, MERKLE_DEPTH},
    errors::{PrimitivesError, PrimitivesResult},
};

const LEAF_SALT: u8 = 0x00;
const NODE_SALT: u8 = 0x01;

/// Length in bytes of a serialized inclusion proof.
pub const PROOF_LENGTH: usize = MERKLE_DEPTH * 32;

/// Hashes the data of a leaf.
pub fn leaf_hash(data: &[u8]) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update([LEAF_SALT]);
    hasher.update(data);
    hasher.finalize()
}

/// Hashes two sibling nodes into their parent.
pub fn node_hash(left: &B256, right: &B256) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update([NODE_SALT]);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize()
}

/// The hash of an unoccupied leaf.
pub fn empty_leaf() -> B256 {
    leaf_hash(&[0u8; 32])
}

/// A list of sibling hashes from the leaf level up to (but excluding) the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionProof(Vec<B256>);

impl InclusionProof {
    /// Builds a proof from its siblings, leaf level first.
    pub fn new(siblings: Vec<B256>) -> PrimitivesResult<Self> {
        if siblings.len() != MERKLE_DEPTH {
            return Err(PrimitivesError::InvalidProofLength {
                expected: PROOF_LENGTH,
                actual: siblings.len() * 32,
            });
        }

        Ok(Self(siblings))
    }

    /// Returns the sibling hashes.
    pub fn siblings(&self) -> &[B256] {
        &self.0
    }

    /// Serializes the proof as the concatenation of its siblings.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.iter().flat_map(|s| s.0).collect()
    }

    /// Computes the root implied by `leaf` sitting at `index`.
    pub fn compute_root(&self, leaf: B256, index: u64) -> PrimitivesResult<B256> {
        if index >= MAX_LEAVES {
            return Err(PrimitivesError::LeafIndexOutOfRange(index));
        }

        let (root, _) = self.0.iter().fold((leaf, index), |(node, idx), sibling| {
            let parent = if idx % 2 == 0 {
                node_hash(&node, sibling)
            } else {
                node_hash(sibling, &node)
            };
            (parent, idx / 2)
        });

        Ok(root)
    }
}

impl TryFrom<&[u8]> for InclusionProof {
    type Error = PrimitivesError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != PROOF_LENGTH {
            return Err(PrimitivesError::InvalidProofLength {
                expected: PROOF_LENGTH,
                actual: bytes.len(),
            });
        }

        Ok(Self(bytes.chunks_exact(32).map(B256::from_slice).collect()))
    }
}

/// Checks that `leaf_data` sits at `index` in the tree committed to by `root`.
///
/// Malformed proofs are reported as errors rather than as a failed membership check so that the
/// caller can tell a bad encoding apart from a wrong proof.
pub fn check_membership(
    leaf_data: &[u8],
    index: u64,
    root: B256,
    proof: &[u8],
) -> PrimitivesResult<bool> {
    let proof = InclusionProof::try_from(proof)?;
    let computed = proof.compute_root(leaf_hash(leaf_data), index)?;

    Ok(computed == root)
}
