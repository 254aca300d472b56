//! Plain type aliases and small enums shared across the workspace.

use std::fmt;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// A child chain block number.
pub type BlockNumber = u64;

/// Seconds since the unix epoch, as reported by the root chain.
pub type Timestamp = u64;

/// The asset an output is denominated in, identified by its token contract address.
pub type Token = Address;

/// The `tx_type` marker of an encoded transaction.
pub type TxType = u64;

/// The `output_type` marker of an encoded output.
pub type OutputType = u64;

/// The native asset of the root chain is addressed by the zero address.
pub const ETH_TOKEN: Token = Address::ZERO;

/// Identifies the vault that custodies a given asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VaultId {
    /// The vault holding the native asset.
    Eth,
    /// The vault holding ERC20 tokens.
    Erc20,
}

impl VaultId {
    /// Returns the vault that custodies `token`.
    pub fn for_token(token: Token) -> Self {
        if token == ETH_TOKEN {
            VaultId::Eth
        } else {
            VaultId::Erc20
        }
    }
}

impl fmt::Display for VaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultId::Eth => write!(f, "eth-vault"),
            VaultId::Erc20 => write!(f, "erc20-vault"),
        }
    }
}
