//! Deterministic accounts.

use alloy_primitives::{keccak256, Address, B256};
use plasma_tx_format::{payment::tx_hash, signature::address_of};
use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};

/// A child chain account with a known private key.
#[derive(Debug, Clone)]
pub struct Account {
    secret: SecretKey,
    address: Address,
}

impl Account {
    /// Derives the `index`-th test account. The same index always yields the same account.
    pub fn nth(index: u64) -> Self {
        let mut preimage = b"plasma-test-account".to_vec();
        preimage.extend_from_slice(&index.to_be_bytes());

        let secret =
            SecretKey::from_slice(keccak256(&preimage).as_slice()).expect("hash is a valid key");
        let address = address_of(&PublicKey::from_secret_key_global(&secret));

        Self { secret, address }
    }

    /// Returns the address of the account.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Signs a 32-byte digest, producing `r || s || v` with `v` in {27, 28}.
    pub fn sign_hash(&self, hash: &B256) -> Vec<u8> {
        let message = Message::from_digest(hash.0);
        let (recovery_id, compact) = SECP256K1
            .sign_ecdsa_recoverable(&message, &self.secret)
            .serialize_compact();

        let mut signature = compact.to_vec();
        signature.push(recovery_id.to_i32() as u8 + 27);
        signature
    }

    /// Signs an encoded transaction, producing the witness its inputs' owners would provide.
    pub fn sign_tx(&self, tx_bytes: &[u8]) -> Vec<u8> {
        self.sign_hash(&tx_hash(tx_bytes))
    }
}

#[cfg(test)]
mod tests {
    use plasma_tx_format::signature::recover_signer;

    use super::*;

    #[test]
    fn accounts_are_deterministic_and_distinct() {
        assert_eq!(Account::nth(1).address(), Account::nth(1).address());
        assert_ne!(Account::nth(1).address(), Account::nth(2).address());
    }

    #[test]
    fn signatures_recover_to_the_account() {
        let account = Account::nth(7);
        let tx = b"some transaction";

        let recovered = recover_signer(&tx_hash(tx), &account.sign_tx(tx)).unwrap();
        assert_eq!(recovered, account.address());
    }
}
