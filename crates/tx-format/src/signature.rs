//! Recovery of the signer of a transaction witness.

use alloy_primitives::{keccak256, Address, B256};
use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    Message, PublicKey, SECP256K1,
};

use crate::errors::{TxFormatError, TxFormatResult};

/// Length of a recoverable signature: `r || s || v`.
pub const SIGNATURE_LENGTH: usize = 65;

/// Recovers the address that produced `signature` over `hash`.
pub fn recover_signer(hash: &B256, signature: &[u8]) -> TxFormatResult<Address> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(TxFormatError::InvalidSignatureLength(signature.len()));
    }

    let v = signature[64];
    let recovery_id = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        _ => return Err(TxFormatError::InvalidRecoveryId(v)),
    };

    let recovery_id = RecoveryId::from_i32(i32::from(recovery_id))?;
    let signature = RecoverableSignature::from_compact(&signature[..64], recovery_id)?;
    let message = Message::from_digest(hash.0);
    let public_key = SECP256K1.recover_ecdsa(&message, &signature)?;

    Ok(address_of(&public_key))
}

/// Derives the account address of a public key.
pub fn address_of(public_key: &PublicKey) -> Address {
    let uncompressed = public_key.serialize_uncompressed();
    Address::from_slice(&keccak256(&uncompressed[1..])[12..])
}

#[cfg(test)]
mod tests {
    use secp256k1::SecretKey;

    use super::*;

    fn sign(secret: &SecretKey, hash: &B256, v_offset: u8) -> Vec<u8> {
        let message = Message::from_digest(hash.0);
        let (recovery_id, compact) = SECP256K1
            .sign_ecdsa_recoverable(&message, secret)
            .serialize_compact();

        let mut signature = compact.to_vec();
        signature.push(recovery_id.to_i32() as u8 + v_offset);
        signature
    }

    #[test]
    fn recovers_signer_for_both_v_conventions() {
        let secret = SecretKey::from_slice(&[0x42; 32]).unwrap();
        let expected = address_of(&PublicKey::from_secret_key_global(&secret));
        let hash = keccak256(b"payment");

        assert_eq!(recover_signer(&hash, &sign(&secret, &hash, 0)).unwrap(), expected);
        assert_eq!(recover_signer(&hash, &sign(&secret, &hash, 27)).unwrap(), expected);
    }

    #[test]
    fn different_message_recovers_different_signer() {
        let secret = SecretKey::from_slice(&[0x42; 32]).unwrap();
        let expected = address_of(&PublicKey::from_secret_key_global(&secret));
        let signature = sign(&secret, &keccak256(b"payment"), 27);

        let recovered = recover_signer(&keccak256(b"other"), &signature);
        assert_ne!(recovered.ok(), Some(expected));
    }

    #[test]
    fn rejects_malformed_signatures() {
        let hash = keccak256(b"payment");

        assert_eq!(
            recover_signer(&hash, &[0u8; 64]),
            Err(TxFormatError::InvalidSignatureLength(64))
        );

        let mut bad_v = vec![1u8; SIGNATURE_LENGTH];
        bad_v[64] = 5;
        assert_eq!(
            recover_signer(&hash, &bad_v),
            Err(TxFormatError::InvalidRecoveryId(5))
        );
    }
}
