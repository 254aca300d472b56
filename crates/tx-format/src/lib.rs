//! The wire format of child chain transactions.
//!
//! Transactions travel as RLP lists. The codec in this crate is deliberately strict: every list
//! must have exactly the expected arity and no bytes may trail the encoding, so that a single
//! transaction has exactly one valid encoding (and hence one hash and one set of output ids).

pub mod errors;
pub mod generic;
pub mod payment;
pub mod signature;

pub mod prelude {
    //! Re-exports of the most commonly used types.
    pub use crate::{
        errors::{TxFormatError, TxFormatResult},
        generic::{GenericOutput, GenericTransaction, OutputData},
        payment::{tx_hash, PaymentOutput, PaymentTransaction},
        signature::{address_of, recover_signer, SIGNATURE_LENGTH},
    };
}
