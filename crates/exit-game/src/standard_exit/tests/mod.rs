//! Testing utilities specific to standard exits.

use alloy_primitives::B256;
use plasma_primitives::{exit_id::ExitId, output_id::OutputId, types::ETH_TOKEN};
use plasma_test_utils::prelude::{Account, PaymentTxBuilder};

use crate::testing::{Harness, Included, START_TIME};


// ===== Test Constants =====

/// 3 ETH.
pub(super) const AMOUNT: u64 = 3_000_000_000_000_000_000;

pub(super) fn alice() -> Account {
    Account::nth(1)
}

pub(super) fn bob() -> Account {
    Account::nth(2)
}

/// Includes a payment of [`AMOUNT`] ETH to alice in a child block.
pub(super) fn include_payment(h: &mut Harness) -> Included {
    include_payment_seeded(h, 0x01)
}

/// Like [`include_payment`], with `seed` making the transaction unique.
pub(super) fn include_payment_seeded(h: &mut Harness, seed: u8) -> Included {
    let tx = PaymentTxBuilder::new()
        .input(OutputId::from(B256::repeat_byte(seed)))
        .output(alice().address(), ETH_TOKEN, AMOUNT)
        .encode();

    h.include(vec![tx]).remove(0)
}

/// A harness in which alice started the standard exit of her included output at [`START_TIME`].
pub(super) fn started_exit() -> (Harness, Included, ExitId) {
    let mut h = Harness::new();
    let included = include_payment(&mut h);

    h.start_standard_exit(alice().address(), &included, 0, START_TIME)
        .unwrap();
    let exit_id = ExitId::standard(&h.output_id(&included, 0));

    (h, included, exit_id)
}

/// Encodes a payment spending the output created by `included`, signed by alice.
pub(super) fn spend_of(h: &Harness, included: &Included) -> (Vec<u8>, Vec<u8>) {
    let tx = PaymentTxBuilder::new()
        .input(h.output_id(included, 0))
        .output(bob().address(), ETH_TOKEN, AMOUNT)
        .encode();
    let witness = alice().sign_tx(&tx);

    (tx, witness)
}
