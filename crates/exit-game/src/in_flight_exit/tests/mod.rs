//! Testing utilities specific to in-flight exits.

use plasma_primitives::{
    exit_id::ExitId,
    types::{Timestamp, ETH_TOKEN},
};
use plasma_test_utils::prelude::{Account, PaymentTxBuilder};

use crate::{
    context::CallContext,
    errors::ExitGameResult,
    events::ExitGameEvent,
    in_flight_exit::{InFlightExit, StartInFlightExitArgs},
    testing::{Harness, Included, ERC20_TOKEN, START_TIME},
};

mod delete;
mod process;

// ===== Test Constants =====

pub(super) const ETH_AMOUNT: u64 = 10_000;
pub(super) const ERC20_AMOUNT: u64 = 20_000;

/// Spends every input.
pub(super) fn alice() -> Account {
    Account::nth(1)
}

/// Receives every output and starts the exit.
pub(super) fn bob() -> Account {
    Account::nth(2)
}

/// Challenges.
pub(super) fn carol() -> Account {
    Account::nth(3)
}

/// Builds the arguments to start the in-flight exit of `tx`, spending the first output of each of
/// `inputs` with witnesses from `signer`.
pub(super) fn start_args(tx: &[u8], inputs: &[Included], signer: &Account) -> StartInFlightExitArgs {
    StartInFlightExitArgs {
        in_flight_tx: tx.to_vec(),
        input_txs: inputs.iter().map(|input| input.tx.clone()).collect(),
        input_utxos_pos: inputs.iter().map(|input| input.output(0)).collect(),
        input_txs_inclusion_proofs: inputs.iter().map(|input| input.proof.clone()).collect(),
        in_flight_tx_witnesses: inputs.iter().map(|_| signer.sign_tx(tx)).collect(),
    }
}

/// An in-flight exit started by bob at [`START_TIME`].
#[derive(Debug)]
pub(super) struct Ife {
    pub(super) h: Harness,
    /// The deposits spent by the in-flight transaction, in input order.
    pub(super) inputs: Vec<Included>,
    pub(super) tx: Vec<u8>,
    pub(super) exit_id: ExitId,
}

impl Ife {
    fn start(h: Harness, inputs: Vec<Included>, tx: Vec<u8>) -> Self {
        let mut ife = Self {
            exit_id: ExitId::in_flight(&tx),
            h,
            inputs,
            tx,
        };
        ife.start_at(START_TIME).unwrap();

        ife
    }

    /// Bob starts the exit at `now`, posting exactly the current bond.
    pub(super) fn start_at(&mut self, now: Timestamp) -> ExitGameResult<Vec<ExitGameEvent>> {
        let ctx = CallContext::new(bob().address(), now)
            .with_value(self.h.game.bonds().in_flight_exit_bond(now));
        self.h.game.start_in_flight_exit(
            &mut self.h.framework,
            &ctx,
            start_args(&self.tx, &self.inputs, &alice()),
        )
    }

    /// Alice spends an ETH deposit, paying bob.
    pub(super) fn eth() -> Self {
        let mut h = Harness::new();
        let deposit = h.deposit(alice().address(), ETH_TOKEN, ETH_AMOUNT);
        let tx = PaymentTxBuilder::new()
            .input(h.output_id(&deposit, 0))
            .output(bob().address(), ETH_TOKEN, ETH_AMOUNT)
            .encode();

        Self::start(h, vec![deposit], tx)
    }

    /// Alice spends an ETH and an ERC20 deposit, paying bob in both.
    pub(super) fn two_tokens() -> Self {
        let mut h = Harness::new();
        let eth = h.deposit(alice().address(), ETH_TOKEN, ETH_AMOUNT);
        let erc20 = h.deposit(alice().address(), ERC20_TOKEN, ERC20_AMOUNT);
        let tx = PaymentTxBuilder::new()
            .input(h.output_id(&eth, 0))
            .input(h.output_id(&erc20, 0))
            .output(bob().address(), ETH_TOKEN, ETH_AMOUNT)
            .output(bob().address(), ERC20_TOKEN, ERC20_AMOUNT)
            .encode();

        Self::start(h, vec![eth, erc20], tx)
    }

    pub(super) fn exit(&self) -> &InFlightExit {
        self.h.game.in_flight_exit(&self.exit_id).unwrap()
    }

    /// A payment of the first input to carol, signed by alice.
    pub(super) fn competitor(&self) -> (Vec<u8>, Vec<u8>) {
        let tx = PaymentTxBuilder::new()
            .input(self.h.output_id(&self.inputs[0], 0))
            .output(carol().address(), ETH_TOKEN, ETH_AMOUNT)
            .encode();
        let witness = alice().sign_tx(&tx);

        (tx, witness)
    }

    pub(super) fn piggyback_input(
        &mut self,
        owner: &Account,
        index: usize,
        now: Timestamp,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        let ctx = CallContext::new(owner.address(), now)
            .with_value(self.h.game.bonds().piggyback_bond(now));
        self.h
            .game
            .piggyback_in_flight_exit_on_input(&ctx, self.exit_id, index)
    }

    pub(super) fn piggyback_output(
        &mut self,
        owner: &Account,
        index: usize,
        now: Timestamp,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        let ctx = CallContext::new(owner.address(), now)
            .with_value(self.h.game.bonds().piggyback_bond(now));
        self.h
            .game
            .piggyback_in_flight_exit_on_output(&ctx, self.exit_id, index)
    }

    /// The first timestamp of the second phase.
    pub(super) fn second_phase(&self) -> Timestamp {
        self.h.game.cfg().first_phase_end(START_TIME)
    }

    /// The first timestamp at which the exit can be processed.
    pub(super) fn exitable_at(&self) -> Timestamp {
        START_TIME + self.h.mep()
    }
}
