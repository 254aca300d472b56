//! Testing utilities for the exit game.
//!
//! - [`mocks`] - recording vaults and fund transfers
//! - [`Harness`] - a framework and a payment exit game wired together, with helpers to put
//!   transactions into blocks and start or process exits

pub(crate) mod mocks;

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use plasma_common::logging::{self, LoggerConfig};
use plasma_exit_params::prelude::ExitGameParams;
use plasma_primitives::{
    output_id::OutputId,
    types::{BlockNumber, Timestamp, Token, VaultId, ETH_TOKEN},
    utxo_pos::UtxoPos,
};
use plasma_test_utils::prelude::{deposit_tx, ChildBlock};

use crate::{
    config::ExitGameCfg,
    context::CallContext,
    errors::ExitGameResult,
    events::ExitGameEvent,
    framework::PlasmaFramework,
    game::PaymentExitGame,
    standard_exit::StartStandardExitArgs,
};
use mocks::{RecordingTransfer, RecordingVault};

// ===== Test Constants =====

/// The ERC20 token every harness has a queue for.
pub(crate) const ERC20_TOKEN: Token = Address::new([0xe2; 20]);

/// The time at which tests start interacting with the exit game.
pub(crate) const START_TIME: Timestamp = 1_700_000_000;

/// The account that processes exits and collects bounties.
pub(crate) const PROCESSOR: Address = Address::new([0x77; 20]);

/// A transaction that was put into a block.
#[derive(Debug, Clone)]
pub(crate) struct Included {
    /// The encoded transaction.
    pub(crate) tx: Vec<u8>,
    /// The position of its first output.
    pub(crate) pos: UtxoPos,
    /// Its inclusion proof.
    pub(crate) proof: Vec<u8>,
}

impl Included {
    /// Returns the position of the `index`-th output.
    pub(crate) fn output(&self, index: u16) -> UtxoPos {
        self.pos.with_output_index(index).unwrap()
    }
}

/// A payment exit game plugged into a framework with both vaults and the ETH and ERC20 queues.
#[derive(Debug)]
pub(crate) struct Harness {
    pub(crate) framework: PlasmaFramework,
    pub(crate) game: PaymentExitGame,
    pub(crate) maintainer: Address,
    pub(crate) vault: RecordingVault,
    pub(crate) transfer: RecordingTransfer,
    next_child_block: BlockNumber,
    next_deposit_block: BlockNumber,
}

impl Harness {
    pub(crate) fn new() -> Self {
        let _ = logging::init(LoggerConfig::with_base_name("exit-game-tests"));

        let params = ExitGameParams::default();
        let cfg = Arc::new(ExitGameCfg::from_params(&params).unwrap());
        let maintainer = Address::new([0x4d; 20]);
        let vault = RecordingVault::default();
        let transfer = RecordingTransfer::default();

        let mut framework = PlasmaFramework::new();
        framework.register_vault(VaultId::Eth, Box::new(vault.clone()));
        framework.register_vault(VaultId::Erc20, Box::new(vault.clone()));
        framework.add_exit_queue(VaultId::Eth, ETH_TOKEN).unwrap();
        framework
            .add_exit_queue(VaultId::Erc20, ERC20_TOKEN)
            .unwrap();

        let game = PaymentExitGame::new(
            cfg.clone(),
            &params.bonds,
            maintainer,
            Box::new(transfer.clone()),
        );

        Self {
            framework,
            game,
            maintainer,
            vault,
            transfer,
            next_child_block: cfg.child_block_interval(),
            next_deposit_block: 1,
        }
    }

    /// Returns the minimum exit period.
    pub(crate) fn mep(&self) -> u64 {
        self.game.cfg().min_exit_period()
    }

    /// Submits a deposit block holding a single deposit of `amount` of `token` to `owner`.
    pub(crate) fn deposit(&mut self, owner: Address, token: Token, amount: u64) -> Included {
        let blknum = self.next_deposit_block;
        self.next_deposit_block += 1;

        self.submit(blknum, vec![deposit_tx(owner, token, amount)])
            .remove(0)
    }

    /// Submits a child block holding `txs`, in order.
    pub(crate) fn include(&mut self, txs: Vec<Vec<u8>>) -> Vec<Included> {
        let blknum = self.next_child_block;
        self.next_child_block += self.game.cfg().child_block_interval();
        self.next_deposit_block = blknum + 1;

        self.submit(blknum, txs)
    }

    fn submit(&mut self, blknum: BlockNumber, txs: Vec<Vec<u8>>) -> Vec<Included> {
        let block = ChildBlock::new(txs);
        self.framework
            .submit_block(blknum, block.root(), START_TIME)
            .unwrap();

        block
            .txs()
            .iter()
            .enumerate()
            .map(|(index, tx)| Included {
                tx: tx.clone(),
                pos: UtxoPos::new(blknum, index as u64, 0).unwrap(),
                proof: block.proof(index as u64),
            })
            .collect()
    }

    /// Returns the id of the `index`-th output of an included transaction.
    pub(crate) fn output_id(&self, included: &Included, index: u16) -> OutputId {
        OutputId::at_position(
            &included.tx,
            included.output(index),
            self.game.cfg().child_block_interval(),
        )
    }

    /// Starts the standard exit of an included output, posting exactly the current bond.
    pub(crate) fn start_standard_exit(
        &mut self,
        owner: Address,
        included: &Included,
        index: u16,
        now: Timestamp,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        let ctx = CallContext::new(owner, now).with_value(self.standard_exit_bond(now));
        let args = StartStandardExitArgs {
            utxo_pos: included.output(index),
            output_tx: included.tx.clone(),
            output_tx_inclusion_proof: included.proof.clone(),
        };

        self.game
            .start_standard_exit(&mut self.framework, &ctx, args)
    }

    pub(crate) fn standard_exit_bond(&self, now: Timestamp) -> U256 {
        self.game.bonds().standard_exit_bond(now)
    }

    /// Processes up to `max_count` due exits of `token` on behalf of [`PROCESSOR`].
    pub(crate) fn process(
        &mut self,
        now: Timestamp,
        token: Token,
        max_count: usize,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        self.framework.process_exits(
            &mut self.game,
            PROCESSOR,
            now,
            VaultId::for_token(token),
            token,
            None,
            max_count,
        )
    }
}
