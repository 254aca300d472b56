//! The payment exit game.
//!
//! [`PaymentExitGame`] owns every exit record and every bond. Its operations are spread over
//! [`standard_exit`](crate::standard_exit) and [`in_flight_exit`](crate::in_flight_exit); this
//! module holds the state, the bond governance and the plumbing shared by both.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use alloy_primitives::{Address, U256};
use plasma_exit_params::prelude::BondParams;
use plasma_primitives::{
    exit_id::{ExitId, ExitKind},
    output_id::OutputId,
    types::{Token, VaultId},
    utxo_pos::UtxoPos,
};
use plasma_tx_format::{
    generic::GenericTransaction,
    payment::{PaymentOutput, PaymentTransaction},
};
use tracing::{info, warn};

use crate::{
    bonds::{BondKind, BondRegistry},
    config::ExitGameCfg,
    context::CallContext,
    errors::{ExitGameError, ExitGameResult},
    events::ExitGameEvent,
    framework::{ExitProcessor, PlasmaFramework},
    in_flight_exit::InFlightExit,
    standard_exit::StandardExit,
    transfer::{Escrow, FundsTransfer},
    verifiers::{
        spending_condition::{SpendingConditionRegistry, SpentOutput},
        state_transition::{PaymentStateTransitionVerifier, StateTransitionVerifier},
    },
};

/// The exit game for payment transactions.
#[derive(Debug)]
pub struct PaymentExitGame {
    pub(crate) cfg: Arc<ExitGameCfg>,
    pub(crate) maintainer: Address,
    pub(crate) bonds: BondRegistry,
    pub(crate) standard_exits: HashMap<ExitId, StandardExit>,
    pub(crate) in_flight_exits: HashMap<ExitId, InFlightExit>,
    pub(crate) spending_conditions: SpendingConditionRegistry,
    pub(crate) state_transition: Box<dyn StateTransitionVerifier>,
    pub(crate) escrow: Escrow,
    in_progress: HashSet<ExitId>,
}

impl PaymentExitGame {
    /// Creates an exit game with no exits, understanding payment transactions only.
    ///
    /// `maintainer` is the only account allowed to update bonds. Bonds are paid out through
    /// `transfer`.
    pub fn new(
        cfg: Arc<ExitGameCfg>,
        bonds: &BondParams,
        maintainer: Address,
        transfer: Box<dyn FundsTransfer>,
    ) -> Self {
        let spending_conditions = SpendingConditionRegistry::with_payment(*cfg.protocol());

        Self {
            cfg,
            maintainer,
            bonds: BondRegistry::new(bonds),
            standard_exits: HashMap::new(),
            in_flight_exits: HashMap::new(),
            spending_conditions,
            state_transition: Box::new(PaymentStateTransitionVerifier),
            escrow: Escrow::new(transfer),
            in_progress: HashSet::new(),
        }
    }

    /// Replaces the spending condition registry.
    pub fn with_spending_conditions(mut self, registry: SpendingConditionRegistry) -> Self {
        self.spending_conditions = registry;
        self
    }

    /// Replaces the state transition verifier.
    pub fn with_state_transition_verifier(
        mut self,
        verifier: Box<dyn StateTransitionVerifier>,
    ) -> Self {
        self.state_transition = verifier;
        self
    }

    /// Returns the configuration.
    pub fn cfg(&self) -> &ExitGameCfg {
        &self.cfg
    }

    /// Returns the bond sizes.
    pub const fn bonds(&self) -> &BondRegistry {
        &self.bonds
    }

    /// Returns the funds held in escrow.
    pub const fn escrow_balance(&self) -> U256 {
        self.escrow.balance()
    }

    /// Returns the standard exit `exit_id`, if it exists.
    pub fn standard_exit(&self, exit_id: &ExitId) -> Option<&StandardExit> {
        self.standard_exits.get(exit_id)
    }

    /// Returns the in-flight exit `exit_id`, if it exists.
    pub fn in_flight_exit(&self, exit_id: &ExitId) -> Option<&InFlightExit> {
        self.in_flight_exits.get(exit_id)
    }

    /// Schedules a new standard exit bond.
    pub fn update_standard_exit_bond(
        &mut self,
        ctx: &CallContext,
        bond: U256,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        self.schedule_bond(ctx, BondKind::StandardExit, bond)
    }

    /// Schedules a new in-flight exit bond.
    pub fn update_in_flight_exit_bond(
        &mut self,
        ctx: &CallContext,
        bond: U256,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        self.schedule_bond(ctx, BondKind::InFlightExit, bond)
    }

    /// Schedules a new piggyback bond along with the bounty paid out of it.
    pub fn update_piggyback_bond(
        &mut self,
        ctx: &CallContext,
        bond: U256,
        bounty: U256,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        self.ensure_maintainer(ctx)?;

        let effective_at = self.bond_effective_at(ctx);
        self.bonds
            .schedule_piggyback(bond, bounty, ctx.timestamp, effective_at)?;

        info!(%bond, %bounty, %effective_at, "piggyback bond update scheduled");
        Ok(vec![ExitGameEvent::BondUpdateScheduled {
            kind: BondKind::Piggyback,
            bond,
            bounty: Some(bounty),
            effective_at,
        }])
    }

    fn schedule_bond(
        &mut self,
        ctx: &CallContext,
        kind: BondKind,
        bond: U256,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        self.ensure_maintainer(ctx)?;

        let effective_at = self.bond_effective_at(ctx);
        self.bonds.schedule(kind, bond, ctx.timestamp, effective_at)?;

        info!(%kind, %bond, %effective_at, "bond update scheduled");
        Ok(vec![ExitGameEvent::BondUpdateScheduled {
            kind,
            bond,
            bounty: None,
            effective_at,
        }])
    }

    fn ensure_maintainer(&self, ctx: &CallContext) -> ExitGameResult<()> {
        if ctx.caller != self.maintainer {
            return Err(ExitGameError::Unauthorized(ctx.caller));
        }
        Ok(())
    }

    fn bond_effective_at(&self, ctx: &CallContext) -> u64 {
        ctx.timestamp
            .saturating_add(self.cfg.bond_update_waiting_period())
    }

    /// Runs `op` with `exit_id` marked as in progress, failing if it already is.
    pub(crate) fn guarded<T>(
        &mut self,
        exit_id: ExitId,
        op: impl FnOnce(&mut Self) -> ExitGameResult<T>,
    ) -> ExitGameResult<T> {
        if !self.in_progress.insert(exit_id) {
            warn!(%exit_id, "rejecting reentrant call");
            return Err(ExitGameError::ReentrantCall(exit_id));
        }

        let result = op(self);
        self.in_progress.remove(&exit_id);

        result
    }

    /// Fails unless `value` covers `required`, and the escrow can take it.
    pub(crate) fn check_bond(&self, value: U256, required: U256) -> ExitGameResult<()> {
        if value < required {
            return Err(ExitGameError::InsufficientBond {
                required,
                provided: value,
            });
        }
        self.escrow.check_deposit(value)
    }

    /// Decodes the payment transaction `tx_bytes` and returns the output at `utxo_pos` together
    /// with its id.
    pub(crate) fn locate_output(
        &self,
        tx_bytes: &[u8],
        utxo_pos: UtxoPos,
    ) -> ExitGameResult<(PaymentOutput, OutputId)> {
        let tx = PaymentTransaction::decode(tx_bytes, self.cfg.protocol())?;
        let output = tx.output(usize::from(utxo_pos.output_index()))?.clone();
        let output_id =
            OutputId::at_position(tx_bytes, utxo_pos, self.cfg.child_block_interval());

        Ok((output, output_id))
    }

    /// Whether `spending_tx` is a correctly authorized spend of `spent` as its input
    /// `input_index`.
    pub(crate) fn verify_spend(
        &self,
        spent: &SpentOutput,
        spent_output_type: u64,
        spending_tx: &[u8],
        input_index: usize,
        witness: &[u8],
    ) -> ExitGameResult<bool> {
        let tx_type = GenericTransaction::decode_strict(spending_tx)?.tx_type;

        self.spending_conditions
            .get(spent_output_type, tx_type)?
            .verify(spent, spending_tx, input_index, witness)
    }

    /// Returns a bond out of escrow, reporting a failure as an event.
    pub(crate) fn return_bond(
        &mut self,
        receiver: Address,
        amount: U256,
        events: &mut Vec<ExitGameEvent>,
    ) {
        if amount.is_zero() {
            return;
        }
        if let Err(reason) = self.escrow.pay(receiver, amount) {
            warn!(%receiver, %amount, %reason, "bond return failed");
            events.push(ExitGameEvent::BondReturnFailed {
                receiver,
                amount,
                reason,
            });
        }
    }

    /// Pays a bounty out of escrow, reporting a failure as an event.
    pub(crate) fn pay_bounty(
        &mut self,
        receiver: Address,
        amount: U256,
        events: &mut Vec<ExitGameEvent>,
    ) {
        if amount.is_zero() {
            return;
        }
        if let Err(reason) = self.escrow.pay(receiver, amount) {
            warn!(%receiver, %amount, %reason, "bounty payment failed");
            events.push(ExitGameEvent::BountyPaymentFailed {
                receiver,
                amount,
                reason,
            });
        }
    }
}

/// Withdraws exited funds from a vault, reporting a failure as an event.
pub(crate) fn withdraw(
    framework: &mut PlasmaFramework,
    exit_id: ExitId,
    vault_id: VaultId,
    receiver: Address,
    token: Token,
    amount: U256,
    events: &mut Vec<ExitGameEvent>,
) -> bool {
    match framework.withdraw(vault_id, receiver, token, amount) {
        Ok(()) => true,
        Err(reason) => {
            warn!(%exit_id, %receiver, %token, %amount, %reason, "withdrawal failed");
            events.push(ExitGameEvent::WithdrawalFailed {
                exit_id,
                receiver,
                token,
                amount,
                reason,
            });
            false
        }
    }
}

impl ExitProcessor for PaymentExitGame {
    fn ensure_idle(&self, exit_id: &ExitId) -> ExitGameResult<()> {
        if self.in_progress.contains(exit_id) {
            return Err(ExitGameError::ReentrantCall(*exit_id));
        }
        Ok(())
    }

    fn process_exit(
        &mut self,
        framework: &mut PlasmaFramework,
        exit_id: ExitId,
        vault_id: VaultId,
        token: Token,
        initiator: Address,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        self.guarded(exit_id, |game| {
            Ok(match exit_id.kind() {
                ExitKind::Standard => game.process_standard_exit(framework, exit_id, vault_id),
                ExitKind::InFlight => {
                    game.process_in_flight_exit(framework, exit_id, vault_id, token, initiator)
                }
            })
        })
    }
}
