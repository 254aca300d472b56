use std::{array, collections::BTreeSet};

use plasma_exit_params::prelude::{MAX_INPUTS, MAX_OUTPUTS};
use plasma_primitives::{
    exit_id::ExitId,
    output_id::OutputId,
    priority::ExitPriority,
    types::VaultId,
};
use plasma_tx_format::payment::{tx_hash, PaymentOutput, PaymentTransaction};
use tracing::info;

use crate::{
    context::CallContext,
    errors::{ExitGameError, ExitGameResult},
    events::ExitGameEvent,
    framework::PlasmaFramework,
    game::PaymentExitGame,
    in_flight_exit::{InFlightExit, Slot, StartInFlightExitArgs, WithdrawData},
    verifiers::spending_condition::SpentOutput,
};

impl PaymentExitGame {
    /// Starts the in-flight exit of `args.in_flight_tx`.
    ///
    /// Every input must be included in a block and correctly spent by the in-flight transaction,
    /// which in turn must not create more value than it spends. The exit is queued once per token
    /// it touches, with the position of its oldest input as priority.
    pub fn start_in_flight_exit(
        &mut self,
        framework: &mut PlasmaFramework,
        ctx: &CallContext,
        args: StartInFlightExitArgs,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        let exit_id = ExitId::in_flight(&args.in_flight_tx);

        self.guarded(exit_id, |game| {
            let tx = PaymentTransaction::decode(&args.in_flight_tx, game.cfg.protocol())?;
            let input_count = tx.inputs.len();

            if input_count == 0 {
                return Err(ExitGameError::InvalidArguments(
                    "in-flight tx has no inputs".to_owned(),
                ));
            }
            if args.input_txs.len() != input_count
                || args.input_utxos_pos.len() != input_count
                || args.input_txs_inclusion_proofs.len() != input_count
                || args.in_flight_tx_witnesses.len() != input_count
            {
                return Err(ExitGameError::InvalidArguments(format!(
                    "expected data for {input_count} inputs"
                )));
            }

            if game.in_flight_exits.contains_key(&exit_id) || framework.is_enqueued(&exit_id) {
                return Err(ExitGameError::AlreadyExiting(exit_id));
            }

            let mut input_outputs = Vec::with_capacity(input_count);
            for (index, expected_id) in tx.inputs.iter().enumerate() {
                let input_tx = &args.input_txs[index];
                let utxo_pos = args.input_utxos_pos[index];

                if *input_tx == args.in_flight_tx {
                    return Err(ExitGameError::InvalidArguments(format!(
                        "input tx {index} is the in-flight tx"
                    )));
                }

                let (output, output_id) = game.locate_output(input_tx, utxo_pos)?;
                if output_id != *expected_id {
                    return Err(ExitGameError::InputMismatch(index));
                }

                framework.ensure_included(
                    input_tx,
                    utxo_pos,
                    &args.input_txs_inclusion_proofs[index],
                )?;

                let spent = SpentOutput {
                    output_id,
                    output_guard: output.owner(),
                };
                let authorized = game.verify_spend(
                    &spent,
                    output.output_type,
                    &args.in_flight_tx,
                    index,
                    &args.in_flight_tx_witnesses[index],
                )?;
                if !authorized {
                    return Err(ExitGameError::InvalidSpendingCondition(index));
                }

                input_outputs.push((output, output_id));
            }

            let spent_outputs: Vec<PaymentOutput> =
                input_outputs.iter().map(|(output, _)| output.clone()).collect();
            if !game.state_transition.verify(&spent_outputs, &tx.outputs)? {
                return Err(ExitGameError::InvalidStateTransition);
            }

            game.check_bond(ctx.value, game.bonds.in_flight_exit_bond(ctx.timestamp))?;

            let tokens: BTreeSet<_> = spent_outputs
                .iter()
                .chain(tx.outputs.iter())
                .map(|output| output.token)
                .collect();
            for token in &tokens {
                framework.ensure_exit_queue(VaultId::for_token(*token), *token)?;
            }

            // Priority is given by the oldest input.
            let position = args
                .input_utxos_pos
                .iter()
                .copied()
                .min()
                .ok_or_else(|| ExitGameError::InvalidArguments("no inputs".to_owned()))?;
            let priority = ExitPriority::new(
                game.cfg.exitable_at(ctx.timestamp),
                position.tx_pos(),
                exit_id,
            )?;

            let inputs = array::from_fn::<_, MAX_INPUTS, _>(|index| {
                input_outputs
                    .get(index)
                    .map_or(Slot::Empty, |(output, output_id)| {
                        Slot::Active(withdraw_data(output, *output_id))
                    })
            });
            let outputs = array::from_fn::<_, MAX_OUTPUTS, _>(|index| {
                tx.outputs.get(index).map_or(Slot::Empty, |output| {
                    let output_id = OutputId::compute(&args.in_flight_tx, index as u16);
                    Slot::Active(withdraw_data(output, output_id))
                })
            });

            game.escrow.deposit(ctx.value)?;
            game.in_flight_exits.insert(
                exit_id,
                InFlightExit {
                    exit_start_timestamp: ctx.timestamp,
                    position,
                    bond_owner: ctx.caller,
                    bond_size: ctx.value,
                    oldest_competitor_position: None,
                    inputs,
                    outputs,
                    is_canonical: true,
                },
            );

            let mut events = vec![ExitGameEvent::InFlightExitStarted {
                initiator: ctx.caller,
                exit_id,
                tx_hash: tx_hash(&args.in_flight_tx),
            }];
            for token in tokens {
                events.push(framework.enqueue(VaultId::for_token(token), token, priority)?);
            }

            info!(%exit_id, initiator = %ctx.caller, %position, "in-flight exit started");
            Ok(events)
        })
    }
}

fn withdraw_data(output: &PaymentOutput, output_id: OutputId) -> WithdrawData {
    WithdrawData {
        output_id,
        exit_target: output.owner(),
        token: output.token,
        amount: output.amount,
        piggyback_bond_size: Default::default(),
        bounty_size: Default::default(),
    }
}
