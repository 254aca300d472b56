use alloy_primitives::U256;
use plasma_primitives::{exit_id::ExitId, output_id::OutputId};
use tracing::info;

use crate::{
    context::CallContext,
    errors::{ExitGameError, ExitGameResult},
    events::ExitGameEvent,
    framework::PlasmaFramework,
    game::PaymentExitGame,
    in_flight_exit::{ChallengeInputSpentArgs, ChallengeOutputSpentArgs, Side, Slot},
    verifiers::spending_condition::SpentOutput,
};

impl PaymentExitGame {
    /// Shows that a piggybacked input was spent by a transaction other than the in-flight one.
    ///
    /// The input is removed from the exit and its piggyback bond goes to the challenger.
    pub fn challenge_in_flight_exit_input_spent(
        &mut self,
        ctx: &CallContext,
        args: ChallengeInputSpentArgs,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        let exit_id = ExitId::in_flight(&args.in_flight_tx);
        let index = args.in_flight_tx_input_index;

        self.guarded(exit_id, |game| {
            let exit = game
                .in_flight_exits
                .get(&exit_id)
                .ok_or(ExitGameError::ExitNotFound(exit_id))?;
            let slot = exit
                .inputs
                .get(index)
                .ok_or(ExitGameError::InvalidIndex(index))?;
            let Slot::Piggybacked(data) = slot else {
                return Err(ExitGameError::InvalidChallenge(format!(
                    "input {index} is not piggybacked"
                )));
            };

            if args.challenging_tx == args.in_flight_tx {
                return Err(ExitGameError::InvalidChallenge(
                    "challenging tx is the in-flight tx".to_owned(),
                ));
            }

            let (input, input_id) = game.locate_output(&args.input_tx, args.input_utxo_pos)?;
            if input_id != data.output_id {
                return Err(ExitGameError::InvalidChallenge(format!(
                    "input tx does not create input {index}"
                )));
            }

            let spent = SpentOutput {
                output_id: input_id,
                output_guard: input.owner(),
            };
            let is_spent = game.verify_spend(
                &spent,
                input.output_type,
                &args.challenging_tx,
                args.challenging_tx_input_index,
                &args.challenging_tx_witness,
            )?;
            if !is_spent {
                return Err(ExitGameError::InvalidChallenge(
                    "challenging tx is not a valid spend of the input".to_owned(),
                ));
            }

            let bond = game.unpiggyback(exit_id, Side::Input, index)?;

            info!(%exit_id, challenger = %ctx.caller, %index, "in-flight exit input blocked");
            let mut events = vec![ExitGameEvent::InFlightExitInputBlocked {
                challenger: ctx.caller,
                exit_id,
                input_index: index,
            }];
            game.return_bond(ctx.caller, bond, &mut events);

            Ok(events)
        })
    }

    /// Shows that a piggybacked output of an included in-flight transaction was spent.
    ///
    /// The output is removed from the exit and its piggyback bond goes to the challenger.
    pub fn challenge_in_flight_exit_output_spent(
        &mut self,
        framework: &PlasmaFramework,
        ctx: &CallContext,
        args: ChallengeOutputSpentArgs,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        let exit_id = ExitId::in_flight(&args.in_flight_tx);
        let index = usize::from(args.output_utxo_pos.output_index());

        self.guarded(exit_id, |game| {
            let exit = game
                .in_flight_exits
                .get(&exit_id)
                .ok_or(ExitGameError::ExitNotFound(exit_id))?;
            let slot = exit
                .outputs
                .get(index)
                .ok_or(ExitGameError::InvalidIndex(index))?;
            let Slot::Piggybacked(data) = slot else {
                return Err(ExitGameError::InvalidChallenge(format!(
                    "output {index} is not piggybacked"
                )));
            };

            let output_id = OutputId::compute(&args.in_flight_tx, index as u16);
            if output_id != data.output_id {
                return Err(ExitGameError::InvalidChallenge(format!(
                    "output {index} does not belong to the in-flight tx"
                )));
            }

            framework.ensure_included(
                &args.in_flight_tx,
                args.output_utxo_pos,
                &args.in_flight_tx_inclusion_proof,
            )?;

            let (output, _) = game.locate_output(&args.in_flight_tx, args.output_utxo_pos)?;
            let spent = SpentOutput {
                output_id,
                output_guard: output.owner(),
            };
            let is_spent = game.verify_spend(
                &spent,
                output.output_type,
                &args.challenging_tx,
                args.challenging_tx_input_index,
                &args.challenging_tx_witness,
            )?;
            if !is_spent {
                return Err(ExitGameError::InvalidChallenge(
                    "challenging tx is not a valid spend of the output".to_owned(),
                ));
            }

            let bond = game.unpiggyback(exit_id, Side::Output, index)?;

            info!(%exit_id, challenger = %ctx.caller, %index, "in-flight exit output blocked");
            let mut events = vec![ExitGameEvent::InFlightExitOutputBlocked {
                challenger: ctx.caller,
                exit_id,
                output_index: index,
            }];
            game.return_bond(ctx.caller, bond, &mut events);

            Ok(events)
        })
    }

    /// Reverts a piggybacked slot to active and returns the bond it was holding.
    fn unpiggyback(&mut self, exit_id: ExitId, side: Side, index: usize) -> ExitGameResult<U256> {
        let exit = self
            .in_flight_exits
            .get_mut(&exit_id)
            .ok_or(ExitGameError::ExitNotFound(exit_id))?;
        let slot = exit
            .slot_mut(side, index)
            .ok_or(ExitGameError::InvalidIndex(index))?;

        let Slot::Piggybacked(data) = slot else {
            return Err(ExitGameError::InvalidIndex(index));
        };

        let mut data = data.clone();
        let bond = data.piggyback_bond_size;
        data.piggyback_bond_size = U256::ZERO;
        data.bounty_size = U256::ZERO;
        *slot = Slot::Active(data);

        Ok(bond)
    }
}
