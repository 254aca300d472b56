use plasma_primitives::output_id::OutputId;
use plasma_tx_format::payment::PaymentTransaction;
use tracing::info;

use crate::{
    context::CallContext,
    errors::{ExitGameError, ExitGameResult},
    events::ExitGameEvent,
    game::PaymentExitGame,
    standard_exit::ChallengeStandardExitArgs,
    verifiers::spending_condition::SpentOutput,
};

impl PaymentExitGame {
    /// Challenges a standard exit by showing a transaction that spends the exiting output.
    ///
    /// On success the exit is removed and its bond goes to the challenger. The output is left
    /// unflagged: the spend that proved the exit invalid is what owns it now.
    pub fn challenge_standard_exit(
        &mut self,
        ctx: &CallContext,
        args: ChallengeStandardExitArgs,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        let exit_id = args.exit_id;

        self.guarded(exit_id, |game| {
            let exit = game
                .standard_exits
                .get(&exit_id)
                .ok_or(ExitGameError::ExitNotFound(exit_id))?;

            let exiting_output_id = OutputId::at_position(
                &args.exiting_tx,
                exit.utxo_pos,
                game.cfg.child_block_interval(),
            );
            if exiting_output_id != exit.output_id {
                return Err(ExitGameError::InvalidChallenge(
                    "exiting tx does not create the exiting output".to_owned(),
                ));
            }

            if args.challenge_tx == args.exiting_tx {
                return Err(ExitGameError::InvalidChallenge(
                    "challenge tx is the exiting tx".to_owned(),
                ));
            }

            let exiting_tx = PaymentTransaction::decode(&args.exiting_tx, game.cfg.protocol())?;
            let exiting_output = exiting_tx.output(usize::from(exit.utxo_pos.output_index()))?;

            let spent = SpentOutput {
                output_id: exit.output_id,
                output_guard: exiting_output.owner(),
            };
            let is_spent = game.verify_spend(
                &spent,
                exiting_output.output_type,
                &args.challenge_tx,
                args.input_index,
                &args.challenge_tx_witness,
            )?;
            if !is_spent {
                return Err(ExitGameError::InvalidChallenge(
                    "challenge tx is not a valid spend of the exiting output".to_owned(),
                ));
            }

            let Some(exit) = game.standard_exits.remove(&exit_id) else {
                return Err(ExitGameError::ExitNotFound(exit_id));
            };

            info!(%exit_id, challenger = %ctx.caller, "standard exit challenged");
            let mut events = vec![ExitGameEvent::ExitChallenged {
                exit_id,
                utxo_pos: exit.utxo_pos,
                challenger: ctx.caller,
            }];
            game.return_bond(ctx.caller, exit.bond_size, &mut events);

            Ok(events)
        })
    }
}
