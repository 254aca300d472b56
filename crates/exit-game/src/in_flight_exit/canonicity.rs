use plasma_primitives::exit_id::ExitId;
use plasma_tx_format::payment::PaymentTransaction;
use tracing::info;

use crate::{
    context::CallContext,
    errors::{ExitGameError, ExitGameResult},
    events::ExitGameEvent,
    framework::PlasmaFramework,
    game::PaymentExitGame,
    in_flight_exit::{ChallengeCanonicityArgs, RespondToChallengeArgs},
    verifiers::spending_condition::SpentOutput,
};

/// Position given to competitors that were never included in a block: younger than any other.
const NOT_INCLUDED: u64 = u64::MAX;

impl PaymentExitGame {
    /// Shows a competing transaction that spends an input of the in-flight transaction.
    ///
    /// The competitor must be older than any competitor shown before; one that never made it into
    /// a block counts as the youngest possible. A successful challenge marks the exit
    /// non-canonical and hands the exit bond to the challenger. Only accepted in the first phase.
    pub fn challenge_in_flight_exit_not_canonical(
        &mut self,
        framework: &PlasmaFramework,
        ctx: &CallContext,
        args: ChallengeCanonicityArgs,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        let exit_id = ExitId::in_flight(&args.in_flight_tx);

        self.guarded(exit_id, |game| {
            let exit = game
                .in_flight_exits
                .get(&exit_id)
                .ok_or(ExitGameError::ExitNotFound(exit_id))?;

            if !exit.is_first_phase(ctx.timestamp, game.cfg.min_exit_period()) {
                return Err(ExitGameError::FirstPhaseOver(exit_id));
            }

            if args.competing_tx == args.in_flight_tx {
                return Err(ExitGameError::InvalidChallenge(
                    "competing tx is the in-flight tx".to_owned(),
                ));
            }

            let (shared, shared_id) = game.locate_output(&args.input_tx, args.input_utxo_pos)?;
            let in_flight_tx = PaymentTransaction::decode(&args.in_flight_tx, game.cfg.protocol())?;
            if in_flight_tx.inputs.get(args.in_flight_tx_input_index) != Some(&shared_id) {
                return Err(ExitGameError::InvalidChallenge(
                    "shared input is not spent by the in-flight tx".to_owned(),
                ));
            }

            let spent = SpentOutput {
                output_id: shared_id,
                output_guard: shared.owner(),
            };
            let competes = game.verify_spend(
                &spent,
                shared.output_type,
                &args.competing_tx,
                args.competing_tx_input_index,
                &args.competing_tx_witness,
            )?;
            if !competes {
                return Err(ExitGameError::InvalidChallenge(
                    "competing tx is not a valid spend of the shared input".to_owned(),
                ));
            }

            let competitor_position = match args.competing_tx_pos {
                Some(pos) => {
                    framework.ensure_included(
                        &args.competing_tx,
                        pos,
                        &args.competing_tx_inclusion_proof,
                    )?;
                    pos.tx_pos()
                }
                None => NOT_INCLUDED,
            };

            if let Some(oldest) = exit.oldest_competitor_position {
                if competitor_position >= oldest {
                    return Err(ExitGameError::InvalidChallenge(
                        "competitor is not older than the oldest known competitor".to_owned(),
                    ));
                }
            }

            let exit = game
                .in_flight_exits
                .get_mut(&exit_id)
                .ok_or(ExitGameError::ExitNotFound(exit_id))?;
            exit.is_canonical = false;
            exit.oldest_competitor_position = Some(competitor_position);
            exit.bond_owner = ctx.caller;

            info!(%exit_id, challenger = %ctx.caller, %competitor_position, "in-flight exit challenged");
            Ok(vec![ExitGameEvent::InFlightExitChallenged {
                challenger: ctx.caller,
                exit_id,
                competitor_position: args.competing_tx_pos.map(|pos| pos.tx_pos()),
            }])
        })
    }

    /// Shows that the in-flight transaction was included in a block before its oldest known
    /// competitor, making the exit canonical again and handing the exit bond to the responder.
    pub fn respond_to_non_canonical_challenge(
        &mut self,
        framework: &PlasmaFramework,
        ctx: &CallContext,
        args: RespondToChallengeArgs,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        let exit_id = ExitId::in_flight(&args.in_flight_tx);

        self.guarded(exit_id, |game| {
            let exit = game
                .in_flight_exits
                .get(&exit_id)
                .ok_or(ExitGameError::ExitNotFound(exit_id))?;

            let Some(oldest_competitor) = exit.oldest_competitor_position else {
                return Err(ExitGameError::InvalidResponse(
                    "exit was never challenged".to_owned(),
                ));
            };
            if exit.is_canonical {
                return Err(ExitGameError::InvalidResponse(
                    "exit is already canonical".to_owned(),
                ));
            }

            let tx_position = args.in_flight_tx_pos.tx_pos();
            if tx_position >= oldest_competitor {
                return Err(ExitGameError::InvalidResponse(
                    "in-flight tx is not older than its competitor".to_owned(),
                ));
            }

            framework.ensure_included(
                &args.in_flight_tx,
                args.in_flight_tx_pos,
                &args.in_flight_tx_inclusion_proof,
            )?;

            let exit = game
                .in_flight_exits
                .get_mut(&exit_id)
                .ok_or(ExitGameError::ExitNotFound(exit_id))?;
            exit.is_canonical = true;
            exit.oldest_competitor_position = Some(tx_position);
            exit.bond_owner = ctx.caller;

            info!(%exit_id, responder = %ctx.caller, %tx_position, "in-flight exit challenge responded");
            Ok(vec![ExitGameEvent::InFlightExitChallengeResponded {
                responder: ctx.caller,
                exit_id,
                tx_position,
            }])
        })
    }
}
