use plasma_primitives::{exit_id::ExitId, priority::ExitPriority, types::VaultId};
use tracing::info;

use crate::{
    context::CallContext,
    errors::{ExitGameError, ExitGameResult},
    events::ExitGameEvent,
    framework::PlasmaFramework,
    game::PaymentExitGame,
    standard_exit::{StandardExit, StartStandardExitArgs},
};

impl PaymentExitGame {
    /// Starts the standard exit of the output at `args.utxo_pos`.
    ///
    /// The caller must own the output and send at least the current standard exit bond. The exit
    /// can be processed once the minimum exit period has passed. An exit that was challenged can
    /// only be started again after its old queue entry was processed.
    pub fn start_standard_exit(
        &mut self,
        framework: &mut PlasmaFramework,
        ctx: &CallContext,
        args: StartStandardExitArgs,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        let (output, output_id) = self.locate_output(&args.output_tx, args.utxo_pos)?;
        let exit_id = ExitId::standard(&output_id);

        self.guarded(exit_id, |game| {
            if ctx.caller != output.owner() {
                return Err(ExitGameError::NotOutputOwner {
                    owner: output.owner(),
                    caller: ctx.caller,
                });
            }

            if framework.spend_tracker().is_finalized(&output_id) {
                return Err(ExitGameError::OutputAlreadySpent(output_id));
            }

            framework.ensure_included(
                &args.output_tx,
                args.utxo_pos,
                &args.output_tx_inclusion_proof,
            )?;

            if game.standard_exits.contains_key(&exit_id) || framework.is_enqueued(&exit_id) {
                return Err(ExitGameError::AlreadyExiting(exit_id));
            }

            game.check_bond(ctx.value, game.bonds.standard_exit_bond(ctx.timestamp))?;

            let vault_id = VaultId::for_token(output.token);
            framework.ensure_exit_queue(vault_id, output.token)?;

            let priority = ExitPriority::new(
                game.cfg.exitable_at(ctx.timestamp),
                args.utxo_pos.tx_pos(),
                exit_id,
            )?;

            game.escrow.deposit(ctx.value)?;
            game.standard_exits.insert(
                exit_id,
                StandardExit {
                    utxo_pos: args.utxo_pos,
                    output_id,
                    token: output.token,
                    exit_target: output.owner(),
                    amount: output.amount,
                    bond_size: ctx.value,
                },
            );
            let queued = framework.enqueue(vault_id, output.token, priority)?;

            info!(%exit_id, utxo_pos = %args.utxo_pos, owner = %output.owner(), "standard exit started");
            Ok(vec![
                ExitGameEvent::StandardExitStarted {
                    owner: output.owner(),
                    exit_id,
                    utxo_pos: args.utxo_pos,
                },
                queued,
            ])
        })
    }
}
