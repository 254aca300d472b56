use plasma_primitives::exit_id::ExitId;
use tracing::info;

use crate::{
    context::CallContext,
    errors::{ExitGameError, ExitGameResult},
    events::ExitGameEvent,
    game::PaymentExitGame,
};

impl PaymentExitGame {
    /// Removes an in-flight exit that nobody piggybacked, once its first phase is over.
    ///
    /// Anyone may call this. The exit bond goes back to its current owner. Queue entries of the
    /// exit stay behind and are omitted when processed. Until then the exit cannot be restarted.
    pub fn delete_non_piggybacked_in_flight_exit(
        &mut self,
        ctx: &CallContext,
        exit_id: ExitId,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        self.guarded(exit_id, |game| {
            let exit = game
                .in_flight_exits
                .get(&exit_id)
                .ok_or(ExitGameError::ExitNotFound(exit_id))?;

            if exit.is_first_phase(ctx.timestamp, game.cfg.min_exit_period()) {
                return Err(ExitGameError::StillInFirstPhase(exit_id));
            }
            if exit.has_piggybacks() {
                return Err(ExitGameError::AlreadyPiggybacked);
            }

            let Some(exit) = game.in_flight_exits.remove(&exit_id) else {
                return Err(ExitGameError::ExitNotFound(exit_id));
            };

            info!(%exit_id, caller = %ctx.caller, bond_owner = %exit.bond_owner, "in-flight exit deleted");
            let mut events = vec![ExitGameEvent::InFlightExitDeleted { exit_id }];
            game.return_bond(exit.bond_owner, exit.bond_size, &mut events);

            Ok(events)
        })
    }
}
