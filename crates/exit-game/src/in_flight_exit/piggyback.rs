use plasma_primitives::exit_id::ExitId;
use tracing::info;

use crate::{
    context::CallContext,
    errors::{ExitGameError, ExitGameResult},
    events::ExitGameEvent,
    game::PaymentExitGame,
    in_flight_exit::{Side, Slot},
};

impl PaymentExitGame {
    /// Joins the in-flight exit `exit_id` to claim its input `input_index`.
    pub fn piggyback_in_flight_exit_on_input(
        &mut self,
        ctx: &CallContext,
        exit_id: ExitId,
        input_index: usize,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        self.piggyback(ctx, exit_id, Side::Input, input_index)
    }

    /// Joins the in-flight exit `exit_id` to claim its output `output_index`.
    pub fn piggyback_in_flight_exit_on_output(
        &mut self,
        ctx: &CallContext,
        exit_id: ExitId,
        output_index: usize,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        self.piggyback(ctx, exit_id, Side::Output, output_index)
    }

    fn piggyback(
        &mut self,
        ctx: &CallContext,
        exit_id: ExitId,
        side: Side,
        index: usize,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        self.guarded(exit_id, |game| {
            let bond = game.bonds.piggyback_bond(ctx.timestamp);
            let bounty = game.bonds.piggyback_bounty(ctx.timestamp);

            let exit = game
                .in_flight_exits
                .get(&exit_id)
                .ok_or(ExitGameError::ExitNotFound(exit_id))?;
            let slot = exit
                .slot(side, index)
                .ok_or(ExitGameError::InvalidIndex(index))?;

            let data = match slot {
                Slot::Empty => return Err(ExitGameError::InvalidIndex(index)),
                Slot::Piggybacked(_) => return Err(ExitGameError::AlreadyPiggybacked),
                Slot::Processed(_) => {
                    return Err(ExitGameError::InvalidArguments(format!(
                        "slot {index} was already processed"
                    )))
                }
                Slot::Active(data) => data,
            };

            if ctx.caller != data.exit_target {
                return Err(ExitGameError::NotExitTarget {
                    exit_target: data.exit_target,
                    caller: ctx.caller,
                });
            }

            game.check_bond(ctx.value, bond)?;

            let mut data = data.clone();
            data.piggyback_bond_size = ctx.value;
            data.bounty_size = bounty;

            let exit = game
                .in_flight_exits
                .get_mut(&exit_id)
                .ok_or(ExitGameError::ExitNotFound(exit_id))?;
            game.escrow.deposit(ctx.value)?;
            let exit_target = data.exit_target;
            if let Some(slot) = exit.slot_mut(side, index) {
                *slot = Slot::Piggybacked(data);
            }
            let event = match side {
                Side::Input => ExitGameEvent::InFlightExitInputPiggybacked {
                    exit_target,
                    exit_id,
                    input_index: index,
                },
                Side::Output => ExitGameEvent::InFlightExitOutputPiggybacked {
                    exit_target,
                    exit_id,
                    output_index: index,
                },
            };

            info!(%exit_id, ?side, %index, %exit_target, "in-flight exit piggybacked");
            Ok(vec![event])
        })
    }
}
