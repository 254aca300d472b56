use std::mem;

use alloy_primitives::Address;
use plasma_primitives::{
    exit_id::ExitId,
    types::{Token, VaultId},
};
use tracing::{debug, info};

use crate::{
    events::ExitGameEvent,
    framework::PlasmaFramework,
    game::{withdraw, PaymentExitGame},
    in_flight_exit::{Slot, WithdrawData},
};

impl PaymentExitGame {
    /// Settles the `token` slots of a due in-flight exit.
    ///
    /// A canonical exit pays its piggybacked outputs and consumes all its inputs. A non-canonical
    /// one pays its piggybacked inputs back instead. An exit is treated as non-canonical when any
    /// of its inputs was already paid out by another exit. Outputs that were already paid out are
    /// skipped.
    ///
    /// Every piggybacked slot of the token then gets its bond back minus the bounty, which goes to
    /// `initiator`. Once every slot of every token is settled, the exit is removed and its bond
    /// returned.
    pub(crate) fn process_in_flight_exit(
        &mut self,
        framework: &mut PlasmaFramework,
        exit_id: ExitId,
        vault_id: VaultId,
        token: Token,
        initiator: Address,
    ) -> Vec<ExitGameEvent> {
        let Some(exit) = self.in_flight_exits.get(&exit_id) else {
            debug!(%exit_id, %token, "omitting in-flight exit that no longer exists");
            return vec![ExitGameEvent::InFlightExitOmitted { exit_id, token }];
        };
        let mut exit = exit.clone();

        let tracker = framework.spend_tracker();
        let is_canonical = exit.is_canonical
            && !exit
                .inputs
                .iter()
                .filter_map(Slot::data)
                .any(|data| tracker.is_finalized_by_other(&data.output_id, &exit_id));

        let mut events = Vec::new();
        if is_canonical {
            for data in exit
                .inputs
                .iter()
                .filter(|slot| slot.is_pending_for(&token))
                .filter_map(Slot::data)
            {
                if let Err(err) = framework
                    .spend_tracker_mut()
                    .flag(data.output_id, exit_id)
                {
                    debug!(%exit_id, %err, "input of canonical exit already consumed");
                }
            }
            for (output_index, data) in piggybacked(&exit.outputs, &token) {
                if pay_out(framework, exit_id, vault_id, data, &mut events) {
                    events.push(ExitGameEvent::InFlightExitOutputWithdrawn {
                        exit_id,
                        output_index,
                    });
                }
            }
        } else {
            for (input_index, data) in piggybacked(&exit.inputs, &token) {
                if pay_out(framework, exit_id, vault_id, data, &mut events) {
                    events.push(ExitGameEvent::InFlightExitInputWithdrawn {
                        exit_id,
                        input_index,
                    });
                }
            }
        }

        let settled: Vec<_> = piggybacked(&exit.inputs, &token)
            .chain(piggybacked(&exit.outputs, &token))
            .map(|(_, data)| data.clone())
            .collect();
        for data in settled {
            let returned = data.piggyback_bond_size.saturating_sub(data.bounty_size);
            self.return_bond(data.exit_target, returned, &mut events);
            self.pay_bounty(initiator, data.bounty_size, &mut events);
        }

        for slot in exit.inputs.iter_mut().chain(exit.outputs.iter_mut()) {
            if slot.is_pending_for(&token) {
                retire(slot);
            }
        }

        info!(%exit_id, %token, %is_canonical, "in-flight exit processed for token");

        if !exit.is_resolved() {
            self.in_flight_exits.insert(exit_id, exit);
            return events;
        }

        self.in_flight_exits.remove(&exit_id);
        info!(%exit_id, bond_owner = %exit.bond_owner, "in-flight exit finalized");
        events.push(ExitGameEvent::InFlightExitFinalized { exit_id });
        self.return_bond(exit.bond_owner, exit.bond_size, &mut events);

        events
    }
}

/// Returns the piggybacked slots holding `token`, with their index.
fn piggybacked<'a>(
    slots: &'a [Slot],
    token: &'a Token,
) -> impl Iterator<Item = (usize, &'a WithdrawData)> + 'a {
    slots
        .iter()
        .enumerate()
        .filter_map(move |(index, slot)| match slot {
            Slot::Piggybacked(data) if data.token == *token => Some((index, data)),
            _ => None,
        })
}

/// Flags `data` as finalized and withdraws it, unless some exit already paid it out.
fn pay_out(
    framework: &mut PlasmaFramework,
    exit_id: ExitId,
    vault_id: VaultId,
    data: &WithdrawData,
    events: &mut Vec<ExitGameEvent>,
) -> bool {
    if let Err(err) = framework
        .spend_tracker_mut()
        .flag(data.output_id, exit_id)
    {
        debug!(%exit_id, %err, "skipping output that was already paid out");
        return false;
    }

    withdraw(
        framework,
        exit_id,
        vault_id,
        data.exit_target,
        data.token,
        data.amount,
        events,
    );

    true
}

fn retire(slot: &mut Slot) {
    *slot = match mem::replace(slot, Slot::Empty) {
        Slot::Active(data) | Slot::Piggybacked(data) => Slot::Processed(data),
        settled => settled,
    };
}
