use plasma_primitives::{exit_id::ExitId, types::VaultId};
use tracing::{debug, info};

use crate::{
    events::ExitGameEvent,
    framework::PlasmaFramework,
    game::{withdraw, PaymentExitGame},
};

impl PaymentExitGame {
    /// Pays out a due standard exit.
    ///
    /// An exit that no longer exists is omitted. An exit whose output was already paid out by
    /// another exit is omitted too, but its record is removed and its bond returned. Otherwise the
    /// output is flagged as finalized, its amount is withdrawn from the vault and the bond is
    /// returned. Failed transfers do not undo the finalization.
    pub(crate) fn process_standard_exit(
        &mut self,
        framework: &mut PlasmaFramework,
        exit_id: ExitId,
        vault_id: VaultId,
    ) -> Vec<ExitGameEvent> {
        let Some(exit) = self.standard_exits.remove(&exit_id) else {
            debug!(%exit_id, "omitting standard exit that no longer exists");
            return vec![ExitGameEvent::ExitOmitted { exit_id }];
        };

        let mut events = Vec::new();
        if let Err(err) = framework.spend_tracker_mut().flag(exit.output_id, exit_id) {
            debug!(%exit_id, %err, "omitting standard exit of spent output");
            events.push(ExitGameEvent::ExitOmitted { exit_id });
            self.return_bond(exit.exit_target, exit.bond_size, &mut events);
            return events;
        }

        withdraw(
            framework,
            exit_id,
            vault_id,
            exit.exit_target,
            exit.token,
            exit.amount,
            &mut events,
        );
        self.return_bond(exit.exit_target, exit.bond_size, &mut events);

        info!(%exit_id, exit_target = %exit.exit_target, amount = %exit.amount, "standard exit finalized");
        events.insert(0, ExitGameEvent::ExitFinalized { exit_id });

        events
    }
}
