//! Unit tests for deleting in-flight exits nobody piggybacked
#[cfg(test)]
mod tests {
    use plasma_primitives::{
        exit_id::ExitId,
        types::{VaultId, ETH_TOKEN},
    };

    use crate::{
        context::CallContext,
        errors::ExitGameError,
        events::ExitGameEvent,
        in_flight_exit::tests::{bob, carol, Ife},
    };

    #[test]
    fn test_delete_in_first_phase() {
        let mut ife = Ife::eth();
        let ctx = CallContext::new(carol().address(), ife.second_phase() - 1);

        assert_eq!(
            ife.h
                .game
                .delete_non_piggybacked_in_flight_exit(&ctx, ife.exit_id),
            Err(ExitGameError::StillInFirstPhase(ife.exit_id))
        );
    }

    #[test]
    fn test_delete_piggybacked_exit() {
        let mut ife = Ife::eth();
        ife.piggyback_output(&bob(), 0, ife.second_phase()).unwrap();
        let ctx = CallContext::new(carol().address(), ife.second_phase());

        assert_eq!(
            ife.h
                .game
                .delete_non_piggybacked_in_flight_exit(&ctx, ife.exit_id),
            Err(ExitGameError::AlreadyPiggybacked)
        );
        assert!(ife.h.game.in_flight_exit(&ife.exit_id).is_some());
    }

    #[test]
    fn test_delete_in_second_phase() {
        let mut ife = Ife::eth();
        let bond = ife.exit().bond_size;
        let ctx = CallContext::new(carol().address(), ife.second_phase());

        let events = ife
            .h
            .game
            .delete_non_piggybacked_in_flight_exit(&ctx, ife.exit_id)
            .unwrap();

        assert_eq!(
            events,
            vec![ExitGameEvent::InFlightExitDeleted {
                exit_id: ife.exit_id
            }]
        );
        assert_eq!(ife.h.transfer.paid_to(bob().address()), bond);
        assert!(ife.h.game.in_flight_exit(&ife.exit_id).is_none());

        let now = ife.exitable_at();
        let events = ife.h.process(now, ETH_TOKEN, 1).unwrap();
        assert_eq!(
            events,
            vec![
                ExitGameEvent::InFlightExitOmitted {
                    exit_id: ife.exit_id,
                    token: ETH_TOKEN,
                },
                ExitGameEvent::ProcessedExitsNum {
                    processed: 1,
                    vault_id: VaultId::Eth,
                    token: ETH_TOKEN,
                },
            ]
        );
        assert!(ife.h.vault.withdrawals().is_empty());
    }

    #[test]
    fn test_delete_unknown_exit() {
        let mut ife = Ife::eth();
        let unknown = ExitId::in_flight(b"unknown");
        let ctx = CallContext::new(carol().address(), ife.second_phase());

        assert_eq!(
            ife.h.game.delete_non_piggybacked_in_flight_exit(&ctx, unknown),
            Err(ExitGameError::ExitNotFound(unknown))
        );
    }

    #[test]
    fn test_deleted_exit_restarts_after_its_stale_entry() {
        let mut ife = Ife::eth();
        let ctx = CallContext::new(carol().address(), ife.second_phase());
        ife.h
            .game
            .delete_non_piggybacked_in_flight_exit(&ctx, ife.exit_id)
            .unwrap();

        assert_eq!(
            ife.start_at(ife.exitable_at() - 1),
            Err(ExitGameError::AlreadyExiting(ife.exit_id))
        );
        assert!(ife.h.game.in_flight_exit(&ife.exit_id).is_none());

        let now = ife.exitable_at();
        let events = ife.h.process(now, ETH_TOKEN, 10).unwrap();
        assert_eq!(
            events[0],
            ExitGameEvent::InFlightExitOmitted {
                exit_id: ife.exit_id,
                token: ETH_TOKEN,
            }
        );

        ife.start_at(now).unwrap();
        assert_eq!(ife.exit().exit_start_timestamp, now);
        ife.piggyback_output(&bob(), 0, now).unwrap();

        let events = ife.h.process(now + ife.h.mep() - 1, ETH_TOKEN, 10).unwrap();
        assert_eq!(
            events,
            vec![ExitGameEvent::ProcessedExitsNum {
                processed: 0,
                vault_id: VaultId::Eth,
                token: ETH_TOKEN,
            }]
        );
        assert!(ife.h.vault.withdrawals().is_empty());
        assert!(ife.h.game.in_flight_exit(&ife.exit_id).is_some());

        ife.h.process(now + ife.h.mep(), ETH_TOKEN, 10).unwrap();
        assert_eq!(ife.h.vault.withdrawals().len(), 1);
        assert!(ife.h.game.in_flight_exit(&ife.exit_id).is_none());
    }
}
