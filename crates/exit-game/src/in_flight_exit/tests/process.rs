//! Unit tests for processing in-flight exits
#[cfg(test)]
mod tests {
    use alloy_primitives::U256;
    use plasma_primitives::{
        output_id::OutputId,
        types::{Token, VaultId, ETH_TOKEN},
    };

    use crate::{
        context::CallContext,
        events::ExitGameEvent,
        in_flight_exit::{
            tests::{alice, bob, carol, Ife, ERC20_AMOUNT, ETH_AMOUNT},
            ChallengeCanonicityArgs, Slot,
        },
        testing::{mocks::Withdrawal, ERC20_TOKEN, PROCESSOR, START_TIME},
        transfer::TransferError,
    };

    fn processed(vault_id: VaultId, token: Token) -> ExitGameEvent {
        ExitGameEvent::ProcessedExitsNum {
            processed: 1,
            vault_id,
            token,
        }
    }

    /// Carol marks the exit non-canonical with a competitor that never made it into a block.
    fn challenge_canonicity(ife: &mut Ife) {
        let (competing_tx, competing_tx_witness) = ife.competitor();
        let args = ChallengeCanonicityArgs {
            in_flight_tx: ife.tx.clone(),
            in_flight_tx_input_index: 0,
            input_tx: ife.inputs[0].tx.clone(),
            input_utxo_pos: ife.inputs[0].output(0),
            competing_tx,
            competing_tx_input_index: 0,
            competing_tx_pos: None,
            competing_tx_inclusion_proof: Vec::new(),
            competing_tx_witness,
        };
        let ctx = CallContext::new(carol().address(), START_TIME + 1);

        ife.h
            .game
            .challenge_in_flight_exit_not_canonical(&ife.h.framework, &ctx, args)
            .unwrap();
    }

    #[test]
    fn test_process_canonical_exit_token_by_token() {
        let mut ife = Ife::two_tokens();
        let bond = ife.h.game.bonds().piggyback_bond(START_TIME);
        let bounty = ife.h.game.bonds().piggyback_bounty(START_TIME);
        let exit_bond = ife.exit().bond_size;
        ife.piggyback_output(&bob(), 0, START_TIME).unwrap();
        ife.piggyback_output(&bob(), 1, START_TIME).unwrap();
        let now = ife.exitable_at();

        let events = ife.h.process(now, ETH_TOKEN, 10).unwrap();

        assert_eq!(
            events,
            vec![
                ExitGameEvent::InFlightExitOutputWithdrawn {
                    exit_id: ife.exit_id,
                    output_index: 0,
                },
                processed(VaultId::Eth, ETH_TOKEN),
            ]
        );
        assert!(matches!(ife.exit().inputs[0], Slot::Processed(_)));
        assert!(matches!(ife.exit().outputs[0], Slot::Processed(_)));
        assert!(ife.exit().outputs[1].is_piggybacked());
        assert!(ife.exit().inputs[1].is_pending());
        let eth_input = ife.h.output_id(&ife.inputs[0], 0);
        assert_eq!(
            ife.h.framework.spend_tracker().finalized_by(&eth_input),
            Some(ife.exit_id)
        );

        let events = ife.h.process(now, ERC20_TOKEN, 10).unwrap();

        assert_eq!(
            events,
            vec![
                ExitGameEvent::InFlightExitOutputWithdrawn {
                    exit_id: ife.exit_id,
                    output_index: 1,
                },
                ExitGameEvent::InFlightExitFinalized {
                    exit_id: ife.exit_id
                },
                processed(VaultId::Erc20, ERC20_TOKEN),
            ]
        );
        assert!(ife.h.game.in_flight_exit(&ife.exit_id).is_none());
        assert_eq!(
            ife.h.vault.withdrawals(),
            vec![
                Withdrawal {
                    receiver: bob().address(),
                    token: ETH_TOKEN,
                    amount: U256::from(ETH_AMOUNT),
                },
                Withdrawal {
                    receiver: bob().address(),
                    token: ERC20_TOKEN,
                    amount: U256::from(ERC20_AMOUNT),
                },
            ]
        );
        assert_eq!(
            ife.h.transfer.payments(),
            vec![
                (bob().address(), bond - bounty),
                (PROCESSOR, bounty),
                (bob().address(), bond - bounty),
                (PROCESSOR, bounty),
                (bob().address(), exit_bond),
            ]
        );
        assert_eq!(ife.h.game.escrow_balance(), U256::ZERO);
    }

    #[test]
    fn test_unpiggybacked_token_still_resolves_the_exit() {
        let mut ife = Ife::two_tokens();
        let exit_bond = ife.exit().bond_size;
        ife.piggyback_input(&alice(), 0, START_TIME).unwrap();
        ife.piggyback_output(&bob(), 0, START_TIME).unwrap();
        let now = ife.exitable_at();

        ife.h.process(now, ETH_TOKEN, 10).unwrap();

        assert!(ife.h.game.in_flight_exit(&ife.exit_id).is_some());
        assert_eq!(ife.exit().exit_map(), 0);
        assert_eq!(
            ife.h.vault.withdrawals(),
            vec![Withdrawal {
                receiver: bob().address(),
                token: ETH_TOKEN,
                amount: U256::from(ETH_AMOUNT),
            }]
        );

        let events = ife.h.process(now, ERC20_TOKEN, 10).unwrap();

        assert_eq!(
            events,
            vec![
                ExitGameEvent::InFlightExitFinalized {
                    exit_id: ife.exit_id
                },
                processed(VaultId::Erc20, ERC20_TOKEN),
            ]
        );
        assert!(ife.h.game.in_flight_exit(&ife.exit_id).is_none());
        assert_eq!(ife.h.vault.withdrawals().len(), 1);
        assert_eq!(
            ife.h.transfer.payments().last(),
            Some(&(bob().address(), exit_bond))
        );
        let erc20_input = ife.h.output_id(&ife.inputs[1], 0);
        assert_eq!(
            ife.h.framework.spend_tracker().finalized_by(&erc20_input),
            Some(ife.exit_id)
        );
    }

    #[test]
    fn test_process_non_canonical_exit() {
        let mut ife = Ife::eth();
        let exit_bond = ife.exit().bond_size;
        ife.piggyback_input(&alice(), 0, START_TIME).unwrap();
        ife.piggyback_output(&bob(), 0, START_TIME).unwrap();
        challenge_canonicity(&mut ife);
        let now = ife.exitable_at();

        let events = ife.h.process(now, ETH_TOKEN, 10).unwrap();

        assert_eq!(
            events,
            vec![
                ExitGameEvent::InFlightExitInputWithdrawn {
                    exit_id: ife.exit_id,
                    input_index: 0,
                },
                ExitGameEvent::InFlightExitFinalized {
                    exit_id: ife.exit_id
                },
                processed(VaultId::Eth, ETH_TOKEN),
            ]
        );
        assert_eq!(
            ife.h.vault.withdrawals(),
            vec![Withdrawal {
                receiver: alice().address(),
                token: ETH_TOKEN,
                amount: U256::from(ETH_AMOUNT),
            }]
        );
        assert_eq!(ife.h.transfer.paid_to(carol().address()), exit_bond);
        let output_id = OutputId::compute(&ife.tx, 0);
        assert!(!ife.h.framework.spend_tracker().is_finalized(&output_id));
    }

    #[test]
    fn test_input_paid_out_by_standard_exit_is_not_paid_again() {
        let mut ife = Ife::eth();
        let deposit = ife.inputs[0].clone();
        ife.h
            .start_standard_exit(alice().address(), &deposit, 0, START_TIME - 10)
            .unwrap();
        ife.piggyback_input(&alice(), 0, START_TIME).unwrap();
        ife.piggyback_output(&bob(), 0, START_TIME).unwrap();
        let now = ife.exitable_at();

        let events = ife.h.process(now, ETH_TOKEN, 10).unwrap();

        assert!(matches!(events[0], ExitGameEvent::ExitFinalized { .. }));
        assert!(events.contains(&ExitGameEvent::InFlightExitFinalized {
            exit_id: ife.exit_id
        }));
        assert!(!events.iter().any(|event| matches!(
            event,
            ExitGameEvent::InFlightExitInputWithdrawn { .. }
                | ExitGameEvent::InFlightExitOutputWithdrawn { .. }
        )));
        assert_eq!(
            ife.h.vault.withdrawals(),
            vec![Withdrawal {
                receiver: alice().address(),
                token: ETH_TOKEN,
                amount: U256::from(ETH_AMOUNT),
            }]
        );
    }

    #[test]
    fn test_failed_bond_return_is_reported() {
        let mut ife = Ife::eth();
        let bond = ife.h.game.bonds().piggyback_bond(START_TIME);
        let bounty = ife.h.game.bonds().piggyback_bounty(START_TIME);
        ife.piggyback_output(&bob(), 0, START_TIME).unwrap();
        ife.h.transfer.reject(bob().address());
        let now = ife.exitable_at();

        let events = ife.h.process(now, ETH_TOKEN, 10).unwrap();

        assert!(events.iter().any(|event| matches!(
            event,
            ExitGameEvent::BondReturnFailed {
                receiver,
                amount,
                reason: TransferError::Rejected(_),
            } if *receiver == bob().address() && *amount == bond - bounty
        )));
        assert_eq!(ife.h.transfer.paid_to(PROCESSOR), bounty);
        assert_eq!(ife.h.vault.withdrawals().len(), 1);
        assert!(ife.h.game.in_flight_exit(&ife.exit_id).is_none());
    }

    #[test]
    fn test_bounty_can_take_the_whole_bond() {
        let mut ife = Ife::eth();
        let maintainer = ife.h.maintainer;
        let bond = ife.h.game.bonds().piggyback_bond(START_TIME);
        let ctx = CallContext::new(maintainer, START_TIME + 1);
        ife.h.game.update_piggyback_bond(&ctx, bond, bond).unwrap();
        let effective_at = START_TIME + 1 + ife.h.game.cfg().bond_update_waiting_period();
        ife.piggyback_output(&bob(), 0, effective_at).unwrap();
        let now = effective_at.max(ife.exitable_at());

        ife.h.process(now, ETH_TOKEN, 10).unwrap();

        assert_eq!(ife.h.transfer.paid_to(PROCESSOR), bond);
        assert_eq!(
            ife.h.transfer.paid_to(bob().address()),
            ife.h.game.bonds().in_flight_exit_bond(START_TIME)
        );
    }
}
