//! State shared by every exit game: block roots, exit queues, finalized outputs and vaults.

use std::collections::{BTreeMap, HashMap};

use alloy_primitives::{Address, B256, U256};
use plasma_primitives::{
    exit_id::ExitId,
    merkle::check_membership,
    priority::ExitPriority,
    types::{BlockNumber, Timestamp, Token, VaultId},
    utxo_pos::UtxoPos,
};
use tracing::{debug, info, trace};

use crate::{
    errors::{ExitGameError, ExitGameResult},
    events::ExitGameEvent,
    priority_queue::PriorityQueue,
    spend_tracker::OutputSpendTracker,
    transfer::{TransferError, Vault},
};

/// A child chain block root as submitted by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRecord {
    /// The Merkle root of the block's transactions.
    pub root: B256,
    /// When the root was submitted.
    pub timestamp: Timestamp,
}

/// Settles a single exit taken off a queue.
///
/// Implemented by exit games so that the framework can drain a queue without knowing what kinds
/// of exits it holds.
pub trait ExitProcessor {
    /// Fails if `exit_id` is already being acted upon.
    fn ensure_idle(&self, exit_id: &ExitId) -> ExitGameResult<()>;

    /// Settles `exit_id` for `token`. Exits that no longer apply are omitted, not failed.
    fn process_exit(
        &mut self,
        framework: &mut PlasmaFramework,
        exit_id: ExitId,
        vault_id: VaultId,
        token: Token,
        initiator: Address,
    ) -> ExitGameResult<Vec<ExitGameEvent>>;
}

/// The root chain contract every exit game plugs into.
#[derive(Debug, Default)]
pub struct PlasmaFramework {
    blocks: BTreeMap<BlockNumber, BlockRecord>,
    queues: HashMap<(VaultId, Token), PriorityQueue<ExitPriority>>,
    /// Number of queue entries held by each exit across all queues.
    enqueued: HashMap<ExitId, usize>,
    spend_tracker: OutputSpendTracker,
    vaults: HashMap<VaultId, Box<dyn Vault>>,
}

impl PlasmaFramework {
    /// Creates a framework with no blocks, queues or vaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the root of block `blknum`.
    pub fn submit_block(
        &mut self,
        blknum: BlockNumber,
        root: B256,
        timestamp: Timestamp,
    ) -> ExitGameResult<()> {
        if self.blocks.contains_key(&blknum) {
            return Err(ExitGameError::BlockAlreadySubmitted(blknum));
        }

        debug!(%blknum, %root, "block submitted");
        self.blocks.insert(blknum, BlockRecord { root, timestamp });

        Ok(())
    }

    /// Returns the record of block `blknum`.
    pub fn block(&self, blknum: BlockNumber) -> ExitGameResult<&BlockRecord> {
        self.blocks
            .get(&blknum)
            .ok_or(ExitGameError::UnknownBlock(blknum))
    }

    /// Whether `tx_bytes` is the transaction at `utxo_pos` according to `proof`.
    pub fn is_included(
        &self,
        tx_bytes: &[u8],
        utxo_pos: UtxoPos,
        proof: &[u8],
    ) -> ExitGameResult<bool> {
        let block = self.block(utxo_pos.blknum())?;
        Ok(check_membership(
            tx_bytes,
            utxo_pos.tx_index(),
            block.root,
            proof,
        )?)
    }

    /// Like [`Self::is_included`] but fails when the transaction is not included.
    pub fn ensure_included(
        &self,
        tx_bytes: &[u8],
        utxo_pos: UtxoPos,
        proof: &[u8],
    ) -> ExitGameResult<()> {
        if !self.is_included(tx_bytes, utxo_pos, proof)? {
            return Err(ExitGameError::InvalidInclusionProof(utxo_pos));
        }
        Ok(())
    }

    /// Registers the vault custodying assets of `vault_id`.
    pub fn register_vault(&mut self, vault_id: VaultId, vault: Box<dyn Vault>) {
        info!(%vault_id, "vault registered");
        self.vaults.insert(vault_id, vault);
    }

    /// Withdraws `amount` of `token` from the vault to `receiver`.
    pub fn withdraw(
        &mut self,
        vault_id: VaultId,
        receiver: Address,
        token: Token,
        amount: U256,
    ) -> Result<(), TransferError> {
        match self.vaults.get_mut(&vault_id) {
            Some(vault) => vault.withdraw(receiver, token, amount),
            None => Err(TransferError::Rejected(format!("{vault_id} is not registered"))),
        }
    }

    /// Creates the exit queue of `token` in `vault_id`.
    pub fn add_exit_queue(
        &mut self,
        vault_id: VaultId,
        token: Token,
    ) -> ExitGameResult<ExitGameEvent> {
        if self.queues.contains_key(&(vault_id, token)) {
            return Err(ExitGameError::QueueAlreadyExists { vault_id, token });
        }

        info!(%vault_id, %token, "exit queue added");
        self.queues.insert((vault_id, token), PriorityQueue::new());

        Ok(ExitGameEvent::ExitQueueAdded { vault_id, token })
    }

    /// Whether an exit queue exists for `token` in `vault_id`.
    pub fn has_exit_queue(&self, vault_id: VaultId, token: Token) -> bool {
        self.queues.contains_key(&(vault_id, token))
    }

    /// Fails unless an exit queue exists for `token` in `vault_id`.
    pub fn ensure_exit_queue(&self, vault_id: VaultId, token: Token) -> ExitGameResult<()> {
        if !self.has_exit_queue(vault_id, token) {
            return Err(ExitGameError::QueueNotFound { vault_id, token });
        }
        Ok(())
    }

    /// Returns the exit queue of `token` in `vault_id`.
    pub fn exit_queue(
        &self,
        vault_id: VaultId,
        token: Token,
    ) -> ExitGameResult<&PriorityQueue<ExitPriority>> {
        self.queues
            .get(&(vault_id, token))
            .ok_or(ExitGameError::QueueNotFound { vault_id, token })
    }

    /// Inserts an exit into the queue of `token` in `vault_id`.
    pub fn enqueue(
        &mut self,
        vault_id: VaultId,
        token: Token,
        priority: ExitPriority,
    ) -> ExitGameResult<ExitGameEvent> {
        let queue = self
            .queues
            .get_mut(&(vault_id, token))
            .ok_or(ExitGameError::QueueNotFound { vault_id, token })?;

        debug!(exit_id = %priority.exit_id(), exitable_at = %priority.exitable_at(), %token, "exit queued");
        queue.insert(priority);
        *self.enqueued.entry(priority.exit_id()).or_default() += 1;

        Ok(ExitGameEvent::ExitQueued {
            exit_id: priority.exit_id(),
            priority,
            token,
        })
    }

    /// Whether any queue still holds an entry of `exit_id`.
    ///
    /// Entries outlive challenged or deleted exits until they are taken off their queue, so an exit
    /// id can only be reused once this returns `false`.
    pub fn is_enqueued(&self, exit_id: &ExitId) -> bool {
        self.enqueued.contains_key(exit_id)
    }

    /// Returns the record of finalized outputs.
    pub const fn spend_tracker(&self) -> &OutputSpendTracker {
        &self.spend_tracker
    }

    /// Returns the record of finalized outputs for updating.
    pub fn spend_tracker_mut(&mut self) -> &mut OutputSpendTracker {
        &mut self.spend_tracker
    }

    /// Settles up to `max_count` due exits from the queue of `token` in `vault_id`.
    ///
    /// Exits are settled strictly in queue order; the first exit that is not due yet ends the run.
    /// If `top_exit_id` is given, the queue head must be that exit, which lets the caller make sure
    /// nobody jumped the queue between submitting the call and having it executed.
    #[expect(clippy::too_many_arguments)]
    pub fn process_exits(
        &mut self,
        processor: &mut dyn ExitProcessor,
        initiator: Address,
        now: Timestamp,
        vault_id: VaultId,
        token: Token,
        top_exit_id: Option<ExitId>,
        max_count: usize,
    ) -> ExitGameResult<Vec<ExitGameEvent>> {
        let queue = self
            .queues
            .get_mut(&(vault_id, token))
            .ok_or(ExitGameError::QueueNotFound { vault_id, token })?;

        if let Some(expected) = top_exit_id {
            let actual = queue.peek_min().map(ExitPriority::exit_id);
            if actual != Some(expected) {
                return Err(ExitGameError::TopExitMismatch { expected, actual });
            }
        }

        let mut due = Vec::new();
        while due.len() < max_count {
            match queue.peek_min() {
                Some(head) if head.exitable_at() <= now => due.push(queue.extract_min()?),
                _ => break,
            }
        }

        if let Some(busy) = due
            .iter()
            .find_map(|priority| processor.ensure_idle(&priority.exit_id()).err())
        {
            for priority in due {
                queue.insert(priority);
            }
            return Err(busy);
        }

        for priority in &due {
            self.release(&priority.exit_id());
        }

        let mut events = Vec::new();
        for priority in &due {
            trace_dispatch(priority);
            events.extend(processor.process_exit(
                self,
                priority.exit_id(),
                vault_id,
                token,
                initiator,
            )?);
        }

        info!(processed = due.len(), %vault_id, %token, "processed exits");
        events.push(ExitGameEvent::ProcessedExitsNum {
            processed: due.len(),
            vault_id,
            token,
        });

        Ok(events)
    }

    fn release(&mut self, exit_id: &ExitId) {
        if let Some(count) = self.enqueued.get_mut(exit_id) {
            *count -= 1;
            if *count == 0 {
                self.enqueued.remove(exit_id);
            }
        }
    }
}

fn trace_dispatch(priority: &ExitPriority) {
    trace!(
        exit_id = %priority.exit_id(),
        kind = %priority.exit_id().kind(),
        tx_pos = priority.tx_pos(),
        "dispatching exit"
    );
}
