//! The record of outputs that have been paid out.

use std::collections::HashMap;

use plasma_primitives::{exit_id::ExitId, output_id::OutputId};
use tracing::debug;

use crate::errors::SpendTrackerError;

/// Records which outputs were finalized, and by which exit.
///
/// Entries are never removed: once an output has been paid out by some exit, no other exit can
/// claim it again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSpendTracker {
    finalized: HashMap<OutputId, ExitId>,
}

impl OutputSpendTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `output_id` was finalized by any exit.
    pub fn is_finalized(&self, output_id: &OutputId) -> bool {
        self.finalized.contains_key(output_id)
    }

    /// Returns the exit that finalized `output_id`, if any.
    pub fn finalized_by(&self, output_id: &OutputId) -> Option<ExitId> {
        self.finalized.get(output_id).copied()
    }

    /// Whether `output_id` was finalized by an exit other than `exit_id`.
    pub fn is_finalized_by_other(&self, output_id: &OutputId, exit_id: &ExitId) -> bool {
        self.finalized_by(output_id)
            .is_some_and(|finalized_by| finalized_by != *exit_id)
    }

    /// Flags `output_id` as finalized by `exit_id`.
    ///
    /// Flagging an output again on behalf of the same exit is a no-op.
    pub fn flag(&mut self, output_id: OutputId, exit_id: ExitId) -> Result<(), SpendTrackerError> {
        if let Some(finalized_by) = self.finalized_by(&output_id) {
            if finalized_by == exit_id {
                return Ok(());
            }
            return Err(SpendTrackerError::AlreadyFinalized {
                output_id,
                finalized_by,
            });
        }

        debug!(%output_id, %exit_id, "flagging output as finalized");
        self.finalized.insert(output_id, exit_id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flagging() {
        let mut tracker = OutputSpendTracker::new();
        let output_id = OutputId::compute(b"tx", 0);
        let exit_id = ExitId::standard(&output_id);
        let other_exit = ExitId::in_flight(b"other");

        assert!(!tracker.is_finalized(&output_id));
        tracker.flag(output_id, exit_id).unwrap();

        assert!(tracker.is_finalized(&output_id));
        assert!(!tracker.is_finalized_by_other(&output_id, &exit_id));
        assert!(tracker.is_finalized_by_other(&output_id, &other_exit));
        assert_eq!(tracker.flag(output_id, exit_id), Ok(()));
        assert_eq!(
            tracker.flag(output_id, other_exit),
            Err(SpendTrackerError::AlreadyFinalized {
                output_id,
                finalized_by: exit_id
            })
        );
    }
}
