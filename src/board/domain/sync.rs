//! Idempotent merge of tracker candidates into the board.

use super::{Board, Task, TrackerCandidate};
use mockable::Clock;
use serde::Serialize;

/// Counts describing what a sync pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    /// New tasks created in the inbox column.
    pub created: usize,
    /// Active tasks whose tracker-owned fields changed.
    pub updated: usize,
    /// Active tasks that already matched their candidate.
    pub unchanged: usize,
    /// Candidates whose task is archived and was left alone.
    pub skipped_archived: usize,
    /// Malformed candidates, or candidates that had no column to land in.
    pub skipped_invalid: usize,
}

impl SyncSummary {
    /// Returns `true` when the pass changed nothing on the board.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.created == 0 && self.updated == 0
    }
}

impl Board {
    /// Merges a batch of tracker candidates.
    ///
    /// Unknown items are created at the end of the inbox column; active items
    /// only have their title, labels and URL refreshed; archived items are
    /// never resurrected. Malformed candidates are skipped, never raised, so
    /// one bad item cannot abort the batch.
    pub fn apply_sync(&mut self, candidates: &[TrackerCandidate], clock: &impl Clock) -> SyncSummary {
        let mut summary = SyncSummary::default();
        for candidate in candidates {
            let valid = match candidate.validate() {
                Ok(valid) => valid,
                Err(err) => {
                    tracing::warn!(
                        external_ref = candidate.external_ref.as_str(),
                        error = %err,
                        "skipping malformed sync candidate"
                    );
                    summary.skipped_invalid += 1;
                    continue;
                }
            };

            let key = valid.external_ref().key();
            match self.find_id_by_external_ref(key) {
                Some(id) if self.archived_tasks.contains_key(&id) => {
                    summary.skipped_archived += 1;
                }
                Some(id) => {
                    let changed = self
                        .tasks
                        .get_mut(&id)
                        .is_some_and(|task| task.refresh_from_tracker(&valid, clock));
                    if changed {
                        summary.updated += 1;
                    } else {
                        summary.unchanged += 1;
                    }
                }
                None => {
                    let Some(column_id) = self.inbox_column_id() else {
                        tracing::warn!(
                            external_ref = key.as_str(),
                            "no column to place synchronized task in"
                        );
                        summary.skipped_invalid += 1;
                        continue;
                    };
                    let task = Task::new_tracked(&valid, clock);
                    if let Some(column) = self.columns.get_mut(&column_id) {
                        column.push(task.id());
                        self.tasks.insert(task.id(), task);
                        summary.created += 1;
                    }
                }
            }
        }
        tracing::info!(
            created = summary.created,
            updated = summary.updated,
            unchanged = summary.unchanged,
            skipped_archived = summary.skipped_archived,
            skipped_invalid = summary.skipped_invalid,
            "sync batch applied"
        );
        summary
    }
}
