//! Change detection for the kitchen view.
//!
//! The kitchen sees a snapshot of pending orders, ticks some `filled` boxes,
//! and submits. Only rows whose flag actually moved are written back, keyed by
//! order id. Rows are compared by position: the edited copy must list the same
//! ids in the same order as the snapshot it was derived from.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{OrderId, PendingOrder};

/// The two row sets cannot be compared position by position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeDetectionError {
    #[error("snapshot has {original} rows but the edited copy has {edited}")]
    LengthMismatch { original: usize, edited: usize },

    #[error("row {position} is order {original} in the snapshot but order {edited} in the edited copy")]
    Misaligned {
        position: usize,
        original: OrderId,
        edited: OrderId,
    },
}

/// A single order whose `filled` flag should be updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentChange {
    pub id: OrderId,
    pub filled: bool,
}

/// The rows to write back, in snapshot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet(Vec<FulfillmentChange>);

impl ChangeSet {
    /// `true` when there is nothing to write.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FulfillmentChange> {
        self.0.iter()
    }

    /// Changed order ids, aligned with [`Self::filled_flags`].
    #[must_use]
    pub fn ids(&self) -> Vec<OrderId> {
        self.0.iter().map(|c| c.id).collect()
    }

    /// New flag values, aligned with [`Self::ids`].
    #[must_use]
    pub fn filled_flags(&self) -> Vec<bool> {
        self.0.iter().map(|c| c.filled).collect()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a FulfillmentChange;
    type IntoIter = std::slice::Iter<'a, FulfillmentChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Compare the original snapshot with its edited copy.
///
/// Only the `filled` flag is compared. Unchanged rows are left out, so an
/// empty result means nothing needs writing.
///
/// # Errors
///
/// Returns `ChangeDetectionError::LengthMismatch` if the slices differ in
/// length, or `ChangeDetectionError::Misaligned` at the first position whose
/// ids disagree. No partial result is returned in either case.
pub fn detect_changes(
    original: &[PendingOrder],
    edited: &[PendingOrder],
) -> Result<ChangeSet, ChangeDetectionError> {
    if original.len() != edited.len() {
        return Err(ChangeDetectionError::LengthMismatch {
            original: original.len(),
            edited: edited.len(),
        });
    }

    let mut changes = Vec::new();
    for (position, (before, after)) in original.iter().zip(edited).enumerate() {
        if before.id != after.id {
            return Err(ChangeDetectionError::Misaligned {
                position,
                original: before.id,
                edited: after.id,
            });
        }
        if before.filled != after.filled {
            changes.push(FulfillmentChange {
                id: after.id,
                filled: after.filled,
            });
        }
    }

    Ok(ChangeSet(changes))
}

/// Build the edited copy of a snapshot from the ids the kitchen ticked.
///
/// Every snapshot row keeps its position; its flag becomes `true` if the id
/// was ticked and `false` otherwise. Ticked ids that are not in the snapshot
/// are ignored.
#[must_use]
pub fn edited_from_checked(
    snapshot: &[PendingOrder],
    checked: &HashSet<OrderId>,
) -> Vec<PendingOrder> {
    snapshot
        .iter()
        .map(|row| PendingOrder::new(row.id, checked.contains(&row.id)))
        .collect()
}
