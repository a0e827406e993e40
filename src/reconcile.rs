//! Convergence of stored label state to the state the engine decided on.

use crate::snapshot::Snapshot;
use crate::types::{ItemId, LabelId};

/// One queued label rewrite: the task's full label array as it should be
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemUpdate {
    pub id: ItemId,
    pub labels: Vec<LabelId>,
}

/// Updates needed to bring the store in line with the snapshot.
///
/// Compares each item's current label set against the set it was fetched
/// with, so an add and a remove of the same label within one cycle cancel
/// out and produce no traffic. Returns updates sorted by item id; an empty
/// result means the cycle can skip its commit round-trip.
pub fn pending_updates(snapshot: &Snapshot) -> Vec<ItemUpdate> {
    let mut updates: Vec<ItemUpdate> = snapshot
        .items()
        .filter(|item| {
            snapshot
                .fetched_labels(item.id)
                .is_none_or(|fetched| !same_label_set(fetched, &item.labels))
        })
        .map(|item| ItemUpdate {
            id: item.id,
            labels: item.labels.clone(),
        })
        .collect();
    updates.sort_by_key(|update| update.id);
    updates
}

/// Array order is irrelevant: removing and re-adding a label moves it to the
/// end of the array without changing membership.
fn same_label_set(a: &[LabelId], b: &[LabelId]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}
