//! Retention resolution for deleted tags
//!
//! When a tag whose snapshot has left the live chain is deleted, the files
//! that must survive are bounded by the tag's neighbors: the tagged
//! snapshot immediately to its left, and the nearest of (the next tagged
//! snapshot, the earliest live snapshot) to its right. Files referenced by
//! either neighbor may still be needed by snapshots between the deleted
//! tag and that neighbor.

use crate::deletion::SnapshotSource;
use shale_core::{Error, Result, Snapshot};

/// Compute the skip-set for deleting the tag at `tagged_snapshot`.
///
/// `tagged_snapshots` is the full list of tagged snapshots sorted
/// ascending by id, captured before the tag file was removed. The deleted
/// tag must appear in it; a miss is an internal invariant violation.
///
/// Any failure here aborts the whole computation: a partial skip-set must
/// never reach the deletion delegate.
pub fn retention_skip_set(
    tagged_snapshot: &Snapshot,
    tagged_snapshots: &[Snapshot],
    snapshots: &dyn SnapshotSource,
) -> Result<Vec<Snapshot>> {
    let index = find_index(tagged_snapshot, tagged_snapshots)?;

    let mut skipped = Vec::with_capacity(2);

    // the left neighbor tag
    if index > 0 {
        skipped.push(tagged_snapshots[index - 1].clone());
    }

    // the nearest right neighbor: either the earliest live snapshot or the
    // right neighbor tag
    let mut right = snapshots.earliest_snapshot()?;
    if index + 1 < tagged_snapshots.len() {
        let right_tag = &tagged_snapshots[index + 1];
        if right_tag.id() < right.id() {
            right = right_tag.clone();
        }
    }
    skipped.push(right);

    Ok(skipped)
}

fn find_index(tagged_snapshot: &Snapshot, tagged_snapshots: &[Snapshot]) -> Result<usize> {
    tagged_snapshots
        .iter()
        .position(|s| s.id() == tagged_snapshot.id())
        .ok_or_else(|| {
            Error::InvariantViolation(format!(
                "didn't find tag with snapshot id '{}'",
                tagged_snapshot.id()
            ))
        })
}

/// The contiguous run of tagged snapshots overlapping the id window
/// `[begin_inclusive, end_exclusive)`.
///
/// The right bound is the last tag with id strictly below `end_exclusive`;
/// the left bound is the last tag with id at most `begin_inclusive`
/// (clamped to the start of the list). Empty when every tag's id is at or
/// past `end_exclusive`.
pub fn find_overlapped_snapshots(
    tagged_snapshots: &[Snapshot],
    begin_inclusive: u64,
    end_exclusive: u64,
) -> Vec<Snapshot> {
    let mut overlapped = Vec::new();
    if let Some(right) = find_previous_tag(tagged_snapshots, end_exclusive) {
        let left = find_previous_or_equal_tag(tagged_snapshots, begin_inclusive).unwrap_or(0);
        overlapped.extend_from_slice(&tagged_snapshots[left..=right]);
    }
    overlapped
}

/// Index of the last tagged snapshot with id strictly below
/// `target_snapshot_id`, if any
pub fn find_previous_tag(tagged_snapshots: &[Snapshot], target_snapshot_id: u64) -> Option<usize> {
    tagged_snapshots
        .iter()
        .rposition(|s| s.id() < target_snapshot_id)
}

fn find_previous_or_equal_tag(
    tagged_snapshots: &[Snapshot],
    target_snapshot_id: u64,
) -> Option<usize> {
    tagged_snapshots
        .iter()
        .rposition(|s| s.id() <= target_snapshot_id)
}
