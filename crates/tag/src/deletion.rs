//! External collaborators of tag deletion
//!
//! Tag deletion consults the live snapshot chain and delegates physical
//! file removal. Both sides are behind narrow traits: the snapshot
//! manager and the file-deletion engine live outside this crate.

use shale_core::{ManifestEntry, Result, Snapshot};
use std::collections::HashSet;

/// Predicate over manifest entries: `true` means the entry's file must be
/// skipped (preserved) during cleanup.
pub type ManifestEntryFilter = Box<dyn Fn(&ManifestEntry) -> bool>;

/// Read access to the live snapshot chain
pub trait SnapshotSource {
    /// Whether the snapshot with `snapshot_id` is still in the live chain
    fn snapshot_exists(&self, snapshot_id: u64) -> Result<bool>;

    /// The earliest snapshot still in the live chain
    fn earliest_snapshot(&self) -> Result<Snapshot>;
}

/// Physical cleanup engine invoked when a tag's files become unreachable
pub trait TagDeletion {
    /// Build a predicate marking data files that are still referenced by
    /// any of `skip_snapshots` and must survive cleanup.
    ///
    /// May fail (e.g. a manifest read error); the caller must then skip
    /// cleanup rather than proceed with a partial skipping set.
    fn data_file_skipper(&self, skip_snapshots: &[Snapshot]) -> Result<ManifestEntryFilter>;

    /// Delete the data files of `tagged_snapshot` not matched by `skipper`
    fn clean_unused_data_files(
        &self,
        tagged_snapshot: &Snapshot,
        skipper: ManifestEntryFilter,
    ) -> Result<()>;

    /// Prune partition/bucket directories left empty by file deletion
    fn clean_data_directories(&self) -> Result<()>;

    /// Identifiers of manifests still referenced by any of
    /// `skip_snapshots`. Same failure contract as [`Self::data_file_skipper`].
    fn manifest_skipping_set(&self, skip_snapshots: &[Snapshot]) -> Result<HashSet<String>>;

    /// Delete the manifests of `tagged_snapshot` not named in `skipping_set`
    fn clean_unused_manifests(
        &self,
        tagged_snapshot: &Snapshot,
        skipping_set: HashSet<String>,
    ) -> Result<()>;
}
