//! Shale - metadata layer for a bucketed table storage engine
//!
//! Shale manages named, durable references ("tags") to immutable table
//! snapshots and aggregates per-commit file deltas into structured
//! statistics.
//!
//! # Quick Start
//!
//! ```ignore
//! use shale::{LocalFileIo, Snapshot, TagManager};
//!
//! let manager = TagManager::new(LocalFileIo::new(), "/data/warehouse/orders");
//!
//! // Pin the current snapshot under a durable name
//! manager.create_tag(&snapshot, "release-2024-08", Vec::new())?;
//!
//! // Later: delete it, reclaiming files nothing else references
//! manager.delete_tag("release-2024-08", &deletion, &snapshot_source)?;
//! ```
//!
//! # Architecture
//!
//! The tag lifecycle ([`TagManager`]) and commit statistics
//! ([`CommitStats`]) are independent; both sit on shared value types and
//! the [`FileIo`] filesystem abstraction. The live snapshot chain and the
//! physical file-deletion engine are external collaborators behind the
//! [`SnapshotSource`] and [`TagDeletion`] traits.

pub use shale_core::{
    CommitKind, DataFileMeta, Error, FileIo, FileKind, FileStatus, LocalFileIo, ManifestEntry,
    Partition, Result, Snapshot,
};
pub use shale_stats::{
    changed_part_buckets, changed_partitions, num_changed_buckets, num_changed_partitions,
    BucketCounters, CommitStats, PartitionBuckets,
};
pub use shale_tag::{
    find_overlapped_snapshots, find_previous_tag, notify_and_close, retention_skip_set,
    ManifestEntryFilter, SnapshotSource, TagCallback, TagDeletion, TagManager, TagStore,
    TAG_PREFIX,
};
