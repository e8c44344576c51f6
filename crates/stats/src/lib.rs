//! Commit statistics for the table metadata layer
//!
//! Turns the raw per-commit file-change lists into partition- and
//! bucket-keyed counts:
//! - `bucket`: insertion-ordered grouping of manifest entries by
//!   (partition, bucket) and the derived per-bucket counters
//! - `commit`: CommitStats, the immutable per-commit value consumed by
//!   the reporting pipeline

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bucket;
pub mod commit;

pub use bucket::{
    changed_part_buckets, changed_partitions, num_changed_buckets, num_changed_partitions,
    BucketCounters, PartitionBuckets,
};
pub use commit::CommitStats;
