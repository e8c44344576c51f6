//! Per-commit statistics
//!
//! `CommitStats` is built once from the commit's four manifest-entry
//! lists plus duration/attempt/snapshot counters, and is immutable after
//! construction. The reporting pipeline only reads it.

use crate::bucket::{
    changed_part_buckets, group_by_bucket, num_changed_buckets, num_changed_partitions,
    BucketCounters, PartitionBuckets,
};
use shale_core::{DataFileMeta, FileKind, ManifestEntry, Partition};
use std::time::Duration;
use tracing::debug;

/// Statistics for a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitStats {
    duration: Duration,
    attempts: u64,
    table_files_added: u64,
    table_files_deleted: u64,
    changelog_files_commit_appended: u64,
    changelog_files_compacted: u64,
    generated_snapshots: u64,
    num_partitions_written: u64,
    num_buckets_written: u64,
    buckets_written: PartitionBuckets,
    bucketed_table_files_added: BucketCounters,
    bucketed_table_files_deleted: BucketCounters,
    bucketed_table_files_appended: BucketCounters,
    bucketed_table_files_compacted: BucketCounters,
    bucketed_changelog_files_appended: BucketCounters,
    bucketed_changelog_files_compacted: BucketCounters,
    bucketed_delta_records_appended: BucketCounters,
    bucketed_delta_records_compacted: BucketCounters,
    bucketed_changelog_records_appended: BucketCounters,
    bucketed_changelog_records_compacted: BucketCounters,
}

fn file_count(files: &[&DataFileMeta]) -> u64 {
    files.len() as u64
}

fn row_count(files: &[&DataFileMeta]) -> u64 {
    files.iter().map(|file| file.row_count()).sum()
}

impl CommitStats {
    /// Derive the statistics of one commit.
    ///
    /// `append_*` lists come from the commit's delta; `compact_*` lists
    /// from its compaction changes. Added table files are the appended
    /// files plus compaction ADDs; deleted table files are compaction
    /// DELETEs. Deleted files contribute no row-count metric.
    pub fn new(
        append_table_files: &[ManifestEntry],
        append_changelog_files: &[ManifestEntry],
        compact_table_files: &[ManifestEntry],
        compact_changelog_files: &[ManifestEntry],
        commit_duration: Duration,
        generated_snapshots: u64,
        attempts: u64,
    ) -> Self {
        let added_table_files: Vec<&ManifestEntry> = append_table_files
            .iter()
            .chain(
                compact_table_files
                    .iter()
                    .filter(|f| f.kind() == FileKind::Add),
            )
            .collect();
        let deleted_table_files: Vec<&ManifestEntry> = compact_table_files
            .iter()
            .filter(|f| f.kind() == FileKind::Delete)
            .collect();

        let grouped_added = group_by_bucket(added_table_files.iter().copied());
        let grouped_deleted = group_by_bucket(deleted_table_files.iter().copied());
        let grouped_appended = group_by_bucket(append_table_files.iter());
        let grouped_compacted = group_by_bucket(compact_table_files.iter());
        let grouped_changelog_appended = group_by_bucket(append_changelog_files.iter());
        let grouped_changelog_compacted = group_by_bucket(compact_changelog_files.iter());

        let written = changed_part_buckets(&[append_table_files, compact_table_files]);

        debug!(
            files_added = added_table_files.len(),
            files_deleted = deleted_table_files.len(),
            partitions = written.num_partitions(),
            "derived commit statistics"
        );

        Self {
            duration: commit_duration,
            attempts,
            table_files_added: added_table_files.len() as u64,
            table_files_deleted: deleted_table_files.len() as u64,
            changelog_files_commit_appended: append_changelog_files.len() as u64,
            changelog_files_compacted: compact_changelog_files.len() as u64,
            generated_snapshots,
            num_partitions_written: num_changed_partitions(&[
                append_table_files,
                compact_table_files,
            ]),
            num_buckets_written: num_changed_buckets(&[append_table_files, compact_table_files]),
            buckets_written: written,
            bucketed_table_files_added: BucketCounters::derive(&grouped_added, file_count),
            bucketed_table_files_deleted: BucketCounters::derive(&grouped_deleted, file_count),
            bucketed_table_files_appended: BucketCounters::derive(&grouped_appended, file_count),
            bucketed_table_files_compacted: BucketCounters::derive(&grouped_compacted, file_count),
            bucketed_changelog_files_appended: BucketCounters::derive(
                &grouped_changelog_appended,
                file_count,
            ),
            bucketed_changelog_files_compacted: BucketCounters::derive(
                &grouped_changelog_compacted,
                file_count,
            ),
            bucketed_delta_records_appended: BucketCounters::derive(&grouped_appended, row_count),
            bucketed_delta_records_compacted: BucketCounters::derive(&grouped_compacted, row_count),
            bucketed_changelog_records_appended: BucketCounters::derive(
                &grouped_changelog_appended,
                row_count,
            ),
            bucketed_changelog_records_compacted: BucketCounters::derive(
                &grouped_changelog_compacted,
                row_count,
            ),
        }
    }

    /// Wall-clock duration of the commit
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// How many attempts the commit took
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Table files entering the file set (appends plus compaction ADDs)
    pub fn table_files_added(&self) -> u64 {
        self.table_files_added
    }

    /// Table files leaving the file set (compaction DELETEs)
    pub fn table_files_deleted(&self) -> u64 {
        self.table_files_deleted
    }

    /// Changelog files appended by the commit itself
    pub fn changelog_files_commit_appended(&self) -> u64 {
        self.changelog_files_commit_appended
    }

    /// Changelog files produced by compaction
    pub fn changelog_files_compacted(&self) -> u64 {
        self.changelog_files_compacted
    }

    /// Snapshots the commit generated
    pub fn generated_snapshots(&self) -> u64 {
        self.generated_snapshots
    }

    /// Distinct partitions touched by table-file changes
    pub fn num_partitions_written(&self) -> u64 {
        self.num_partitions_written
    }

    /// (partition, bucket) pairs touched by table-file changes, summed
    /// across partitions
    pub fn num_buckets_written(&self) -> u64 {
        self.num_buckets_written
    }

    /// Which buckets each partition had written
    pub fn part_buckets_written(&self) -> &PartitionBuckets {
        &self.buckets_written
    }

    /// Table files added in `(partition, bucket)`
    pub fn bucketed_table_files_added(&self, partition: &Partition, bucket: u32) -> u64 {
        self.bucketed_table_files_added.get(partition, bucket)
    }

    /// Table files deleted in `(partition, bucket)`
    pub fn bucketed_table_files_deleted(&self, partition: &Partition, bucket: u32) -> u64 {
        self.bucketed_table_files_deleted.get(partition, bucket)
    }

    /// Table files appended in `(partition, bucket)`
    pub fn bucketed_table_files_appended(&self, partition: &Partition, bucket: u32) -> u64 {
        self.bucketed_table_files_appended.get(partition, bucket)
    }

    /// Table files compacted in `(partition, bucket)`
    pub fn bucketed_table_files_compacted(&self, partition: &Partition, bucket: u32) -> u64 {
        self.bucketed_table_files_compacted.get(partition, bucket)
    }

    /// Changelog files appended in `(partition, bucket)`
    pub fn bucketed_changelog_files_appended(&self, partition: &Partition, bucket: u32) -> u64 {
        self.bucketed_changelog_files_appended.get(partition, bucket)
    }

    /// Changelog files compacted in `(partition, bucket)`
    pub fn bucketed_changelog_files_compacted(&self, partition: &Partition, bucket: u32) -> u64 {
        self.bucketed_changelog_files_compacted.get(partition, bucket)
    }

    /// Rows appended to `(partition, bucket)` by the commit delta
    pub fn bucketed_delta_records_appended(&self, partition: &Partition, bucket: u32) -> u64 {
        self.bucketed_delta_records_appended.get(partition, bucket)
    }

    /// Rows in `(partition, bucket)` touched by compaction
    pub fn bucketed_delta_records_compacted(&self, partition: &Partition, bucket: u32) -> u64 {
        self.bucketed_delta_records_compacted.get(partition, bucket)
    }

    /// Changelog rows appended to `(partition, bucket)`
    pub fn bucketed_changelog_records_appended(&self, partition: &Partition, bucket: u32) -> u64 {
        self.bucketed_changelog_records_appended.get(partition, bucket)
    }

    /// Changelog rows in `(partition, bucket)` produced by compaction
    pub fn bucketed_changelog_records_compacted(&self, partition: &Partition, bucket: u32) -> u64 {
        self.bucketed_changelog_records_compacted
            .get(partition, bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shale_core::DataFileMeta;

    fn partition(name: &str) -> Partition {
        Partition::new(vec![name.to_string()])
    }

    fn entry(kind: FileKind, part: &str, bucket: u32, rows: u64) -> ManifestEntry {
        ManifestEntry::new(
            kind,
            partition(part),
            bucket,
            DataFileMeta::new(format!("f-{part}-{bucket}-{rows}"), rows, rows * 10),
        )
    }

    #[test]
    fn test_append_and_compact_scenario() {
        // append-table adds 2 files (rows 10, 20) to P bucket 0;
        // compact-table adds 1 file (rows 5) to the same bucket and
        // deletes 1 file from bucket 1
        let append = vec![
            entry(FileKind::Add, "P", 0, 10),
            entry(FileKind::Add, "P", 0, 20),
        ];
        let compact = vec![
            entry(FileKind::Add, "P", 0, 5),
            entry(FileKind::Delete, "P", 1, 99),
        ];

        let stats = CommitStats::new(&append, &[], &compact, &[], Duration::from_millis(250), 1, 1);

        assert_eq!(stats.table_files_added(), 3);
        assert_eq!(stats.table_files_deleted(), 1);
        assert_eq!(stats.num_partitions_written(), 1);
        assert_eq!(stats.num_buckets_written(), 2);

        let p = partition("P");
        assert_eq!(stats.bucketed_delta_records_appended(&p, 0), 30);
        assert_eq!(stats.bucketed_delta_records_compacted(&p, 0), 5);
        assert_eq!(stats.bucketed_table_files_added(&p, 0), 3);
        assert_eq!(stats.bucketed_table_files_deleted(&p, 1), 1);
        assert_eq!(stats.bucketed_table_files_appended(&p, 0), 2);
        // compaction grouping includes both kinds
        assert_eq!(stats.bucketed_table_files_compacted(&p, 0), 1);
        assert_eq!(stats.bucketed_table_files_compacted(&p, 1), 1);
    }

    #[test]
    fn test_changelog_counts() {
        let append_changelog = vec![
            entry(FileKind::Add, "P", 0, 7),
            entry(FileKind::Add, "P", 2, 3),
        ];
        let compact_changelog = vec![entry(FileKind::Add, "P", 0, 11)];

        let stats = CommitStats::new(
            &[],
            &append_changelog,
            &[],
            &compact_changelog,
            Duration::from_millis(10),
            1,
            1,
        );

        assert_eq!(stats.changelog_files_commit_appended(), 2);
        assert_eq!(stats.changelog_files_compacted(), 1);

        let p = partition("P");
        assert_eq!(stats.bucketed_changelog_files_appended(&p, 0), 1);
        assert_eq!(stats.bucketed_changelog_records_appended(&p, 0), 7);
        assert_eq!(stats.bucketed_changelog_records_appended(&p, 2), 3);
        assert_eq!(stats.bucketed_changelog_records_compacted(&p, 0), 11);

        // changelog does not expand the written partition set
        assert_eq!(stats.num_partitions_written(), 0);
        assert_eq!(stats.num_buckets_written(), 0);
    }

    #[test]
    fn test_empty_inputs_are_all_zero() {
        let stats = CommitStats::new(&[], &[], &[], &[], Duration::ZERO, 0, 1);

        assert_eq!(stats.table_files_added(), 0);
        assert_eq!(stats.table_files_deleted(), 0);
        assert_eq!(stats.changelog_files_commit_appended(), 0);
        assert_eq!(stats.changelog_files_compacted(), 0);
        assert_eq!(stats.num_partitions_written(), 0);
        assert_eq!(stats.num_buckets_written(), 0);
        assert_eq!(stats.generated_snapshots(), 0);
        assert_eq!(
            stats.bucketed_table_files_added(&partition("P"), 0),
            0
        );
    }

    #[test]
    fn test_two_partitions_same_bucket_count_twice() {
        let append = vec![
            entry(FileKind::Add, "A", 0, 1),
            entry(FileKind::Add, "B", 0, 1),
        ];
        let stats = CommitStats::new(&append, &[], &[], &[], Duration::ZERO, 1, 1);

        assert_eq!(stats.num_partitions_written(), 2);
        assert_eq!(stats.num_buckets_written(), 2);
        assert_eq!(stats.part_buckets_written().buckets(&partition("A")), [0]);
        assert_eq!(stats.part_buckets_written().buckets(&partition("B")), [0]);
    }

    #[test]
    fn test_construction_is_deterministic() {
        let append = vec![
            entry(FileKind::Add, "P", 1, 10),
            entry(FileKind::Add, "Q", 0, 20),
        ];
        let compact = vec![entry(FileKind::Delete, "P", 1, 3)];

        let a = CommitStats::new(&append, &[], &compact, &[], Duration::from_secs(1), 2, 3);
        let b = CommitStats::new(&append, &[], &compact, &[], Duration::from_secs(1), 2, 3);

        assert_eq!(a, b);
    }

    #[test]
    fn test_scalar_counters_pass_through() {
        let stats = CommitStats::new(&[], &[], &[], &[], Duration::from_millis(321), 2, 5);
        assert_eq!(stats.duration(), Duration::from_millis(321));
        assert_eq!(stats.generated_snapshots(), 2);
        assert_eq!(stats.attempts(), 5);
    }
}
