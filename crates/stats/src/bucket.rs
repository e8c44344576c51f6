//! Insertion-ordered grouping of manifest entries
//!
//! Consumers iterate grouped statistics in first-seen partition and
//! bucket order. The order carries no semantic weight beyond determinism
//! within a process run, so the structures here are plain vectors of
//! pairs rather than hashed containers with incidental iteration order.

use shale_core::{DataFileMeta, ManifestEntry, Partition};

/// Files grouped by partition, then bucket, in first-seen order
pub(crate) type Grouped<'a> = Vec<(Partition, Vec<(u32, Vec<&'a DataFileMeta>)>)>;

/// Group `files` by (partition, bucket), preserving first-seen ordering
/// of both partitions and buckets.
pub(crate) fn group_by_bucket<'a>(
    files: impl IntoIterator<Item = &'a ManifestEntry>,
) -> Grouped<'a> {
    files.into_iter().fold(Vec::new(), |mut groups, entry| {
        let partition_idx = match groups.iter().position(|(p, _)| p == entry.partition()) {
            Some(i) => i,
            None => {
                groups.push((entry.partition().clone(), Vec::new()));
                groups.len() - 1
            }
        };
        let buckets = &mut groups[partition_idx].1;
        let bucket_idx = match buckets.iter().position(|(b, _)| *b == entry.bucket()) {
            Some(i) => i,
            None => {
                buckets.push((entry.bucket(), Vec::new()));
                buckets.len() - 1
            }
        };
        buckets[bucket_idx].1.push(entry.file());
        groups
    })
}

/// Per-(partition, bucket) counter values in first-seen order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BucketCounters {
    counters: Vec<(Partition, Vec<(u32, u64)>)>,
}

impl BucketCounters {
    /// Derive one counter per bucket from a grouping
    pub(crate) fn derive(grouped: &Grouped<'_>, counter: impl Fn(&[&DataFileMeta]) -> u64) -> Self {
        let counters = grouped
            .iter()
            .map(|(partition, buckets)| {
                let bucket_counters = buckets
                    .iter()
                    .map(|(bucket, files)| (*bucket, counter(files)))
                    .collect();
                (partition.clone(), bucket_counters)
            })
            .collect();
        Self { counters }
    }

    /// The counter for `(partition, bucket)`, zero if untouched
    pub fn get(&self, partition: &Partition, bucket: u32) -> u64 {
        self.counters
            .iter()
            .find(|(p, _)| p == partition)
            .and_then(|(_, buckets)| buckets.iter().find(|(b, _)| *b == bucket))
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Iterate partitions and their per-bucket counters in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&Partition, &[(u32, u64)])> {
        self.counters.iter().map(|(p, b)| (p, b.as_slice()))
    }

    /// Whether no bucket was touched
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

/// The set of buckets touched per partition, in first-seen order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartitionBuckets {
    buckets: Vec<(Partition, Vec<u32>)>,
}

impl PartitionBuckets {
    /// Number of distinct partitions touched
    pub fn num_partitions(&self) -> u64 {
        self.buckets.len() as u64
    }

    /// Total (partition, bucket) pairs touched, summed across partitions.
    /// Two partitions both touching bucket 0 count as 2.
    pub fn num_buckets(&self) -> u64 {
        self.buckets.iter().map(|(_, b)| b.len() as u64).sum()
    }

    /// The buckets touched in `partition`, first-seen order
    pub fn buckets(&self, partition: &Partition) -> &[u32] {
        self.buckets
            .iter()
            .find(|(p, _)| p == partition)
            .map(|(_, b)| b.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate partitions and their touched buckets in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&Partition, &[u32])> {
        self.buckets.iter().map(|(p, b)| (p, b.as_slice()))
    }
}

/// Distinct (partition, bucket) pairs touched across `changes`, in
/// first-seen order
pub fn changed_part_buckets(changes: &[&[ManifestEntry]]) -> PartitionBuckets {
    let buckets = changes
        .iter()
        .flat_map(|list| list.iter())
        .fold(Vec::<(Partition, Vec<u32>)>::new(), |mut acc, entry| {
            let idx = match acc.iter().position(|(p, _)| p == entry.partition()) {
                Some(i) => i,
                None => {
                    acc.push((entry.partition().clone(), Vec::new()));
                    acc.len() - 1
                }
            };
            if !acc[idx].1.contains(&entry.bucket()) {
                acc[idx].1.push(entry.bucket());
            }
            acc
        });
    PartitionBuckets { buckets }
}

/// Distinct partitions touched across `changes`, in first-seen order
pub fn changed_partitions(changes: &[&[ManifestEntry]]) -> Vec<Partition> {
    changes
        .iter()
        .flat_map(|list| list.iter())
        .fold(Vec::new(), |mut acc, entry| {
            if !acc.contains(entry.partition()) {
                acc.push(entry.partition().clone());
            }
            acc
        })
}

/// Count of distinct partitions touched across `changes`
pub fn num_changed_partitions(changes: &[&[ManifestEntry]]) -> u64 {
    changed_partitions(changes).len() as u64
}

/// Count of (partition, bucket) pairs touched across `changes`
pub fn num_changed_buckets(changes: &[&[ManifestEntry]]) -> u64 {
    changed_part_buckets(changes).num_buckets()
}
