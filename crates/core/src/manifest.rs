//! Per-commit file-change records
//!
//! A commit changes the table's file set; each change is described by a
//! `ManifestEntry`: a file being added or deleted, scoped to a partition
//! and a bucket within that partition. The statistics layer consumes these
//! records; the retention layer filters them when reclaiming files.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a manifest entry adds or deletes a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileKind {
    /// The file enters the table's file set
    Add,
    /// The file leaves the table's file set
    Delete,
}

/// Opaque composite partition key
///
/// An ordered list of partition field values. Comparable and hashable so
/// it can key grouped statistics and ordered maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Partition(Vec<String>);

impl Partition {
    /// Create a partition key from its field values
    pub fn new(fields: Vec<String>) -> Self {
        Self(fields)
    }

    /// The key for an unpartitioned table
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// The partition's field values, in schema order
    pub fn fields(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "<unpartitioned>")
        } else {
            write!(f, "{}", self.0.join("/"))
        }
    }
}

/// Metadata of a single data or changelog file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFileMeta {
    file_name: String,
    row_count: u64,
    file_size: u64,
}

impl DataFileMeta {
    /// Create file metadata
    pub fn new(file_name: String, row_count: u64, file_size: u64) -> Self {
        Self {
            file_name,
            row_count,
            file_size,
        }
    }

    /// The file's name, unique within its bucket directory
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Number of rows in the file
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Size of the file in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }
}

/// One file-change record in a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    kind: FileKind,
    partition: Partition,
    bucket: u32,
    file: DataFileMeta,
}

impl ManifestEntry {
    /// Create a manifest entry
    pub fn new(kind: FileKind, partition: Partition, bucket: u32, file: DataFileMeta) -> Self {
        Self {
            kind,
            partition,
            bucket,
            file,
        }
    }

    /// Whether the file is added or deleted
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// Partition the file belongs to
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Bucket within the partition
    pub fn bucket(&self) -> u32 {
        self.bucket
    }

    /// Metadata of the changed file
    pub fn file(&self) -> &DataFileMeta {
        &self.file
    }
}
