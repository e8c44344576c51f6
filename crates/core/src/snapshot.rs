//! Snapshot value type
//!
//! A snapshot is an immutable, uniquely-numbered view of the table's full
//! file set at a point in time. Snapshots are produced by the commit
//! pipeline; this layer only reads them and persists copies inside tag
//! files.
//!
//! Identity, ordering and hashing are all by snapshot id: ids increase
//! monotonically and are unique within a table, so two snapshots with the
//! same id are the same snapshot.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// What kind of commit produced a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommitKind {
    /// Changes flushed from writers
    Append,
    /// Changes produced by compacting existing files
    Compact,
    /// Changes that overwrite partitions
    Overwrite,
}

impl fmt::Display for CommitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitKind::Append => write!(f, "APPEND"),
            CommitKind::Compact => write!(f, "COMPACT"),
            CommitKind::Overwrite => write!(f, "OVERWRITE"),
        }
    }
}

/// Immutable snapshot of the table at a point in time
///
/// The persisted form (JSON) is what tag files hold: tags capture the
/// whole snapshot, not just its id, so the snapshot can be recovered even
/// after the live chain advances past it and prunes the original record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    id: u64,
    schema_id: u64,
    commit_user: String,
    commit_identifier: u64,
    commit_kind: CommitKind,
    time_millis: u64,
    total_record_count: Option<u64>,
    delta_record_count: Option<u64>,
}

impl Snapshot {
    /// Create a new snapshot record
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        schema_id: u64,
        commit_user: String,
        commit_identifier: u64,
        commit_kind: CommitKind,
        time_millis: u64,
        total_record_count: Option<u64>,
        delta_record_count: Option<u64>,
    ) -> Self {
        Self {
            id,
            schema_id,
            commit_user,
            commit_identifier,
            commit_kind,
            time_millis,
            total_record_count,
            delta_record_count,
        }
    }

    /// Snapshot id (monotonically increasing, unique within a table)
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Schema the snapshot was written with
    pub fn schema_id(&self) -> u64 {
        self.schema_id
    }

    /// Identity of the committing writer
    pub fn commit_user(&self) -> &str {
        &self.commit_user
    }

    /// Writer-scoped commit sequence number
    pub fn commit_identifier(&self) -> u64 {
        self.commit_identifier
    }

    /// What kind of commit produced this snapshot
    pub fn commit_kind(&self) -> CommitKind {
        self.commit_kind
    }

    /// Commit wall-clock time in milliseconds since the epoch
    pub fn time_millis(&self) -> u64 {
        self.time_millis
    }

    /// Total records in the table as of this snapshot, if recorded
    pub fn total_record_count(&self) -> Option<u64> {
        self.total_record_count
    }

    /// Records changed by this commit, if recorded
    pub fn delta_record_count(&self) -> Option<u64> {
        self.delta_record_count
    }

    /// Serialize to the persisted JSON form
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from the persisted JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Snapshot {}

impl Hash for Snapshot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Snapshot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Snapshot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
