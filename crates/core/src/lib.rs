//! Core types for the Shale table metadata layer
//!
//! This crate defines the foundational values shared by the tag and
//! statistics crates:
//! - Snapshot: immutable, uniquely-numbered view of the table's file set
//! - Partition / ManifestEntry: per-commit file-change records
//! - Error taxonomy (validation, I/O, serialization, internal invariants)
//! - FileIo: the blocking filesystem abstraction the metadata layer runs on

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod fileio;
pub mod manifest;
pub mod snapshot;

pub use error::{Error, Result};
pub use fileio::{FileIo, FileStatus, LocalFileIo};
pub use manifest::{DataFileMeta, FileKind, ManifestEntry, Partition};
pub use snapshot::{CommitKind, Snapshot};
