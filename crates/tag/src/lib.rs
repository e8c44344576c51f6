//! Durable snapshot tags
//!
//! This crate implements named, durable references to immutable table
//! snapshots:
//! - TagStore: one file per tag under `<table>/tag/tag-<name>`
//! - TagManager: create / exist / list / delete lifecycle
//! - Retention resolver: skip-set computation bounding which files must
//!   survive when a tag is deleted
//! - Overlap queries over the tagged-snapshot list
//!
//! # Garbage-collection contract
//!
//! Deleting a tag must never remove a data or manifest file still
//! reachable from a live snapshot or another tag. The manager therefore
//! only hands files to the deletion delegate when the tagged snapshot has
//! already left the live chain, and bounds the deletion by the tag's
//! neighboring snapshots. When the neighbor set cannot be derived safely,
//! cleanup is skipped entirely: leaking a file is recoverable by a later
//! maintenance pass, deleting a live one is not.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod callback;
pub mod deletion;
pub mod manager;
pub mod retention;
pub mod store;

pub use callback::{notify_and_close, TagCallback};
pub use deletion::{ManifestEntryFilter, SnapshotSource, TagDeletion};
pub use manager::TagManager;
pub use retention::{find_overlapped_snapshots, find_previous_tag, retention_skip_set};
pub use store::{TagStore, TAG_PREFIX};
