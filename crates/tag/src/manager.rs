//! Tag lifecycle manager
//!
//! Creation, existence checks, listing/filtering and safe deletion of
//! tags. Per tag name the externally observable state machine is
//! `absent -> present -> absent`; creation and deletion each look like a
//! single file write/delete to callers.
//!
//! # Concurrency
//!
//! Multiple writer processes may share the tag directory. Creation is
//! check-then-write and therefore racy without create-if-absent semantics
//! in the storage layer; this is a best-effort contract, not mutual
//! exclusion. Listing tolerates tags deleted concurrently by others.

use crate::callback::{notify_and_close, TagCallback};
use crate::deletion::{SnapshotSource, TagDeletion};
use crate::retention::retention_skip_set;
use crate::store::TagStore;
use shale_core::{Error, FileIo, Result, Snapshot};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Manager for durable snapshot tags
#[derive(Debug)]
pub struct TagManager<F: FileIo> {
    store: TagStore<F>,
}

impl<F: FileIo> TagManager<F> {
    /// Create a manager for the table rooted at `table_path`
    pub fn new(file_io: F, table_path: impl Into<PathBuf>) -> Self {
        Self {
            store: TagStore::new(file_io, table_path),
        }
    }

    /// Root directory of tag files
    pub fn tag_directory(&self) -> PathBuf {
        self.store.tag_directory()
    }

    /// Path of the tag file for `tag_name`
    pub fn tag_path(&self, tag_name: &str) -> PathBuf {
        self.store.tag_path(tag_name)
    }

    /// Create a tag pointing at `snapshot` and persist it.
    ///
    /// The name must be non-blank, not a pure numeric string (those would
    /// collide with snapshot-id-like identifiers) and not already taken.
    /// After a successful write every callback is notified in order and
    /// then closed exactly once, whether or not notification succeeded.
    pub fn create_tag(
        &self,
        snapshot: &Snapshot,
        tag_name: &str,
        callbacks: Vec<Box<dyn TagCallback>>,
    ) -> Result<()> {
        validate_tag_name(tag_name)?;
        if self.tag_exists(tag_name)? {
            return Err(Error::TagExists(tag_name.to_string()));
        }

        self.store.write(tag_name, snapshot)?;
        info!(tag = tag_name, snapshot = snapshot.id(), "created tag");

        notify_and_close(tag_name, callbacks)
    }

    /// Whether a tag with `tag_name` exists
    pub fn tag_exists(&self, tag_name: &str) -> Result<bool> {
        self.store.exists(tag_name)
    }

    /// The snapshot a tag points to. The tag must exist.
    pub fn tagged_snapshot(&self, tag_name: &str) -> Result<Snapshot> {
        if !self.tag_exists(tag_name)? {
            return Err(Error::TagNotFound(tag_name.to_string()));
        }
        self.store.read(tag_name)
    }

    /// Number of persisted tags
    pub fn tag_count(&self) -> Result<usize> {
        Ok(self.store.list_tag_names()?.len())
    }

    /// All tagged snapshots with their tag names, ordered by snapshot id
    /// ascending
    pub fn tags(&self) -> Result<BTreeMap<Snapshot, String>> {
        self.tags_filtered(|_| true)
    }

    /// Like [`Self::tags`], keeping only names accepted by `filter`.
    ///
    /// A tag file that disappears between listing and reading (deleted by
    /// another process) is silently skipped. When two tags reference the
    /// same snapshot id, the later-encountered name wins.
    pub fn tags_filtered(&self, filter: impl Fn(&str) -> bool) -> Result<BTreeMap<Snapshot, String>> {
        let mut tags = BTreeMap::new();
        for tag_name in self.store.list_tag_names()? {
            if !filter(&tag_name) {
                continue;
            }
            if let Some(snapshot) = self.store.try_read(&tag_name)? {
                tags.insert(snapshot, tag_name);
            }
        }
        Ok(tags)
    }

    /// All tagged snapshots sorted ascending by id
    pub fn tagged_snapshots(&self) -> Result<Vec<Snapshot>> {
        Ok(self.tags()?.into_keys().collect())
    }

    /// Delete the tag and reclaim files no longer reachable from any live
    /// snapshot or remaining tag.
    ///
    /// If the tagged snapshot is still in the live chain no file is
    /// uniquely owned by the tag, so only the tag file is removed. If
    /// cleanup cannot determine a safe skipping set it is skipped
    /// entirely: the tag pointer is still gone, the files wait for a
    /// later maintenance pass.
    pub fn delete_tag(
        &self,
        tag_name: &str,
        tag_deletion: &dyn TagDeletion,
        snapshots: &dyn SnapshotSource,
    ) -> Result<()> {
        if tag_name.trim().is_empty() {
            return Err(Error::InvalidTagName {
                name: tag_name.to_string(),
                reason: "blank".to_string(),
            });
        }
        if !self.tag_exists(tag_name)? {
            return Err(Error::TagNotFound(tag_name.to_string()));
        }

        let tagged_snapshot = self.store.read(tag_name)?;

        // Still in the live chain: the chain keeps its files alive
        if snapshots.snapshot_exists(tagged_snapshot.id())? {
            debug!(
                tag = tag_name,
                snapshot = tagged_snapshot.id(),
                "tagged snapshot still live, removing tag file only"
            );
            self.store.delete_quietly(tag_name);
            return Ok(());
        }

        // Tags are discovered through their files, so the full list must
        // be captured before this tag's file goes away
        let tagged_snapshots = self.tagged_snapshots()?;
        self.store.delete_quietly(tag_name);

        let skipped = retention_skip_set(&tagged_snapshot, &tagged_snapshots, snapshots)?;

        // delete data files and empty directories
        let skipper = match tag_deletion.data_file_skipper(&skipped) {
            Ok(skipper) => skipper,
            Err(e) => {
                warn!(
                    tag = tag_name,
                    error = %e,
                    "skip cleaning files of tag due to failed to build skipping set"
                );
                return Ok(());
            }
        };
        tag_deletion.clean_unused_data_files(&tagged_snapshot, skipper)?;
        tag_deletion.clean_data_directories()?;

        // delete manifests
        let manifest_skipping_set = match tag_deletion.manifest_skipping_set(&skipped) {
            Ok(set) => set,
            Err(e) => {
                warn!(
                    tag = tag_name,
                    error = %e,
                    "skip cleaning manifests of tag due to failed to build skipping set"
                );
                return Ok(());
            }
        };
        tag_deletion.clean_unused_manifests(&tagged_snapshot, manifest_skipping_set)?;

        info!(
            tag = tag_name,
            snapshot = tagged_snapshot.id(),
            "deleted tag and reclaimed unreachable files"
        );
        Ok(())
    }
}

fn validate_tag_name(tag_name: &str) -> Result<()> {
    if tag_name.trim().is_empty() {
        return Err(Error::InvalidTagName {
            name: tag_name.to_string(),
            reason: "blank".to_string(),
        });
    }
    if tag_name.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidTagName {
            name: tag_name.to_string(),
            reason: "a pure numeric string".to_string(),
        });
    }
    Ok(())
}
