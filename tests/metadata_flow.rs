//! End-to-end flow through the public API: commit statistics for a
//! commit, tagging its snapshot, expiring the chain past it, then
//! deleting the tag.

use shale::{
    CommitKind, DataFileMeta, FileKind, LocalFileIo, ManifestEntry, ManifestEntryFilter,
    Partition, Result, Snapshot, SnapshotSource, TagDeletion, TagManager,
};
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

fn snapshot(id: u64) -> Snapshot {
    Snapshot::new(
        id,
        0,
        "commit-driver".to_string(),
        id,
        CommitKind::Append,
        1_700_000_000_000 + id,
        Some(1000),
        Some(30),
    )
}

struct Chain {
    earliest: u64,
}

impl SnapshotSource for Chain {
    fn snapshot_exists(&self, snapshot_id: u64) -> Result<bool> {
        Ok(snapshot_id >= self.earliest)
    }

    fn earliest_snapshot(&self) -> Result<Snapshot> {
        Ok(snapshot(self.earliest))
    }
}

#[derive(Default)]
struct CountingDeletion {
    data_cleanups: Mutex<u32>,
    manifest_cleanups: Mutex<u32>,
}

impl TagDeletion for CountingDeletion {
    fn data_file_skipper(&self, _skip: &[Snapshot]) -> Result<ManifestEntryFilter> {
        Ok(Box::new(|_| false))
    }

    fn clean_unused_data_files(
        &self,
        _tagged: &Snapshot,
        _skipper: ManifestEntryFilter,
    ) -> Result<()> {
        *self.data_cleanups.lock().unwrap() += 1;
        Ok(())
    }

    fn clean_data_directories(&self) -> Result<()> {
        Ok(())
    }

    fn manifest_skipping_set(&self, _skip: &[Snapshot]) -> Result<HashSet<String>> {
        Ok(HashSet::new())
    }

    fn clean_unused_manifests(&self, _tagged: &Snapshot, _set: HashSet<String>) -> Result<()> {
        *self.manifest_cleanups.lock().unwrap() += 1;
        Ok(())
    }
}

#[test]
fn commit_tag_expire_delete() {
    let dir = TempDir::new().unwrap();
    let manager = TagManager::new(LocalFileIo::new(), dir.path());

    // Commit: two appended files in one bucket
    let partition = Partition::new(vec!["2024-08-29".to_string()]);
    let append = vec![
        ManifestEntry::new(
            FileKind::Add,
            partition.clone(),
            0,
            DataFileMeta::new("data-0.orc".to_string(), 10, 1024),
        ),
        ManifestEntry::new(
            FileKind::Add,
            partition.clone(),
            0,
            DataFileMeta::new("data-1.orc".to_string(), 20, 2048),
        ),
    ];
    let stats = shale::CommitStats::new(&append, &[], &[], &[], Duration::from_millis(42), 1, 1);
    assert_eq!(stats.table_files_added(), 2);
    assert_eq!(stats.bucketed_delta_records_appended(&partition, 0), 30);

    // Tag the generated snapshot
    let tagged = snapshot(4);
    manager.create_tag(&tagged, "release-1", Vec::new()).unwrap();
    assert_eq!(manager.tag_count().unwrap(), 1);
    assert_eq!(manager.tagged_snapshot("release-1").unwrap(), tagged);

    // While snapshot 4 is still live, deletion touches no files
    let deletion = CountingDeletion::default();
    manager.create_tag(&snapshot(2), "older", Vec::new()).unwrap();
    manager
        .delete_tag("release-1", &deletion, &Chain { earliest: 3 })
        .unwrap();
    assert_eq!(*deletion.data_cleanups.lock().unwrap(), 0);

    // Re-tag, then expire the chain past the snapshot; deletion now
    // reclaims files
    manager.create_tag(&tagged, "release-1", Vec::new()).unwrap();
    manager
        .delete_tag("release-1", &deletion, &Chain { earliest: 10 })
        .unwrap();
    assert!(!manager.tag_exists("release-1").unwrap());
    assert_eq!(*deletion.data_cleanups.lock().unwrap(), 1);
    assert_eq!(*deletion.manifest_cleanups.lock().unwrap(), 1);

    // The unrelated tag is untouched
    assert!(manager.tag_exists("older").unwrap());
}
