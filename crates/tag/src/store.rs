//! Tag file storage
//!
//! A tag is persisted as a single file holding the JSON-serialized
//! snapshot it points to, under a path derived from the tag name:
//! `<table>/tag/tag-<name>`.

use shale_core::fileio::list_prefixed_files;
use shale_core::{Error, FileIo, Result, Snapshot};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filename prefix of every tag file
pub const TAG_PREFIX: &str = "tag-";

/// Reads and writes tag files under a table root
#[derive(Debug)]
pub struct TagStore<F: FileIo> {
    file_io: F,
    table_path: PathBuf,
}

impl<F: FileIo> TagStore<F> {
    /// Create a store for the table rooted at `table_path`
    pub fn new(file_io: F, table_path: impl Into<PathBuf>) -> Self {
        Self {
            file_io,
            table_path: table_path.into(),
        }
    }

    /// Root directory of all tag files
    pub fn tag_directory(&self) -> PathBuf {
        self.table_path.join("tag")
    }

    /// Path of the tag file for `tag_name`
    pub fn tag_path(&self, tag_name: &str) -> PathBuf {
        self.tag_directory().join(format!("{TAG_PREFIX}{tag_name}"))
    }

    /// Persist `snapshot` as the content of the tag file.
    ///
    /// A failed write is fatal and attempts no cleanup: the write may have
    /// landed, so removing the path could destroy a committed tag.
    pub fn write(&self, tag_name: &str, snapshot: &Snapshot) -> Result<()> {
        let path = self.tag_path(tag_name);
        let json = snapshot.to_json()?;
        self.file_io
            .write_utf8(&path, &json)
            .map_err(|e| match e {
                Error::Io(source) => Error::TagCommit {
                    name: tag_name.to_string(),
                    path: path.clone(),
                    source,
                },
                other => other,
            })?;
        debug!(tag = tag_name, path = %path.display(), "wrote tag file");
        Ok(())
    }

    /// Read and deserialize the tagged snapshot
    pub fn read(&self, tag_name: &str) -> Result<Snapshot> {
        let content = self.file_io.read_utf8(&self.tag_path(tag_name))?;
        Snapshot::from_json(&content)
    }

    /// Read the tagged snapshot, mapping a missing tag file to `None`.
    ///
    /// Used during listing, where another process may delete a tag between
    /// the directory scan and the read.
    pub fn try_read(&self, tag_name: &str) -> Result<Option<Snapshot>> {
        match self.file_io.read_utf8(&self.tag_path(tag_name)) {
            Ok(content) => Ok(Some(Snapshot::from_json(&content)?)),
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Whether the tag file exists
    pub fn exists(&self, tag_name: &str) -> Result<bool> {
        self.file_io.exists(&self.tag_path(tag_name))
    }

    /// Delete the tag file, swallowing errors. A concurrent deleter may
    /// have removed it already.
    pub fn delete_quietly(&self, tag_name: &str) {
        self.file_io.delete_quietly(&self.tag_path(tag_name));
    }

    /// Names of all persisted tags, in file order
    pub fn list_tag_names(&self) -> Result<Vec<String>> {
        let statuses = list_prefixed_files(&self.file_io, &self.tag_directory(), TAG_PREFIX)?;
        Ok(statuses
            .iter()
            .filter_map(|s| s.file_name())
            .map(|n| n[TAG_PREFIX.len()..].to_string())
            .collect())
    }

    /// The table root this store operates on
    pub fn table_path(&self) -> &Path {
        &self.table_path
    }
}
