//! Filesystem abstraction
//!
//! The metadata layer never touches `std::fs` directly; it goes through
//! the `FileIo` trait so tables can live on any storage that offers
//! blocking read/write/exists/delete/list. All calls are synchronous and
//! none expose cancellation.
//!
//! `LocalFileIo` is the local-disk implementation used by tests and
//! embedded deployments.

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Listing entry returned by [`FileIo::list_status`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// Full path of the listed file
    pub path: PathBuf,
}

impl FileStatus {
    /// The file's name without its directory
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// Blocking filesystem operations the metadata layer requires
pub trait FileIo: Send + Sync {
    /// Write `content` to `path`, creating parent directories as needed.
    ///
    /// No create-if-absent guarantee: a concurrent writer to the same path
    /// can be silently overwritten. Callers needing mutual exclusion must
    /// coordinate externally.
    fn write_utf8(&self, path: &Path, content: &str) -> Result<()>;

    /// Read the whole file at `path` as UTF-8
    fn read_utf8(&self, path: &Path) -> Result<String>;

    /// Whether a file exists at `path`
    fn exists(&self, path: &Path) -> Result<bool>;

    /// Delete `path`, swallowing all errors. Used only where a missing
    /// file is an acceptable outcome.
    fn delete_quietly(&self, path: &Path);

    /// List the files directly under `dir`. A missing directory lists as
    /// empty rather than failing.
    fn list_status(&self, dir: &Path) -> Result<Vec<FileStatus>>;
}

/// `FileIo` over the local filesystem
#[derive(Debug, Default, Clone)]
pub struct LocalFileIo;

impl LocalFileIo {
    /// Create a local-disk file I/O handle
    pub fn new() -> Self {
        Self
    }
}

impl FileIo for LocalFileIo {
    fn write_utf8(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;

        debug!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(())
    }

    fn read_utf8(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        // Path::exists would fold I/O failures into `false`; existence
        // must not be ambiguous-on-failure
        match fs::metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::Io(e)),
        }
    }

    fn delete_quietly(&self, path: &Path) {
        if let Err(e) = fs::remove_file(path) {
            debug!(path = %path.display(), error = %e, "quiet delete failed");
        }
    }

    fn list_status(&self, dir: &Path) -> Result<Vec<FileStatus>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::Io(e)),
        };

        let mut statuses = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                statuses.push(FileStatus { path: entry.path() });
            }
        }
        Ok(statuses)
    }
}

/// List files under `dir` whose names start with `prefix`
pub fn list_prefixed_files(io: &dyn FileIo, dir: &Path, prefix: &str) -> Result<Vec<FileStatus>> {
    let mut statuses: Vec<FileStatus> = io
        .list_status(dir)?
        .into_iter()
        .filter(|s| s.file_name().is_some_and(|n| n.starts_with(prefix)))
        .collect();
    statuses.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(statuses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let io = LocalFileIo::new();
        let path = dir.path().join("nested/sub/file.txt");

        io.write_utf8(&path, "hello").unwrap();
        assert_eq!(io.read_utf8(&path).unwrap(), "hello");
        assert!(io.exists(&path).unwrap());
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let io = LocalFileIo::new();

        let err = io.read_utf8(&dir.path().join("absent")).unwrap_err();
        match err {
            Error::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_delete_quietly_tolerates_missing() {
        let dir = TempDir::new().unwrap();
        let io = LocalFileIo::new();

        // Must not panic or error
        io.delete_quietly(&dir.path().join("absent"));
    }

    #[test]
    fn test_list_status_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let io = LocalFileIo::new();

        let listed = io.list_status(&dir.path().join("nope")).unwrap();
        assert!(listed.is_empty());
    }

    #[test]
    fn test_list_prefixed_files_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        let io = LocalFileIo::new();

        io.write_utf8(&dir.path().join("tag-b"), "b").unwrap();
        io.write_utf8(&dir.path().join("tag-a"), "a").unwrap();
        io.write_utf8(&dir.path().join("other"), "x").unwrap();

        let listed = list_prefixed_files(&io, dir.path(), "tag-").unwrap();
        let names: Vec<&str> = listed.iter().filter_map(FileStatus::file_name).collect();
        assert_eq!(names, vec!["tag-a", "tag-b"]);
    }

    #[test]
    fn test_list_status_ignores_directories() {
        let dir = TempDir::new().unwrap();
        let io = LocalFileIo::new();

        fs::create_dir(dir.path().join("subdir")).unwrap();
        io.write_utf8(&dir.path().join("file"), "x").unwrap();

        let listed = io.list_status(dir.path()).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].file_name(), Some("file"));
    }
}
