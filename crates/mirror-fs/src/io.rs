//! Filesystem operations used by the reconciler
//!
//! Every failure is mapped to [`Error::Io`] carrying the path that failed,
//! so callers can report it without further context.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs::{self, File, FileTimes, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use crate::{Error, Result};

/// Kind of a directory entry as seen by the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Sockets, fifos, devices, and (when not followed) symlinks.
    Other,
}

impl EntryKind {
    fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// Kind of the entry at `path`, following symlinks.
///
/// Returns `None` when nothing exists there (including dangling symlinks).
pub fn probe(path: &Path) -> Result<Option<EntryKind>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(EntryKind::from_file_type(meta.file_type()))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Kind of the entry at `path` itself; a symlink reports [`EntryKind::Other`].
pub fn probe_no_follow(path: &Path) -> Result<Option<EntryKind>> {
    match fs::symlink_metadata(path) {
        Ok(meta) => Ok(Some(EntryKind::from_file_type(meta.file_type()))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Names of the immediate children of `dir`, sorted.
pub fn list_names(dir: &Path) -> Result<BTreeSet<OsString>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut names = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        names.insert(entry.file_name());
    }
    Ok(names)
}

/// Create a single directory level. The parent must already exist.
pub fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir(path).map_err(|e| Error::io(path, e))
}

/// Create a directory and any missing ancestors.
pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Copy `source` over `destination`, then carry over the source's
/// modification (and, where available, access) time.
///
/// Returns the number of bytes copied.
pub fn copy_file(source: &Path, destination: &Path) -> Result<u64> {
    let bytes = fs::copy(source, destination).map_err(|e| Error::io(destination, e))?;

    let meta = fs::metadata(source).map_err(|e| Error::io(source, e))?;
    let modified = meta.modified().map_err(|e| Error::io(source, e))?;
    let mut times = FileTimes::new().set_modified(modified);
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }

    open_for_times(destination)?
        .set_times(times)
        .map_err(|e| Error::io(destination, e))?;

    tracing::trace!(bytes, "copied {} to {}", source.display(), destination.display());
    Ok(bytes)
}

#[cfg(windows)]
fn open_for_times(path: &Path) -> Result<File> {
    use std::os::windows::fs::OpenOptionsExt;
    const FILE_WRITE_ATTRIBUTES: u32 = 0x0100;
    OpenOptions::new()
        .access_mode(FILE_WRITE_ATTRIBUTES)
        .open(path)
        .map_err(|e| Error::io(path, e))
}

// futimens only needs ownership, so a read-only handle works for read-only copies.
#[cfg(not(windows))]
fn open_for_times(path: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .open(path)
        .map_err(|e| Error::io(path, e))
}

/// Delete a single file (or symlink, or special file).
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| Error::io(path, e))
}

/// Delete a directory and everything beneath it.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    fs::remove_dir_all(path).map_err(|e| Error::io(path, e))
}
