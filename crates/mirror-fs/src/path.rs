//! Path helpers: root-relative display paths and root validation

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::{Error, Result};

/// A path relative to a mirror root, always using forward slashes.
///
/// Used for report entries so that outcomes read the same regardless of
/// where the roots live or which platform produced them. The empty path is
/// the root itself and displays as `.`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RelativePath {
    inner: String,
}

impl RelativePath {
    /// The root of a mirrored tree.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build from a slash- or backslash-separated string.
    pub fn new(path: impl AsRef<str>) -> Self {
        let normalized = path.as_ref().replace('\\', "/");
        let inner = normalized
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect::<Vec<_>>()
            .join("/");
        Self { inner }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn is_root(&self) -> bool {
        self.inner.is_empty()
    }

    /// Append one entry name.
    ///
    /// Names that are not valid UTF-8 are rendered lossily; this type is for
    /// display and never used to address the filesystem.
    pub fn join(&self, name: impl AsRef<OsStr>) -> Self {
        let name = name.as_ref().to_string_lossy();
        if self.inner.is_empty() {
            Self {
                inner: name.into_owned(),
            }
        } else {
            Self {
                inner: format!("{}/{}", self.inner, name),
            }
        }
    }
}

impl std::fmt::Display for RelativePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.inner.is_empty() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.inner)
        }
    }
}

/// Reject source/destination pairs where one root contains the other.
///
/// A destination inside the source would be mirrored into itself on every
/// pass; a source inside the destination would have its siblings deleted.
/// A missing source is not an error here, the reconciler reports it.
pub fn validate_roots(source: &Path, destination: &Path) -> Result<()> {
    if !source.exists() {
        tracing::debug!("Source {} missing, skipping overlap check", source.display());
        return Ok(());
    }
    let source_abs = dunce::canonicalize(source).map_err(|e| Error::io(source, e))?;
    let dest_abs = resolve_lenient(destination)?;

    if dest_abs.starts_with(&source_abs) || source_abs.starts_with(&dest_abs) {
        return Err(Error::OverlappingRoots {
            source_dir: source_abs,
            destination: dest_abs,
        });
    }
    Ok(())
}

/// Canonicalize the longest existing prefix of `path` and append the rest.
fn resolve_lenient(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| Error::io(path, e))?
            .join(path)
    };

    // `..` through a missing directory cannot be resolved by the OS; fold lexically.
    let mut folded = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                folded.pop();
            }
            other => folded.push(other.as_os_str()),
        }
    }

    let mut existing = folded.as_path();
    let mut tail = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = dunce::canonicalize(existing).map_err(|e| Error::io(existing, e))?;
    for name in tail.into_iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}
