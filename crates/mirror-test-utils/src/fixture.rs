//! [`MirrorFixture`] builder for mirror test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::tree::{snapshot, write_file};

/// A temporary directory holding a `source/` root and (optionally) a
/// `destination/` root, with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use mirror_test_utils::MirrorFixture;
///
/// let fx = MirrorFixture::new();
/// fx.write_source("a.txt", "hi");
/// fx.write_destination("c.txt", "old");
/// // ... run a pass ...
/// fx.assert_mirrored();
/// ```
pub struct MirrorFixture {
    temp_dir: TempDir,
}

impl Default for MirrorFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl MirrorFixture {
    /// Create a fixture with an empty `source/` and no `destination/`.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("source")).unwrap();
        Self { temp_dir }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn source(&self) -> PathBuf {
        self.root().join("source")
    }

    pub fn destination(&self) -> PathBuf {
        self.root().join("destination")
    }

    pub fn write_source(&self, relative: &str, content: impl AsRef<[u8]>) {
        write_file(&self.source(), relative, content);
    }

    pub fn write_destination(&self, relative: &str, content: impl AsRef<[u8]>) {
        write_file(&self.destination(), relative, content);
    }

    pub fn mkdir_source(&self, relative: &str) {
        fs::create_dir_all(self.source().join(relative)).unwrap();
    }

    pub fn mkdir_destination(&self, relative: &str) {
        fs::create_dir_all(self.destination().join(relative)).unwrap();
    }

    /// Snapshot of the source tree (see [`snapshot`]).
    pub fn source_snapshot(&self) -> String {
        snapshot(&self.source())
    }

    /// Snapshot of the destination tree (see [`snapshot`]).
    pub fn destination_snapshot(&self) -> String {
        snapshot(&self.destination())
    }

    /// Assert that the destination is a structural and content copy of the
    /// source.
    ///
    /// # Panics
    /// Panics with a line diff if the trees differ.
    pub fn assert_mirrored(&self) {
        pretty_assertions::assert_eq!(
            self.source_snapshot(),
            self.destination_snapshot(),
            "destination does not mirror source"
        );
    }

    /// Assert that `relative` exists under the destination with `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or its content differs.
    pub fn assert_destination_file(&self, relative: &str, content: &str) {
        let full_path = self.destination().join(relative);
        let actual = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert_eq!(
            actual,
            content,
            "File {} has unexpected content",
            full_path.display()
        );
    }

    /// Assert that `relative` does **not** exist under the destination.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_destination_missing(&self, relative: &str) {
        let full_path = self.destination().join(relative);
        assert!(
            !full_path.exists(),
            "Expected path NOT to exist: {}",
            full_path.display()
        );
    }
}
