//! Filesystem primitives for the directory mirror
//!
//! Provides the listing, comparison, copy and deletion operations the
//! reconciler is built on, plus format-agnostic config loading.

pub mod compare;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use compare::{ComparisonMode, files_identical};
pub use config::ConfigStore;
pub use constants::{COMPARE_CHUNK_SIZE, DEFAULT_LOG_FILE};
pub use error::{Error, Result};
pub use io::EntryKind;
pub use path::{RelativePath, validate_roots};
