//! File content comparison
//!
//! [`ComparisonMode::Full`] is the mirror's correctness baseline: two files
//! are identical only when every byte matches. [`ComparisonMode::Metadata`]
//! is an opt-in shortcut that trusts equal size and modification time.

use std::fs::{self, File};
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{COMPARE_CHUNK_SIZE, Error, Result};

/// How two files are compared when deciding whether to copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonMode {
    /// Byte-by-byte comparison of the full content.
    #[default]
    Full,
    /// Equal size and modification time count as identical; anything else
    /// falls back to [`ComparisonMode::Full`].
    Metadata,
}

impl std::str::FromStr for ComparisonMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "metadata" => Ok(Self::Metadata),
            other => Err(format!("unknown comparison mode '{other}' (expected full or metadata)")),
        }
    }
}

impl std::fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Metadata => write!(f, "metadata"),
        }
    }
}

/// Whether `a` and `b` hold the same content under `mode`.
///
/// Sizes are checked first under both modes: a size mismatch is always a
/// difference.
pub fn files_identical(a: &Path, b: &Path, mode: ComparisonMode) -> Result<bool> {
    let meta_a = fs::metadata(a).map_err(|e| Error::io(a, e))?;
    let meta_b = fs::metadata(b).map_err(|e| Error::io(b, e))?;

    if meta_a.len() != meta_b.len() {
        return Ok(false);
    }

    if mode == ComparisonMode::Metadata
        && let (Ok(ma), Ok(mb)) = (meta_a.modified(), meta_b.modified())
        && ma == mb
    {
        return Ok(true);
    }

    contents_equal(a, b)
}

fn contents_equal(a: &Path, b: &Path) -> Result<bool> {
    let mut reader_a = BufReader::new(File::open(a).map_err(|e| Error::io(a, e))?);
    let mut reader_b = BufReader::new(File::open(b).map_err(|e| Error::io(b, e))?);

    let mut buf_a = vec![0u8; COMPARE_CHUNK_SIZE];
    let mut buf_b = vec![0u8; COMPARE_CHUNK_SIZE];

    loop {
        let n = fill(&mut reader_a, &mut buf_a).map_err(|e| Error::io(a, e))?;
        let m = fill(&mut reader_b, &mut buf_b).map_err(|e| Error::io(b, e))?;
        if n != m || buf_a[..n] != buf_b[..m] {
            return Ok(false);
        }
        if n == 0 {
            return Ok(true);
        }
    }
}

/// Read until `buf` is full or EOF, so chunk boundaries line up between readers.
fn fill(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
