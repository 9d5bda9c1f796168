//! Shared constants for the mirror filesystem layer.

/// Log file used when neither the command line nor the config names one.
pub const DEFAULT_LOG_FILE: &str = "logs/sync.logs";

/// Chunk size used when streaming two files for byte comparison.
pub const COMPARE_CHUNK_SIZE: usize = 64 * 1024;
