use thiserror::Error;

/// Errors from the partition enumerator (C2). Out-of-range indices are a
/// hard error, not a partial yield.
#[derive(Debug, Error)]
pub enum PartitionError {
    #[error("level must be >= 1 (got {0})")]
    InvalidLevel(u64),

    #[error("index {index} out of range for level {level} (count = {count})")]
    IndexOutOfRange { level: u64, index: u64, count: u64 },
}
