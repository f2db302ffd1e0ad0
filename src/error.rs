//! Error taxonomy.
//!
//! Two kinds only, matching the reference status-code contract: a parameter
//! violated a documented precondition, or the external suffix-array/PLCP
//! oracle failed to build its arrays. Hand-rolled `Display`/`Error` impls,
//! not a derive-macro error crate — this crate's only error-handling
//! dependency at the library boundary is `std::error::Error` itself; the CLI
//! harness layers `anyhow` on top at its own boundary (see `src/main.rs`).

use std::fmt;

/// `NO_ERROR` from the flat status-code view.
pub const NO_ERROR: i32 = 0;
/// `BAD_PARAMETER` from the flat status-code view.
pub const BAD_PARAMETER: i32 = -1;

/// Everything that can go wrong building or driving a [`crate::session::Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `max_block_size` is 0 or exceeds [`crate::config::MAX_BLOCK_SIZE`].
    BlockSizeOutOfRange { requested: usize, max: usize },
    /// `min_match_length` is below [`crate::config::MIN_MATCH_LENGTH_FLOOR`].
    MinMatchTooSmall { requested: u32, floor: u32 },
    /// `min_match_length > max_match_length`.
    MatchLengthRangeInverted { min: u32, max: u32 },
    /// `max_match_length` does not fit in the configured encoding width.
    MaxMatchLengthOutOfRange { requested: u32, max: u32 },
    /// `num_workers` exceeds [`crate::config::MAX_WORKERS`].
    TooManyWorkers { requested: usize, max: usize },
    /// The block passed to `parse` is larger than the session's configured
    /// `max_block_size`, or is empty when a non-empty block was required.
    BlockTooLarge { requested: usize, max: usize },
    /// `rewind` was asked for a position outside `[0, block_size)`.
    RewindTargetOutOfRange { requested: u32, block_size: u32 },
    /// The external suffix-array/PLCP construction step failed.
    OracleFailed(String),
}

impl Error {
    /// Maps the taxonomy down to the two status codes a flat-integer caller
    /// would expect. Every variant here is a parameter error except
    /// [`Error::OracleFailed`], which is also reported as `BAD_PARAMETER`
    /// since this crate defines no separate "internal error" status code.
    pub fn status_code(&self) -> i32 {
        BAD_PARAMETER
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BlockSizeOutOfRange { requested, max } => write!(
                f,
                "max_block_size {requested} is out of range (must be in 1..={max})"
            ),
            Error::MinMatchTooSmall { requested, floor } => write!(
                f,
                "min_match_length {requested} is below the floor of {floor}"
            ),
            Error::MatchLengthRangeInverted { min, max } => write!(
                f,
                "min_match_length {min} exceeds max_match_length {max}"
            ),
            Error::MaxMatchLengthOutOfRange { requested, max } => write!(
                f,
                "max_match_length {requested} exceeds the encoding limit of {max}"
            ),
            Error::TooManyWorkers { requested, max } => {
                write!(f, "num_workers {requested} exceeds the limit of {max}")
            }
            Error::BlockTooLarge { requested, max } => write!(
                f,
                "block of {requested} bytes exceeds max_block_size {max}"
            ),
            Error::RewindTargetOutOfRange {
                requested,
                block_size,
            } => write!(
                f,
                "rewind target {requested} is out of range for block of size {block_size}"
            ),
            Error::OracleFailed(msg) => write!(f, "suffix-array/PLCP construction failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
