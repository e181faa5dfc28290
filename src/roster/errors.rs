use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the roster core.
///
/// `StoreNotFound` and `EmptyStore` are notices rather than failures: callers show
/// a message and carry on. Everything else aborts the single operation in flight.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The backing file does not exist yet.
    #[error("data file not found: {}", .0.display())]
    StoreNotFound(PathBuf),

    /// The backing file exists but holds no lines.
    #[error("no characters found")]
    EmptyStore,

    /// A line with fewer than five comma-separated fields.
    #[error("malformed record: expected 5 fields, found {found}")]
    Malformed { found: usize },

    /// A numeric field that does not parse as a base-10 integer.
    #[error("{field} is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// A selection outside the list it was made against.
    #[error("selection {index} out of range (0..{len})")]
    OutOfRange { index: usize, len: usize },

    /// The incremented level no longer fits in an `i32`.
    #[error("level {0} cannot be raised any further")]
    LevelOverflow(i32),

    /// Wrapper around IO errors (reads, temp files, renames, locks).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RosterError {
    /// True for the informational outcomes that are displayed, not reported as failures.
    pub fn is_notice(&self) -> bool {
        matches!(self, RosterError::StoreNotFound(_) | RosterError::EmptyStore)
    }
}

pub type RosterResult<T> = Result<T, RosterError>;
