//! Pool-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during pooled-sequence operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// Reserving the slot array for a new chunk failed (out of memory).
    AllocationFailed {
        /// Number of slots the failed reservation asked for.
        requested_slots: usize,
    },
    /// The configured chunk limit has been reached.
    CapacityExceeded {
        /// The configured maximum number of chunks.
        max_chunks: u32,
    },
    /// The pool configuration was rejected.
    InvalidConfig {
        /// Why the configuration is invalid.
        reason: String,
    },
    /// Indexed access past the last live element.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Live element count at the time of the call.
        len: usize,
    },
    /// A cursor issued before the most recent compaction or `clear()`.
    StaleCursor {
        /// The generation encoded in the cursor.
        cursor_generation: u64,
        /// The sequence's current generation.
        current_generation: u64,
    },
    /// The operation needs an element but the cursor is at end.
    CursorAtEnd,
    /// The cursor names a slot that does not exist or has been erased.
    InvalidCursor,
    /// `last` is not reachable from `first` by forward links.
    InvalidRange,
    /// Link bookkeeping is inconsistent (reported by `verify()`).
    Corrupted {
        /// Description of the first inconsistency found.
        reason: String,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { requested_slots } => {
                write!(f, "chunk allocation failed: {requested_slots} slots requested")
            }
            Self::CapacityExceeded { max_chunks } => {
                write!(f, "pool capacity exceeded: limit is {max_chunks} chunks")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid pool config: {reason}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index out of range: index {index}, len {len}")
            }
            Self::StaleCursor {
                cursor_generation,
                current_generation,
            } => {
                write!(
                    f,
                    "stale cursor: generation {cursor_generation}, current {current_generation}"
                )
            }
            Self::CursorAtEnd => write!(f, "cursor is at end"),
            Self::InvalidCursor => write!(f, "cursor does not name a live element"),
            Self::InvalidRange => write!(f, "range end is not reachable from range start"),
            Self::Corrupted { reason } => write!(f, "sequence corrupted: {reason}"),
        }
    }
}

impl Error for PoolError {}
