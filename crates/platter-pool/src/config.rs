//! Pool configuration parameters.

use crate::error::PoolError;

/// Configuration for a pooled sequence.
///
/// Controls chunk sizing and an optional cap on chunk count. Validated at
/// construction; immutable for the lifetime of the sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of node slots per chunk.
    ///
    /// Default: 100. Must be at least 1.
    pub chunk_capacity: u32,

    /// Maximum number of chunks the sequence may hold at once.
    ///
    /// Default: `None` (bounded only by memory).
    pub max_chunks: Option<u32>,
}

impl PoolConfig {
    /// Default slots per chunk.
    pub const DEFAULT_CHUNK_CAPACITY: u32 = 100;

    /// Create a config with the given chunk capacity and no chunk limit.
    pub fn new(chunk_capacity: u32) -> Self {
        Self {
            chunk_capacity,
            max_chunks: None,
        }
    }

    /// Set a chunk limit.
    pub fn with_max_chunks(mut self, max_chunks: u32) -> Self {
        self.max_chunks = Some(max_chunks);
        self
    }

    /// Check that every parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if `chunk_capacity` is zero or
    /// `max_chunks` is `Some(0)`.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.chunk_capacity == 0 {
            return Err(PoolError::InvalidConfig {
                reason: "chunk_capacity must be at least 1".to_string(),
            });
        }
        if self.max_chunks == Some(0) {
            return Err(PoolError::InvalidConfig {
                reason: "max_chunks must be at least 1 when set".to_string(),
            });
        }
        Ok(())
    }

    /// Number of chunks needed to hold `len` packed elements.
    pub fn chunks_for(&self, len: usize) -> usize {
        len.div_ceil(self.chunk_capacity as usize)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CHUNK_CAPACITY)
    }
}
