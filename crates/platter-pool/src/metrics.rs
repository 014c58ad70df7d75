//! Pool occupancy and compaction metrics.
//!
//! [`PoolStats`] is a point-in-time view of a sequence's storage;
//! [`CompactionReport`] describes a single compaction pass.

/// Storage occupancy of a pooled sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Live (logically present) elements.
    pub live: usize,
    /// Slots handed out since the last compaction, live or tombstoned.
    pub allocated_slots: usize,
    /// Erased slots awaiting compaction.
    pub tombstones: usize,
    /// Chunks currently held.
    pub chunk_count: usize,
    /// Slots per chunk.
    pub chunk_capacity: u32,
    /// Current cursor generation.
    pub generation: u64,
    /// Cumulative number of compaction passes.
    pub compactions: u64,
    /// Cumulative number of tombstoned slots reclaimed by compaction.
    pub slots_reclaimed: u64,
    /// Cumulative number of chunks released by compaction.
    pub chunks_freed: u64,
}

impl PoolStats {
    /// Fraction of allocated slots that are tombstones, in `[0, 1]`.
    pub fn fragmentation(&self) -> f64 {
        if self.allocated_slots == 0 {
            0.0
        } else {
            self.tombstones as f64 / self.allocated_slots as f64
        }
    }
}

/// Outcome of one compaction pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompactionReport {
    /// Chunks held before the pass.
    pub chunks_before: usize,
    /// Chunks held after the pass.
    pub chunks_after: usize,
    /// Tombstoned slots dropped by the pass.
    pub tombstones_reclaimed: usize,
    /// Generation the sequence moved to. Cursors from earlier
    /// generations are rejected from now on.
    pub generation: u64,
}

impl CompactionReport {
    /// Chunks released by the pass.
    pub fn chunks_freed(&self) -> usize {
        self.chunks_before - self.chunks_after
    }
}
