//! Fixed-capacity node chunks and slot addressing.
//!
//! A [`Chunk`] is a contiguous `Vec` of node slots with bump allocation.
//! Slots are handed out in order and never recycled individually: an erased
//! slot stays in place as a tombstone until compaction repacks the chunk.

use crate::error::PoolError;

/// Physical location of a slot: chunk index in chunk-list order, then slot
/// index within that chunk.
///
/// Only meaningful within one generation of the owning sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeRef {
    pub(crate) chunk: u32,
    pub(crate) slot: u32,
}

impl NodeRef {
    pub(crate) fn new(chunk: u32, slot: u32) -> Self {
        Self { chunk, slot }
    }

    /// The slot at flat position `position` when every chunk holds
    /// `capacity` slots.
    pub(crate) fn from_position(position: usize, capacity: usize) -> Self {
        Self {
            chunk: (position / capacity) as u32,
            slot: (position % capacity) as u32,
        }
    }
}

/// One node: payload plus logical links.
///
/// `prev`/`next` identify logical neighbours and may cross chunks. They are
/// cleared when the node is erased.
pub(crate) struct Slot<T> {
    pub(crate) value: T,
    pub(crate) prev: Option<NodeRef>,
    pub(crate) next: Option<NodeRef>,
    /// `false` once erased (tombstone).
    pub(crate) live: bool,
}

impl<T> Slot<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            prev: None,
            next: None,
            live: true,
        }
    }
}

/// A single fixed-capacity block of node slots.
///
/// The slot array is reserved to full capacity at creation so pushing never
/// reallocates. `used()` is the bump cursor: it counts every slot handed out
/// since the last compaction, tombstones included.
pub(crate) struct Chunk<T> {
    slots: Vec<Slot<T>>,
    capacity: u32,
}

impl<T> Chunk<T> {
    /// Reserve a chunk of `capacity` slots.
    ///
    /// Returns [`PoolError::AllocationFailed`] if the reservation fails.
    pub(crate) fn new(capacity: u32) -> Result<Self, PoolError> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity as usize)
            .map_err(|_| PoolError::AllocationFailed {
                requested_slots: capacity as usize,
            })?;
        Ok(Self { slots, capacity })
    }

    /// Bump-allocate the next slot, initialised to `value`.
    ///
    /// Returns the slot index, or hands `value` back if the chunk is full.
    pub(crate) fn push(&mut self, value: T) -> Result<u32, T> {
        if self.is_full() {
            return Err(value);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot::new(value));
        Ok(index)
    }

    pub(crate) fn get(&self, slot: u32) -> Option<&Slot<T>> {
        self.slots.get(slot as usize)
    }

    /// # Panics
    ///
    /// Panics if `slot` has not been allocated.
    pub(crate) fn slot(&self, slot: u32) -> &Slot<T> {
        &self.slots[slot as usize]
    }

    /// # Panics
    ///
    /// Panics if `slot` has not been allocated.
    pub(crate) fn slot_mut(&mut self, slot: u32) -> &mut Slot<T> {
        &mut self.slots[slot as usize]
    }

    /// Exchange two slots of this chunk.
    pub(crate) fn swap(&mut self, a: u32, b: u32) {
        self.slots.swap(a as usize, b as usize);
    }

    /// Drop every slot at index `used` and above, tombstones and all.
    pub(crate) fn truncate(&mut self, used: usize) {
        self.slots.truncate(used);
    }

    /// Slots handed out since creation or the last compaction.
    pub(crate) fn used(&self) -> usize {
        self.slots.len()
    }

    /// Slots currently holding a live node.
    pub(crate) fn live(&self) -> usize {
        self.slots.iter().filter(|s| s.live).count()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.slots.len() == self.capacity as usize
    }
}
