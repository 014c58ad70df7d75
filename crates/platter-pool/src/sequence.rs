//! The pooled sequence: chunk list, logical links, and mutation.
//!
//! [`PooledSequence`] owns an ordered list of [`Chunk`]s and threads a
//! doubly linked logical order through their slots. Nodes are carved from
//! the tail chunk in allocation order; logical order is carried entirely by
//! the links and is unrelated to storage order until the next compaction.
//!
//! Erasing a node only unlinks it. The slot stays allocated as a tombstone,
//! and its payload is not dropped, until [`compact`](PooledSequence::compact)
//! or [`clear`](PooledSequence::clear) releases it.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::chunk::{Chunk, NodeRef, Slot};
use crate::config::PoolConfig;
use crate::cursor::Cursor;
use crate::error::PoolError;
use crate::iter::Iter;
use crate::metrics::PoolStats;

/// A doubly linked sequence whose nodes live in fixed-capacity chunks.
///
/// Single-threaded. All outstanding [`Cursor`]s are invalidated by
/// compaction (explicit or via [`erase_range`](Self::erase_range)) and by
/// [`clear`](Self::clear); the sequence detects this through a generation
/// counter and rejects stale cursors with [`PoolError::StaleCursor`].
pub struct PooledSequence<T> {
    /// Chunk list. Vector order is chunk-list order; appends go to the end.
    pub(crate) chunks: Vec<Chunk<T>>,
    pub(crate) config: PoolConfig,
    pub(crate) head: Option<NodeRef>,
    pub(crate) tail: Option<NodeRef>,
    /// Live count: +1 per linked node, -1 per unlinked node.
    pub(crate) len: usize,
    /// Bumped by every compaction and `clear()`. 64 bits, so it does not
    /// wrap back to an old cursor's value in any realistic run.
    pub(crate) generation: u64,
    pub(crate) compactions: u64,
    pub(crate) slots_reclaimed: u64,
    pub(crate) chunks_freed: u64,
}

impl<T> PooledSequence<T> {
    /// Create an empty sequence with the default chunk capacity.
    ///
    /// No chunk is allocated until the first insertion.
    pub fn new() -> Self {
        Self::from_valid_config(PoolConfig::default())
    }

    /// Create an empty sequence with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if the config fails validation.
    pub fn with_config(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: PoolConfig) -> Self {
        Self {
            chunks: Vec::new(),
            config,
            head: None,
            tail: None,
            len: 0,
            generation: 0,
            compactions: 0,
            slots_reclaimed: 0,
            chunks_freed: 0,
        }
    }

    /// The configuration this sequence was built with.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    // ── Pool management ─────────────────────────────────────────

    /// Append one empty chunk to the chunk list.
    fn allocate_chunk(&mut self) -> Result<(), PoolError> {
        if let Some(max_chunks) = self.config.max_chunks {
            if self.chunks.len() >= max_chunks as usize {
                return Err(PoolError::CapacityExceeded { max_chunks });
            }
        }
        let requested_slots = self.config.chunk_capacity as usize;
        self.chunks
            .try_reserve(1)
            .map_err(|_| PoolError::AllocationFailed { requested_slots })?;
        self.chunks.push(Chunk::new(self.config.chunk_capacity)?);
        Ok(())
    }

    /// Place `value` in the next free slot of the tail chunk, growing the
    /// chunk list if the tail chunk is full or absent. The new node is
    /// unlinked.
    fn allocate_slot(&mut self, value: T) -> Result<NodeRef, PoolError> {
        if self.chunks.last().is_none_or(|c| c.is_full()) {
            self.allocate_chunk()?;
        }
        let chunk_index = self.chunks.len() - 1;
        match self.chunks[chunk_index].push(value) {
            Ok(slot) => Ok(NodeRef::new(chunk_index as u32, slot)),
            // A fresh or non-full tail chunk always has room.
            Err(_) => Err(PoolError::Corrupted {
                reason: "tail chunk full after growth".to_string(),
            }),
        }
    }

    pub(crate) fn slot(&self, node: NodeRef) -> &Slot<T> {
        self.chunks[node.chunk as usize].slot(node.slot)
    }

    pub(crate) fn slot_mut(&mut self, node: NodeRef) -> &mut Slot<T> {
        self.chunks[node.chunk as usize].slot_mut(node.slot)
    }

    /// Resolve `node` only if it is an allocated, live slot.
    fn live_slot(&self, node: NodeRef) -> Result<&Slot<T>, PoolError> {
        match self
            .chunks
            .get(node.chunk as usize)
            .and_then(|c| c.get(node.slot))
        {
            Some(slot) if slot.live => Ok(slot),
            _ => Err(PoolError::InvalidCursor),
        }
    }

    // ── Linking ─────────────────────────────────────────────────

    /// Link the unlinked `node` between `prev` and `next`, which must be
    /// logically adjacent (or `None` for the respective end).
    fn link_between(&mut self, prev: Option<NodeRef>, next: Option<NodeRef>, node: NodeRef) {
        {
            let slot = self.slot_mut(node);
            slot.prev = prev;
            slot.next = next;
        }
        match prev {
            Some(p) => self.slot_mut(p).next = Some(node),
            None => self.head = Some(node),
        }
        match next {
            Some(n) => self.slot_mut(n).prev = Some(node),
            None => self.tail = Some(node),
        }
        self.len += 1;
    }

    /// Unlink the live `node`, leaving a tombstone. Returns its successor.
    fn unlink(&mut self, node: NodeRef) -> Option<NodeRef> {
        let (prev, next) = {
            let slot = self.slot_mut(node);
            slot.live = false;
            (slot.prev.take(), slot.next.take())
        };
        match prev {
            Some(p) => self.slot_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slot_mut(n).prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
        next
    }

    // ── Insertion ───────────────────────────────────────────────

    /// Append `value` as the new logical tail.
    ///
    /// # Errors
    ///
    /// [`PoolError::AllocationFailed`] or [`PoolError::CapacityExceeded`]
    /// if a new chunk is needed and cannot be created.
    pub fn push_back(&mut self, value: T) -> Result<(), PoolError> {
        let node = self.allocate_slot(value)?;
        self.link_between(self.tail, None, node);
        Ok(())
    }

    /// Prepend `value` as the new logical head.
    ///
    /// # Errors
    ///
    /// As for [`push_back`](Self::push_back).
    pub fn push_front(&mut self, value: T) -> Result<(), PoolError> {
        let node = self.allocate_slot(value)?;
        self.link_between(None, self.head, node);
        Ok(())
    }

    /// Append every value of `values`, in order.
    ///
    /// # Errors
    ///
    /// As for [`push_back`](Self::push_back). Values appended before the
    /// failure stay in the sequence.
    pub fn extend_back<I>(&mut self, values: I) -> Result<(), PoolError>
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.push_back(value)?;
        }
        Ok(())
    }

    /// Splice `values` in immediately before `pos`, preserving their order.
    ///
    /// `pos` may be the end cursor, in which case the values are appended.
    /// Returns a cursor to the element that followed the insertion point
    /// (i.e. `pos` itself, refreshed with the current tail).
    ///
    /// Each value is linked as soon as its slot is allocated, so the
    /// sequence is consistent at every step.
    ///
    /// # Errors
    ///
    /// - [`PoolError::StaleCursor`] / [`PoolError::InvalidCursor`] if `pos`
    ///   is not a live position of this generation.
    /// - Allocation errors as for [`push_back`](Self::push_back); values
    ///   spliced before the failure stay in place.
    pub fn insert<I>(&mut self, pos: Cursor, values: I) -> Result<Cursor, PoolError>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_generation(&pos)?;
        let next = pos.current;
        let mut prev = match next {
            Some(node) => self.live_slot(node)?.prev,
            None => self.tail,
        };
        for value in values {
            let node = self.allocate_slot(value)?;
            self.link_between(prev, next, node);
            prev = Some(node);
        }
        Ok(self.cursor_at(next))
    }

    // ── Removal ─────────────────────────────────────────────────

    /// Unlink the element at `pos` and return a cursor to its successor.
    ///
    /// The vacated slot becomes a tombstone; the payload is not dropped until
    /// the next compaction or `clear()`. Other cursors stay valid.
    ///
    /// # Errors
    ///
    /// [`PoolError::StaleCursor`], [`PoolError::CursorAtEnd`], or
    /// [`PoolError::InvalidCursor`] if `pos` does not name a live element.
    pub fn erase(&mut self, pos: Cursor) -> Result<Cursor, PoolError> {
        let node = self.resolve(&pos)?;
        let next = self.unlink(node);
        Ok(self.cursor_at(next))
    }

    /// Erase `[first, last)` and then compact.
    ///
    /// The range is checked for reachability before anything is unlinked.
    /// Compaction runs even when the range is empty. Returns a cursor in
    /// the new generation naming the element `last` named (or end).
    ///
    /// # Errors
    ///
    /// - [`PoolError::StaleCursor`] / [`PoolError::InvalidCursor`] for a
    ///   cursor that is not a live position of this generation.
    /// - [`PoolError::InvalidRange`] if `last` is not reachable from `first`.
    pub fn erase_range(&mut self, first: Cursor, last: Cursor) -> Result<Cursor, PoolError> {
        self.check_generation(&first)?;
        self.check_generation(&last)?;
        if let Some(node) = last.current {
            self.live_slot(node)?;
        }
        let mut probe = first.current;
        while probe != last.current {
            let node = probe.ok_or(PoolError::InvalidRange)?;
            probe = self.live_slot(node)?.next;
        }

        let mut current = first.current;
        while current != last.current {
            match current {
                Some(node) => current = self.unlink(node),
                None => break,
            }
        }
        let (_, tracked) = self.pack(last.current);
        Ok(self.cursor_at(tracked))
    }

    /// Erase every element for which `pred` returns `true`.
    ///
    /// Walks the sequence once with single-element erase; does not compact.
    /// Returns the number of elements removed.
    pub fn erase_if<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut removed = 0;
        let mut cursor = self.begin();
        while let Some(node) = cursor.current {
            if pred(&mut self.slot_mut(node).value) {
                let next = self.unlink(node);
                cursor = self.cursor_at(next);
                removed += 1;
            } else {
                cursor.current = self.slot(node).next;
            }
        }
        removed
    }

    /// Destroy every chunk and reset to empty.
    ///
    /// Drops all payloads, tombstoned ones included, and invalidates every
    /// outstanding cursor.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    // ── Access ──────────────────────────────────────────────────

    /// The element at logical index `index`. O(n) walk from the head.
    ///
    /// # Errors
    ///
    /// [`PoolError::IndexOutOfRange`] if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, PoolError> {
        let node = self.node_at(index)?;
        Ok(&self.slot(node).value)
    }

    /// Mutable form of [`at`](Self::at).
    ///
    /// # Errors
    ///
    /// [`PoolError::IndexOutOfRange`] if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, PoolError> {
        let node = self.node_at(index)?;
        Ok(&mut self.slot_mut(node).value)
    }

    fn node_at(&self, index: usize) -> Result<NodeRef, PoolError> {
        let out_of_range = PoolError::IndexOutOfRange {
            index,
            len: self.len,
        };
        if index >= self.len {
            return Err(out_of_range);
        }
        let mut node = self.head.ok_or_else(|| out_of_range.clone())?;
        for _ in 0..index {
            node = self.slot(node).next.ok_or_else(|| out_of_range.clone())?;
        }
        Ok(node)
    }

    /// The logical head element.
    pub fn front(&self) -> Option<&T> {
        self.head.map(|node| &self.slot(node).value)
    }

    /// The logical tail element.
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|node| &self.slot(node).value)
    }

    /// Mutable logical head element.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let node = self.head?;
        Some(&mut self.slot_mut(node).value)
    }

    /// Mutable logical tail element.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let node = self.tail?;
        Some(&mut self.slot_mut(node).value)
    }

    /// Live element count. O(1).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Recount live elements by walking forward links. O(n).
    ///
    /// Always equal to [`len`](Self::len) while the links are intact.
    pub fn count(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.head;
        while let Some(node) = cursor {
            count += 1;
            cursor = self.slot(node).next;
        }
        count
    }

    /// Iterate live elements in logical order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self, self.head, self.tail, self.len)
    }

    /// Apply `f` to every live element in logical order.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T),
    {
        let mut cursor = self.head;
        while let Some(node) = cursor {
            let slot = self.slot_mut(node);
            f(&mut slot.value);
            cursor = slot.next;
        }
    }

    // ── Cursor protocol ─────────────────────────────────────────

    pub(crate) fn cursor_at(&self, current: Option<NodeRef>) -> Cursor {
        Cursor::new(current, self.tail, self.generation)
    }

    /// Cursor at the logical head (equal to [`end`](Self::end) when empty).
    pub fn begin(&self) -> Cursor {
        self.cursor_at(self.head)
    }

    /// Cursor one past the logical tail.
    pub fn end(&self) -> Cursor {
        self.cursor_at(None)
    }

    fn check_generation(&self, cursor: &Cursor) -> Result<(), PoolError> {
        if cursor.generation != self.generation {
            return Err(PoolError::StaleCursor {
                cursor_generation: cursor.generation,
                current_generation: self.generation,
            });
        }
        Ok(())
    }

    /// Resolve a cursor to the live node it names.
    fn resolve(&self, cursor: &Cursor) -> Result<NodeRef, PoolError> {
        self.check_generation(cursor)?;
        let node = cursor.current.ok_or(PoolError::CursorAtEnd)?;
        self.live_slot(node)?;
        Ok(node)
    }

    /// Advance `cursor` to the logical successor.
    ///
    /// Advancing from the tail reaches end; advancing from end wraps to the
    /// head.
    ///
    /// # Errors
    ///
    /// [`PoolError::StaleCursor`] or [`PoolError::InvalidCursor`].
    pub fn move_next(&self, cursor: &mut Cursor) -> Result<(), PoolError> {
        self.check_generation(cursor)?;
        cursor.current = match cursor.current {
            Some(node) => self.live_slot(node)?.next,
            None => self.head,
        };
        Ok(())
    }

    /// Move `cursor` to the logical predecessor.
    ///
    /// Moving back from end lands on the tail remembered by the cursor;
    /// moving back from the head reaches end.
    ///
    /// # Errors
    ///
    /// [`PoolError::StaleCursor`] or [`PoolError::InvalidCursor`].
    pub fn move_prev(&self, cursor: &mut Cursor) -> Result<(), PoolError> {
        self.check_generation(cursor)?;
        cursor.current = match cursor.current {
            Some(node) => self.live_slot(node)?.prev,
            None => cursor.tail,
        };
        Ok(())
    }

    /// The element under `cursor`.
    ///
    /// # Errors
    ///
    /// [`PoolError::StaleCursor`], [`PoolError::CursorAtEnd`], or
    /// [`PoolError::InvalidCursor`].
    pub fn get(&self, cursor: &Cursor) -> Result<&T, PoolError> {
        let node = self.resolve(cursor)?;
        Ok(&self.slot(node).value)
    }

    /// Mutable form of [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// As for [`get`](Self::get).
    pub fn get_mut(&mut self, cursor: &Cursor) -> Result<&mut T, PoolError> {
        let node = self.resolve(cursor)?;
        Ok(&mut self.slot_mut(node).value)
    }

    // ── Introspection ───────────────────────────────────────────

    /// Current generation. Cursors from other generations are rejected.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of chunks currently held.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Slots per chunk.
    pub fn chunk_capacity(&self) -> u32 {
        self.config.chunk_capacity
    }

    /// Per-chunk `used` count, in chunk-list order.
    ///
    /// Counts tombstones until the next compaction, after which it is the
    /// number of packed live nodes.
    pub fn chunk_used(&self) -> impl Iterator<Item = usize> + '_ {
        self.chunks.iter().map(|c| c.used())
    }

    /// Per-chunk live node count, in chunk-list order.
    pub fn chunk_live(&self) -> impl Iterator<Item = usize> + '_ {
        self.chunks.iter().map(|c| c.live())
    }

    /// Slots handed out since the last compaction, live or tombstoned.
    pub fn allocated_slots(&self) -> usize {
        self.chunks.iter().map(|c| c.used()).sum()
    }

    /// Erased slots awaiting compaction.
    pub fn tombstones(&self) -> usize {
        self.allocated_slots() - self.len
    }

    /// Point-in-time storage metrics.
    pub fn stats(&self) -> PoolStats {
        let allocated_slots = self.allocated_slots();
        PoolStats {
            live: self.len,
            allocated_slots,
            tombstones: allocated_slots - self.len,
            chunk_count: self.chunks.len(),
            chunk_capacity: self.config.chunk_capacity,
            generation: self.generation,
            compactions: self.compactions,
            slots_reclaimed: self.slots_reclaimed,
            chunks_freed: self.chunks_freed,
        }
    }

    /// Check link bookkeeping.
    ///
    /// Walks forward from the head and checks that every backward link
    /// mirrors the forward link, that only the head lacks a backward link
    /// and only the tail lacks a forward link, that no tombstone is
    /// reachable, and that the walk length equals `len()`.
    ///
    /// # Errors
    ///
    /// [`PoolError::Corrupted`] describing the first inconsistency.
    pub fn verify(&self) -> Result<(), PoolError> {
        let corrupted = |reason: String| PoolError::Corrupted { reason };
        let mut prev: Option<NodeRef> = None;
        let mut cursor = self.head;
        let mut walked = 0usize;
        while let Some(node) = cursor {
            let slot = self
                .chunks
                .get(node.chunk as usize)
                .and_then(|c| c.get(node.slot))
                .ok_or_else(|| corrupted(format!("link to unallocated slot {node:?}")))?;
            if !slot.live {
                return Err(corrupted(format!("tombstone {node:?} is reachable")));
            }
            if slot.prev != prev {
                return Err(match slot.prev {
                    None => corrupted(format!("invalid null prev at {node:?}")),
                    Some(_) => corrupted(format!("backward link mismatch at {node:?}")),
                });
            }
            if slot.next.is_none() && Some(node) != self.tail {
                return Err(corrupted(format!("invalid null next at {node:?}")));
            }
            walked += 1;
            if walked > self.len {
                return Err(corrupted(format!(
                    "more than {} nodes reachable from head",
                    self.len
                )));
            }
            prev = Some(node);
            cursor = slot.next;
        }
        if prev != self.tail {
            return Err(corrupted("forward walk does not end at tail".to_string()));
        }
        if walked != self.len {
            return Err(corrupted(format!(
                "walked {walked} nodes, len is {}",
                self.len
            )));
        }
        Ok(())
    }
}

impl<T> Default for PooledSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for PooledSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Index<usize> for PooledSequence<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for PooledSequence<T> {
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<'a, T> IntoIterator for &'a PooledSequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Erase every element of `seq` for which `pred` holds.
///
/// Free-standing form of [`PooledSequence::erase_if`]; does not compact.
/// Returns the number of elements removed.
pub fn erase_if<T, F>(seq: &mut PooledSequence<T>, pred: F) -> usize
where
    F: FnMut(&mut T) -> bool,
{
    seq.erase_if(pred)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> PooledSequence<i32> {
        PooledSequence::with_config(PoolConfig::new(4)).unwrap()
    }

    fn values(seq: &PooledSequence<i32>) -> Vec<i32> {
        seq.iter().copied().collect()
    }

    #[test]
    fn new_sequence_is_empty_without_chunks() {
        let seq: PooledSequence<i32> = PooledSequence::new();
        assert!(seq.is_empty());
        assert_eq!(seq.chunk_count(), 0);
        assert_eq!(seq.begin(), seq.end());
        assert!(seq.front().is_none());
        assert!(seq.verify().is_ok());
    }

    #[test]
    fn invalid_config_rejected() {
        let result = PooledSequence::<i32>::with_config(PoolConfig::new(0));
        assert!(matches!(result, Err(PoolError::InvalidConfig { .. })));
    }

    #[test]
    fn push_back_and_front_order() {
        let mut seq = small();
        seq.push_back(2).unwrap();
        seq.push_back(3).unwrap();
        seq.push_front(1).unwrap();
        seq.push_front(0).unwrap();
        assert_eq!(values(&seq), vec![0, 1, 2, 3]);
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.count(), 4);
        assert_eq!(seq.front(), Some(&0));
        assert_eq!(seq.back(), Some(&3));
        assert!(seq.verify().is_ok());
    }

    #[test]
    fn grows_chunk_when_tail_full() {
        let mut seq = small();
        seq.extend_back(0..9).unwrap();
        assert_eq!(seq.chunk_count(), 3);
        assert_eq!(seq.chunk_used().collect::<Vec<_>>(), vec![4, 4, 1]);
    }

    #[test]
    fn max_chunks_reports_capacity_exceeded() {
        let config = PoolConfig::new(2).with_max_chunks(1);
        let mut seq = PooledSequence::with_config(config).unwrap();
        seq.push_back(1).unwrap();
        seq.push_back(2).unwrap();
        let result = seq.push_back(3);
        assert_eq!(result, Err(PoolError::CapacityExceeded { max_chunks: 1 }));
        assert_eq!(values(&seq), vec![1, 2]);
    }

    #[test]
    fn erase_middle_leaves_tombstone() {
        let mut seq = small();
        seq.extend_back(0..5).unwrap();
        let mut cursor = seq.begin();
        seq.move_next(&mut cursor).unwrap();
        seq.move_next(&mut cursor).unwrap();
        let next = seq.erase(cursor).unwrap();
        assert_eq!(seq.get(&next), Ok(&3));
        assert_eq!(values(&seq), vec![0, 1, 3, 4]);
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.tombstones(), 1);
        assert_eq!(seq.allocated_slots(), 5);
        assert!(seq.verify().is_ok());
    }

    #[test]
    fn erase_head_and_tail() {
        let mut seq = small();
        seq.extend_back(0..3).unwrap();
        let after_head = seq.erase(seq.begin()).unwrap();
        assert_eq!(seq.get(&after_head), Ok(&1));
        let mut last = seq.end();
        seq.move_prev(&mut last).unwrap();
        let after_tail = seq.erase(last).unwrap();
        assert!(after_tail.is_end());
        assert_eq!(values(&seq), vec![1]);
        assert!(seq.verify().is_ok());
    }

    #[test]
    fn erase_sole_element_empties_sequence() {
        let mut seq = small();
        seq.push_back(42).unwrap();
        let next = seq.erase(seq.begin()).unwrap();
        assert!(next.is_end());
        assert_eq!(seq.len(), 0);
        assert!(seq.is_empty());
        assert!(seq.head.is_none());
        assert!(seq.tail.is_none());
        assert_eq!(seq.begin(), seq.end());
        assert!(seq.verify().is_ok());
    }

    #[test]
    fn erase_end_is_rejected() {
        let mut seq = small();
        seq.push_back(1).unwrap();
        assert_eq!(seq.erase(seq.end()), Err(PoolError::CursorAtEnd));
    }

    #[test]
    fn erase_twice_is_rejected() {
        let mut seq = small();
        seq.extend_back(0..3).unwrap();
        let cursor = seq.begin();
        seq.erase(cursor).unwrap();
        assert_eq!(seq.erase(cursor), Err(PoolError::InvalidCursor));
        assert_eq!(seq.get(&cursor), Err(PoolError::InvalidCursor));
    }

    #[test]
    fn cursor_survives_unrelated_erase() {
        let mut seq = small();
        seq.extend_back(0..4).unwrap();
        let mut third = seq.begin();
        seq.move_next(&mut third).unwrap();
        seq.move_next(&mut third).unwrap();
        seq.erase(seq.begin()).unwrap();
        seq.push_back(9).unwrap();
        assert_eq!(seq.get(&third), Ok(&2));
    }

    #[test]
    fn insert_in_middle() {
        let mut seq = small();
        seq.extend_back([1, 2, 5, 6]).unwrap();
        let mut pos = seq.begin();
        seq.move_next(&mut pos).unwrap();
        seq.move_next(&mut pos).unwrap();
        let after = seq.insert(pos, [3, 4]).unwrap();
        assert_eq!(seq.get(&after), Ok(&5));
        assert_eq!(values(&seq), vec![1, 2, 3, 4, 5, 6]);
        assert!(seq.verify().is_ok());
    }

    #[test]
    fn insert_at_begin_and_end() {
        let mut seq = small();
        seq.extend_back([3, 4]).unwrap();
        seq.insert(seq.begin(), [1, 2]).unwrap();
        let after = seq.insert(seq.end(), [5, 6, 7]).unwrap();
        assert!(after.is_end());
        assert_eq!(values(&seq), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(seq.back(), Some(&7));
        assert!(seq.verify().is_ok());
    }

    #[test]
    fn insert_into_empty() {
        let mut seq = small();
        seq.insert(seq.end(), [1, 2, 3]).unwrap();
        assert_eq!(values(&seq), vec![1, 2, 3]);
        assert!(seq.verify().is_ok());
    }

    #[test]
    fn insert_empty_range_is_noop() {
        let mut seq = small();
        seq.extend_back([1, 2]).unwrap();
        let after = seq.insert(seq.begin(), std::iter::empty()).unwrap();
        assert_eq!(after, seq.begin());
        assert_eq!(values(&seq), vec![1, 2]);
    }

    #[test]
    fn at_walks_links() {
        let mut seq = small();
        seq.extend_back(10..20).unwrap();
        assert_eq!(seq.at(0), Ok(&10));
        assert_eq!(seq.at(9), Ok(&19));
        *seq.at_mut(3).unwrap() = 99;
        assert_eq!(seq[3], 99);
        seq[4] = 98;
        assert_eq!(seq.at(4), Ok(&98));
    }

    #[test]
    fn at_out_of_range_is_reported() {
        let mut seq = small();
        seq.extend_back(0..3).unwrap();
        assert_eq!(
            seq.at(3),
            Err(PoolError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn index_out_of_range_panics() {
        let seq = small();
        let _value = seq[0];
    }

    #[test]
    fn cursor_walks_both_directions() {
        let mut seq = small();
        seq.extend_back(0..6).unwrap();
        let mut cursor = seq.end();
        let mut backwards = Vec::new();
        loop {
            seq.move_prev(&mut cursor).unwrap();
            if cursor.is_end() {
                break;
            }
            backwards.push(*seq.get(&cursor).unwrap());
        }
        assert_eq!(backwards, vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn move_next_from_end_wraps_to_head() {
        let mut seq = small();
        seq.extend_back(0..2).unwrap();
        let mut cursor = seq.end();
        seq.move_next(&mut cursor).unwrap();
        assert_eq!(cursor, seq.begin());
    }

    #[test]
    fn end_cursor_remembers_tail_at_issue() {
        let mut seq = small();
        seq.extend_back(0..2).unwrap();
        let mut end = seq.end();
        seq.push_back(7).unwrap();
        seq.move_prev(&mut end).unwrap();
        assert_eq!(seq.get(&end), Ok(&1));
    }

    #[test]
    fn get_mut_through_cursor() {
        let mut seq = small();
        seq.extend_back(0..3).unwrap();
        let cursor = seq.begin();
        *seq.get_mut(&cursor).unwrap() += 100;
        assert_eq!(seq.front(), Some(&100));
        assert_eq!(seq.get(&seq.end()), Err(PoolError::CursorAtEnd));
    }

    #[test]
    fn erase_if_removes_matches_without_compacting() {
        let mut seq = small();
        seq.extend_back(0..10).unwrap();
        let chunks = seq.chunk_count();
        let removed = erase_if(&mut seq, |v| *v % 3 == 0);
        assert_eq!(removed, 4);
        assert_eq!(values(&seq), vec![1, 2, 4, 5, 7, 8]);
        assert_eq!(seq.chunk_count(), chunks);
        assert_eq!(seq.tombstones(), 4);
        assert_eq!(seq.generation(), 0);
        assert!(seq.verify().is_ok());
    }

    #[test]
    fn erase_if_everything() {
        let mut seq = small();
        seq.extend_back(0..5).unwrap();
        assert_eq!(seq.erase_if(|_| true), 5);
        assert!(seq.is_empty());
        assert!(seq.verify().is_ok());
    }

    #[test]
    fn clear_drops_chunks_and_invalidates_cursors() {
        let mut seq = small();
        seq.extend_back(0..10).unwrap();
        let cursor = seq.begin();
        seq.clear();
        assert!(seq.is_empty());
        assert_eq!(seq.chunk_count(), 0);
        assert!(matches!(
            seq.get(&cursor),
            Err(PoolError::StaleCursor { .. })
        ));
        seq.push_back(1).unwrap();
        assert_eq!(values(&seq), vec![1]);
    }

    #[test]
    fn for_each_mut_visits_logical_order() {
        let mut seq = small();
        seq.push_back(2).unwrap();
        seq.push_front(1).unwrap();
        let mut seen = Vec::new();
        seq.for_each_mut(|v| {
            seen.push(*v);
            *v *= 10;
        });
        assert_eq!(seen, vec![1, 2]);
        assert_eq!(values(&seq), vec![10, 20]);
    }

    #[test]
    fn verify_detects_broken_backward_link() {
        let mut seq = small();
        seq.extend_back(0..3).unwrap();
        let second = seq.slot(seq.head.unwrap()).next.unwrap();
        seq.slot_mut(second).prev = None;
        assert!(matches!(seq.verify(), Err(PoolError::Corrupted { .. })));
    }

    #[test]
    fn verify_detects_len_drift() {
        let mut seq = small();
        seq.extend_back(0..3).unwrap();
        seq.len = 2;
        assert!(matches!(seq.verify(), Err(PoolError::Corrupted { .. })));
    }

    #[test]
    fn stale_cursor_rejected_past_32_bit_generation() {
        let mut seq = small();
        seq.push_back(1).unwrap();
        let cursor = seq.begin();
        // A 32-bit counter would have wrapped back to the cursor's value.
        seq.generation = 1 << 32;
        assert_eq!(
            seq.get(&cursor),
            Err(PoolError::StaleCursor {
                cursor_generation: 0,
                current_generation: 1 << 32,
            })
        );
        seq.clear();
        assert_eq!(seq.generation(), (1 << 32) + 1);
    }

    #[test]
    fn debug_lists_values() {
        let mut seq = small();
        seq.extend_back([1, 2]).unwrap();
        assert_eq!(format!("{seq:?}"), "[1, 2]");
    }
}
