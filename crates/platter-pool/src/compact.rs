//! Compaction: repack live nodes into the fewest chunks.
//!
//! The pass visits live nodes in logical order and moves the k-th one into
//! flat position k (chunk `k / C`, slot `k % C`), which is first-fit packing
//! from the front of the chunk list. Every chunk but the last is always full
//! (slots are bump-allocated from the tail chunk only), so flat positions
//! below the allocated-slot count always exist.
//!
//! Placement is an in-place swap. Whatever occupied the target slot moves
//! to the vacated source slot; if it is a live, not-yet-visited node, its
//! neighbours are repointed so the forward walk can still reach it. After
//! the walk the tail of the flat range holds only tombstones; those are
//! dropped, empty chunks are released, and the packed prefix is relinked in
//! storage order, which now equals logical order.

use crate::chunk::NodeRef;
use crate::metrics::CompactionReport;
use crate::sequence::PooledSequence;

impl<T> PooledSequence<T> {
    /// Repack live nodes into `ceil(len / C)` chunks and release the rest.
    ///
    /// Logical order, values, and `len()` are unchanged. Every outstanding
    /// cursor is invalidated (the generation advances). O(n) in live nodes
    /// plus O(k) in chunks.
    pub fn compact(&mut self) -> CompactionReport {
        self.pack(None).0
    }

    /// Compact, reporting where the node at `track` ended up.
    pub(crate) fn pack(&mut self, mut track: Option<NodeRef>) -> (CompactionReport, Option<NodeRef>) {
        let capacity = self.config.chunk_capacity as usize;
        let chunks_before = self.chunks.len();
        let allocated = self.allocated_slots();
        let mut tracked = None;

        let mut target = 0usize;
        let mut cursor = self.head;
        while let Some(src) = cursor {
            let dst = NodeRef::from_position(target, capacity);
            if Some(src) == track {
                tracked = Some(dst);
                // Its old address is about to hold the displaced node.
                track = None;
            }
            let mut next = self.slot(src).next;
            if src != dst {
                self.swap_slots(src, dst);
                if track == Some(dst) {
                    track = Some(src);
                }
                let displaced = self.slot(src);
                if displaced.live {
                    let (prev, after) = (displaced.prev, displaced.next);
                    if prev == Some(src) {
                        // Displaced node is the successor of the one just placed.
                        next = Some(src);
                        self.slot_mut(src).prev = Some(dst);
                    } else if let Some(p) = prev {
                        self.slot_mut(p).next = Some(src);
                    }
                    if let Some(a) = after {
                        self.slot_mut(a).prev = Some(src);
                    }
                }
            }
            cursor = next;
            target += 1;
        }
        let live = target;
        debug_assert_eq!(live, self.len);

        for (index, chunk) in self.chunks.iter_mut().enumerate() {
            let used = live.saturating_sub(index * capacity).min(capacity);
            chunk.truncate(used);
        }
        self.chunks.retain(|chunk| chunk.used() > 0);

        let mut prev: Option<NodeRef> = None;
        for position in 0..live {
            let node = NodeRef::from_position(position, capacity);
            {
                let slot = self.slot_mut(node);
                slot.prev = prev;
                slot.next = None;
            }
            if let Some(p) = prev {
                self.slot_mut(p).next = Some(node);
            }
            prev = Some(node);
        }
        self.head = if live > 0 {
            Some(NodeRef::new(0, 0))
        } else {
            None
        };
        self.tail = prev;

        let report = CompactionReport {
            chunks_before,
            chunks_after: self.chunks.len(),
            tombstones_reclaimed: allocated - live,
            generation: self.generation.wrapping_add(1),
        };
        self.generation = report.generation;
        self.compactions += 1;
        self.slots_reclaimed += report.tombstones_reclaimed as u64;
        self.chunks_freed += report.chunks_freed() as u64;
        (report, tracked)
    }

    fn swap_slots(&mut self, a: NodeRef, b: NodeRef) {
        if a.chunk == b.chunk {
            self.chunks[a.chunk as usize].swap(a.slot, b.slot);
            return;
        }
        let (lo, hi) = if a.chunk < b.chunk { (a, b) } else { (b, a) };
        let (left, right) = self.chunks.split_at_mut(hi.chunk as usize);
        std::mem::swap(
            left[lo.chunk as usize].slot_mut(lo.slot),
            right[0].slot_mut(hi.slot),
        );
    }
}
