//! Test utilities and fixtures for Platter development.
//!
//! Provides sequence builders, layout assertions shared by the pool and
//! simulation test suites, and [`DropTally`] for observing exactly when
//! payloads are released.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;
use std::rc::Rc;

use platter_pool::{PoolConfig, PooledSequence};

/// Build a sequence with the given chunk capacity holding `values` in order.
///
/// # Panics
///
/// Panics if the capacity is invalid or allocation fails.
pub fn sequence_of<T, I>(chunk_capacity: u32, values: I) -> PooledSequence<T>
where
    I: IntoIterator<Item = T>,
{
    let mut seq = PooledSequence::with_config(PoolConfig::new(chunk_capacity))
        .expect("valid chunk capacity");
    seq.extend_back(values).expect("allocation succeeds");
    seq
}

/// Clone the live values out in logical order.
pub fn collect_values<T: Clone>(seq: &PooledSequence<T>) -> Vec<T> {
    seq.iter().cloned().collect()
}

/// Assert that links verify and the O(1) and O(n) counts agree.
pub fn assert_consistent<T>(seq: &PooledSequence<T>) {
    if let Err(err) = seq.verify() {
        panic!("sequence failed verification: {err}");
    }
    assert_eq!(seq.len(), seq.count(), "len() and count() disagree");
}

/// Assert the post-compaction layout: exactly `ceil(len / C)` chunks, all
/// full except possibly the last, and no tombstones.
pub fn assert_packed<T>(seq: &PooledSequence<T>) {
    let capacity = seq.chunk_capacity() as usize;
    let used: Vec<usize> = seq.chunk_used().collect();
    assert_eq!(
        used.len(),
        seq.len().div_ceil(capacity),
        "chunk count is not minimal: {used:?}"
    );
    if let Some((last, full)) = used.split_last() {
        assert!(
            full.iter().all(|&u| u == capacity),
            "non-final chunk not full: {used:?}"
        );
        assert!(*last > 0, "empty chunk retained: {used:?}");
    }
    assert_eq!(seq.tombstones(), 0, "tombstones survived compaction");
}

/// Shared counter of dropped [`Tracked`] payloads.
///
/// Cloning shares the counter.
#[derive(Clone, Default)]
pub struct DropTally {
    dropped: Rc<Cell<usize>>,
}

impl DropTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// A payload carrying `value` that reports to this tally when dropped.
    pub fn track(&self, value: u32) -> Tracked {
        Tracked {
            value,
            tally: Rc::clone(&self.dropped),
        }
    }

    /// Number of tracked payloads dropped so far.
    pub fn dropped(&self) -> usize {
        self.dropped.get()
    }
}

/// Payload that counts its own drop.
#[derive(Debug)]
pub struct Tracked {
    pub value: u32,
    tally: Rc<Cell<usize>>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.tally.set(self.tally.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_drops() {
        let tally = DropTally::new();
        let a = tally.track(1);
        let b = tally.track(2);
        assert_eq!(tally.dropped(), 0);
        drop(a);
        assert_eq!(tally.dropped(), 1);
        drop(b);
        assert_eq!(tally.dropped(), 2);
    }

    #[test]
    fn sequence_of_preserves_order() {
        let seq = sequence_of(3, 0..7);
        assert_eq!(collect_values(&seq), (0..7).collect::<Vec<_>>());
        assert_consistent(&seq);
    }

    #[test]
    fn fresh_push_back_sequence_is_packed() {
        let seq = sequence_of(4, 0..10);
        assert_packed(&seq);
    }
}
