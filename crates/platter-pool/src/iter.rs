//! Borrowing iterator over live elements in logical order.

use std::iter::FusedIterator;

use crate::chunk::NodeRef;
use crate::sequence::PooledSequence;

/// Iterator returned by [`PooledSequence::iter`].
///
/// Follows forward links from the front and backward links from the back;
/// the remaining count keeps the two ends from crossing.
pub struct Iter<'a, T> {
    seq: &'a PooledSequence<T>,
    front: Option<NodeRef>,
    back: Option<NodeRef>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(
        seq: &'a PooledSequence<T>,
        front: Option<NodeRef>,
        back: Option<NodeRef>,
        remaining: usize,
    ) -> Self {
        Self {
            seq,
            front,
            back,
            remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.seq.slot(self.front?);
        self.front = slot.next;
        self.remaining -= 1;
        Some(&slot.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.seq.slot(self.back?);
        self.back = slot.prev;
        self.remaining -= 1;
        Some(&slot.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

#[cfg(test)]
mod tests {
    use crate::{PoolConfig, PooledSequence};

    fn seq_of(n: i32) -> PooledSequence<i32> {
        let mut seq = PooledSequence::with_config(PoolConfig::new(3)).unwrap();
        seq.extend_back(0..n).unwrap();
        seq
    }

    #[test]
    fn forward_and_backward() {
        let seq = seq_of(7);
        assert_eq!(seq.iter().copied().collect::<Vec<_>>(), (0..7).collect::<Vec<_>>());
        assert_eq!(
            seq.iter().rev().copied().collect::<Vec<_>>(),
            (0..7).rev().collect::<Vec<_>>()
        );
    }

    #[test]
    fn ends_meet_in_the_middle() {
        let seq = seq_of(5);
        let mut it = seq.iter();
        assert_eq!(it.next(), Some(&0));
        assert_eq!(it.next_back(), Some(&4));
        assert_eq!(it.len(), 3);
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&3));
        assert_eq!(it.next(), Some(&2));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn skips_tombstones() {
        let mut seq = seq_of(6);
        seq.erase_if(|v| *v % 2 == 1);
        assert_eq!(seq.iter().copied().collect::<Vec<_>>(), vec![0, 2, 4]);
        assert_eq!(seq.iter().len(), 3);
    }

    #[test]
    fn into_iterator_for_reference() {
        let seq = seq_of(3);
        let mut sum = 0;
        for v in &seq {
            sum += v;
        }
        assert_eq!(sum, 3);
    }
}
