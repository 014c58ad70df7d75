//! Bidirectional cursors over the logical sequence.
//!
//! A [`Cursor`] is a copyable position handle. It does not borrow the
//! sequence; navigation and dereference go through
//! [`PooledSequence`](crate::PooledSequence) methods, which also reject
//! cursors issued before the most recent compaction.

use std::fmt;

use crate::chunk::NodeRef;

/// A logical position in a [`PooledSequence`](crate::PooledSequence).
///
/// `current == None` is the end position. The tail seen when the cursor was
/// issued is carried along so that stepping back from end lands on it:
/// there is no node at end to follow a link from.
///
/// Equality compares only the position, not the remembered tail or the
/// generation.
#[derive(Clone, Copy, Debug)]
pub struct Cursor {
    pub(crate) current: Option<NodeRef>,
    pub(crate) tail: Option<NodeRef>,
    pub(crate) generation: u64,
}

impl Cursor {
    pub(crate) fn new(current: Option<NodeRef>, tail: Option<NodeRef>, generation: u64) -> Self {
        Self {
            current,
            tail,
            generation,
        }
    }

    /// Whether this cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// The sequence generation this cursor was issued in.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl Eq for Cursor {}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.current {
            Some(node) => write!(
                f,
                "Cursor(gen={}, chunk={}, slot={})",
                self.generation, node.chunk, node.slot
            ),
            None => write!(f, "Cursor(gen={}, end)", self.generation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_tail_and_generation() {
        let a = Cursor::new(Some(NodeRef::new(0, 1)), None, 0);
        let b = Cursor::new(Some(NodeRef::new(0, 1)), Some(NodeRef::new(2, 2)), 7);
        assert_eq!(a, b);
    }

    #[test]
    fn end_cursors_compare_equal() {
        let a = Cursor::new(None, Some(NodeRef::new(0, 0)), 0);
        let b = Cursor::new(None, None, 0);
        assert!(a.is_end());
        assert_eq!(a, b);
        assert_ne!(a, Cursor::new(Some(NodeRef::new(0, 0)), None, 0));
    }

    #[test]
    fn display_end() {
        let c = Cursor::new(None, None, 4);
        assert_eq!(c.to_string(), "Cursor(gen=4, end)");
    }
}
