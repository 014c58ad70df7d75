//! Chunk-pooled doubly linked sequences for Platter simulations.
//!
//! Nodes are not allocated one at a time: they are carved out of
//! fixed-capacity chunks, and an explicit compaction pass repacks live nodes
//! into the minimum number of full chunks. Erase is lazy: it only unlinks,
//! leaving a tombstone that the next compaction reclaims.
//!
//! # Architecture
//!
//! ```text
//! PooledSequence<T>
//! ├── Vec<Chunk<T>>   (chunk list; appends go to the tail chunk)
//! │   └── Vec<Slot<T>>   (C slots reserved up front, bump-allocated)
//! │       └── Slot { value, prev, next, live }
//! ├── head / tail     (logical ends, NodeRef = chunk index + slot index)
//! ├── len             (live count)
//! └── generation      (bumped by compaction and clear)
//! ```
//!
//! Logical order lives only in the `prev`/`next` links and may cross chunks
//! freely. Storage order coincides with it only right after compaction.
//!
//! # Cursor validity
//!
//! [`Cursor`]s are copyable positions that stay valid across pushes,
//! inserts, and erases of *other* elements. Compaction relocates payloads,
//! so it advances the generation; cursors from an older generation are
//! rejected with [`PoolError::StaleCursor`] instead of reading moved data.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

mod chunk;
mod compact;
pub mod config;
pub mod cursor;
pub mod error;
pub mod iter;
pub mod metrics;
pub mod sequence;

// Public re-exports for the primary API surface.
pub use config::PoolConfig;
pub use cursor::Cursor;
pub use error::PoolError;
pub use iter::Iter;
pub use metrics::{CompactionReport, PoolStats};
pub use sequence::{erase_if, PooledSequence};
