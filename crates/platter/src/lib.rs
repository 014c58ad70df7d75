//! Platter: chunk-pooled linked sequences with explicit compaction.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Platter sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use platter::prelude::*;
//!
//! let mut seq = PooledSequence::with_config(PoolConfig::new(4)).unwrap();
//! seq.extend_back(0..10).unwrap();
//!
//! // Lazy erase: unlinks only, slots stay allocated as tombstones.
//! let removed = seq.erase_if(|v| *v % 2 == 0);
//! assert_eq!(removed, 5);
//! assert_eq!(seq.tombstones(), 5);
//!
//! // Compaction repacks into ceil(5 / 4) = 2 chunks.
//! let report = seq.compact();
//! assert_eq!(report.chunks_after, 2);
//! assert_eq!(seq.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 7, 9]);
//!
//! // Cursors issued before the compaction are rejected; take a fresh one.
//! let mut cursor = seq.begin();
//! seq.move_next(&mut cursor).unwrap();
//! assert_eq!(seq.get(&cursor), Ok(&3));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`pool`] | `platter-pool` | `PooledSequence`, `Cursor`, compaction, config, errors |
//! | [`sim`] | `platter-sim` | Particle state, integrator, `Simulation` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Pooled sequence, cursors, and compaction (`platter-pool`).
pub use platter_pool as pool;

/// Particle simulation over a pooled sequence (`platter-sim`).
pub use platter_sim as sim;

/// Common imports for typical Platter usage.
///
/// ```rust
/// use platter::prelude::*;
/// ```
pub mod prelude {
    pub use platter_pool::{
        erase_if, CompactionReport, Cursor, PoolConfig, PoolError, PoolStats, PooledSequence,
    };
    pub use platter_sim::{Particle, SimConfig, SimError, Simulation};
}
