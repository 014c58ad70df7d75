//! Benchmark profiles and workloads for the Platter pooled sequence.
//!
//! - [`reference_profile`]: 10K particles, default chunk capacity.
//! - [`stress_profile`]: 100K particles.
//! - [`churn_mask`]: deterministic erase pattern shared by the container
//!   comparisons so every container sees the same removals.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use platter_pool::PoolConfig;
use platter_sim::SimConfig;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// The reference run: 10K particles, compaction every step.
pub fn reference_profile(seed: u64) -> SimConfig {
    SimConfig {
        particle_count: 10_000,
        dt: 0.01,
        iterations: 100,
        seed,
        erase_interval: 1,
        pool: PoolConfig::default(),
    }
}

/// The stress run: 100K particles, compaction every 10 steps.
pub fn stress_profile(seed: u64) -> SimConfig {
    SimConfig {
        particle_count: 100_000,
        iterations: 20,
        erase_interval: 10,
        ..reference_profile(seed)
    }
}

/// `len` flags, each `true` with probability `erase_fraction`.
pub fn churn_mask(len: usize, erase_fraction: f64, seed: u64) -> Vec<bool> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_bool(erase_fraction)).collect()
}
