//! Periodic-boundary particle simulation over a Platter pooled sequence.
//!
//! Particles live in a [`PooledSequence`](platter_pool::PooledSequence).
//! A step erases retired particles, integrates the rest with velocity
//! Verlet on the unit torus, and migrates wrapped particles to the back of
//! the sequence. The pool is compacted on a configurable interval.
//!
//! Runs are deterministic for a given [`SimConfig::seed`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod particle;
pub mod simulation;

pub use config::SimConfig;
pub use error::SimError;
pub use metrics::{RunMetrics, StepMetrics};
pub use particle::{integrate, spawn_particles, ActiveState, Particle};
pub use simulation::Simulation;
