//! Simulation configuration.

use platter_pool::PoolConfig;

use crate::error::SimError;

/// Parameters for a particle run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Particles spawned at start. The active population stays at this size.
    pub particle_count: usize,
    /// Timestep. Must be finite and positive.
    pub dt: f64,
    /// Steps performed by [`Simulation::run`](crate::Simulation::run).
    pub iterations: u64,
    /// Seed for the spawn RNG. Equal seeds give identical runs.
    pub seed: u64,
    /// Compact the particle pool every this many steps. `0` never compacts.
    pub erase_interval: u32,
    /// Chunk layout of the particle pool.
    pub pool: PoolConfig,
}

impl SimConfig {
    /// Default population.
    pub const DEFAULT_PARTICLE_COUNT: usize = 10_000;
    /// Default timestep.
    pub const DEFAULT_DT: f64 = 0.01;
    /// Default step count.
    pub const DEFAULT_ITERATIONS: u64 = 1_000;
    /// Default RNG seed.
    pub const DEFAULT_SEED: u64 = 1_691_169_547;

    /// Check every parameter.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidConfig`] for a non-finite or non-positive `dt`;
    /// [`SimError::Pool`] if the pool config is invalid.
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimError::InvalidConfig {
                reason: format!("dt must be finite and > 0, got {}", self.dt),
            });
        }
        self.pool.validate()?;
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: Self::DEFAULT_PARTICLE_COUNT,
            dt: Self::DEFAULT_DT,
            iterations: Self::DEFAULT_ITERATIONS,
            seed: Self::DEFAULT_SEED,
            erase_interval: 1,
            pool: PoolConfig::default(),
        }
    }
}
