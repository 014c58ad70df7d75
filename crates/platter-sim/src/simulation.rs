//! The timestep loop over a pooled particle sequence.
//!
//! Each step walks the pool once with a cursor: particles left in
//! `Removing` state by the previous step are erased (lazily, as
//! tombstones), active particles are integrated, and every particle that
//! wrapped is copied to a staging buffer while the original is retired.
//! The staged copies are spliced back before `end()`, so migrated particles
//! move to the back of the logical order. Every `erase_interval` steps the
//! pool is compacted to reclaim the tombstones.

use std::time::Instant;

use platter_pool::PooledSequence;
use smallvec::SmallVec;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::metrics::{RunMetrics, StepMetrics};
use crate::particle::{integrate, spawn_particles, ActiveState, Particle};

/// Wrapped particles staged per step before re-insertion.
type Staging = SmallVec<[Particle; 16]>;

/// A particle run: configuration, particle pool, and step counter.
pub struct Simulation {
    config: SimConfig,
    particles: PooledSequence<Particle>,
    staged: Staging,
    step_index: u64,
}

impl Simulation {
    /// Validate `config` and spawn the initial population.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidConfig`] or [`SimError::Pool`].
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let particles = spawn_particles(&config)?;
        Ok(Self {
            config,
            particles,
            staged: Staging::new(),
            step_index: 0,
        })
    }

    /// The configuration this run was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The particle pool, including particles awaiting removal.
    pub fn particles(&self) -> &PooledSequence<Particle> {
        &self.particles
    }

    /// Steps performed so far.
    pub fn step_index(&self) -> u64 {
        self.step_index
    }

    /// Particles currently in `Active` state.
    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_active()).count()
    }

    /// Advance every active particle by one timestep.
    ///
    /// # Errors
    ///
    /// [`SimError::Pool`] if re-inserting migrated particles needs a chunk
    /// that cannot be allocated.
    pub fn step(&mut self) -> Result<StepMetrics, SimError> {
        let start = Instant::now();
        let mut metrics = StepMetrics::default();
        let dt = self.config.dt;

        let mut cursor = self.particles.begin();
        while !cursor.is_end() {
            let particle = self.particles.get_mut(&cursor)?;
            if particle.active != ActiveState::Active {
                cursor = self.particles.erase(cursor)?;
                metrics.erased += 1;
                continue;
            }
            if integrate(particle, dt) {
                self.staged.push(*particle);
                particle.active = ActiveState::Removing;
                metrics.wrapped += 1;
            }
            self.particles.move_next(&mut cursor)?;
        }

        metrics.reinserted = self.staged.len();
        let end = self.particles.end();
        self.particles.insert(end, self.staged.drain(..))?;

        self.step_index += 1;
        let interval = u64::from(self.config.erase_interval);
        if interval > 0 && self.step_index % interval == 0 {
            let report = self.particles.compact();
            metrics.compacted = true;
            metrics.slots_reclaimed = report.tombstones_reclaimed;
        }

        metrics.live = self.particles.len();
        metrics.chunk_count = self.particles.chunk_count();
        metrics.total_us = start.elapsed().as_micros() as u64;
        Ok(metrics)
    }

    /// Perform `config.iterations` steps.
    ///
    /// # Errors
    ///
    /// The first error returned by [`step`](Self::step).
    pub fn run(&mut self) -> Result<RunMetrics, SimError> {
        let start = Instant::now();
        let mut run = RunMetrics::default();
        for _ in 0..self.config.iterations {
            let step = self.step()?;
            run.record(&step);
        }
        run.total_us = start.elapsed().as_micros() as u64;
        Ok(run)
    }
}
