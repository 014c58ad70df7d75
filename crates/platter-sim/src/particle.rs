//! Particle state, spawning, and the per-particle integrator.
//!
//! Positions live on the unit torus `[0, 1)²`. Integration is velocity
//! Verlet with a periodic wrap; a particle that crosses an edge is reported
//! so the caller can migrate it.

use platter_pool::PooledSequence;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::config::SimConfig;
use crate::error::SimError;

/// Lifecycle of a particle inside the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveState {
    /// Integrated every step.
    Active,
    /// Superseded by a migrated copy; erased on the next step.
    Removing,
}

/// One point mass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Spawn index; copies made on migration keep it.
    pub label: u32,
    /// Position `(x, y)` in `[0, 1)²`.
    pub position: [f64; 2],
    /// Velocity `(vx, vy)`.
    pub velocity: [f64; 2],
    /// Acceleration used for this step.
    pub acceleration: [f64; 2],
    /// Acceleration for the next step.
    pub acc_next: [f64; 2],
    /// Wrapped in x during the last step.
    pub wrap_x: bool,
    /// Wrapped in y during the last step.
    pub wrap_y: bool,
    /// Lifecycle state.
    pub active: ActiveState,
}

impl Particle {
    /// An active particle at rest acceleration.
    pub fn new(label: u32, position: [f64; 2], velocity: [f64; 2]) -> Self {
        Self {
            label,
            position,
            velocity,
            acceleration: [0.0; 2],
            acc_next: [0.0; 2],
            wrap_x: false,
            wrap_y: false,
            active: ActiveState::Active,
        }
    }

    /// Whether the particle is integrated.
    pub fn is_active(&self) -> bool {
        self.active == ActiveState::Active
    }
}

/// Map `x` back into `[0, 1)`, reporting whether it moved.
fn wrap_unit(x: f64) -> (f64, bool) {
    let mut wrapped = x.rem_euclid(1.0);
    // A tiny negative `x` rounds up to exactly 1.0.
    if wrapped >= 1.0 {
        wrapped = 0.0;
    }
    (wrapped, wrapped != x)
}

/// Advance `particle` by `dt` and apply the periodic boundary.
///
/// Returns `true` if the particle wrapped in either axis.
pub fn integrate(particle: &mut Particle, dt: f64) -> bool {
    for axis in 0..2 {
        particle.position[axis] +=
            particle.velocity[axis] * dt + 0.5 * particle.acceleration[axis] * dt * dt;
    }
    let (x, wrap_x) = wrap_unit(particle.position[0]);
    let (y, wrap_y) = wrap_unit(particle.position[1]);
    particle.position = [x, y];
    particle.wrap_x = wrap_x;
    particle.wrap_y = wrap_y;

    for axis in 0..2 {
        particle.velocity[axis] +=
            0.5 * (particle.acceleration[axis] + particle.acc_next[axis]) * dt;
        particle.acceleration[axis] = particle.acc_next[axis];
    }
    wrap_x || wrap_y
}

/// Spawn `config.particle_count` particles with uniform positions in
/// `[0, 1)²` and velocities in `[-0.1, 0.1)²`, seeded from `config.seed`.
///
/// # Errors
///
/// [`SimError::Pool`] if the pool config is invalid or allocation fails.
pub fn spawn_particles(config: &SimConfig) -> Result<PooledSequence<Particle>, SimError> {
    let mut particles = PooledSequence::with_config(config.pool.clone())?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    for label in 0..config.particle_count {
        let position = [rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)];
        let velocity = [rng.random_range(-0.1..0.1), rng.random_range(-0.1..0.1)];
        particles.push_back(Particle::new(label as u32, position, velocity))?;
    }
    Ok(particles)
}
