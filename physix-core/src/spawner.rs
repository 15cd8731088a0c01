//! Timed creation of new bodies.
//!
//! The spawner owns its timer and random generator, so two spawners built
//! with the same seed and fed the same tick durations produce the same
//! bodies. It is driven from outside the core between ticks.
//!
//! Positions are uniform inside a cube around the origin. Velocity components
//! are drawn from a normal distribution whose default mean of `-5` gives the
//! new bodies a common drift along `-x`, `-y` and `-z`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PhysicsError, Result};
use crate::integrator::ForceModel;
use crate::types::Vec3;
use crate::world::World;

/// Spawn cadence and the distribution of new bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Seconds between spawns.
    pub interval: f64,
    /// No bodies are spawned once the world holds this many.
    pub max_bodies: usize,
    /// Positions are uniform in `[-region, region]³`.
    pub region: f64,
    /// Mean of each velocity component.
    pub velocity_mean: f64,
    /// Standard deviation of each velocity component.
    pub velocity_std_dev: f64,
    pub radius: f64,
    pub mass: f64,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            interval: 0.5,
            max_bodies: 50,
            region: 20.0,
            velocity_mean: -5.0,
            velocity_std_dev: 5.0,
            radius: 1.0,
            mass: 1.0,
        }
    }
}

impl SpawnerConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.interval.is_finite() || self.interval <= 0.0 {
            return Err(PhysicsError::invalid_spawner("interval must be finite and > 0"));
        }
        if !self.region.is_finite() || self.region < 0.0 {
            return Err(PhysicsError::invalid_spawner("region must be finite and >= 0"));
        }
        if !self.velocity_mean.is_finite() {
            return Err(PhysicsError::invalid_spawner("velocity_mean must be finite"));
        }
        if !self.velocity_std_dev.is_finite() || self.velocity_std_dev < 0.0 {
            return Err(PhysicsError::invalid_spawner(
                "velocity_std_dev must be finite and >= 0",
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(PhysicsError::invalid_spawner("radius must be finite and > 0"));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(PhysicsError::invalid_spawner("mass must be finite and > 0"));
        }
        Ok(())
    }
}

/// Adds bodies to a world at a fixed cadence up to a cap.
#[derive(Debug, Clone)]
pub struct Spawner {
    config: SpawnerConfig,
    timer: f64,
    spawned: u64,
    rng: StdRng,
    velocity: Normal<f64>,
}

impl Spawner {
    /// Create a spawner. `None` draws a seed from the thread-local generator.
    pub fn new(config: SpawnerConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        let velocity = Normal::new(config.velocity_mean, config.velocity_std_dev)
            .map_err(|err| PhysicsError::invalid_spawner(err.to_string()))?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::rng().random()),
        };
        Ok(Self {
            config,
            timer: 0.0,
            spawned: 0,
            rng,
            velocity,
        })
    }

    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    /// Total bodies created by this spawner.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Let `dt` elapse and spawn every body that became due.
    ///
    /// Time that accrues while the world is at its cap is kept, so several
    /// bodies may appear at once if the cap is later raised. Returns the number
    /// of bodies created.
    ///
    /// The timer is decremented by one interval per body, so an interval that
    /// is not exactly representable in binary accumulates rounding error. With
    /// `interval = 0.1`, `advance(20.0)` can leave the timer just below `0.1`
    /// and create 199 bodies instead of 200.
    pub fn advance<F: ForceModel>(&mut self, dt: f64, world: &mut World<F>) -> Result<usize> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(PhysicsError::invalid_tick(
                "tick duration must be finite and >= 0",
            ));
        }
        self.timer += dt;

        let mut created = 0;
        while self.timer >= self.config.interval && world.body_count() < self.config.max_bodies {
            let position = self.sample_position();
            let velocity = self.sample_velocity();
            let index = world.spawn(position, velocity, self.config.radius, self.config.mass)?;
            self.timer -= self.config.interval;
            self.spawned += 1;
            created += 1;
            debug!(index, x = position.x, y = position.y, z = position.z, "spawned body");
        }
        Ok(created)
    }

    fn sample_position(&mut self) -> Vec3 {
        let extent = self.config.region;
        Vec3::new(
            self.rng.random_range(-extent..=extent),
            self.rng.random_range(-extent..=extent),
            self.rng.random_range(-extent..=extent),
        )
    }

    fn sample_velocity(&mut self) -> Vec3 {
        Vec3::new(
            self.velocity.sample(&mut self.rng),
            self.velocity.sample(&mut self.rng),
            self.velocity.sample(&mut self.rng),
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
