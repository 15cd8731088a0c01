//! One tick of simulation, split into substeps.
//!
//! Every substep is double-buffered: bodies are advanced from an immutable
//! snapshot of the previous substep and written into the live buffer, so the
//! result for body `i` depends only on the snapshot and never on the order in
//! which other bodies are processed. Within a substep, each body runs
//!
//! 1. pair resolution against every other body in the snapshot
//! 2. wall resolution against every boundary
//! 3. integration with the acceleration stored by the previous substep
//! 4. acceleration recompute from the new position
//!
//! In step 1 the partner is a throwaway copy; its half of the response is
//! applied when the partner runs its own pass. Each unordered pair is thus
//! resolved once per substep, from both sides, against the same state.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::collision::{PairResolver, WallResolver};
use crate::error::{PhysicsError, Result};
use crate::forces::ForceField;
use crate::integrator::{ForceModel, SemiImplicitEuler};
use crate::types::{Body, Boundary};

/// Per-tick execution settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Substeps per tick; each advances `dt / substeps`.
    pub substeps: usize,
    /// Worker threads used by the dispatcher.
    pub workers: usize,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            substeps: 5,
            workers: 10,
        }
    }
}

impl TickConfig {
    pub fn new(substeps: usize, workers: usize) -> Self {
        Self { substeps, workers }
    }

    /// Check counts and the tick duration before running a tick.
    pub fn validate(&self, dt: f64) -> Result<()> {
        if self.substeps == 0 {
            return Err(PhysicsError::invalid_tick("substeps must be >= 1"));
        }
        if self.workers == 0 {
            return Err(PhysicsError::invalid_tick("workers must be >= 1"));
        }
        if !dt.is_finite() || dt < 0.0 {
            return Err(PhysicsError::invalid_tick(
                "tick duration must be finite and >= 0",
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn substep_dt(&self, dt: f64) -> f64 {
        dt / self.substeps as f64
    }
}

/// The per-body substep kernel shared by the sequential and parallel paths.
pub struct SimulationStep<'a, F: ?Sized> {
    boundaries: &'a [Boundary],
    force: &'a F,
    pair: PairResolver,
    wall: WallResolver,
}

impl<'a, F: ForceModel + ?Sized> SimulationStep<'a, F> {
    pub fn new(boundaries: &'a [Boundary], force: &'a F) -> Self {
        Self {
            boundaries,
            force,
            pair: PairResolver::default(),
            wall: WallResolver::default(),
        }
    }

    pub fn with_resolvers(mut self, pair: PairResolver, wall: WallResolver) -> Self {
        self.pair = pair;
        self.wall = wall;
        self
    }

    /// Compute the next state of `snapshot[index]` for one substep of `dt`.
    pub fn advance_body(&self, index: usize, snapshot: &[Body], dt: f64) -> Body {
        let mut body = snapshot[index];

        for (other_index, other) in snapshot.iter().enumerate() {
            if other_index == index {
                continue;
            }
            let mut partner = *other;
            self.pair.resolve(&mut body, &mut partner);
        }

        self.wall.resolve_all(&mut body, self.boundaries);
        SemiImplicitEuler::integrate(&mut body, dt);
        ForceField::recompute(&mut body, self.force);
        body
    }

    /// Advance the bodies `start .. start + out.len()` of `snapshot` into `out`.
    pub fn substep_range(&self, snapshot: &[Body], out: &mut [Body], start: usize, dt: f64) {
        for (offset, slot) in out.iter_mut().enumerate() {
            *slot = self.advance_body(start + offset, snapshot, dt);
        }
    }

    /// Run a whole tick on the calling thread.
    ///
    /// Produces the same trajectory as [`crate::dispatch::ParallelDispatcher`]
    /// for any worker count.
    pub fn run(&self, bodies: &mut [Body], dt: f64, config: &TickConfig) -> Result<()> {
        config.validate(dt)?;
        let sub_dt = config.substep_dt(dt);
        let mut snapshot = bodies.to_vec();

        for substep in 0..config.substeps {
            snapshot.copy_from_slice(bodies);
            self.substep_range(&snapshot, bodies, 0, sub_dt);
            check_finite(bodies, substep)?;
        }
        Ok(())
    }
}

/// Fail with [`PhysicsError::NumericInstability`] on the first non-finite body.
pub(crate) fn check_finite(bodies: &[Body], substep: usize) -> Result<()> {
    match bodies.iter().position(|body| !body.is_finite()) {
        Some(index) => {
            warn!(index, substep, "body state became non-finite");
            Err(PhysicsError::NumericInstability { index, substep })
        }
        None => Ok(()),
    }
}

// =============================================================================
// Tests
// =============================================================================
