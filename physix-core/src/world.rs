//! The live simulation: bodies, boundaries and the per-tick driver entry point.

use serde::Serialize;
use tracing::debug;

use crate::collision::{PairResolver, WallResolver};
use crate::dispatch::ParallelDispatcher;
use crate::error::Result;
use crate::forces::CentralField;
use crate::integrator::ForceModel;
use crate::step::{SimulationStep, TickConfig};
use crate::types::{Body, Boundary, Vec3};

/// Bodies inside a fixed set of boundaries, advanced one tick at a time.
///
/// Bodies are appended by [`World::spawn`] / [`World::push`] between ticks and
/// never removed by the core. Boundaries are fixed at construction.
#[derive(Debug, Clone)]
pub struct World<F: ForceModel = CentralField> {
    bodies: Vec<Body>,
    boundaries: Vec<Boundary>,
    force: F,
    config: TickConfig,
    pair: PairResolver,
    wall: WallResolver,
    time: f64,
    ticks: u64,
}

impl World<CentralField> {
    /// World with the default central field.
    pub fn new(boundaries: Vec<Boundary>, config: TickConfig) -> Self {
        Self::with_force(boundaries, config, CentralField::default())
    }
}

impl<F: ForceModel> World<F> {
    pub fn with_force(boundaries: Vec<Boundary>, config: TickConfig, force: F) -> Self {
        Self {
            bodies: Vec::new(),
            boundaries,
            force,
            config,
            pair: PairResolver::default(),
            wall: WallResolver::default(),
            time: 0.0,
            ticks: 0,
        }
    }

    pub fn with_resolvers(mut self, pair: PairResolver, wall: WallResolver) -> Self {
        self.pair = pair;
        self.wall = wall;
        self
    }

    /// Validate and append a new body. Returns its index.
    pub fn spawn(&mut self, position: Vec3, velocity: Vec3, radius: f64, mass: f64) -> Result<usize> {
        let body = Body::new(position, velocity, radius, mass)?;
        Ok(self.push(body))
    }

    /// Append an already validated body. Returns its index.
    pub fn push(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    /// Advance the world by `dt` with the configured substeps and workers.
    pub fn tick(&mut self, dt: f64) -> Result<()> {
        let step = SimulationStep::new(&self.boundaries, &self.force)
            .with_resolvers(self.pair, self.wall);
        ParallelDispatcher::dispatch(&step, &mut self.bodies, dt, &self.config)?;

        self.time += dt;
        self.ticks += 1;
        debug!(tick = self.ticks, time = self.time, bodies = self.bodies.len(), "tick complete");
        Ok(())
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Direct access for drivers that edit state between ticks.
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    pub fn force(&self) -> &F {
        &self.force
    }

    pub fn config(&self) -> &TickConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TickConfig) {
        self.config = config;
    }

    /// Simulated time elapsed over all completed ticks.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Read-only copy of what a renderer needs.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time: self.time,
            bodies: self
                .bodies
                .iter()
                .map(|body| BodyView {
                    position: body.position,
                    radius: body.radius,
                })
                .collect(),
            boundaries: self
                .boundaries
                .iter()
                .map(|boundary| BoundaryView {
                    position: boundary.position(),
                    orientation: boundary.orientation(),
                    half_extents: boundary.half_extents(),
                })
                .collect(),
        }
    }
}

/// Render-facing view of one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyView {
    pub position: Vec3,
    pub radius: f64,
}

/// Render-facing view of one boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundaryView {
    pub position: Vec3,
    pub orientation: Vec3,
    pub half_extents: Vec3,
}

/// State handed to a renderer after a tick. Indices match the world's bodies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub time: f64,
    pub bodies: Vec<BodyView>,
    pub boundaries: Vec<BoundaryView>,
}

// =============================================================================
// Tests
// =============================================================================
