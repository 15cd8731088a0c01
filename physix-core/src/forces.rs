//! Force models acting on bodies.
//!
//! The default model is a linear central field, `a = -k·x`, which pulls every
//! body toward the origin like a spring anchored there. It is independent of
//! mass and velocity. With `k = 10` a free body oscillates with a period of
//! `2π/√10 ≈ 2s`.

use serde::{Deserialize, Serialize};

use crate::integrator::ForceModel;
use crate::types::{constants, Body, Vec3};

/// Linear restoring field toward the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentralField {
    pub stiffness: f64,
}

impl Default for CentralField {
    fn default() -> Self {
        Self {
            stiffness: constants::CENTRAL_STIFFNESS,
        }
    }
}

impl CentralField {
    pub fn new(stiffness: f64) -> Self {
        Self { stiffness }
    }
}

impl ForceModel for CentralField {
    fn acceleration(&self, body: &Body) -> Vec3 {
        body.position * -self.stiffness
    }
}

/// No external force; bodies move in straight lines between contacts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoForce;

impl ForceModel for NoForce {
    fn acceleration(&self, _body: &Body) -> Vec3 {
        Vec3::zeros()
    }
}

/// Writes a force model's acceleration back into a body.
pub struct ForceField;

impl ForceField {
    /// Replace the body's acceleration with the model's value at its current
    /// position. Runs for fixed bodies too.
    pub fn recompute<F: ForceModel + ?Sized>(body: &mut Body, model: &F) {
        body.acceleration = model.acceleration(body);
    }
}

// =============================================================================
// Tests
// =============================================================================
