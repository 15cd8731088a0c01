//! Collision response.
//!
//! ## Sphere pairs
//!
//! Overlap is removed by pushing both spheres apart by half the penetration
//! each, regardless of mass. Velocities then receive an equal and opposite
//! impulse along the contact normal, scaled by inverse mass:
//!
//! ```text
//! vn = (v_a - v_b) · n
//! j  = -(1 + e) · vn / (1/m_a + 1/m_b)
//! v_a += j·n / m_a
//! v_b -= j·n / m_b
//! ```
//!
//! Separating pairs (`vn > 0`) keep their velocities.
//!
//! ## Walls
//!
//! A sphere is tested against the six faces of each boundary. A penetrating
//! sphere is pushed out along the face normal by its penetration plus a fixed
//! margin, then the normal component of its velocity is reflected.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::detection::{face_distance, face_in_bounds, sphere_contact};
use crate::types::{constants, Body, Boundary};

/// Sphere-sphere impulse resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairResolver {
    pub restitution: f64,
}

impl Default for PairResolver {
    fn default() -> Self {
        Self {
            restitution: constants::RESTITUTION,
        }
    }
}

impl PairResolver {
    pub fn new(restitution: f64) -> Self {
        Self { restitution }
    }

    /// Resolve overlap between `a` and `b`, mutating both.
    ///
    /// Returns `true` if the pair was in contact.
    pub fn resolve(&self, a: &mut Body, b: &mut Body) -> bool {
        let Some(contact) = sphere_contact(a, b) else {
            return false;
        };
        let normal = contact.normal;

        let correction = normal * (0.5 * contact.penetration);
        a.position += correction;
        b.position -= correction;

        let vel_along_normal = (a.velocity - b.velocity).dot(&normal);
        if vel_along_normal > 0.0 {
            return true;
        }

        let inv_a = a.inverse_mass();
        let inv_b = b.inverse_mass();
        let j = -(1.0 + self.restitution) * vel_along_normal / (inv_a + inv_b);
        let impulse = normal * j;

        a.velocity += impulse * inv_a;
        b.velocity -= impulse * inv_b;

        trace!(
            penetration = contact.penetration,
            impulse = j,
            "resolved sphere contact"
        );
        true
    }
}

/// Which wall contacts get their normal velocity reflected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallResponse {
    /// Reflect on every penetrating contact, even when the sphere is already
    /// moving away from the face. A receding sphere is turned back toward it.
    #[default]
    AlwaysReflect,
    /// Reflect only when the sphere moves toward the face from its side.
    ApproachingOnly,
}

/// Sphere-boundary resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallResolver {
    pub restitution: f64,
    /// Distance pushed past the contact plane on top of the penetration.
    pub margin: f64,
    pub response: WallResponse,
}

impl Default for WallResolver {
    fn default() -> Self {
        Self {
            restitution: constants::RESTITUTION,
            margin: constants::WALL_MARGIN,
            response: WallResponse::AlwaysReflect,
        }
    }
}

impl WallResolver {
    pub fn new(restitution: f64, margin: f64, response: WallResponse) -> Self {
        Self {
            restitution,
            margin,
            response,
        }
    }

    /// Resolve `body` against every boundary in order. Returns faces hit.
    pub fn resolve_all(&self, body: &mut Body, boundaries: &[Boundary]) -> usize {
        boundaries
            .iter()
            .map(|boundary| self.resolve(body, boundary))
            .sum()
    }

    /// Resolve `body` against the six faces of one boundary, in face order.
    ///
    /// The local-frame centre used by the in-bounds predicate is taken once,
    /// before any face moves the body. Returns the number of faces hit.
    pub fn resolve(&self, body: &mut Body, boundary: &Boundary) -> usize {
        let local_center = boundary.to_local(&body.position);
        let half_extents = boundary.half_extents();
        let mut hits = 0;

        for (index, face) in boundary.faces().iter().enumerate() {
            if !face_in_bounds(&local_center, &half_extents, index) {
                continue;
            }

            let distance = face_distance(&body.position, face);
            if distance.abs() >= body.radius {
                continue;
            }

            // A centre on the plane counts as the outward side.
            let side = if distance < 0.0 { -1.0 } else { 1.0 };
            let push = body.radius - distance.abs() + self.margin;
            body.position += face.normal * (side * push);

            let vel_normal = body.velocity.dot(&face.normal);
            let reflect = match self.response {
                WallResponse::AlwaysReflect => true,
                WallResponse::ApproachingOnly => side * vel_normal < 0.0,
            };
            if reflect {
                body.velocity -= face.normal * ((1.0 + self.restitution) * vel_normal);
            }

            trace!(face = index, distance, push, reflect, "resolved wall contact");
            hits += 1;
        }

        hits
    }
}

// =============================================================================
// Tests
// =============================================================================
