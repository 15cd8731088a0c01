//! Core types for the simulation.
//!
//! Units are arbitrary but consistent; the default scene uses a 60-unit box
//! with unit-radius, unit-mass spheres.
//!
//! Coordinate system: right-handed, Y up. Boundary orientations are Euler
//! angles in radians applied X then Y then Z, so a local point maps to world
//! space as `T · Rx · Ry · Rz · p`.

use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use serde::Serialize;

use crate::error::{PhysicsError, Result};

/// 3D vector used for positions, velocities, accelerations and forces.
pub type Vec3 = Vector3<f64>;

// =============================================================================
// Body
// =============================================================================

/// A spherical rigid body.
///
/// Identity is positional: a body is addressed by its index in the live
/// sequence owned by [`crate::world::World`]. No render handle is stored here;
/// renderers key their own resources by that index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Body {
    pub mass: f64,
    pub radius: f64,
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Fixed bodies are skipped by the integrator only. Collision response
    /// still writes their velocity and positional correction still moves them.
    pub fixed: bool,
}

impl Body {
    /// Create a body with zero acceleration.
    ///
    /// Errors with [`PhysicsError::InvalidBodyConfig`] if `mass` or `radius` is
    /// non-positive or non-finite, or if `position`/`velocity` has a non-finite
    /// component.
    pub fn new(position: Vec3, velocity: Vec3, radius: f64, mass: f64) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(PhysicsError::invalid_body("mass must be finite and > 0"));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(PhysicsError::invalid_body("radius must be finite and > 0"));
        }
        if !all_finite(&position) {
            return Err(PhysicsError::invalid_body("position must be finite"));
        }
        if !all_finite(&velocity) {
            return Err(PhysicsError::invalid_body("velocity must be finite"));
        }
        Ok(Self {
            mass,
            radius,
            position,
            velocity,
            acceleration: Vec3::zeros(),
            fixed: false,
        })
    }

    /// Body at rest at a given position.
    pub fn at_rest(position: Vec3, radius: f64, mass: f64) -> Result<Self> {
        Self::new(position, Vec3::zeros(), radius, mass)
    }

    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn toggle_fixed(&mut self) {
        self.fixed = !self.fixed;
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    pub fn set_acceleration(&mut self, acceleration: Vec3) {
        self.acceleration = acceleration;
    }

    /// Accumulate a force into the current acceleration (a += F / m).
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force / self.mass;
    }

    #[inline]
    pub fn inverse_mass(&self) -> f64 {
        1.0 / self.mass
    }

    pub fn momentum(&self) -> Vec3 {
        self.velocity * self.mass
    }

    /// Translational kinetic energy: 1/2 m |v|^2.
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    /// True when position, velocity and acceleration are all finite.
    pub fn is_finite(&self) -> bool {
        all_finite(&self.position) && all_finite(&self.velocity) && all_finite(&self.acceleration)
    }
}

#[inline]
fn all_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

// =============================================================================
// Boundary
// =============================================================================

/// A plane on the surface of a boundary, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub point: Vec3,
    /// Outward unit normal.
    pub normal: Vec3,
}

/// Local face layout: `(normal, axis whose half-extent offsets the face)`.
///
/// Order is `+Z, -Z, +X, -X, +Y, -Y`; collision code relies on it.
const LOCAL_FACES: [(Vec3, usize); 6] = [
    (Vec3::new(0.0, 0.0, 1.0), 2),
    (Vec3::new(0.0, 0.0, -1.0), 2),
    (Vec3::new(1.0, 0.0, 0.0), 0),
    (Vec3::new(-1.0, 0.0, 0.0), 0),
    (Vec3::new(0.0, 1.0, 0.0), 1),
    (Vec3::new(0.0, -1.0, 0.0), 1),
];

/// An oriented box that spheres collide against.
///
/// Immutable once built; its faces are derived from the transform on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Boundary {
    position: Vec3,
    orientation: Vec3,
    half_extents: Vec3,
}

impl Boundary {
    /// Create a boundary.
    ///
    /// Errors with [`PhysicsError::InvalidBoundary`] if any half-extent is not
    /// finite and positive or the transform is non-finite.
    pub fn new(position: Vec3, orientation: Vec3, half_extents: Vec3) -> Result<Self> {
        if !half_extents.iter().all(|h| h.is_finite() && *h > 0.0) {
            return Err(PhysicsError::invalid_boundary(
                "half extents must be finite and > 0",
            ));
        }
        if !all_finite(&position) || !all_finite(&orientation) {
            return Err(PhysicsError::invalid_boundary(
                "position and orientation must be finite",
            ));
        }
        Ok(Self {
            position,
            orientation,
            half_extents,
        })
    }

    /// The six slabs of an axis-aligned box enclosing `[-half_size, half_size]³`.
    ///
    /// Each slab is `2·half_size` square and `thickness` thick, sitting just
    /// outside the region. Order: floor, ceiling, left, right, back, front.
    pub fn enclosure(half_size: f64, thickness: f64) -> Result<Vec<Self>> {
        if !half_size.is_finite() || half_size <= 0.0 {
            return Err(PhysicsError::invalid_boundary(
                "enclosure half size must be finite and > 0",
            ));
        }
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(PhysicsError::invalid_boundary(
                "enclosure thickness must be finite and > 0",
            ));
        }
        let offset = half_size + thickness / 2.0;
        let extents = Vec3::new(half_size, thickness / 2.0, half_size);
        let quarter = std::f64::consts::FRAC_PI_2;

        [
            (Vec3::new(0.0, -offset, 0.0), Vec3::zeros()),
            (Vec3::new(0.0, offset, 0.0), Vec3::zeros()),
            (Vec3::new(-offset, 0.0, 0.0), Vec3::new(0.0, 0.0, quarter)),
            (Vec3::new(offset, 0.0, 0.0), Vec3::new(0.0, 0.0, -quarter)),
            (Vec3::new(0.0, 0.0, -offset), Vec3::new(-quarter, 0.0, 0.0)),
            (Vec3::new(0.0, 0.0, offset), Vec3::new(quarter, 0.0, 0.0)),
        ]
        .into_iter()
        .map(|(position, orientation)| Self::new(position, orientation, extents))
        .collect()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Vec3 {
        self.orientation
    }

    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// World transform (translation followed by X, Y, Z rotations).
    pub fn transform(&self) -> Isometry3<f64> {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), self.orientation.x)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.orientation.y)
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.orientation.z);
        Isometry3::from_parts(Translation3::from(self.position), rotation)
    }

    /// Express a world-space point in the boundary's local frame.
    pub fn to_local(&self, point: &Vec3) -> Vec3 {
        self.transform()
            .inverse_transform_point(&Point3::from(*point))
            .coords
    }

    /// World-space faces in the order `+Z, -Z, +X, -X, +Y, -Y`.
    pub fn faces(&self) -> [Face; 6] {
        let transform = self.transform();
        LOCAL_FACES.map(|(normal, axis)| {
            let offset = normal * self.half_extents[axis];
            Face {
                point: transform.transform_point(&Point3::from(offset)).coords,
                normal: transform.transform_vector(&normal).normalize(),
            }
        })
    }
}

// =============================================================================
// Constants
// =============================================================================

/// Default physical parameters.
pub mod constants {
    /// Coefficient of restitution for sphere and wall contacts (perfectly elastic).
    pub const RESTITUTION: f64 = 1.0;

    /// Extra distance a body is pushed past a wall face when it penetrates.
    pub const WALL_MARGIN: f64 = 0.5;

    /// Stiffness of the central restoring field: a = -k·x.
    pub const CENTRAL_STIFFNESS: f64 = 10.0;
}

// =============================================================================
// Tests
// =============================================================================
