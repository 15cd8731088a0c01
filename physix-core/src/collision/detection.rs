//! Discrete overlap detection.
//!
//! Tests the current state only: a sphere that crosses a wall or another
//! sphere entirely within one substep is not detected.

use crate::types::{Body, Face, Vec3};

/// Overlap between two spheres, seen from the first one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereContact {
    /// Unit vector from the second centre toward the first.
    pub normal: Vec3,
    /// `r_a + r_b - |p_a - p_b|`, zero for touching spheres.
    pub penetration: f64,
}

/// Detect contact between two spheres.
///
/// Touching spheres (`dist == r_a + r_b`) count as a contact with zero
/// penetration. Coincident centres have no usable normal and return `None`.
pub fn sphere_contact(a: &Body, b: &Body) -> Option<SphereContact> {
    let diff = a.position - b.position;
    let dist = diff.norm();
    let min_dist = a.radius + b.radius;

    if dist <= 0.0 || dist > min_dist {
        return None;
    }

    Some(SphereContact {
        normal: diff / dist,
        penetration: min_dist - dist,
    })
}

/// Coarse check that a local-frame centre projects inside a face's rectangle.
///
/// Only the two coordinates tangential to the face are tested, so a face and
/// its opposite share a predicate (`+Z/-Z` test x/y, `+X/-X` test z/y,
/// `+Y/-Y` test x/z). Near edges and corners this can match faces that are
/// not the closest; there is no closest-point-on-box computation.
pub fn face_in_bounds(local_center: &Vec3, half_extents: &Vec3, face_index: usize) -> bool {
    let within = |axis: usize| local_center[axis].abs() <= half_extents[axis];
    match face_index {
        0 | 1 => within(0) && within(1),
        2 | 3 => within(2) && within(1),
        4 | 5 => within(0) && within(2),
        _ => false,
    }
}

/// Signed distance from a point to a face plane, positive on the outward side.
#[inline]
pub fn face_distance(position: &Vec3, face: &Face) -> f64 {
    (position - face.point).dot(&face.normal)
}
