//! Numerical integration for advancing bodies in time.
//!
//! Bodies are advanced with semi-implicit (symplectic) Euler:
//!
//! ```text
//! 1. v_new = v + a·dt
//! 2. x_new = x + v_new·dt
//! ```
//!
//! The acceleration `a` is whatever the body carries when the integrator
//! runs, which inside a substep is the value the force field stored at the
//! end of the previous substep.

use crate::types::{Body, Vec3};

/// Source of the acceleration acting on a body.
///
/// Implementations are shared by every worker during a tick, hence the
/// `Send + Sync` bound.
pub trait ForceModel: Send + Sync {
    /// Acceleration for the body's current state.
    fn acceleration(&self, body: &Body) -> Vec3;
}

/// Semi-implicit Euler integrator.
pub struct SemiImplicitEuler;

impl SemiImplicitEuler {
    /// Advance `body` by `dt`. Fixed bodies are left untouched.
    pub fn integrate(body: &mut Body, dt: f64) {
        if body.fixed {
            return;
        }
        body.velocity += body.acceleration * dt;
        body.position += body.velocity * dt;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_velocity_updated_before_position() {
        let mut body = Body::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), 1.0, 1.0).unwrap();
        body.set_acceleration(Vec3::new(2.0, 0.0, -4.0));

        SemiImplicitEuler::integrate(&mut body, 0.5);

        assert_relative_eq!(body.velocity, Vec3::new(2.0, 0.0, -2.0));
        // Position uses the updated velocity.
        assert_relative_eq!(body.position, Vec3::new(1.0, 0.0, -1.0));
        // Acceleration is not touched by the integrator.
        assert_relative_eq!(body.acceleration, Vec3::new(2.0, 0.0, -4.0));
    }

    #[test]
    fn test_fixed_body_never_moves() {
        let cases = [
            (Vec3::zeros(), Vec3::zeros(), 0.1),
            (Vec3::new(5.0, -3.0, 1.0), Vec3::zeros(), 1.0),
            (Vec3::zeros(), Vec3::new(-100.0, 0.0, 7.0), 0.016),
            (Vec3::new(1e6, 1e6, 1e6), Vec3::new(1e6, -1e6, 0.0), 10.0),
        ];

        for (velocity, acceleration, dt) in cases {
            let start = Vec3::new(2.0, 3.0, 4.0);
            let mut body = Body::new(start, velocity, 1.0, 1.0).unwrap().with_fixed(true);
            body.set_acceleration(acceleration);

            SemiImplicitEuler::integrate(&mut body, dt);

            assert_eq!(body.position, start);
            assert_eq!(body.velocity, velocity);
        }
    }

    #[test]
    fn test_zero_dt_is_identity() {
        let mut body = Body::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 0.0, 0.0), 1.0, 1.0)
            .unwrap();
        body.set_acceleration(Vec3::new(0.0, -9.0, 0.0));
        let before = body;

        SemiImplicitEuler::integrate(&mut body, 0.0);

        assert_eq!(body, before);
    }
}
