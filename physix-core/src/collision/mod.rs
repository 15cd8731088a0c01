//! Collision detection and resolution.
//!
//! This module handles:
//! - **Detection**: overlap tests between two spheres and between a sphere and
//!   the faces of an oriented box boundary
//! - **Resolution**: positional correction plus velocity response for each
//!   detected overlap
//!
//! ## Boundary faces
//!
//! ```text
//!            +Y (4)
//!             │   -Z (1)
//!             │  ╱
//!   -X (3) ───●─── +X (2)
//!            ╱│
//!      +Z (0) │
//!            -Y (5)
//! ```
//!
//! A sphere is tested against a face only when its centre, expressed in the
//! boundary's local frame, falls inside that face's rectangle along the two
//! tangential axes. Detection is discrete: fast spheres can tunnel through
//! thin boundaries between substeps.

pub mod detection;
pub mod resolution;

pub use detection::*;
pub use resolution::*;
