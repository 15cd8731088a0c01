//! # Physix Core
//!
//! A sphere collision, wall response and integration engine, advanced in
//! fixed substeps over a fixed-size worker pool.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (bodies, oriented box boundaries, constants)
//! - `collision`: Sphere-sphere and sphere-face detection and resolution
//! - `integrator`: Semi-implicit Euler and the `ForceModel` seam
//! - `forces`: Central restoring field and force recompute
//! - `step`: The per-body substep kernel and tick configuration
//! - `dispatch`: Contiguous partitioning and the parallel substep driver
//! - `world`: Body registry, tick entry point and render snapshots
//! - `spawner`: Timed, seedable creation of new bodies
//! - `scene`: YAML-based scene configuration loader
//!
//! ## Example
//!
//! ```ignore
//! use physix_core::{Boundary, TickConfig, Vec3, World};
//!
//! let mut world = World::new(Boundary::enclosure(30.0, 1.0)?, TickConfig::default());
//! world.spawn(Vec3::new(5.0, 0.0, 0.0), Vec3::zeros(), 1.0, 1.0)?;
//! world.tick(1.0 / 60.0)?;
//! ```

pub mod collision;
pub mod dispatch;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod scene;
pub mod spawner;
pub mod step;
pub mod types;
pub mod world;

pub use collision::{PairResolver, WallResolver, WallResponse};
pub use dispatch::{partition, ParallelDispatcher};
pub use error::{PhysicsError, Result};
pub use forces::{CentralField, ForceField, NoForce};
pub use integrator::{ForceModel, SemiImplicitEuler};
pub use scene::{SceneConfig, SceneError, SceneLoader};
pub use spawner::{Spawner, SpawnerConfig};
pub use step::{SimulationStep, TickConfig};
pub use types::{Body, Boundary, Face, Vec3};
pub use world::{Snapshot, World};
