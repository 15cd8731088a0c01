//! Scene configuration loader.
//!
//! Loads an enclosure, tick settings, contact coefficients and an initial set
//! of bodies from YAML, so scenes can be edited without recompiling. Every
//! section is optional and falls back to the engine defaults.
//!
//! ## Directory Structure
//!
//! ```text
//! scenes/
//! ├── default.yaml
//! └── pinned_core.yaml
//! ```
//!
//! ## Example
//!
//! ```yaml
//! name: two balls
//! enclosure: { half_size: 30.0, thickness: 1.0 }
//! tick: { substeps: 5, workers: 4 }
//! bodies:
//!   - { position: [-5.0, 0.0, 0.0], velocity: [1.0, 0.0, 0.0] }
//!   - { position: [5.0, 0.0, 0.0], fixed: true }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::collision::{PairResolver, WallResolver, WallResponse};
use crate::error::PhysicsError;
use crate::forces::CentralField;
use crate::spawner::{Spawner, SpawnerConfig};
use crate::step::TickConfig;
use crate::types::{constants, Body, Boundary, Vec3};
use crate::world::World;

/// Error type for scene loading operations.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("scene not found: {0}")]
    NotFound(String),

    /// The file parsed but describes an invalid body, boundary or spawner.
    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

// =============================================================================
// Configuration
// =============================================================================

/// Cubic enclosure built from six slabs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnclosureConfig {
    /// Half the inner edge length.
    pub half_size: f64,
    pub thickness: f64,
}

impl Default for EnclosureConfig {
    fn default() -> Self {
        Self {
            half_size: 30.0,
            thickness: 1.0,
        }
    }
}

/// Contact coefficients shared by every pair and wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub pair_restitution: f64,
    pub wall_restitution: f64,
    pub wall_margin: f64,
    pub wall_response: WallResponse,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            pair_restitution: constants::RESTITUTION,
            wall_restitution: constants::RESTITUTION,
            wall_margin: constants::WALL_MARGIN,
            wall_response: WallResponse::default(),
        }
    }
}

impl ContactConfig {
    pub fn resolvers(&self) -> (PairResolver, WallResolver) {
        (
            PairResolver::new(self.pair_restitution),
            WallResolver::new(self.wall_restitution, self.wall_margin, self.wall_response),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    /// `k` in `a = -k·x`.
    pub stiffness: f64,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            stiffness: constants::CENTRAL_STIFFNESS,
        }
    }
}

/// One body placed at scene start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySpec {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f64,
    pub mass: f64,
    pub fixed: bool,
}

impl Default for BodySpec {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            radius: 1.0,
            mass: 1.0,
            fixed: false,
        }
    }
}

impl BodySpec {
    pub fn build(&self) -> Result<Body, PhysicsError> {
        Ok(Body::new(self.position, self.velocity, self.radius, self.mass)?.with_fixed(self.fixed))
    }
}

/// A complete scene description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub name: String,
    pub enclosure: EnclosureConfig,
    pub tick: TickConfig,
    pub contact: ContactConfig,
    pub force: ForceConfig,
    pub spawner: Option<SpawnerConfig>,
    pub bodies: Vec<BodySpec>,
}

impl SceneConfig {
    pub fn from_yaml_str(contents: &str) -> Result<Self, SceneError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Build the enclosure and place every listed body, in file order.
    pub fn build_world(&self) -> Result<World, SceneError> {
        let boundaries = Boundary::enclosure(self.enclosure.half_size, self.enclosure.thickness)?;
        let (pair, wall) = self.contact.resolvers();
        let mut world = World::with_force(
            boundaries,
            self.tick,
            CentralField::new(self.force.stiffness),
        )
        .with_resolvers(pair, wall);

        for spec in &self.bodies {
            world.push(spec.build()?);
        }
        Ok(world)
    }

    /// The scene's spawner, if it declares one.
    pub fn build_spawner(&self, seed: Option<u64>) -> Result<Option<Spawner>, SceneError> {
        self.spawner
            .map(|config| Spawner::new(config, seed))
            .transpose()
            .map_err(SceneError::from)
    }
}

// =============================================================================
// Loader
// =============================================================================

/// Scene loader with configurable base directory.
pub struct SceneLoader {
    base_path: PathBuf,
}

impl SceneLoader {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a scene by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = SceneLoader::new("scenes");
    /// let world = loader.load("default")?.build_world()?;
    /// ```
    pub fn load(&self, name: &str) -> Result<SceneConfig, SceneError> {
        let path = self.base_path.join(format!("{name}.yaml"));
        if !path.exists() {
            return Err(SceneError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let scene = SceneConfig::from_yaml_str(&contents)?;
        info!(
            scene = name,
            bodies = scene.bodies.len(),
            spawner = scene.spawner.is_some(),
            "loaded scene"
        );
        Ok(scene)
    }

    /// List all available scenes, sorted by name.
    pub fn list(&self) -> Result<Vec<String>, SceneError> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let file_name = entry?.file_name();
            if let Some(name) = file_name.to_string_lossy().strip_suffix(".yaml") {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================
