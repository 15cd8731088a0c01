//! Python bindings for the physix-core sphere simulation.
//!
//! Provides a simple Python API:
//!
//! ```python
//! from physix import Simulation
//!
//! sim = Simulation(workers=4, seed=7)
//! sim.spawn(-5.0, 0.0, 0.0, vx=2.0)
//! sim.spawn(5.0, 0.0, 0.0, vx=-2.0)
//!
//! for _ in range(600):
//!     sim.step(1.0 / 60.0)
//!     for pos, radius in zip(sim.positions(), sim.radii()):
//!         print(f"Body at ({pos.x}, {pos.y}, {pos.z}) r={radius}")
//! ```

use pyo3::exceptions::{PyFileNotFoundError, PyIndexError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use physix_core::error::PhysicsError;
use physix_core::scene::{SceneError, SceneLoader};
use physix_core::spawner::{Spawner, SpawnerConfig};
use physix_core::step::TickConfig;
use physix_core::types::{Boundary, Vec3 as CoreVec3};
use physix_core::world::World;

fn physics_err(err: PhysicsError) -> PyErr {
    match err {
        PhysicsError::NumericInstability { .. } | PhysicsError::WorkerPool(_) => {
            PyRuntimeError::new_err(err.to_string())
        }
        _ => PyValueError::new_err(err.to_string()),
    }
}

fn scene_err(err: SceneError) -> PyErr {
    match err {
        SceneError::NotFound(_) => PyFileNotFoundError::new_err(err.to_string()),
        SceneError::Physics(err) => physics_err(err),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// 3D vector for positions and velocities.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Vec3 {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
    #[pyo3(get, set)]
    pub z: f64,
}

#[pymethods]
impl Vec3 {
    #[new]
    fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn __repr__(&self) -> String {
        format!("Vec3({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }

    fn magnitude(&self) -> f64 {
        CoreVec3::from(*self).norm()
    }

    fn to_tuple(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<CoreVec3> for Vec3 {
    fn from(v: CoreVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vec3> for CoreVec3 {
    fn from(v: Vec3) -> Self {
        CoreVec3::new(v.x, v.y, v.z)
    }
}

/// Boxed sphere simulation.
///
/// Owns the world and an optional spawner. Bodies keep the index returned by
/// `spawn` for their whole lifetime.
#[pyclass]
pub struct Simulation {
    world: World,
    spawner: Option<Spawner>,
}

#[pymethods]
impl Simulation {
    /// Create an enclosure with the default spawner.
    ///
    /// Pass `spawn=False` to start with an empty world that only grows via
    /// `spawn`. `seed=None` picks a random seed.
    #[new]
    #[pyo3(signature = (half_size=30.0, thickness=1.0, substeps=5, workers=10, spawn=true, seed=None))]
    fn new(
        half_size: f64,
        thickness: f64,
        substeps: usize,
        workers: usize,
        spawn: bool,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let boundaries = Boundary::enclosure(half_size, thickness).map_err(physics_err)?;
        let world = World::new(boundaries, TickConfig::new(substeps, workers));
        let spawner = if spawn {
            Some(Spawner::new(SpawnerConfig::default(), seed).map_err(physics_err)?)
        } else {
            None
        };
        Ok(Self { world, spawner })
    }

    /// Load `<directory>/<name>.yaml`.
    #[staticmethod]
    #[pyo3(signature = (directory, name, seed=None))]
    fn from_scene(directory: &str, name: &str, seed: Option<u64>) -> PyResult<Self> {
        let scene = SceneLoader::new(directory).load(name).map_err(scene_err)?;
        let world = scene.build_world().map_err(scene_err)?;
        let spawner = scene.build_spawner(seed).map_err(scene_err)?;
        Ok(Self { world, spawner })
    }

    /// Current simulation time.
    #[getter]
    fn time(&self) -> f64 {
        self.world.time()
    }

    #[getter]
    fn body_count(&self) -> usize {
        self.world.body_count()
    }

    /// Add a body and return its index.
    #[pyo3(signature = (x, y, z, vx=0.0, vy=0.0, vz=0.0, radius=1.0, mass=1.0))]
    fn spawn(
        &mut self,
        x: f64,
        y: f64,
        z: f64,
        vx: f64,
        vy: f64,
        vz: f64,
        radius: f64,
        mass: f64,
    ) -> PyResult<usize> {
        self.world
            .spawn(CoreVec3::new(x, y, z), CoreVec3::new(vx, vy, vz), radius, mass)
            .map_err(physics_err)
    }

    /// Pin or release a body.
    fn set_fixed(&mut self, index: usize, fixed: bool) -> PyResult<()> {
        let body = self
            .world
            .bodies_mut()
            .get_mut(index)
            .ok_or_else(|| PyIndexError::new_err(format!("no body at index {index}")))?;
        body.fixed = fixed;
        Ok(())
    }

    fn position(&self, index: usize) -> PyResult<Vec3> {
        self.world
            .bodies()
            .get(index)
            .map(|body| body.position.into())
            .ok_or_else(|| PyIndexError::new_err(format!("no body at index {index}")))
    }

    fn positions(&self) -> Vec<Vec3> {
        self.world.bodies().iter().map(|body| body.position.into()).collect()
    }

    fn velocities(&self) -> Vec<Vec3> {
        self.world.bodies().iter().map(|body| body.velocity.into()).collect()
    }

    fn radii(&self) -> Vec<f64> {
        self.world.bodies().iter().map(|body| body.radius).collect()
    }

    fn kinetic_energy(&self) -> f64 {
        self.world.kinetic_energy()
    }

    /// Advance simulation by dt, then let the spawner add due bodies.
    ///
    /// The GIL is released while the workers run.
    fn step(&mut self, py: Python<'_>, dt: f64) -> PyResult<()> {
        let Self { world, spawner } = self;
        py.allow_threads(|| -> physix_core::Result<()> {
            world.tick(dt)?;
            if let Some(spawner) = spawner {
                spawner.advance(dt, world)?;
            }
            Ok(())
        })
        .map_err(physics_err)
    }

    /// Run multiple steps at once (more efficient).
    fn step_n(&mut self, py: Python<'_>, dt: f64, steps: usize) -> PyResult<()> {
        for _ in 0..steps {
            self.step(py, dt)?;
        }
        Ok(())
    }

    /// Get current state as dict for easy inspection.
    fn state_dict(&self) -> PyResult<PyObject> {
        Python::with_gil(|py| {
            let dict = PyDict::new(py);
            dict.set_item("time", self.world.time())?;
            dict.set_item("ticks", self.world.ticks())?;
            dict.set_item("body_count", self.world.body_count())?;
            dict.set_item("kinetic_energy", self.world.kinetic_energy())?;
            let positions: Vec<(f64, f64, f64)> = self
                .world
                .bodies()
                .iter()
                .map(|body| (body.position.x, body.position.y, body.position.z))
                .collect();
            dict.set_item("positions", positions)?;
            dict.set_item("radii", self.radii())?;
            Ok(dict.into())
        })
    }
}

/// Python module definition.
#[pymodule]
fn physix(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Vec3>()?;
    m.add_class::<Simulation>()?;
    Ok(())
}
