//! Error types for the simulation core.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, PhysicsError>;

/// Errors raised while building or advancing a simulation.
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// A body was constructed with non-positive mass/radius or non-finite state.
    #[error("invalid body config: {0}")]
    InvalidBodyConfig(String),

    /// A boundary was constructed with non-positive extents or non-finite transform.
    #[error("invalid boundary: {0}")]
    InvalidBoundary(String),

    /// Substep count, worker count or tick duration out of range.
    #[error("invalid tick config: {0}")]
    InvalidTickConfig(String),

    /// Spawner settings out of range.
    #[error("invalid spawner config: {0}")]
    InvalidSpawnerConfig(String),

    /// A body left the finite range during a substep. The tick is abandoned.
    #[error("numeric instability: body {index} became non-finite in substep {substep}")]
    NumericInstability { index: usize, substep: usize },

    /// The per-tick worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl PhysicsError {
    pub fn invalid_body(details: impl Into<String>) -> Self {
        Self::InvalidBodyConfig(details.into())
    }

    pub fn invalid_boundary(details: impl Into<String>) -> Self {
        Self::InvalidBoundary(details.into())
    }

    pub fn invalid_tick(details: impl Into<String>) -> Self {
        Self::InvalidTickConfig(details.into())
    }

    pub fn invalid_spawner(details: impl Into<String>) -> Self {
        Self::InvalidSpawnerConfig(details.into())
    }
}
