//! Error types for building and driving particle systems.

use thiserror::Error;

/// Errors that can occur while constructing or updating a particle system.
#[derive(Debug, Error)]
pub enum SimError {
    /// System needs more particles than it was given.
    #[error("Invalid particle count: {count} (need at least {min})")]
    InvalidParticleCount {
        /// Requested particle count.
        count: usize,
        /// Smallest count the system supports.
        min: usize,
    },

    /// Cloth grid must have at least one row and one column.
    #[error("Invalid grid dimensions: {rows}x{cols}")]
    InvalidGridDimensions {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },

    /// Particle index is out of bounds.
    #[error("Particle index {index} out of bounds (count: {count})")]
    ParticleOutOfBounds {
        /// Offending index.
        index: usize,
        /// Number of particles in the system.
        count: usize,
    },

    /// A spring joins two particles that start at the same position.
    #[error("Spring endpoints {i} and {j} coincide")]
    DegenerateGeometry {
        /// First endpoint.
        i: usize,
        /// Second endpoint.
        j: usize,
    },

    /// Obstacle radius must be positive and finite.
    #[error("Invalid obstacle radius: {radius}")]
    InvalidObstacle {
        /// Rejected radius.
        radius: f64,
    },

    /// Replacement state does not match the system's state length.
    #[error("State length mismatch: expected {expected}, got {got}")]
    StateLengthMismatch {
        /// Length of the system's state vector.
        expected: usize,
        /// Length of the rejected state.
        got: usize,
    },

    /// Step size must be positive and finite, end time finite.
    #[error("Invalid time stepping: h = {h}, t_end = {t_end}")]
    InvalidStep {
        /// Rejected step size.
        h: f64,
        /// Requested end time.
        t_end: f64,
    },

    /// IO error while exporting geometry or frames.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for simulation operations.
pub type SimResult<T> = std::result::Result<T, SimError>;
