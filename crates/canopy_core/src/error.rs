//! Error types for canopy_core.
//!
//! Only construction can fail. Once an ecosystem is built, stepping never
//! returns an error: a missing meal or a full neighbourhood is ordinary
//! control flow.

use canopy_data::{Location, Species};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Grid dimensions must both be positive
    #[error("Invalid grid dimensions {depth}x{width}: both must be positive")]
    InvalidDimensions { depth: usize, width: usize },

    #[error("Invalid clock: {0}")]
    InvalidClock(String),

    /// A species was referenced without a profile to describe it
    #[error("No profile registered for species {0}")]
    MissingSpecies(Species),

    #[error("Invalid species profile for {species}: {reason}")]
    InvalidProfile { species: Species, reason: String },

    /// Spawning needs an in-bounds, empty cell
    #[error("Cell {0} is outside the grid or already occupied")]
    CellUnavailable(Location),
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    #[must_use]
    pub fn invalid_clock<S: Into<String>>(msg: S) -> Self {
        Self::InvalidClock(msg.into())
    }

    #[must_use]
    pub fn invalid_profile<S: Into<String>>(species: Species, reason: S) -> Self {
        Self::InvalidProfile {
            species,
            reason: reason.into(),
        }
    }
}
