//! Plain data shared by the canopy engine and its front-ends.
//!
//! Nothing in here knows how to step a simulation; behaviour lives in
//! `canopy_core` and is attached through extension traits.

pub mod data;

pub use data::appearance::Rgba;
pub use data::being::{DeathCause, Kingdom, Sex, Species};
pub use data::environment::{Disease, TimeOfDay, Weather};
pub use data::snapshot::{CellView, FieldSnapshot, LayerSnapshot, PopulationStats, StepReport};
pub use data::space::{Layer, Location};
