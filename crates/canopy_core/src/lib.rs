//! # Canopy Core
//!
//! The stepping engine for Canopy, a grid ecosystem of predators, herbivores
//! and plants.
//!
//! This crate contains:
//! - Two stacked grids (fauna and flora) sharing one diurnal clock
//! - Being lifecycle: ageing, hunger, breeding and death
//! - Disease contagion and weather modulation
//! - The [`world::Ecosystem`] orchestrator that advances everything one tick
//!   at a time, plus snapshots for renderers
//! - Configuration, metrics and structured logging
//!
//! Every stochastic decision draws from a single injected
//! [`random::RandomSource`], so a fixed seed reproduces a run exactly.
//!
//! ## Example
//!
//! ```
//! use canopy_core::config::AppConfig;
//! use canopy_core::world::Ecosystem;
//!
//! let mut config = AppConfig::default();
//! config.world.depth = 20;
//! config.world.width = 20;
//! config.world.seed = Some(42);
//!
//! let mut eco = Ecosystem::from_config(&config).unwrap();
//! eco.populate();
//! let report = eco.step();
//! assert_eq!(report.step, 1);
//! ```

/// Configuration for a simulation run
pub mod config;
/// Diurnal clock, weather logic and climate
pub mod environment;
/// Construction errors
pub mod error;
/// Fauna and flora grids
pub mod grid;
/// Components, creation, ageing and death
pub mod lifecycle;
/// Run counters and logging setup
pub mod metrics;
/// Disease logic and registry
pub mod pathogen;
/// The injected random stream
pub mod random;
/// Species profiles and registry
pub mod species;
/// Per-being behaviour
pub mod systems;
/// The orchestrator
pub mod world;

pub use environment::WeatherLogic;
pub use error::CoreError;
pub use metrics::{init_logging, Metrics};
pub use pathogen::DiseaseLogic;
pub use random::{RandomSource, SeededRandom};
pub use species::SpeciesLogic;
pub use world::Ecosystem;
