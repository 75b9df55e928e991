//! Configuration for a simulation run.
//!
//! Maps onto `canopy.toml`. Every section falls back to its defaults, so a
//! file only needs the values it overrides.
//!
//! ## Example `canopy.toml`
//!
//! ```toml
//! [world]
//! depth = 40
//! width = 60
//! seed = 7
//!
//! [clock]
//! night_start = 20
//! night_end = 6
//!
//! [climate]
//! change_probability = 0.05
//!
//! [pathogens]
//! enabled = ["animal_flu"]
//!
//! [runtime]
//! steps = 500
//! ```

use crate::environment::Climate;
use crate::species::{SpeciesLogic, SpeciesProfile, SpeciesRegistry};
use canopy_data::{Disease, Species};
use serde::{Deserialize, Serialize};

/// Grid dimensions and seeding.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub depth: usize,
    pub width: usize,
    /// `None` draws the seed from OS entropy.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            depth: 80,
            width: 120,
            seed: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    pub initial_hour: i64,
    pub period: i64,
    pub night_start: i64,
    pub night_end: i64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            initial_hour: 0,
            period: 24,
            night_start: 21,
            night_end: 5,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PathogenConfig {
    /// Diseases in circulation, in the order ambient exposure offers them.
    pub enabled: Vec<Disease>,
}

impl Default for PathogenConfig {
    fn default() -> Self {
        Self {
            enabled: Disease::ALL.to_vec(),
        }
    }
}

/// Settings for the headless runner rather than the engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    pub steps: u64,
    pub step_delay_ms: u64,
    /// Steps between periodic summary log lines; 0 disables them.
    pub log_interval: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            steps: 4000,
            step_delay_ms: 0,
            log_interval: 100,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub clock: ClockConfig,
    pub climate: Climate,
    pub pathogens: PathogenConfig,
    /// One profile per registered species. Order sets the bootstrap order.
    pub species: Vec<SpeciesProfile>,
    pub runtime: RuntimeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            clock: ClockConfig::default(),
            climate: Climate::default(),
            pathogens: PathogenConfig::default(),
            species: Species::ALL.iter().map(SpeciesLogic::default_profile).collect(),
            runtime: RuntimeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Validates all configuration parameters, reporting the first failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.world.depth > 0, "World depth must be positive");
        anyhow::ensure!(self.world.width > 0, "World width must be positive");
        anyhow::ensure!(
            self.world.depth <= 10_000 && self.world.width <= 10_000,
            "World too large (max 10000 per side)"
        );

        anyhow::ensure!(self.clock.period != 0, "Clock period must be non-zero");

        anyhow::ensure!(
            (0.0..=1.0).contains(&self.climate.change_probability),
            "Weather change probability must be in [0, 1]"
        );
        anyhow::ensure!(
            !self.climate.variants.is_empty(),
            "At least one weather variant is required"
        );

        self.registry()?;

        Ok(())
    }

    /// Builds the species registry described by `species`.
    pub fn registry(&self) -> anyhow::Result<SpeciesRegistry> {
        Ok(SpeciesRegistry::new(self.species.clone())?)
    }

    /// Parses and validates.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Hash of every setting that affects the simulation outcome. Runtime
    /// pacing is left out.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.clock).as_bytes());
        hasher.update(format!("{:?}", self.climate).as_bytes());
        hasher.update(format!("{:?}", self.pathogens).as_bytes());
        hasher.update(format!("{:?}", self.species).as_bytes());
        hex::encode(hasher.finalize())
    }
}
