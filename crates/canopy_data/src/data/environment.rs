use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of diseases known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disease {
    /// Infects every animal, draining food each tick.
    AnimalFlu,
    /// Wolves only, shortening lifespan each tick.
    WolfFlu,
}

impl Disease {
    pub const ALL: [Disease; 2] = [Disease::WolfFlu, Disease::AnimalFlu];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Disease::AnimalFlu => "Animal flu",
            Disease::WolfFlu => "Wolf flu",
        }
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Sunny,
    Raining,
}

impl Weather {
    pub const ALL: [Weather; 2] = [Weather::Raining, Weather::Sunny];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Weather::Sunny => "Sunny",
            Weather::Raining => "Raining",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "Day",
            TimeOfDay::Night => "Night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
