use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a species moves and eats, or stays put and spreads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kingdom {
    Animal,
    Plant,
}

/// Concrete species tag. Numeric and behavioural parameters live in the
/// species profile handed to the engine, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Lynx,
    Wolf,
    Deer,
    Hamster,
    Plant,
}

impl Species {
    pub const ALL: [Species; 5] = [
        Species::Lynx,
        Species::Wolf,
        Species::Deer,
        Species::Hamster,
        Species::Plant,
    ];

    #[must_use]
    pub fn kingdom(&self) -> Kingdom {
        match self {
            Species::Plant => Kingdom::Plant,
            Species::Lynx | Species::Wolf | Species::Deer | Species::Hamster => Kingdom::Animal,
        }
    }

    #[must_use]
    pub fn is_animal(&self) -> bool {
        self.kingdom() == Kingdom::Animal
    }

    /// Dense index, stable across runs.
    #[must_use]
    pub fn index(&self) -> usize {
        *self as usize
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Species::Lynx => "Lynx",
            Species::Wolf => "Wolf",
            Species::Deer => "Deer",
            Species::Hamster => "Hamster",
            Species::Plant => "Plant",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    #[must_use]
    pub fn is_female(&self) -> bool {
        matches!(self, Sex::Female)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    OldAge,
    Starvation,
    Overcrowding,
    Predation,
}
