//! Per-species descriptors.
//!
//! Every default a being resets to comes from its species profile. The
//! registry is built once per simulation and handed to the orchestrator.

use crate::error::{CoreError, Result};
use canopy_data::{Kingdom, Layer, Rgba, Species};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SpeciesProfile {
    pub species: Species,
    /// Grid the species physically occupies.
    pub habitat: Layer,
    /// Grid the species searches for food in. May differ from `habitat`.
    pub hunting_field: Layer,
    pub breeding_age: u32,
    pub max_age: u32,
    pub breeding_probability: f64,
    pub max_litter_size: u32,
    /// Energy handed to whoever eats a member of this species.
    pub food_value: u32,
    pub max_food_level: u32,
    pub diet: Vec<Species>,
    pub nocturnal: bool,
    pub base_color: Option<Rgba>,
    /// Chance of the bootstrap seeding this species into an empty cell.
    pub spawn_probability: f64,
}

impl SpeciesProfile {
    #[must_use]
    pub fn default_for(species: Species) -> Self {
        match species {
            Species::Lynx => Self::carnivore(species, 300, 40, true, Rgba::BLUE),
            Species::Wolf => Self::carnivore(species, 270, 50, false, Rgba::RED),
            Species::Deer => Self {
                species,
                habitat: Layer::Fauna,
                hunting_field: Layer::Flora,
                breeding_age: 10,
                max_age: 200,
                breeding_probability: 0.30,
                max_litter_size: 4,
                food_value: 30,
                max_food_level: 15,
                diet: vec![Species::Plant],
                nocturnal: false,
                base_color: Some(Rgba::GREEN),
                spawn_probability: 0.08,
            },
            Species::Hamster => Self {
                species,
                habitat: Layer::Fauna,
                hunting_field: Layer::Flora,
                breeding_age: 5,
                max_age: 70,
                breeding_probability: 0.40,
                max_litter_size: 4,
                food_value: 12,
                max_food_level: 15,
                diet: vec![Species::Plant],
                nocturnal: false,
                base_color: Some(Rgba::YELLOW),
                spawn_probability: 0.08,
            },
            Species::Plant => Self {
                species,
                habitat: Layer::Flora,
                hunting_field: Layer::Flora,
                breeding_age: 0,
                max_age: 40,
                breeding_probability: 0.12,
                max_litter_size: 1,
                food_value: 8,
                max_food_level: 0,
                diet: Vec::new(),
                nocturnal: false,
                base_color: None,
                spawn_probability: 0.20,
            },
        }
    }

    fn carnivore(
        species: Species,
        max_age: u32,
        max_food_level: u32,
        nocturnal: bool,
        color: Rgba,
    ) -> Self {
        Self {
            species,
            habitat: Layer::Fauna,
            hunting_field: Layer::Fauna,
            breeding_age: 15,
            max_age,
            breeding_probability: 0.35,
            max_litter_size: 2,
            food_value: 69,
            max_food_level,
            diet: vec![Species::Hamster, Species::Deer],
            nocturnal,
            base_color: Some(color),
            spawn_probability: 0.02,
        }
    }

    #[must_use]
    pub fn kingdom(&self) -> Kingdom {
        self.species.kingdom()
    }

    #[must_use]
    pub fn eats(&self, prey: Species) -> bool {
        self.diet.contains(&prey)
    }

    pub fn validate(&self) -> Result<()> {
        let fail = |reason: &str| Err(CoreError::invalid_profile(self.species, reason));
        if self.max_age == 0 {
            return fail("max age must be positive");
        }
        if self.food_value == 0 {
            return fail("food value must be positive");
        }
        if !(0.0..=1.0).contains(&self.breeding_probability) {
            return fail("breeding probability must be in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return fail("spawn probability must be in [0, 1]");
        }
        if self.kingdom() == Kingdom::Animal {
            if self.max_food_level == 0 {
                return fail("max food level must be positive");
            }
            if self.max_litter_size == 0 {
                return fail("max litter size must be at least 1");
            }
        }
        Ok(())
    }
}

/// Behaviour attached to the species tag.
pub trait SpeciesLogic {
    fn default_profile(&self) -> SpeciesProfile;
}

impl SpeciesLogic for Species {
    fn default_profile(&self) -> SpeciesProfile {
        SpeciesProfile::default_for(*self)
    }
}

/// Lookup from species tag to profile. Iteration follows registration
/// order, which is also the bootstrap's per-cell species order.
#[derive(Debug, Clone)]
pub struct SpeciesRegistry {
    profiles: Vec<SpeciesProfile>,
    slots: [Option<usize>; Species::ALL.len()],
}

impl Default for SpeciesRegistry {
    fn default() -> Self {
        let profiles = Species::ALL.map(SpeciesProfile::default_for).to_vec();
        let mut slots = [None; Species::ALL.len()];
        for (idx, profile) in profiles.iter().enumerate() {
            slots[profile.species.index()] = Some(idx);
        }
        Self { profiles, slots }
    }
}

impl SpeciesRegistry {
    pub fn new(profiles: Vec<SpeciesProfile>) -> Result<Self> {
        let mut slots = [None; Species::ALL.len()];
        for (idx, profile) in profiles.iter().enumerate() {
            profile.validate()?;
            let slot = &mut slots[profile.species.index()];
            if slot.is_some() {
                return Err(CoreError::invalid_profile(
                    profile.species,
                    "registered more than once",
                ));
            }
            *slot = Some(idx);
        }
        for profile in &profiles {
            if let Some(missing) = profile.diet.iter().find(|s| slots[s.index()].is_none()) {
                return Err(CoreError::MissingSpecies(*missing));
            }
        }
        Ok(Self { profiles, slots })
    }

    #[must_use]
    pub fn get(&self, species: Species) -> Option<&SpeciesProfile> {
        self.slots[species.index()].map(|idx| &self.profiles[idx])
    }

    pub fn profile(&self, species: Species) -> Result<&SpeciesProfile> {
        self.get(species).ok_or(CoreError::MissingSpecies(species))
    }

    /// Profiles living on `layer`, in registration order.
    pub fn inhabiting(&self, layer: Layer) -> impl Iterator<Item = &SpeciesProfile> {
        self.profiles.iter().filter(move |p| p.habitat == layer)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
