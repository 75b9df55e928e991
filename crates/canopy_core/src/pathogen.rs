//! Disease variants and their per-tick effects.

use crate::lifecycle::{AnimalState, Vitals};
use crate::species::SpeciesProfile;
use canopy_data::{Disease, Species};

pub trait DiseaseLogic {
    /// Chance of passing to a touched, susceptible neighbour.
    fn infection_probability(&self) -> f64;
    /// Chance of a spontaneous infection, offered once per being per tick.
    fn random_infection_probability(&self) -> f64;
    fn infects(&self, species: Species) -> bool;
    /// Applies one tick of the disease to its host.
    fn afflict(&self, vitals: &mut Vitals, state: &mut AnimalState, profile: &SpeciesProfile);
}

impl DiseaseLogic for Disease {
    fn infection_probability(&self) -> f64 {
        match self {
            Disease::AnimalFlu => 0.08,
            Disease::WolfFlu => 0.02,
        }
    }

    fn random_infection_probability(&self) -> f64 {
        0.005
    }

    fn infects(&self, species: Species) -> bool {
        match self {
            Disease::AnimalFlu => species.is_animal(),
            Disease::WolfFlu => species == Species::Wolf,
        }
    }

    fn afflict(&self, vitals: &mut Vitals, state: &mut AnimalState, profile: &SpeciesProfile) {
        match self {
            Disease::AnimalFlu => state.set_food_level(i64::from(state.food_level) - 1),
            Disease::WolfFlu => vitals.set_max_age(i64::from(vitals.max_age) - 1, profile),
        }
    }
}

/// Diseases in circulation for one simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseRegistry {
    diseases: Vec<Disease>,
}

impl Default for DiseaseRegistry {
    fn default() -> Self {
        Self::new(Disease::ALL.to_vec())
    }
}

impl DiseaseRegistry {
    /// Duplicates are dropped, first occurrence wins.
    #[must_use]
    pub fn new(diseases: Vec<Disease>) -> Self {
        let mut unique = Vec::with_capacity(diseases.len());
        for disease in diseases {
            if !unique.contains(&disease) {
                unique.push(disease);
            }
        }
        Self { diseases: unique }
    }

    pub fn iter(&self) -> impl Iterator<Item = Disease> + '_ {
        self.diseases.iter().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }
}
