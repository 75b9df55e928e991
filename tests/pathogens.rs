#[macro_use]
mod common;

use canopy_lib::model::config::AppConfig;
use canopy_lib::model::data::{Disease, Layer, Species};
use canopy_lib::model::lifecycle::{AnimalState, SICK_ALPHA};
use canopy_lib::model::world::Ecosystem;
use common::{animal, infect_with, set_food, vitals, EcosystemBuilder};
use std::collections::{BTreeMap, BTreeSet};

#[test]
fn test_contact_spreads_to_susceptible_neighbour() {
    let (mut eco, beings) = EcosystemBuilder::new()
        .with_being(Species::Wolf, 1, 1)
        .with_being(Species::Wolf, 0, 0)
        .build();
    let (carrier, neighbour) = (beings[0], beings[1]);
    infect_with(&mut eco, carrier, Disease::WolfFlu);
    // Weather roll, then the contact roll for the one neighbour.
    eco.rng_mut().push_floats(&[0.999, 0.0]);

    let report = eco.step();

    let state = animal(&eco, neighbour);
    assert!(state.diseases.contains(&Disease::WolfFlu));
    assert_eq!(state.color.map(|c| c.a), Some(SICK_ALPHA));
    assert_eq!(report.infections, 1);
    assert_eq!(vitals(&eco, carrier).max_age, 270 - 1);
}

#[test]
fn test_whitelist_blocks_other_species_without_a_draw() {
    let (mut eco, beings) = EcosystemBuilder::new()
        .with_being(Species::Wolf, 1, 1)
        .with_being(Species::Lynx, 0, 0)
        .build();
    let (carrier, lynx) = (beings[0], beings[1]);
    infect_with(&mut eco, carrier, Disease::WolfFlu);
    eco.rng_mut().push_floats(&[0.999, 0.0]);

    let report = eco.step();

    assert!(animal(&eco, lynx).diseases.is_empty());
    assert_eq!(report.infections, 0);
    assert_eq!(eco.rng_mut().pending().0, 1);
}

#[test]
fn test_animal_flu_crosses_species() {
    let (mut eco, beings) = EcosystemBuilder::new()
        .with_being(Species::Deer, 1, 1)
        .with_being(Species::Hamster, 0, 0)
        .build();
    let (carrier, hamster) = (beings[0], beings[1]);
    infect_with(&mut eco, carrier, Disease::AnimalFlu);
    eco.rng_mut().push_floats(&[0.999, 0.0]);

    eco.step();

    assert!(animal(&eco, hamster).diseases.contains(&Disease::AnimalFlu));
    // Flu costs one unit on top of ordinary hunger.
    let state = animal(&eco, carrier);
    assert_eq!(state.food_level, state.max_food_level - 2);
}

#[test]
fn test_ambient_exposure_lands_before_the_being_acts() {
    let (mut eco, beings) = EcosystemBuilder::new()
        .with_config(|c| c.pathogens.enabled = vec![Disease::AnimalFlu])
        .with_being(Species::Deer, 1, 1)
        .build();
    let deer = beings[0];
    eco.rng_mut().push_floats(&[0.999, 0.0]);

    let report = eco.step();

    let state = animal(&eco, deer);
    assert!(state.diseases.contains(&Disease::AnimalFlu));
    assert_eq!(state.food_level, 15 - 2);
    assert_eq!(report.infections, 1);
    assert_eq!(eco.stats().infected, 1);
}

#[test]
fn test_plants_are_never_exposed() {
    let (mut eco, beings) = EcosystemBuilder::new()
        .with_config(|c| c.pathogens.enabled = vec![Disease::AnimalFlu])
        .with_being(Species::Plant, 1, 1)
        .build();
    assert_alive!(eco, beings[0]);
    // The low draw is left for the first spread roll instead.
    eco.rng_mut().push_floats(&[0.999, 0.0]);

    let report = eco.step();

    assert_eq!(report.infections, 0);
    assert_eq!(report.births, 1);
    assert!(eco
        .grid(Layer::Flora)
        .occupant_at(canopy_lib::model::data::Location::new(0, 0))
        .is_some());
}

#[test]
fn test_reinfection_is_a_no_op() {
    let (mut eco, beings) = EcosystemBuilder::new()
        .with_config(|c| c.pathogens.enabled = vec![Disease::AnimalFlu])
        .with_being(Species::Deer, 1, 1)
        .build();
    let deer = beings[0];
    infect_with(&mut eco, deer, Disease::AnimalFlu);
    set_food(&mut eco, deer, 10);
    eco.rng_mut().push_floats(&[0.999, 0.0]);

    let report = eco.step();

    assert_eq!(report.infections, 0);
    assert_eq!(animal(&eco, deer).diseases.len(), 1);
}

#[test]
fn test_disease_sets_never_shrink() {
    let mut config = AppConfig::default();
    config.world.depth = 25;
    config.world.width = 25;
    config.world.seed = Some(2024);
    let mut eco = Ecosystem::from_config(&config).unwrap();
    eco.populate();

    let mut seen: BTreeMap<hecs::Entity, BTreeSet<Disease>> = BTreeMap::new();
    for _ in 0..150 {
        eco.step();
        for (entity, state) in eco.entities().query::<&AnimalState>().iter() {
            let before = seen.entry(entity).or_default();
            assert!(
                before.is_subset(&state.diseases),
                "{entity:?} lost a disease"
            );
            before.clone_from(&state.diseases);
        }
    }
}
