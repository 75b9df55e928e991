mod common;

use canopy_lib::model::data::{Species, Weather};
use common::{set_breeding_probability, vitals, EcosystemBuilder};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn test_weather_change_applies_to_whole_population() {
    let (mut eco, beings) = EcosystemBuilder::new()
        .with_config(|c| c.climate.change_probability = 1.0)
        .with_being(Species::Wolf, 0, 0)
        .with_being(Species::Hamster, 2, 2)
        .with_being(Species::Plant, 0, 2)
        .build();
    // Variant index 0 is Raining.
    eco.rng_mut().push_ints(&[0]);

    let report = eco.step();

    assert_eq!(report.weather_change, Some(Weather::Raining));
    assert_eq!(eco.weather(), Weather::Raining);
    assert!(close(vitals(&eco, beings[0]).breeding_probability, 0.35 / 2.0));
    assert!(close(vitals(&eco, beings[1]).breeding_probability, 0.40 / 2.0));
    assert!(close(vitals(&eco, beings[2]).breeding_probability, 0.24));
    assert_eq!(eco.snapshot().labels().1, "Raining");
}

#[test]
fn test_variant_only_drawn_when_change_fires() {
    let (mut eco, _) = EcosystemBuilder::new()
        .with_being(Species::Plant, 1, 1)
        .build();
    eco.rng_mut().push_ints(&[1]);

    let report = eco.step();

    assert_eq!(report.weather_change, None);
    assert_eq!(eco.rng_mut().pending().1, 1);
}

#[test]
fn test_reselecting_current_weather_still_reapplies() {
    let (mut eco, beings) = EcosystemBuilder::new()
        .with_config(|c| c.climate.change_probability = 1.0)
        .with_being(Species::Deer, 0, 0)
        .build();
    set_breeding_probability(&mut eco, beings[0], 0.9);
    // Index 1 is Sunny, the weather already in force.
    eco.rng_mut().push_ints(&[1]);

    let report = eco.step();

    assert_eq!(report.weather_change, Some(Weather::Sunny));
    assert_eq!(vitals(&eco, beings[0]).breeding_probability, 0.30);
}

#[test]
fn test_sunny_is_idempotent() {
    let (mut eco, beings) = EcosystemBuilder::new()
        .with_being(Species::Wolf, 0, 0)
        .with_being(Species::Plant, 0, 0)
        .build();

    eco.set_weather(Weather::Raining);
    eco.set_weather(Weather::Raining);
    assert!(close(vitals(&eco, beings[0]).breeding_probability, 0.35 / 4.0));

    eco.set_weather(Weather::Sunny);
    let once: Vec<f64> = beings
        .iter()
        .map(|e| vitals(&eco, *e).breeding_probability)
        .collect();
    eco.set_weather(Weather::Sunny);
    let twice: Vec<f64> = beings
        .iter()
        .map(|e| vitals(&eco, *e).breeding_probability)
        .collect();
    assert_eq!(once, twice);
    assert_eq!(once, vec![0.35, 0.12]);
}

#[test]
fn test_rain_saturates_plant_breeding_at_one() {
    let (mut eco, beings) = EcosystemBuilder::new()
        .with_being(Species::Plant, 1, 1)
        .build();
    for _ in 0..4 {
        eco.set_weather(Weather::Raining);
    }
    assert_eq!(vitals(&eco, beings[0]).breeding_probability, 1.0);
}
