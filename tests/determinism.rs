use canopy_lib::model::config::AppConfig;
use canopy_lib::model::data::Layer;
use canopy_lib::model::world::Ecosystem;

fn seeded(seed: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.world.depth = 40;
    config.world.width = 60;
    config.world.seed = Some(seed);
    config
}

#[test]
fn test_determinism_consistency() {
    let config = seeded(12345);
    let mut eco1 = Ecosystem::from_config(&config).unwrap();
    let mut eco2 = Ecosystem::from_config(&config).unwrap();
    eco1.populate();
    eco2.populate();
    assert_eq!(eco1.fingerprint(), eco2.fingerprint());

    for _ in 0..100 {
        let r1 = eco1.step();
        let r2 = eco2.step();
        assert_eq!(r1, r2, "Step reports should match");
    }

    assert_eq!(
        eco1.population().len(),
        eco2.population().len(),
        "Population sizes should match"
    );
    assert_eq!(eco1.snapshot(), eco2.snapshot());
    assert_eq!(eco1.fingerprint(), eco2.fingerprint());
    assert_eq!(eco1.stats(), eco2.stats());
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = Ecosystem::from_config(&seeded(1)).unwrap();
    let mut b = Ecosystem::from_config(&seeded(2)).unwrap();
    a.populate();
    b.populate();
    assert_ne!(a.fingerprint(), b.fingerprint());
}

#[test]
fn test_repopulating_restarts_the_run() {
    let config = seeded(77);
    let mut eco = Ecosystem::from_config(&config).unwrap();
    eco.populate();
    for _ in 0..10 {
        eco.step();
    }
    eco.populate();
    assert_eq!(eco.step_count(), 0);
    eco.verify_placement().unwrap();
    let occupied: usize = Layer::ALL.iter().map(|l| eco.grid(*l).occupied()).sum();
    assert_eq!(occupied, eco.population().len());
}

#[test]
fn test_simulate_stops_when_fauna_collapses() {
    let mut config = seeded(5);
    config.world.depth = 6;
    config.world.width = 6;
    // Only hamsters and plants: a single animal species is never viable.
    for profile in &mut config.species {
        if profile.species.is_animal() && profile.species != canopy_lib::model::data::Species::Hamster {
            profile.spawn_probability = 0.0;
        }
    }
    let mut eco = Ecosystem::from_config(&config).unwrap();
    eco.populate();
    assert!(!eco.is_viable());
    assert!(eco.simulate(20).is_empty());
}

#[test]
fn test_simulate_runs_full_budget_while_viable() {
    let config = seeded(9);
    let mut eco = Ecosystem::from_config(&config).unwrap();
    eco.populate();
    assert!(eco.is_viable());
    let reports = eco.simulate(5);
    assert_eq!(reports.len(), 5);
    assert_eq!(reports.last().map(|r| r.step), Some(5));
}
