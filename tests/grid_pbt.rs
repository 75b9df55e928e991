use canopy_lib::model::config::AppConfig;
use canopy_lib::model::data::Location;
use canopy_lib::model::environment::DiurnalClock;
use canopy_lib::model::grid::Grid;
use canopy_lib::model::lifecycle::{AnimalState, Vitals};
use canopy_lib::model::random::SeededRandom;
use canopy_lib::model::world::Ecosystem;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

prop_compose! {
    fn arb_grid_and_cell()(depth in 1usize..12, width in 1usize..12)
        (row in 0..depth, col in 0..width, depth in Just(depth), width in Just(width))
        -> (usize, usize, Location) {
        (depth, width, Location::new(row, col))
    }
}

fn clock() -> Arc<DiurnalClock> {
    Arc::new(DiurnalClock::new(0, 24, 21, 5).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn adjacency_is_the_in_bounds_moore_neighbourhood(
        (depth, width, here) in arb_grid_and_cell(),
        seed in any::<u64>()
    ) {
        let grid = Grid::new(depth, width, clock()).unwrap();
        let mut rng = SeededRandom::from_seed(seed);
        let neighbours = grid.adjacent_locations(here, &mut rng);

        let unique: BTreeSet<Location> = neighbours.iter().copied().collect();
        prop_assert_eq!(unique.len(), neighbours.len());
        prop_assert!(!unique.contains(&here));

        let mut expected = BTreeSet::new();
        for row in here.row.saturating_sub(1)..=(here.row + 1).min(depth - 1) {
            for col in here.col.saturating_sub(1)..=(here.col + 1).min(width - 1) {
                let loc = Location::new(row, col);
                if loc != here {
                    expected.insert(loc);
                }
            }
        }
        prop_assert_eq!(unique, expected);
    }

    #[test]
    fn out_of_range_reads_are_empty(row in -50i64..50, col in -50i64..50) {
        let grid = Grid::new(5, 7, clock()).unwrap();
        prop_assert!(grid.occupant_at_rc(row, col).is_none());
    }

    #[test]
    fn night_window_matches_definition(
        period in 1i64..48,
        start in 0i64..48,
        end in 0i64..48,
        initial in -100i64..100
    ) {
        let clock = DiurnalClock::new(initial, period, start, end).unwrap();
        prop_assert_eq!(i64::from(clock.hour()), initial.abs() % period);
        for _ in 0..period {
            let hour = i64::from(clock.hour());
            let expected = if start <= end {
                hour >= start && hour <= end
            } else {
                hour >= start || hour <= end
            };
            prop_assert_eq!(clock.is_night(), expected);
            clock.increase_time();
        }
        prop_assert_eq!(i64::from(clock.hour()), initial.abs() % period);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn stepping_preserves_invariants(seed in any::<u64>(), depth in 4usize..14, width in 4usize..14) {
        let mut config = AppConfig::default();
        config.world.depth = depth;
        config.world.width = width;
        config.world.seed = Some(seed);
        let mut eco = Ecosystem::from_config(&config).unwrap();
        eco.populate();

        for _ in 0..25 {
            eco.step();
            prop_assert!(eco.verify_placement().is_ok());
            for &entity in eco.population() {
                let vitals = eco.entities().get::<&Vitals>(entity).unwrap();
                prop_assert!(vitals.age <= vitals.max_age);
                prop_assert!((0.0..=1.0).contains(&vitals.breeding_probability));
                if let Ok(state) = eco.entities().get::<&AnimalState>(entity) {
                    prop_assert!(state.food_level <= state.max_food_level);
                }
            }
        }
    }
}
