/// Asserts that the being is still in the world.
#[macro_export]
macro_rules! assert_alive {
    ($eco:expr, $entity:expr) => {
        assert!(
            $eco.is_alive($entity),
            "{:?} should be alive but is gone",
            $entity
        );
    };
}

/// Asserts that the being is gone and no grid cell still holds it.
#[macro_export]
macro_rules! assert_dead {
    ($eco:expr, $entity:expr) => {
        assert!(
            !$eco.is_alive($entity),
            "{:?} should be dead but was found alive",
            $entity
        );
        for layer in canopy_lib::model::data::Layer::ALL {
            let held = $eco
                .grid(layer)
                .iter()
                .any(|(_, occupant)| occupant == Some($entity));
            assert!(!held, "{:?} still occupies a cell on {:?}", $entity, layer);
        }
    };
}

/// Asserts which being occupies a cell.
#[macro_export]
macro_rules! assert_occupant {
    ($eco:expr, $layer:expr, $row:expr, $col:expr, $expected:expr) => {
        assert_eq!(
            $eco.grid($layer)
                .occupant_at(canopy_lib::model::data::Location::new($row, $col)),
            $expected,
            "Unexpected occupant at {},{}",
            $row,
            $col
        );
    };
}
