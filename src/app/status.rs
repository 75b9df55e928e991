//! Plain-text status line for the headless runner.

use canopy_data::{FieldSnapshot, PopulationStats, Species};
use std::fmt::Write;

/// `Step: 12  Night  Raining  Population: Lynx: 3 Wolf: 5 ...`
#[must_use]
pub fn status_line(snapshot: &FieldSnapshot, stats: &PopulationStats) -> String {
    let (time, weather) = snapshot.labels();
    let mut line = format!("Step: {}  {time}  {weather}  Population:", snapshot.step);
    for species in Species::ALL {
        let count = stats.count(species);
        if count > 0 {
            let _ = write!(line, " {species}: {count}");
        }
    }
    if stats.infected > 0 {
        let _ = write!(line, "  Infected: {}", stats.infected);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_data::{TimeOfDay, Weather};

    #[test]
    fn test_status_line_lists_living_species() {
        let snapshot = FieldSnapshot {
            step: 3,
            hour: 22,
            time_of_day: TimeOfDay::Night,
            weather: Weather::Raining,
            layers: Vec::new(),
        };
        let mut stats = PopulationStats::default();
        stats.per_species.insert(Species::Wolf, 2);
        stats.per_species.insert(Species::Plant, 9);
        stats.infected = 1;

        assert_eq!(
            status_line(&snapshot, &stats),
            "Step: 3  Night  Raining  Population: Wolf: 2 Plant: 9  Infected: 1"
        );
    }
}
