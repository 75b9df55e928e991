//! Per-being behaviour run once per tick by the orchestrator.

pub mod animal;
pub mod pathogen;
pub mod plant;

use crate::grid::Fields;
use crate::lifecycle;
use crate::random::RandomSource;
use crate::species::SpeciesRegistry;
use canopy_data::{DeathCause, Kingdom, StepReport, Weather};
use std::collections::BTreeMap;

/// Outcome counters gathered while beings act.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StepTally {
    pub births: usize,
    pub deaths: BTreeMap<DeathCause, usize>,
    pub infections: usize,
}

impl StepTally {
    pub fn record_death(&mut self, cause: DeathCause) {
        *self.deaths.entry(cause).or_insert(0) += 1;
    }

    #[must_use]
    pub fn into_report(
        self,
        step: u64,
        weather_change: Option<Weather>,
        population: usize,
    ) -> StepReport {
        StepReport {
            step,
            births: self.births,
            deaths: self.deaths,
            infections: self.infections,
            weather_change,
            population,
        }
    }
}

/// Everything a being may touch during its turn.
pub struct ActContext<'a, R: RandomSource> {
    pub ecs: &'a mut hecs::World,
    pub fields: &'a mut Fields,
    pub species: &'a SpeciesRegistry,
    pub rng: &'a mut R,
    /// Beings born this tick; they act from the next tick on.
    pub newborns: &'a mut Vec<hecs::Entity>,
    pub tally: &'a mut StepTally,
}

impl<R: RandomSource> ActContext<'_, R> {
    /// Kills and records the cause. No-op for beings already gone.
    pub fn kill(&mut self, entity: hecs::Entity, cause: DeathCause) -> bool {
        let died = lifecycle::kill(self.ecs, self.fields, entity, cause);
        if died {
            self.tally.record_death(cause);
        }
        died
    }

    /// Ages the being by one year. Returns false if it died of old age.
    pub fn grow_older(&mut self, entity: hecs::Entity) -> bool {
        if lifecycle::grow_older(self.ecs, self.fields, entity) {
            return true;
        }
        self.tally.record_death(DeathCause::OldAge);
        false
    }
}

/// Runs one being's turn. Beings that died earlier in the tick are skipped.
pub fn act<R: RandomSource>(ctx: &mut ActContext<'_, R>, entity: hecs::Entity) {
    let Some(species) = lifecycle::species_of(ctx.ecs, entity) else {
        return;
    };
    match species.kingdom() {
        Kingdom::Animal => animal::act(ctx, entity),
        Kingdom::Plant => plant::act(ctx, entity),
    }
}
