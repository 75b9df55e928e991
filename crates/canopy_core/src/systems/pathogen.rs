//! Contact and ambient infection.

use super::ActContext;
use crate::lifecycle::{self, AnimalState, Vitals};
use crate::pathogen::{DiseaseLogic, DiseaseRegistry};
use crate::random::RandomSource;
use crate::species::SpeciesRegistry;
use canopy_data::Disease;

/// True for a living animal whose species `disease` accepts.
#[must_use]
pub fn can_infect(ecs: &hecs::World, disease: Disease, candidate: hecs::Entity) -> bool {
    if ecs.get::<&AnimalState>(candidate).is_err() {
        return false;
    }
    lifecycle::species_of(ecs, candidate).is_some_and(|species| disease.infects(species))
}

/// Adds `disease` to the animal's set. Returns true only on a new infection.
pub fn infect(
    ecs: &mut hecs::World,
    species: &SpeciesRegistry,
    entity: hecs::Entity,
    disease: Disease,
) -> bool {
    let base_color = lifecycle::species_of(ecs, entity)
        .and_then(|tag| species.get(tag))
        .and_then(|profile| profile.base_color);
    match ecs.query_one_mut::<&mut AnimalState>(entity) {
        Ok(state) => {
            let fresh = state.infect(disease, base_color);
            if fresh {
                tracing::debug!(?entity, %disease, "Infected");
            }
            fresh
        }
        Err(_) => false,
    }
}

/// Offers every circulating disease once, regardless of nearby carriers.
pub fn expose_to_ambient<R: RandomSource>(
    ctx: &mut ActContext<'_, R>,
    entity: hecs::Entity,
    diseases: &DiseaseRegistry,
) {
    for disease in diseases.iter() {
        if can_infect(ctx.ecs, disease, entity)
            && ctx.rng.chance(disease.random_infection_probability())
            && infect(ctx.ecs, ctx.species, entity, disease)
        {
            ctx.tally.infections += 1;
        }
    }
}

/// Offers `disease` to each neighbour of `carrier` on its own grid, with an
/// independent draw per susceptible neighbour.
pub fn spread_by_contact<R: RandomSource>(
    ctx: &mut ActContext<'_, R>,
    carrier: hecs::Entity,
    disease: Disease,
) {
    let Some(habitat) = lifecycle::habitat_of(ctx.ecs, carrier) else {
        return;
    };
    let grid = ctx.fields.get(habitat.layer);
    let neighbours: Vec<hecs::Entity> = grid
        .adjacent_locations(habitat.location, ctx.rng)
        .into_iter()
        .filter_map(|loc| grid.occupant_at(loc))
        .collect();
    for neighbour in neighbours {
        if can_infect(ctx.ecs, disease, neighbour)
            && ctx.rng.chance(disease.infection_probability())
            && infect(ctx.ecs, ctx.species, neighbour, disease)
        {
            ctx.tally.infections += 1;
        }
    }
}

/// Each held disease first spreads, then takes its toll on the carrier.
pub fn run_diseases<R: RandomSource>(ctx: &mut ActContext<'_, R>, entity: hecs::Entity) {
    let held: Vec<Disease> = match ctx.ecs.get::<&AnimalState>(entity) {
        Ok(state) => state.diseases.iter().copied().collect(),
        Err(_) => return,
    };
    let registry = ctx.species;
    let Some(profile) = lifecycle::species_of(ctx.ecs, entity).and_then(|s| registry.get(s))
    else {
        return;
    };
    for disease in held {
        spread_by_contact(ctx, entity, disease);
        if let Ok((vitals, state)) = ctx
            .ecs
            .query_one_mut::<(&mut Vitals, &mut AnimalState)>(entity)
        {
            disease.afflict(vitals, state, profile);
        }
    }
}
