//! Animal turn: ageing, disease, hunger, then (in the active phase) birth,
//! foraging and movement.

use super::{pathogen, ActContext};
use crate::lifecycle::{self, Age, AnimalState, Vitals};
use crate::random::RandomSource;
use crate::species::SpeciesProfile;
use canopy_data::{DeathCause, Location};

pub fn act<R: RandomSource>(ctx: &mut ActContext<'_, R>, entity: hecs::Entity) {
    if !ctx.grow_older(entity) {
        return;
    }
    pathogen::run_diseases(ctx, entity);
    if !grow_hungry(ctx, entity) {
        return;
    }

    let registry = ctx.species;
    let Some(profile) = lifecycle::species_of(ctx.ecs, entity).and_then(|s| registry.get(s))
    else {
        return;
    };
    let Some(habitat) = lifecycle::habitat_of(ctx.ecs, entity) else {
        return;
    };
    if profile.nocturnal != ctx.fields.get(habitat.layer).is_night() {
        return;
    }

    give_birth(ctx, entity, profile);

    let destination = match find_food(ctx, entity, profile) {
        Some(meal) => Some(meal),
        None => ctx
            .fields
            .get(habitat.layer)
            .free_adjacent_location(habitat.location, ctx.rng),
    };
    match destination {
        Some(location) => lifecycle::relocate(ctx.ecs, ctx.fields, entity, location),
        None => {
            ctx.kill(entity, DeathCause::Overcrowding);
        }
    }
}

/// Burns one unit of food. Returns false if the animal starved.
pub fn grow_hungry<R: RandomSource>(ctx: &mut ActContext<'_, R>, entity: hecs::Entity) -> bool {
    let starved = match ctx.ecs.query_one_mut::<&mut AnimalState>(entity) {
        Ok(state) => {
            state.food_level = state.food_level.saturating_sub(1);
            state.food_level == 0
        }
        Err(_) => return false,
    };
    if starved {
        ctx.kill(entity, DeathCause::Starvation);
        return false;
    }
    true
}

/// A female of breeding age next to a male of the same species at breeding
/// age may produce a litter. Newborns take free neighbouring cells in scan
/// order; the rest of the litter is lost. Returns the number born.
pub fn give_birth<R: RandomSource>(
    ctx: &mut ActContext<'_, R>,
    entity: hecs::Entity,
    profile: &SpeciesProfile,
) -> usize {
    let Some(habitat) = lifecycle::habitat_of(ctx.ecs, entity) else {
        return 0;
    };
    let breeding_probability = match ctx.ecs.query_one_mut::<(&Vitals, &AnimalState)>(entity) {
        Ok((vitals, state)) if state.sex.is_female() && vitals.age >= profile.breeding_age => {
            vitals.breeding_probability
        }
        _ => return 0,
    };

    let grid = ctx.fields.get(habitat.layer);
    let mut has_partner = false;
    for location in grid.adjacent_locations(habitat.location, ctx.rng) {
        if let Some(other) = grid.occupant_at(location) {
            if is_breeding_male(ctx.ecs, other, profile) {
                has_partner = true;
                break;
            }
        }
    }
    if !has_partner {
        return 0;
    }

    let mut free = grid.free_adjacent_locations(habitat.location, ctx.rng);
    let litter = litter_size(ctx.rng, breeding_probability, profile.max_litter_size);
    free.truncate(litter);
    let born = free.len();
    for location in free {
        let young = lifecycle::spawn_being(
            ctx.ecs,
            ctx.fields,
            profile,
            location,
            Age::Newborn,
            ctx.rng,
        );
        ctx.newborns.push(young);
    }
    if born > 0 {
        ctx.tally.births += born;
        tracing::debug!(?entity, species = %profile.species, born, litter, "Litter born");
    }
    born
}

fn is_breeding_male(ecs: &hecs::World, other: hecs::Entity, profile: &SpeciesProfile) -> bool {
    if lifecycle::species_of(ecs, other) != Some(profile.species) {
        return false;
    }
    let Ok(vitals) = ecs.get::<&Vitals>(other) else {
        return false;
    };
    let Ok(state) = ecs.get::<&AnimalState>(other) else {
        return false;
    };
    !state.sex.is_female() && vitals.age >= profile.breeding_age
}

/// One draw against `probability`; on success a size in `[1, max_litter]`.
pub fn litter_size<R: RandomSource>(rng: &mut R, probability: f64, max_litter: u32) -> usize {
    if !rng.chance(probability) {
        return 0;
    }
    rng.next_below(max_litter as usize) + 1
}

/// Scans the hunting field around the animal, plus its own cell, and eats
/// the first edible being found. Returns the cell to move to.
///
/// A cell on a foreign hunting field only counts if the animal could step
/// onto it: its own cell, or a free cell on its own grid.
pub fn find_food<R: RandomSource>(
    ctx: &mut ActContext<'_, R>,
    entity: hecs::Entity,
    profile: &SpeciesProfile,
) -> Option<Location> {
    let habitat = lifecycle::habitat_of(ctx.ecs, entity)?;
    let hunting = ctx.fields.get(profile.hunting_field);
    let own = ctx.fields.get(habitat.layer);
    let same_field = profile.hunting_field == habitat.layer;

    let mut reachable = hunting.adjacent_locations(habitat.location, ctx.rng);
    reachable.push(habitat.location);

    let mut meal = None;
    for location in reachable {
        let Some(prey) = hunting.occupant_at(location) else {
            continue;
        };
        if prey == entity {
            continue;
        }
        let edible = lifecycle::species_of(ctx.ecs, prey).is_some_and(|s| profile.eats(s));
        let enterable = same_field || location == habitat.location || own.is_free(location);
        if edible && enterable {
            meal = Some((prey, location));
            break;
        }
    }

    let (prey, location) = meal?;
    let food_value = ctx.ecs.get::<&Vitals>(prey).ok()?.food_value;
    ctx.kill(prey, DeathCause::Predation);
    if let Ok(state) = ctx.ecs.query_one_mut::<&mut AnimalState>(entity) {
        state.feed(food_value);
    }
    Some(location)
}
