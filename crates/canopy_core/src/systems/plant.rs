//! Plant turn: ageing, then seeding free neighbouring cells.

use super::ActContext;
use crate::lifecycle::{self, Age, Vitals};
use crate::random::RandomSource;

pub fn act<R: RandomSource>(ctx: &mut ActContext<'_, R>, entity: hecs::Entity) {
    if !ctx.grow_older(entity) {
        return;
    }
    spread(ctx, entity);
}

/// Each free neighbour gets its own draw against the plant's current
/// breeding probability, so weather reaches plants too.
pub fn spread<R: RandomSource>(ctx: &mut ActContext<'_, R>, entity: hecs::Entity) -> usize {
    let registry = ctx.species;
    let Some(profile) = lifecycle::species_of(ctx.ecs, entity).and_then(|s| registry.get(s))
    else {
        return 0;
    };
    let Some(habitat) = lifecycle::habitat_of(ctx.ecs, entity) else {
        return 0;
    };
    let probability = match ctx.ecs.get::<&Vitals>(entity) {
        Ok(vitals) => vitals.breeding_probability,
        Err(_) => return 0,
    };

    let free = ctx
        .fields
        .get(habitat.layer)
        .free_adjacent_locations(habitat.location, ctx.rng);
    let mut sprouted = 0;
    for location in free {
        if ctx.rng.chance(probability) {
            let seedling = lifecycle::spawn_being(
                ctx.ecs,
                ctx.fields,
                profile,
                location,
                Age::Newborn,
                ctx.rng,
            );
            ctx.newborns.push(seedling);
            sprouted += 1;
        }
    }
    ctx.tally.births += sprouted;
    sprouted
}
