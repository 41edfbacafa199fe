//! Countdown and removal of [`Ttl`] entities.

use bevy_ecs::prelude::*;

use crate::components::ttl::Ttl;
use crate::resources::worldtime::WorldTime;

/// Subtract the scaled frame delta from every [`Ttl`] and despawn the
/// entities whose time ran out.
///
/// Uses `try_despawn` so an actor removed by something else in the same frame
/// (scene change, pool release) does not produce an error.
pub fn ttl_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Ttl)>,
    mut commands: Commands,
) {
    let dt = world_time.delta;
    for (entity, mut ttl) in query.iter_mut() {
        ttl.remaining -= dt;
        if ttl.remaining <= 0.0 {
            commands.entity(entity).try_despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(world: &mut World, delta: f32) {
        world.resource_mut::<WorldTime>().delta = delta;
        let mut schedule = Schedule::default();
        schedule.add_systems(ttl_system);
        schedule.run(world);
    }

    #[test]
    fn despawns_after_time_runs_out() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let e = world.spawn(Ttl::new(0.1)).id();

        tick(&mut world, 0.05);
        assert!(world.get_entity(e).is_ok());
        tick(&mut world, 0.06);
        assert!(world.get_entity(e).is_err());
    }

    #[test]
    fn frozen_time_keeps_entity_alive() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let e = world.spawn(Ttl::new(0.1)).id();
        tick(&mut world, 0.0);
        tick(&mut world, 0.0);
        assert!(world.get_entity(e).is_ok());
    }
}
