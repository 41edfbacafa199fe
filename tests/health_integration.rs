//! Health state machine integration tests: damage, invincibility windows,
//! death and the notifications they publish.

use bevy_ecs::prelude::*;
use glam::Vec3;

use whaleshark::components::health::{DamageOutcome, Health, HealthConfig, HealthState};
use whaleshark::components::tint::Tint;
use whaleshark::components::ttl::Ttl;
use whaleshark::events::bus::{HealthChanged, Hit, PlayerDied};
use whaleshark::events::health::{DamageEvent, HealEvent, HealthMessage};
use whaleshark::resources::eventbus::EventBusExt;
use whaleshark::resources::worldtime::WorldTime;
use whaleshark::systems::health::{invincibility_system, setup_health};
use whaleshark::systems::time::update_world_time;

#[derive(Resource, Default)]
struct Heard {
    hits: Vec<Vec3>,
    health: Vec<i32>,
    deaths: u32,
}

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.init_resource::<Heard>();
    setup_health(&mut world);
    world.subscribe(|In(Hit(at)): In<Hit>, mut heard: ResMut<Heard>| heard.hits.push(at));
    world.subscribe(|In(HealthChanged(hp)): In<HealthChanged>, mut heard: ResMut<Heard>| {
        heard.health.push(hp)
    });
    world.subscribe(|In(_): In<PlayerDied>, mut heard: ResMut<Heard>| heard.deaths += 1);
    world
}

fn damage(world: &mut World, entity: Entity, amount: f32) {
    world.trigger(DamageEvent::new(entity, amount));
    world.flush();
}

fn advance(world: &mut World, seconds: f32) {
    let mut schedule = Schedule::default();
    schedule.add_systems(invincibility_system);
    let steps = (seconds / 0.02).round() as usize;
    for _ in 0..steps {
        update_world_time(world, 0.02);
        schedule.run(world);
    }
}

fn current(world: &World, entity: Entity) -> f32 {
    world.get::<Health>(entity).unwrap().current()
}

#[test]
fn second_hit_inside_invincibility_is_ignored() {
    let mut world = make_world();
    let player = world
        .spawn((
            Health::new(
                HealthConfig::player()
                    .with_max_health(100.0)
                    .with_invincibility(1.0),
            ),
            Tint::default(),
        ))
        .id();

    damage(&mut world, player, 30.0);
    advance(&mut world, 0.5);
    damage(&mut world, player, 30.0);

    assert_eq!(current(&world, player), 70.0);
    let heard = world.resource::<Heard>();
    assert_eq!(heard.hits.len(), 1);
    assert_eq!(heard.health, vec![70]);

    advance(&mut world, 0.6);
    assert!(!world.get::<Health>(player).unwrap().state.is_invincible());
    assert_eq!(world.get::<Tint>(player).unwrap().a, 1.0);
    damage(&mut world, player, 30.0);
    assert_eq!(current(&world, player), 40.0);
}

#[test]
fn death_happens_once_and_freezes_health() {
    let mut world = make_world();
    let player = world
        .spawn(Health::new(
            HealthConfig::player().with_max_health(50.0).with_invincibility(0.0),
        ))
        .id();

    damage(&mut world, player, 20.0);
    damage(&mut world, player, 45.0);
    assert_eq!(current(&world, player), 0.0);
    assert!(world.get::<Health>(player).unwrap().is_dead());
    assert!(world.get::<Ttl>(player).is_some());

    damage(&mut world, player, 10.0);
    world.trigger(HealEvent {
        entity: player,
        amount: 25.0,
    });
    world.flush();
    assert_eq!(current(&world, player), 0.0);

    let heard = world.resource::<Heard>();
    assert_eq!(heard.deaths, 1);
    // The killing blow still counts as a hit.
    assert_eq!(heard.hits.len(), 2);
    assert_eq!(heard.health, vec![30, 0]);

    let died: Vec<_> = world
        .resource::<Messages<HealthMessage>>()
        .iter_current_update_messages()
        .filter(|m| matches!(m, HealthMessage::Died { .. }))
        .collect();
    assert_eq!(died.len(), 1);
}

#[test]
fn non_players_stay_off_the_global_health_channel() {
    let mut world = make_world();
    let crate_box = world
        .spawn((
            Health::new(HealthConfig::default()),
            whaleshark::components::transform::Transform::from_xyz(4.0, 2.0, 0.0),
        ))
        .id();
    damage(&mut world, crate_box, 10.0);

    let heard = world.resource::<Heard>();
    assert!(heard.health.is_empty());
    assert_eq!(heard.hits, vec![Vec3::new(4.0, 2.0, 0.0)]);
}

#[test]
fn heal_is_capped_at_max() {
    let mut world = make_world();
    let player = world
        .spawn(Health::new(HealthConfig::player().with_invincibility(0.0)))
        .id();
    damage(&mut world, player, 40.0);
    world.trigger(HealEvent {
        entity: player,
        amount: 500.0,
    });
    world.flush();
    assert_eq!(current(&world, player), 100.0);
    assert_eq!(world.resource::<Heard>().health, vec![60, 100]);
}

#[test]
fn health_stays_clamped_under_random_sequences() {
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..50 {
        let mut state = HealthState::new(100.0);
        let mut died = 0;
        for _ in 0..100 {
            let amount = rng.f32() * 60.0 - 10.0;
            if rng.bool() {
                let was_dead = state.is_dead();
                let before = state.current();
                let invincible = state.is_invincible();
                let outcome = state.take_damage(amount, if rng.bool() { 0.1 } else { 0.0 });
                if was_dead || invincible {
                    assert_eq!(outcome, DamageOutcome::Ignored);
                    assert_eq!(state.current(), before);
                }
                if outcome == DamageOutcome::Killed {
                    died += 1;
                    assert_eq!(state.current(), 0.0);
                }
            } else {
                let before = state.current();
                let healed = state.heal(amount);
                if state.is_dead() {
                    assert!(healed.is_none());
                    assert_eq!(state.current(), before);
                }
            }
            state.tick(0.05);
            assert!(state.current() >= 0.0 && state.current() <= state.max());
        }
        assert!(died <= 1);
    }
}
