//! Damage/heal observers and the invincibility tick.
//!
//! Side effects of a hit that lands, in order:
//!
//! 1. `HealthMessage::Damaged` and `HealthMessage::HealthChanged`.
//! 2. Hit effect entity and hit sound, when configured.
//! 3. `Hit` on the event bus, at the given position or the actor's own.
//! 4. For the player, `HealthChanged` on the bus with the rounded health.
//! 5. Flicker start, when the invincibility window opened.
//!
//! A killing blow adds `HealthMessage::Died`, the death effect and sound,
//! `PlayerDied` for the player, and a short [`Ttl`] when the actor is
//! destroyed on death.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{debug, info};

use crate::components::effect::{EFFECT_LIFETIME, Effect};
use crate::components::health::{
    DESTROY_DELAY, DamageOutcome, FLICKER_INTERVAL, Flicker, Health,
};
use crate::components::persistent::Persistent;
use crate::components::tint::{FLICKER_ALPHA, Tint};
use crate::components::transform::Transform;
use crate::components::ttl::Ttl;
use crate::events::bus::{HealthChanged, Hit, PlayerDied};
use crate::events::health::{DamageEvent, HealEvent, HealthMessage};
use crate::resources::audio::AudioManager;
use crate::resources::eventbus::BusCommandsExt;
use crate::resources::worldtime::WorldTime;

fn spawn_effect(commands: &mut Commands, prefab: &Option<String>, position: Vec3) {
    if let Some(prefab) = prefab {
        commands.spawn((
            Effect::new(prefab.clone()),
            Transform::from_translation(position),
            Ttl::new(EFFECT_LIFETIME),
        ));
    }
}

/// Whole-number health for listeners; halves round to even.
fn displayed_health(current: f32) -> i32 {
    current.round_ties_even() as i32
}

fn play_sound(audio: &mut Option<ResMut<AudioManager>>, clip: &Option<String>) {
    if let (Some(audio), Some(clip)) = (audio.as_mut(), clip) {
        audio.play_se(clip, 1.0);
    }
}

pub fn damage_observer(
    trigger: On<DamageEvent>,
    mut query: Query<(&mut Health, Option<&Transform>, Option<&mut Tint>)>,
    mut messages: MessageWriter<HealthMessage>,
    mut audio: Option<ResMut<AudioManager>>,
    mut commands: Commands,
) {
    let event = *trigger.event();
    let Ok((mut health, transform, tint)) = query.get_mut(event.entity) else {
        debug!("damage to {:?} ignored: no Health", event.entity);
        return;
    };
    let health = &mut *health;
    let actor_position = transform.map_or(Vec3::ZERO, |t| t.translation);
    let hit_position = event.position.unwrap_or(actor_position);

    let outcome = health
        .state
        .take_damage(event.amount, health.config.invincibility_duration);
    if outcome == DamageOutcome::Ignored {
        return;
    }
    let current = health.state.current();

    messages.write(HealthMessage::Damaged {
        entity: event.entity,
        amount: event.amount.max(0.0),
        health: current,
    });
    messages.write(HealthMessage::HealthChanged {
        entity: event.entity,
        health: current,
    });

    spawn_effect(&mut commands, &health.config.hit_effect, hit_position);
    play_sound(&mut audio, &health.config.hit_sound);
    commands.publish(Hit(hit_position));
    if health.config.is_player {
        commands.publish(HealthChanged(displayed_health(current)));
    }

    if outcome == DamageOutcome::Killed {
        info!("{:?} died", event.entity);
        messages.write(HealthMessage::Died {
            entity: event.entity,
        });
        spawn_effect(&mut commands, &health.config.death_effect, actor_position);
        play_sound(&mut audio, &health.config.death_sound);
        if health.config.is_player {
            commands.publish(PlayerDied);
        }
        if health.config.destroy_on_death {
            commands
                .entity(event.entity)
                .try_insert(Ttl::new(DESTROY_DELAY));
        }
        return;
    }

    if health.config.flash_on_hit && health.state.is_invincible() {
        health.flicker = Flicker {
            dimmed: true,
            next_toggle: FLICKER_INTERVAL,
        };
        if let Some(mut tint) = tint {
            tint.a = FLICKER_ALPHA;
        }
    }
}

pub fn heal_observer(
    trigger: On<HealEvent>,
    mut query: Query<&mut Health>,
    mut messages: MessageWriter<HealthMessage>,
    mut commands: Commands,
) {
    let event = *trigger.event();
    let Ok(mut health) = query.get_mut(event.entity) else {
        return;
    };
    let Some(current) = health.state.heal(event.amount) else {
        return;
    };
    messages.write(HealthMessage::HealthChanged {
        entity: event.entity,
        health: current,
    });
    if health.config.is_player {
        commands.publish(HealthChanged(displayed_health(current)));
    }
}

/// Count down invincibility on scaled time and drive the flicker.
///
/// The tint toggles between opaque and [`FLICKER_ALPHA`] every
/// [`FLICKER_INTERVAL`] seconds and is restored to opaque when the window
/// closes.
pub fn invincibility_system(
    time: Res<WorldTime>,
    mut query: Query<(&mut Health, Option<&mut Tint>)>,
) {
    let dt = time.delta;
    for (mut health, tint) in query.iter_mut() {
        if !health.state.is_invincible() {
            continue;
        }
        let health = &mut *health;
        if health.state.tick(dt) {
            health.flicker = Flicker::default();
            if let Some(mut tint) = tint {
                tint.a = 1.0;
            }
            continue;
        }
        if !health.config.flash_on_hit {
            continue;
        }
        health.flicker.next_toggle -= dt;
        while health.flicker.next_toggle <= 0.0 {
            health.flicker.dimmed = !health.flicker.dimmed;
            health.flicker.next_toggle += FLICKER_INTERVAL;
        }
        if let Some(mut tint) = tint {
            tint.a = if health.flicker.dimmed { FLICKER_ALPHA } else { 1.0 };
        }
    }
}

pub fn update_health_messages(mut msgs: ResMut<Messages<HealthMessage>>) {
    msgs.update();
}

/// Install the health observers and message queue.
pub fn setup_health(world: &mut World) {
    world.init_resource::<Messages<HealthMessage>>();
    world.spawn((Observer::new(damage_observer), Persistent));
    world.spawn((Observer::new(heal_observer), Persistent));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::health::HealthConfig;
    use crate::resources::eventbus::EventBusExt;

    #[derive(Resource, Default)]
    struct Heard {
        hits: Vec<Vec3>,
        health: Vec<i32>,
        died: u32,
    }

    fn make_world() -> World {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.init_resource::<Heard>();
        setup_health(&mut world);
        world.subscribe(|In(hit): In<Hit>, mut heard: ResMut<Heard>| heard.hits.push(hit.0));
        world.subscribe(|In(h): In<HealthChanged>, mut heard: ResMut<Heard>| {
            heard.health.push(h.0)
        });
        world.subscribe(|In(_): In<PlayerDied>, mut heard: ResMut<Heard>| heard.died += 1);
        world
    }

    fn damage(world: &mut World, entity: Entity, amount: f32) {
        world.trigger(DamageEvent::new(entity, amount));
        world.flush();
    }

    fn tick(world: &mut World, dt: f32) {
        world.resource_mut::<WorldTime>().delta = dt;
        let mut schedule = Schedule::default();
        schedule.add_systems(invincibility_system);
        schedule.run(world);
    }

    fn messages(world: &World) -> Vec<HealthMessage> {
        let msgs = world.resource::<Messages<HealthMessage>>();
        msgs.iter_current_update_messages().copied().collect()
    }

    #[test]
    fn second_hit_inside_window_is_ignored() {
        let mut world = make_world();
        let e = world
            .spawn((Health::new(HealthConfig::default()), Transform::from_xyz(1.0, 2.0, 0.0)))
            .id();
        damage(&mut world, e, 30.0);
        damage(&mut world, e, 30.0);
        assert_eq!(world.get::<Health>(e).unwrap().current(), 70.0);
        let heard = world.resource::<Heard>();
        assert_eq!(heard.hits, vec![Vec3::new(1.0, 2.0, 0.0)]);
        assert!(heard.health.is_empty(), "non-player stays off the bus");
    }

    #[test]
    fn explicit_hit_position_wins() {
        let mut world = make_world();
        let e = world.spawn(Health::default()).id();
        world.trigger(DamageEvent::new(e, 5.0).at(Vec3::new(9.0, 0.0, 0.0)));
        world.flush();
        assert_eq!(world.resource::<Heard>().hits, vec![Vec3::new(9.0, 0.0, 0.0)]);
    }

    #[test]
    fn player_death_is_announced_once() {
        let mut world = make_world();
        let e = world
            .spawn(Health::new(
                HealthConfig::player()
                    .with_max_health(50.0)
                    .with_invincibility(0.0),
            ))
            .id();
        damage(&mut world, e, 20.4);
        damage(&mut world, e, 40.0);
        damage(&mut world, e, 40.0);
        let heard = world.resource::<Heard>();
        assert_eq!(heard.health, vec![30, 0]);
        assert_eq!(heard.died, 1);
        assert!(world.get::<Ttl>(e).is_some(), "queued for removal");

        let died = messages(&world)
            .into_iter()
            .filter(|m| matches!(m, HealthMessage::Died { .. }))
            .count();
        assert_eq!(died, 1);
    }

    #[test]
    fn effects_and_sounds_are_spawned() {
        let mut world = make_world();
        world.insert_resource(AudioManager::new(4));
        let config = HealthConfig {
            hit_effect: Some("spark".into()),
            death_effect: Some("burst".into()),
            hit_sound: Some("hit".into()),
            death_sound: Some("die".into()),
            destroy_on_death: false,
            ..HealthConfig::default().with_max_health(10.0)
        };
        let e = world.spawn(Health::new(config)).id();
        damage(&mut world, e, 10.0);

        let mut effects: Vec<String> = world
            .query::<&Effect>()
            .iter(&world)
            .map(|fx| fx.prefab.clone())
            .collect();
        effects.sort();
        assert_eq!(effects, vec!["burst".to_string(), "spark".to_string()]);
        assert_eq!(world.resource_mut::<AudioManager>().drain_commands().len(), 2);
        assert!(world.get::<Ttl>(e).is_none());
    }

    #[test]
    fn reported_health_rounds_halves_to_even() {
        let mut world = make_world();
        let e = world
            .spawn(Health::new(HealthConfig::player().with_invincibility(0.0)))
            .id();
        damage(&mut world, e, 79.5);
        damage(&mut world, e, 1.0);
        assert_eq!(world.resource::<Heard>().health, vec![20, 20]);
        assert_eq!(displayed_health(21.5), 22);
        assert_eq!(displayed_health(0.4), 0);
    }

    #[test]
    fn heal_reports_and_clamps() {
        let mut world = make_world();
        let e = world
            .spawn(Health::new(HealthConfig::player().with_invincibility(0.0)))
            .id();
        damage(&mut world, e, 40.0);
        world.trigger(HealEvent {
            entity: e,
            amount: 100.0,
        });
        world.flush();
        assert_eq!(world.get::<Health>(e).unwrap().current(), 100.0);
        assert_eq!(world.resource::<Heard>().health, vec![60, 100]);
    }

    #[test]
    fn flicker_toggles_and_restores() {
        let mut world = make_world();
        let e = world
            .spawn((Health::default(), Tint::default()))
            .id();
        damage(&mut world, e, 10.0);
        assert_eq!(world.get::<Tint>(e).unwrap().a, FLICKER_ALPHA);

        tick(&mut world, 0.1);
        assert_eq!(world.get::<Tint>(e).unwrap().a, 1.0);
        tick(&mut world, 0.1);
        assert_eq!(world.get::<Tint>(e).unwrap().a, FLICKER_ALPHA);

        tick(&mut world, 0.35);
        let health = world.get::<Health>(e).unwrap();
        assert!(!health.state.is_invincible());
        assert_eq!(world.get::<Tint>(e).unwrap().a, 1.0);
    }

    #[test]
    fn paused_time_keeps_invincibility() {
        let mut world = make_world();
        let e = world.spawn(Health::default()).id();
        damage(&mut world, e, 10.0);
        for _ in 0..10 {
            tick(&mut world, 0.0);
        }
        assert!(world.get::<Health>(e).unwrap().state.is_invincible());
    }
}
