//! Projectile flight: lifetime expiry and hits.
//!
//! Both systems return projectiles to their pool with a queued world command,
//! since [`despawn_pooled`] needs the whole world to run the pool hooks.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};
use log::debug;

use crate::components::boxcollider::{BoxCollider, mask_contains};
use crate::components::effect::{EFFECT_LIFETIME, Effect};
use crate::components::health::Health;
use crate::components::projectile::Projectile;
use crate::components::rigidbody::RigidBody;
use crate::components::transform::Transform;
use crate::components::ttl::Ttl;
use crate::config::weapon::WeaponConfig;
use crate::events::health::DamageEvent;
use crate::resources::audio::AudioManager;
use crate::resources::collisionworld::CollisionWorld;
use crate::resources::pool::{despawn_pooled, spawn_pooled};
use crate::resources::worldtime::WorldTime;

fn release(commands: &mut Commands, entity: Entity) {
    commands.queue(move |world: &mut World| {
        despawn_pooled(world, entity);
    });
}

pub fn projectile_lifetime_system(
    time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Projectile)>,
    mut commands: Commands,
) {
    for (entity, mut projectile) in query.iter_mut() {
        if projectile.tick(time.delta) {
            release(&mut commands, entity);
        }
    }
}

/// Damage actors and stop at level geometry the projectile overlaps.
///
/// Only layers in the projectile's hit mask count. A target is hit at most
/// once per shot.
pub fn projectile_hit_system(
    mut projectiles: Query<(Entity, &mut Projectile, &Transform, &BoxCollider)>,
    targets: Query<(Entity, &Transform, &BoxCollider, Has<Health>), Without<Projectile>>,
    level: Option<Res<CollisionWorld>>,
    mut audio: Option<ResMut<AudioManager>>,
    mut commands: Commands,
) {
    for (entity, mut projectile, transform, collider) in projectiles.iter_mut() {
        if !projectile.is_active() {
            continue;
        }
        let position = transform.translation;
        let bounds = collider.aabb(position);

        let mut hit = false;
        for (target, target_transform, target_collider, has_health) in targets.iter() {
            if !mask_contains(projectile.hit_mask, target_collider.layer)
                || !bounds.overlaps(&target_collider.aabb(target_transform.translation))
                || !projectile.register_hit(target)
            {
                continue;
            }
            if has_health {
                commands.trigger(DamageEvent::new(target, projectile.damage).at(position));
            }
            hit = true;
            if projectile.destroy_on_hit {
                break;
            }
        }
        if !hit {
            hit = level
                .as_ref()
                .is_some_and(|level| level.overlapping(&bounds, projectile.hit_mask).next().is_some());
        }
        if !hit {
            continue;
        }

        debug!("projectile {:?} hit at {:?}", entity, position);
        if let Some(prefab) = &projectile.hit_effect {
            commands.spawn((
                Effect::new(prefab.clone()),
                Transform::from_translation(position),
                Ttl::new(EFFECT_LIFETIME),
            ));
        }
        if let (Some(audio), Some(clip)) = (audio.as_mut(), &projectile.hit_sound) {
            audio.play_se(clip, 1.0);
        }
        if projectile.destroy_on_hit {
            release(&mut commands, entity);
        }
    }
}

/// Take a projectile from the pool and launch it from `origin` along
/// `direction`.
pub fn fire_projectile(
    world: &mut World,
    prefab: &str,
    origin: Vec3,
    direction: Vec3,
) -> Option<Entity> {
    let entity = spawn_pooled(world, prefab, origin, Quat::IDENTITY)?;
    let mut query = world.query::<(&Projectile, &mut RigidBody, &mut Transform)>();
    if let Ok((projectile, mut body, mut transform)) = query.get_mut(world, entity) {
        projectile.fire(direction, &mut body, &mut transform);
    }
    Some(entity)
}

/// Fire `weapon`'s projectile with the weapon's damage, speed and lifetime.
pub fn fire_weapon(
    world: &mut World,
    weapon: &WeaponConfig,
    origin: Vec3,
    direction: Vec3,
) -> Option<Entity> {
    let entity = spawn_pooled(world, &weapon.projectile_prefab, origin, Quat::IDENTITY)?;
    let mut query = world.query::<(&mut Projectile, &mut RigidBody, &mut Transform)>();
    if let Ok((mut projectile, mut body, mut transform)) = query.get_mut(world, entity) {
        projectile.damage = weapon.damage;
        projectile.speed = weapon.projectile_speed;
        projectile.lifetime = weapon.projectile_lifetime;
        projectile.hit_effect = weapon.hit_effect.clone();
        projectile.fire(direction, &mut body, &mut transform);
    }
    Some(entity)
}
