//! Pooled projectiles.
//!
//! A projectile flies along the velocity set by [`Projectile::fire`], damages
//! the first [`Health`](super::health::Health) actors it overlaps on its hit
//! mask, and goes back to its pool when it hits (if `destroy_on_hit`) or when
//! its lifetime runs out.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};

use super::boxcollider::{ALL_LAYERS, LayerMask};
use super::rigidbody::RigidBody;
use super::transform::Transform;
use crate::config::weapon::WeaponConfig;

/// Lifecycle hooks called by [`EntityPool`](crate::resources::pool::EntityPool)
/// when an instance is handed out or returned.
pub trait Poolable {
    fn on_spawned(&mut self);
    fn on_despawned(&mut self);
}

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub damage: f32,
    pub speed: f32,
    pub lifetime: f32,
    pub hit_mask: LayerMask,
    pub destroy_on_hit: bool,
    pub hit_effect: Option<String>,
    pub hit_sound: Option<String>,
    timer: f32,
    active: bool,
    hits: Vec<Entity>,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            damage: 10.0,
            speed: 20.0,
            lifetime: 5.0,
            hit_mask: ALL_LAYERS,
            destroy_on_hit: true,
            hit_effect: None,
            hit_sound: None,
            timer: 0.0,
            active: false,
            hits: Vec::new(),
        }
    }
}

impl Projectile {
    pub fn from_weapon(weapon: &WeaponConfig) -> Self {
        Self {
            damage: weapon.damage,
            speed: weapon.projectile_speed,
            lifetime: weapon.projectile_lifetime,
            hit_effect: weapon.hit_effect.clone(),
            ..Default::default()
        }
    }

    pub fn with_hit_mask(mut self, mask: LayerMask) -> Self {
        self.hit_mask = mask;
        self
    }

    pub fn with_hit_effect(mut self, effect: impl Into<String>) -> Self {
        self.hit_effect = Some(effect.into());
        self
    }

    pub fn with_hit_sound(mut self, sound: impl Into<String>) -> Self {
        self.hit_sound = Some(sound.into());
        self
    }

    /// Launch along `direction` at `speed` and face the direction of travel
    /// (rotation about +Z, as for a 2D sprite).
    pub fn fire(&self, direction: Vec3, body: &mut RigidBody, transform: &mut Transform) {
        body.velocity = direction.normalize_or_zero() * self.speed;
        if direction.x != 0.0 || direction.y != 0.0 {
            let angle = direction.y.atan2(direction.x);
            transform.rotation = Quat::from_rotation_z(angle);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the lifetime. Returns true once it has run out.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.timer += dt;
        self.timer >= self.lifetime
    }

    /// Record a hit on `target`. False when it was already hit by this shot.
    pub fn register_hit(&mut self, target: Entity) -> bool {
        if self.hits.contains(&target) {
            return false;
        }
        self.hits.push(target);
        true
    }
}

impl Poolable for Projectile {
    fn on_spawned(&mut self) {
        self.active = true;
        self.timer = 0.0;
        self.hits.clear();
    }

    fn on_despawned(&mut self) {
        self.active = false;
    }
}

impl Poolable for RigidBody {
    fn on_spawned(&mut self) {
        self.unfreeze();
    }

    fn on_despawned(&mut self) {
        self.velocity = Vec3::ZERO;
        self.freeze();
    }
}
