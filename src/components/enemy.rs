//! Enemies and what they leave behind.

use bevy_ecs::prelude::*;
use glam::Vec3;

use super::boxcollider::BoxCollider;
use super::health::{Health, HealthConfig};
use super::transform::Transform;
use crate::config::enemy::EnemyConfig;

/// Collision layer enemies live on; player weapons aim at it.
pub const ENEMY_LAYER: u8 = 3;

#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub config: EnemyConfig,
}

/// An item dropped on death, waiting to be picked up.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Pickup {
    pub item: String,
}

impl Enemy {
    /// Health tuned from the enemy's stats.
    pub fn health_config(&self) -> HealthConfig {
        HealthConfig {
            max_health: self.config.max_health,
            hit_effect: self.config.hit_effect.clone(),
            hit_sound: self.config.hit_sound.clone(),
            death_effect: self.config.death_effect.clone(),
            death_sound: self.config.death_sound.clone(),
            ..Default::default()
        }
    }

    /// Everything an enemy actor needs, placed at `position`.
    pub fn bundle(config: EnemyConfig, position: Vec3) -> impl Bundle {
        let enemy = Enemy { config };
        let health = Health::new(enemy.health_config());
        (
            health,
            enemy,
            Transform::from_translation(position),
            BoxCollider::planar(1.0, 1.0).with_layer(ENEMY_LAYER),
        )
    }
}
