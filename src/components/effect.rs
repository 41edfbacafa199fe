//! One-shot visual effects (hit sparks, death bursts).
//!
//! Effects are plain entities with a [`Transform`](super::transform::Transform)
//! and a [`Ttl`](super::ttl::Ttl); the host renderer looks up `prefab` to
//! decide what to draw.

use bevy_ecs::prelude::Component;

/// Seconds an effect entity lives before removal.
pub const EFFECT_LIFETIME: f32 = 1.0;

#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Effect {
    pub prefab: String,
}

impl Effect {
    pub fn new(prefab: impl Into<String>) -> Self {
        Self {
            prefab: prefab.into(),
        }
    }
}
