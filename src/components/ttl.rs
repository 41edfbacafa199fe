//! Delayed removal of an actor.
//!
//! An entity carrying [`Ttl`] is despawned by
//! [`ttl_system`](crate::systems::ttl::ttl_system) once its remaining time
//! runs out. Hit and death effects use it to disappear after a short while,
//! and dead actors get one so they linger for a moment before removal.

use bevy_ecs::prelude::Component;

/// Countdown in scaled seconds. Pausing the game pauses it too.
#[derive(Component, Clone, Copy, Debug)]
pub struct Ttl {
    pub remaining: f32,
}

impl Ttl {
    pub fn new(seconds: f32) -> Self {
        Ttl { remaining: seconds }
    }
}
