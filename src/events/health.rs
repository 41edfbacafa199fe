//! Damage and healing requests, and the per-actor health notifications they
//! produce.
//!
//! Trigger [`DamageEvent`] or [`HealEvent`] to change an actor's
//! [`Health`](crate::components::health::Health); the observers in
//! [`crate::systems::health`] apply the state machine and its side effects.
//! Local listeners read [`HealthMessage`]s; global listeners subscribe to the
//! event bus, which only hears about the player.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::*;
use glam::Vec3;

#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    pub entity: Entity,
    pub amount: f32,
    /// Where the hit landed; the actor's own position when `None`.
    pub position: Option<Vec3>,
}

impl DamageEvent {
    pub fn new(entity: Entity, amount: f32) -> Self {
        Self {
            entity,
            amount,
            position: None,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }
}

#[derive(Event, Debug, Clone, Copy)]
pub struct HealEvent {
    pub entity: Entity,
    pub amount: f32,
}

/// Per-actor health notifications.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum HealthMessage {
    Damaged {
        entity: Entity,
        amount: f32,
        health: f32,
    },
    HealthChanged {
        entity: Entity,
        health: f32,
    },
    Died {
        entity: Entity,
    },
}
