//! Marker for entities that survive scene transitions.
//!
//! The scene loader despawns every actor without [`Persistent`] before it
//! builds the next scene. UI windows owned by long-lived services (pause
//! menu, toast surface, screen fade) carry it.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Persistent;
