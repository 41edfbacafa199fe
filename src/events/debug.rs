//! Developer overlay actions.
//!
//! Trigger a [`DebugAction`] to poke the running game the way the overlay's
//! buttons do. Nothing happens unless the overlay is installed.

use bevy_ecs::prelude::*;

pub const DEBUG_SCORE: i32 = 100;
pub const DEBUG_DAMAGE: f32 = 10.0;
pub const DEBUG_HEAL: f32 = 20.0;

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum DebugAction {
    ToggleHud,
    /// Set the gameplay time scale; ignored while paused.
    SetTimeScale(f32),
    AddScore(i32),
    DamagePlayer(f32),
    HealPlayer(f32),
}
