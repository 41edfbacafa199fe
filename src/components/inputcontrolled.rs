//! Movement intent consumed by platformer controllers.
//!
//! [`ControllerInput`] decouples a controller from where its input comes
//! from. Entities tagged [`Player`] get it filled from the global
//! [`InputState`](crate::resources::input::InputState) every frame; AI or
//! scripted actors can write it directly.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Tag for the actor driven by the local player. Its health changes and
/// death are published on the event bus.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct ControllerInput {
    /// Move axis in [-1, 1] on each component.
    pub axis: Vec2,
    /// Press edge. Cleared by the controller once sampled.
    pub jump_pressed: bool,
    pub jump_held: bool,
}

impl ControllerInput {
    pub fn new(axis: Vec2) -> Self {
        Self {
            axis,
            ..Default::default()
        }
    }

    /// Press and hold jump.
    pub fn press_jump(&mut self) {
        self.jump_pressed = true;
        self.jump_held = true;
    }

    pub fn release_jump(&mut self) {
        self.jump_held = false;
    }
}
