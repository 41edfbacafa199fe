//! Startup sequence state.
//!
//! Stages run in order: load the save, wait `delay` seconds, fade the screen
//! in, then request the first scene. Driven by
//! [`boot_system`](crate::systems::boot::boot_system).

use bevy_ecs::prelude::Resource;

use super::scene::GAMEPLAY_SCENE;

pub const DEFAULT_BOOT_DELAY: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootStage {
    LoadSave,
    Waiting,
    FadingIn,
    Done,
}

#[derive(Resource, Clone, Debug)]
pub struct BootSequence {
    pub first_scene: String,
    pub delay: f32,
    stage: BootStage,
    waited: f32,
}

impl Default for BootSequence {
    fn default() -> Self {
        Self::new(GAMEPLAY_SCENE, DEFAULT_BOOT_DELAY)
    }
}

impl BootSequence {
    pub fn new(first_scene: impl Into<String>, delay: f32) -> Self {
        Self {
            first_scene: first_scene.into(),
            delay: delay.max(0.0),
            stage: BootStage::LoadSave,
            waited: 0.0,
        }
    }

    pub fn stage(&self) -> BootStage {
        self.stage
    }

    pub fn is_done(&self) -> bool {
        self.stage == BootStage::Done
    }

    pub(crate) fn advance_to(&mut self, stage: BootStage) {
        self.stage = stage;
    }

    /// Count down the delay. Returns true once it has passed.
    pub(crate) fn wait(&mut self, dt: f32) -> bool {
        self.waited += dt;
        self.waited >= self.delay
    }
}
