//! Session state: pause flag, play time, score.
//!
//! The operations that notify other parts of the game live in
//! [`crate::systems::gamemanager`], since they publish on the event bus and
//! need the world.

use bevy_ecs::prelude::Resource;

use crate::config::difficulty::DifficultySettings;
use crate::resources::scene::{GAMEPLAY_SCENE, MAIN_MENU_SCENE, SceneLoader};

#[derive(Resource, Debug, Clone, Default)]
pub struct GameManager {
    pub paused: bool,
    /// Seconds of unpaused play.
    pub game_time: f32,
    pub score: i32,
    /// Set by the quit action; the frame driver stops when it sees it.
    pub quit_requested: bool,
}

impl GameManager {
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn restart_game(&self, loader: &mut SceneLoader) {
        loader.load(GAMEPLAY_SCENE);
    }

    pub fn go_to_main_menu(&self, loader: &mut SceneLoader) {
        loader.load(MAIN_MENU_SCENE);
    }

    /// Current difficulty for the time played so far.
    pub fn difficulty(&self, settings: &DifficultySettings) -> f32 {
        settings.difficulty_multiplier(self.game_time)
    }

    /// Back to a fresh run.
    pub fn reset_session(&mut self) {
        self.paused = false;
        self.game_time = 0.0;
        self.score = 0;
    }
}
