use bevy_ecs::prelude::*;

/// Buttons of the pause menu. Triggered by the host UI when one is clicked.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseMenuAction {
    Resume,
    Settings,
    MainMenu,
    Quit,
}
