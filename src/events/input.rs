//! Input action events.
//!
//! [`InputEvent`] is triggered once per press or release edge of a logical
//! [`InputAction`], after the frame's input has been latched into
//! [`InputState`](crate::resources::input::InputState). UI and game flow
//! react to it through observers instead of polling the resource.

use bevy_ecs::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Player map.
    Jump,
    /// Player map.
    Interact,
    /// UI map: toggles the pause state.
    Pause,
    /// UI map: closes the top window.
    Back,
}

impl InputAction {
    pub const ALL: [InputAction; 4] = [
        InputAction::Jump,
        InputAction::Interact,
        InputAction::Pause,
        InputAction::Back,
    ];
}

#[derive(Event, Debug, Clone, Copy)]
pub struct InputEvent {
    pub action: InputAction,
    /// Press (true) or release (false).
    pub pressed: bool,
}
