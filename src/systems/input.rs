//! Input systems.
//!
//! - [`update_input_state`] polls the host [`InputDriver`] (when present) and
//!   latches the result into [`InputState`].
//! - [`emit_input_events`] triggers an [`InputEvent`] for every edge of an
//!   action whose map is enabled.
//! - [`player_input_system`] copies the player map into the
//!   [`ControllerInput`] of [`Player`] actors.
//! - [`clear_input_edges`] drops one-frame edges at the end of the frame.
use bevy_ecs::prelude::*;

use crate::components::inputcontrolled::{ControllerInput, Player};
use crate::events::input::{InputAction, InputEvent};
use crate::resources::input::{InputDriver, InputState};
use crate::resources::screenfade::ScreenFade;
use crate::resources::worldtime::WorldTime;

/// Poll the host input source and update the `InputState` resource.
///
/// Without an [`InputDriver`] the resource is left as is, so tests and hosts
/// can write it directly.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    driver: Option<ResMut<InputDriver>>,
    time: Res<WorldTime>,
) {
    if let Some(mut driver) = driver {
        let frame = driver.source.poll(time.frame_count);
        input.apply(&frame);
    }
}

/// Trigger [`InputEvent`]s for this frame's press and release edges.
///
/// UI actions are swallowed while a [`ScreenFade`] covers the screen.
pub fn emit_input_events(
    input: Res<InputState>,
    fade: Option<Res<ScreenFade>>,
    mut commands: Commands,
) {
    let ui_blocked = fade.is_some_and(|f| f.blocks_input());
    for action in InputAction::ALL {
        let button = input.button(action);
        let enabled = match action {
            InputAction::Jump | InputAction::Interact => input.player_input_enabled(),
            InputAction::Pause | InputAction::Back => input.ui_input_enabled() && !ui_blocked,
        };
        if !enabled {
            continue;
        }
        if button.just_pressed {
            commands.trigger(InputEvent {
                action,
                pressed: true,
            });
        }
        if button.just_released {
            commands.trigger(InputEvent {
                action,
                pressed: false,
            });
        }
    }
}

/// Feed the global input into every player-controlled actor.
pub fn player_input_system(
    input: Res<InputState>,
    mut query: Query<&mut ControllerInput, With<Player>>,
) {
    for mut ci in query.iter_mut() {
        ci.axis = input.move_input();
        ci.jump_pressed |= input.jump_pressed();
        ci.jump_held = input.jump_held();
    }
}

/// End-of-frame reset of one-shot input edges.
pub fn clear_input_edges(mut input: ResMut<InputState>) {
    input.clear_edges();
}
