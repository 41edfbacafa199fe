//! Per-frame input resource and the sources that feed it.
//!
//! [`InputState`] is the single place gameplay reads input from. Device
//! polling is not part of the core: hosts implement [`InputSource`] and the
//! frame driver calls it through the [`InputDriver`] resource once per frame.
//! [`ScriptedInput`] plays back a prepared sequence of frames for demos and
//! tests.
//!
//! Actions are split into two maps like a typical input asset: the player
//! map (move, jump, interact) and the UI map (pause, back). Disabling a map
//! makes its actions read as idle.
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::events::input::InputAction;

/// Level and edge state of one button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Held this frame.
    pub active: bool,
    /// Went down this frame.
    pub just_pressed: bool,
    /// Went up this frame.
    pub just_released: bool,
}

impl ButtonState {
    /// Feed the current level; edges are derived from the previous level.
    pub fn set(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }

    pub fn clear_edges(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Raw device levels for one frame, as produced by an [`InputSource`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub move_axis: Vec2,
    pub jump: bool,
    pub interact: bool,
    pub pause: bool,
    pub back: bool,
}

impl InputFrame {
    pub fn moving(axis: Vec2) -> Self {
        Self {
            move_axis: axis,
            ..Default::default()
        }
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }
}

#[derive(Resource, Debug, Clone)]
pub struct InputState {
    move_axis: Vec2,
    pub jump: ButtonState,
    pub interact: ButtonState,
    pub pause: ButtonState,
    pub back: ButtonState,
    player_enabled: bool,
    ui_enabled: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            move_axis: Vec2::ZERO,
            jump: ButtonState::default(),
            interact: ButtonState::default(),
            pause: ButtonState::default(),
            back: ButtonState::default(),
            player_enabled: true,
            ui_enabled: true,
        }
    }
}

impl InputState {
    /// Latch a frame of device levels.
    pub fn apply(&mut self, frame: &InputFrame) {
        self.move_axis = frame.move_axis.clamp(Vec2::splat(-1.0), Vec2::ONE);
        self.jump.set(frame.jump);
        self.interact.set(frame.interact);
        self.pause.set(frame.pause);
        self.back.set(frame.back);
    }

    /// Drop one-frame edges. Runs at the end of every frame.
    pub fn clear_edges(&mut self) {
        self.jump.clear_edges();
        self.interact.clear_edges();
        self.pause.clear_edges();
        self.back.clear_edges();
    }

    /// Press an action as if the device did it this frame.
    pub fn press(&mut self, action: InputAction) {
        self.button_mut(action).set(true);
    }

    pub fn release(&mut self, action: InputAction) {
        self.button_mut(action).set(false);
    }

    pub fn set_move_axis(&mut self, axis: Vec2) {
        self.move_axis = axis.clamp(Vec2::splat(-1.0), Vec2::ONE);
    }

    pub fn button(&self, action: InputAction) -> &ButtonState {
        match action {
            InputAction::Jump => &self.jump,
            InputAction::Interact => &self.interact,
            InputAction::Pause => &self.pause,
            InputAction::Back => &self.back,
        }
    }

    fn button_mut(&mut self, action: InputAction) -> &mut ButtonState {
        match action {
            InputAction::Jump => &mut self.jump,
            InputAction::Interact => &mut self.interact,
            InputAction::Pause => &mut self.pause,
            InputAction::Back => &mut self.back,
        }
    }

    fn map_enabled(&self, action: InputAction) -> bool {
        match action {
            InputAction::Jump | InputAction::Interact => self.player_enabled,
            InputAction::Pause | InputAction::Back => self.ui_enabled,
        }
    }

    /// Edge of `action`, respecting its action map.
    pub fn just_pressed(&self, action: InputAction) -> bool {
        self.map_enabled(action) && self.button(action).just_pressed
    }

    /// Level of `action`, respecting its action map.
    pub fn held(&self, action: InputAction) -> bool {
        self.map_enabled(action) && self.button(action).active
    }

    pub fn move_input(&self) -> Vec2 {
        if self.player_enabled {
            self.move_axis
        } else {
            Vec2::ZERO
        }
    }

    pub fn jump_pressed(&self) -> bool {
        self.just_pressed(InputAction::Jump)
    }

    pub fn jump_held(&self) -> bool {
        self.held(InputAction::Jump)
    }

    pub fn interact_pressed(&self) -> bool {
        self.just_pressed(InputAction::Interact)
    }

    pub fn enable_player_input(&mut self) {
        self.player_enabled = true;
    }

    pub fn disable_player_input(&mut self) {
        self.player_enabled = false;
    }

    pub fn enable_ui_input(&mut self) {
        self.ui_enabled = true;
    }

    pub fn disable_ui_input(&mut self) {
        self.ui_enabled = false;
    }

    pub fn player_input_enabled(&self) -> bool {
        self.player_enabled
    }

    pub fn ui_input_enabled(&self) -> bool {
        self.ui_enabled
    }
}

/// Something that can report device levels once per frame.
pub trait InputSource: Send + Sync {
    fn poll(&mut self, frame: u64) -> InputFrame;
}

/// Plays back a fixed list of frames, then reports idle input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<InputFrame>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<InputFrame>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// Hold `frame` for `count` frames.
    pub fn hold(mut self, frame: InputFrame, count: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(frame, count));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len().saturating_sub(self.cursor)
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _frame: u64) -> InputFrame {
        let frame = self.frames.get(self.cursor).copied().unwrap_or_default();
        self.cursor += 1;
        frame
    }
}

/// The host's input source, polled by
/// [`update_input_state`](crate::systems::input::update_input_state).
#[derive(Resource)]
pub struct InputDriver {
    pub source: Box<dyn InputSource>,
}

impl InputDriver {
    pub fn new(source: impl InputSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }
}
