//! Platformer movement tuning.

use serde::{Deserialize, Serialize};

use crate::components::boxcollider::{ALL_LAYERS, LayerMask};

/// Speeds, jump strength, ground detection and grace windows of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveConfig {
    /// Horizontal speed at full input, in units per second.
    pub move_speed: f32,
    /// Upward impulse of a jump (unit mass, so also the take-off speed).
    pub jump_power: f32,
    /// Fraction of `move_speed` available while airborne.
    pub air_control: f32,
    /// Layers the ground probe can stand on.
    pub ground_mask: LayerMask,
    /// How far below the feet the ground probe reaches.
    pub ground_check_distance: f32,
    /// Grace period after leaving the ground during which a jump still counts
    /// as grounded.
    pub coyote_time: f32,
    /// How long an early jump press is remembered.
    pub jump_buffer_time: f32,
    /// Jumps allowed before touching the ground again.
    pub max_jumps: u32,
    /// Gravity multiplier while falling.
    pub fall_multiplier: f32,
    /// Gravity multiplier while rising with the jump button released.
    pub low_jump_multiplier: f32,
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            jump_power: 7.0,
            air_control: 0.8,
            ground_mask: ALL_LAYERS,
            ground_check_distance: 0.1,
            coyote_time: 0.1,
            jump_buffer_time: 0.1,
            max_jumps: 1,
            fall_multiplier: 2.5,
            low_jump_multiplier: 2.0,
        }
    }
}

impl MoveConfig {
    pub fn with_max_jumps(mut self, max_jumps: u32) -> Self {
        self.max_jumps = max_jumps;
        self
    }
}
