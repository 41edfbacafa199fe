//! Simulation clock shared by every system.
//!
//! The frame driver writes [`WorldTime`] once per host frame. Gameplay timers
//! (coyote time, jump buffering, invincibility) read the scaled `delta`, so
//! they freeze while the game is paused. UI animation (window fades, toasts,
//! BGM crossfades) reads `unscaled_delta` and keeps running during pause.
//!
//! Physics runs on a fixed step. `fixed_accumulator` collects scaled time
//! until one or more `fixed_delta` steps can be consumed.

use bevy_ecs::prelude::Resource;

/// Upper bound on physics steps run in a single frame, so a long hitch does
/// not snowball into ever longer frames.
pub const MAX_FIXED_STEPS_PER_FRAME: u32 = 8;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Scaled seconds since start.
    pub elapsed: f32,
    /// Scaled seconds of the current frame.
    pub delta: f32,
    /// Real seconds of the current frame, ignoring `time_scale`.
    pub unscaled_delta: f32,
    /// Multiplier applied to the raw frame delta; 0 freezes gameplay.
    pub time_scale: f32,
    /// Length of one physics step in seconds.
    pub fixed_delta: f32,
    /// Scaled time not yet consumed by physics steps.
    pub fixed_accumulator: f32,
    /// Frames advanced so far.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            unscaled_delta: 0.0,
            time_scale: 1.0,
            fixed_delta: 0.02,
            fixed_accumulator: 0.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn with_fixed_delta(mut self, fixed_delta: f32) -> Self {
        self.fixed_delta = fixed_delta;
        self
    }

    /// True while gameplay time is frozen.
    pub fn is_frozen(&self) -> bool {
        self.time_scale <= 0.0
    }
}
