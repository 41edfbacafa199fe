//! Platformer movement state machine.
//!
//! [`MovementState`] is the per-actor record behind ground detection, coyote
//! time, jump buffering, multi-jump and variable jump height. Its operations
//! are plain methods with no ECS access so every transition can be driven and
//! checked directly:
//!
//! 1. [`MovementState::sample_input`] stores the move axis and arms the jump
//!    buffer on a press edge.
//! 2. [`MovementState::apply_ground_probe`] records the probe result and
//!    resets the jump count on the tick the actor lands.
//! 3. [`MovementState::tick_coyote`] refills or drains the coyote timer.
//! 4. [`MovementState::tick_jump_buffer`] drains the jump buffer.
//! 5. [`MovementState::planar_velocity`] gives the horizontal velocity to set
//!    on the body.
//! 6. [`MovementState::try_jump`] resolves a buffered jump.
//! 7. [`MovementState::shape_vertical`] adds fall and low-jump gravity.
//!
//! Steps 1 to 4 run in the variable-rate update schedule, 5 to 7 in the
//! fixed physics step. The order matters: the jump buffer must be armed
//! before jump resolution reads it.
//!
//! The ECS side lives in [`PlatformerController`], driven by
//! [`crate::systems::platformer`].

use bevy_ecs::prelude::Component;
use glam::{Vec2, Vec3};

use crate::components::boxcollider::Aabb;
use crate::components::rigidbody::RigidBody;
use crate::config::movement::MoveConfig;

/// Ground probe skin used when no [`GroundCheck`] is attached.
pub const DEFAULT_GROUND_SKIN: f32 = 0.02;

/// Whether the actor moves in the x/y plane or on the x/z ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimension {
    #[default]
    Planar2D,
    Spatial3D,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementState {
    /// Last sampled move input. 2D only uses `x`.
    pub move_axis: Vec2,
    pub is_grounded: bool,
    pub was_grounded: bool,
    /// Remaining coyote grace. Expired once it is at or below zero.
    pub coyote_timer: f32,
    /// Remaining time a jump press stays buffered.
    pub jump_buffer_timer: f32,
    /// Jumps performed since the last landing.
    pub jump_count: u32,
    /// Last stable movement direction on the ground plane (3D).
    pub facing: Vec3,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            move_axis: Vec2::ZERO,
            is_grounded: false,
            was_grounded: false,
            coyote_timer: 0.0,
            jump_buffer_timer: 0.0,
            jump_count: 0,
            facing: Vec3::Z,
        }
    }
}

impl MovementState {
    /// Store the move axis and arm the jump buffer when `jump_pressed` is a
    /// fresh press. 2D keeps only the horizontal component; 3D clamps the
    /// axis to unit length.
    pub fn sample_input(
        &mut self,
        axis: Vec2,
        jump_pressed: bool,
        dimension: Dimension,
        config: &MoveConfig,
    ) {
        self.move_axis = match dimension {
            Dimension::Planar2D => Vec2::new(axis.x.clamp(-1.0, 1.0), 0.0),
            Dimension::Spatial3D => axis.clamp_length_max(1.0),
        };
        if jump_pressed {
            self.jump_buffer_timer = config.jump_buffer_time;
        }
    }

    /// Record a ground probe result. Returns true on the tick the actor
    /// lands, which is also the only place the jump count resets.
    pub fn apply_ground_probe(&mut self, hit: bool) -> bool {
        self.was_grounded = self.is_grounded;
        self.is_grounded = hit;
        let landed = self.is_grounded && !self.was_grounded;
        if landed {
            self.jump_count = 0;
        }
        landed
    }

    /// Refill while grounded, otherwise drain. The timer may go negative.
    pub fn tick_coyote(&mut self, dt: f32, config: &MoveConfig) {
        if self.is_grounded {
            self.coyote_timer = config.coyote_time;
        } else {
            self.coyote_timer -= dt;
        }
    }

    pub fn tick_jump_buffer(&mut self, dt: f32) {
        if self.jump_buffer_timer > 0.0 {
            self.jump_buffer_timer -= dt;
        }
    }

    /// Horizontal velocity for the current input: x only in 2D, x and z in
    /// 3D. Airborne actors get `air_control` of the speed. The y component is
    /// always zero; callers keep their own vertical velocity.
    pub fn planar_velocity(&self, dimension: Dimension, config: &MoveConfig) -> Vec3 {
        let mut speed = config.move_speed;
        if !self.is_grounded {
            speed *= config.air_control;
        }
        match dimension {
            Dimension::Planar2D => Vec3::new(self.move_axis.x * speed, 0.0, 0.0),
            Dimension::Spatial3D => {
                Vec3::new(self.move_axis.x, 0.0, self.move_axis.y) * speed
            }
        }
    }

    /// Adopt the current input as the facing direction, unless the input is
    /// too small to trust. Returns whether the facing changed.
    pub fn update_facing(&mut self, deadzone_sqr: f32) -> bool {
        let dir = Vec3::new(self.move_axis.x, 0.0, self.move_axis.y);
        if dir.length_squared() >= deadzone_sqr && dir.length_squared() > 0.0 {
            self.facing = dir.normalize();
            return true;
        }
        false
    }

    /// A buffered press plus either coyote grace or a spare jump.
    pub fn can_jump(&self, config: &MoveConfig) -> bool {
        self.jump_buffer_timer > 0.0
            && (self.coyote_timer > 0.0 || self.jump_count < config.max_jumps)
    }

    /// Fire a jump if [`Self::can_jump`] allows it: reset vertical speed,
    /// apply an upward impulse of `jump_power`, count the jump and consume
    /// both the buffer and the coyote grace.
    pub fn try_jump(&mut self, body: &mut RigidBody, config: &MoveConfig) -> bool {
        if !self.can_jump(config) {
            return false;
        }
        body.velocity.y = 0.0;
        body.apply_impulse(Vec3::Y * config.jump_power);
        self.jump_count += 1;
        self.jump_buffer_timer = 0.0;
        self.coyote_timer = 0.0;
        true
    }

    /// Extra gravity for snappier falls and short hops. `gravity_y` is the
    /// world gravity (negative when pointing down).
    pub fn shape_vertical(
        vertical_velocity: f32,
        jump_held: bool,
        gravity_y: f32,
        dt: f32,
        config: &MoveConfig,
    ) -> f32 {
        if vertical_velocity < 0.0 {
            vertical_velocity + gravity_y * (config.fall_multiplier - 1.0) * dt
        } else if vertical_velocity > 0.0 && !jump_held {
            vertical_velocity + gravity_y * (config.low_jump_multiplier - 1.0) * dt
        } else {
            vertical_velocity
        }
    }
}

/// Step `current` towards `target` (both in degrees) by at most `max_step`
/// degrees along the shorter arc.
pub fn rotate_yaw_towards(current: f32, target: f32, max_step: f32) -> f32 {
    let mut diff = (target - current) % 360.0;
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff < -180.0 {
        diff += 360.0;
    }
    let max_step = max_step.max(0.0);
    if diff.abs() <= max_step {
        current + diff
    } else {
        current + max_step * diff.signum()
    }
}

/// Yaw in degrees of a direction on the ground plane (+Z is 0, +X is 90).
pub fn yaw_of(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z).to_degrees()
}

/// Movement driver attached to player-like actors.
///
/// A controller with `config: None` is skipped entirely until a config is
/// assigned.
#[derive(Component, Debug, Clone)]
pub struct PlatformerController {
    pub config: Option<MoveConfig>,
    pub dimension: Dimension,
    pub state: MovementState,
    /// 3D only: turn the actor towards its movement direction.
    pub rotate_towards_movement: bool,
    /// Turn rate in degrees per second.
    pub rotation_speed: f32,
    /// Minimum squared input length that updates the facing.
    pub rotate_deadzone_sqr: f32,
}

impl PlatformerController {
    pub fn new(config: MoveConfig, dimension: Dimension) -> Self {
        Self {
            config: Some(config),
            dimension,
            state: MovementState::default(),
            rotate_towards_movement: true,
            rotation_speed: 540.0,
            rotate_deadzone_sqr: 0.01,
        }
    }

    pub fn planar(config: MoveConfig) -> Self {
        Self::new(config, Dimension::Planar2D)
    }

    pub fn spatial(config: MoveConfig) -> Self {
        Self::new(config, Dimension::Spatial3D)
    }

    /// Controller waiting for a config; ignored by the movement systems.
    pub fn unconfigured(dimension: Dimension) -> Self {
        Self {
            config: None,
            ..Self::new(MoveConfig::default(), dimension)
        }
    }
}

/// Optional tuning of the ground probe box.
///
/// Without one, the probe is sized from the actor's collider.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GroundCheck {
    /// Explicit probe footprint: width along x, and height (2D) or depth
    /// along z (3D). `None` or non-positive components size from the
    /// collider.
    pub box_size: Option<Vec2>,
    /// Horizontal shrink applied on each side, and clearance above the feet.
    pub skin: f32,
    /// Explicit probe origin relative to the actor's translation.
    pub origin_offset: Option<Vec3>,
}

impl Default for GroundCheck {
    fn default() -> Self {
        Self {
            box_size: None,
            skin: DEFAULT_GROUND_SKIN,
            origin_offset: None,
        }
    }
}

impl GroundCheck {
    /// Origin and half extents of the probe box for an actor whose collider
    /// covers `bounds`.
    pub fn probe_box(
        &self,
        bounds: &Aabb,
        translation: Vec3,
        dimension: Dimension,
        config: &MoveConfig,
    ) -> (Vec3, Vec3) {
        let skin = self.skin.max(0.0);
        let size = bounds.size();
        let auto_height = config.ground_check_distance.clamp(0.02, 0.2);
        let shrink = |explicit: Option<f32>, collider_extent: f32| match explicit {
            Some(v) if v > 0.0 => (v - 2.0 * skin).max(0.05),
            _ => (collider_extent - 2.0 * skin).max(0.1),
        };

        let explicit = self.box_size.filter(|b| b.x > 0.0 && b.y > 0.0);
        let (width, height, depth) = match dimension {
            Dimension::Planar2D => match explicit {
                Some(b) => (shrink(Some(b.x), size.x), b.y, size.z),
                None => (shrink(None, size.x), auto_height, size.z),
            },
            Dimension::Spatial3D => (
                shrink(self.box_size.map(|b| b.x), size.x),
                auto_height,
                shrink(self.box_size.map(|b| b.y), size.z),
            ),
        };
        let half = Vec3::new(width, height, depth) * 0.5;

        let center = bounds.center();
        let origin = match self.origin_offset {
            Some(offset) => translation + offset,
            None => Vec3::new(center.x, bounds.min.y + half.y + skin, center.z),
        };
        (origin, half)
    }
}
