//! Follow camera with hit shake.
//!
//! The rig places its entity's [`Transform`](super::transform::Transform) at
//! the followed target, pulled back by `distance` along -Z, plus a random
//! shake offset that decays linearly over the shake duration. Among several
//! rigs the host renders the active one with the highest priority.

use bevy_ecs::prelude::*;
use glam::Vec3;

pub const DEFAULT_SHAKE_INTENSITY: f32 = 1.0;
pub const DEFAULT_SHAKE_DURATION: f32 = 0.2;
pub const DEFAULT_CAMERA_DISTANCE: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Shake {
    intensity: f32,
    remaining: f32,
}

#[derive(Component, Clone, Debug)]
pub struct CameraRig {
    pub target: Option<Entity>,
    pub distance: f32,
    pub priority: i32,
    pub active: bool,
    pub shake_intensity: f32,
    pub shake_duration: f32,
    shake: Option<Shake>,
    offset: Vec3,
    rng: fastrand::Rng,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            target: None,
            distance: DEFAULT_CAMERA_DISTANCE,
            priority: 0,
            active: true,
            shake_intensity: DEFAULT_SHAKE_INTENSITY,
            shake_duration: DEFAULT_SHAKE_DURATION,
            shake: None,
            offset: Vec3::ZERO,
            rng: fastrand::Rng::new(),
        }
    }
}

impl CameraRig {
    pub fn following(target: Entity) -> Self {
        Self {
            target: Some(target),
            ..Default::default()
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    /// Start a shake. `None` uses the rig's own intensity. A new shake
    /// restarts the decay.
    pub fn shake(&mut self, intensity: Option<f32>) {
        let intensity = intensity.unwrap_or(self.shake_intensity).max(0.0);
        if intensity == 0.0 || self.shake_duration <= 0.0 {
            return;
        }
        self.shake = Some(Shake {
            intensity,
            remaining: self.shake_duration,
        });
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    /// Current shake displacement.
    pub fn shake_offset(&self) -> Vec3 {
        self.offset
    }

    /// Advance the shake and pick this frame's offset.
    pub fn tick(&mut self, dt: f32) {
        let Some(mut shake) = self.shake else {
            self.offset = Vec3::ZERO;
            return;
        };
        shake.remaining -= dt;
        if shake.remaining <= 0.0 {
            self.shake = None;
            self.offset = Vec3::ZERO;
            return;
        }
        let strength = shake.intensity * (shake.remaining / self.shake_duration);
        self.offset = Vec3::new(
            (self.rng.f32() * 2.0 - 1.0) * strength,
            (self.rng.f32() * 2.0 - 1.0) * strength,
            0.0,
        );
        self.shake = Some(shake);
    }

    /// Where the camera sits for a target at `target`.
    pub fn eye(&self, target: Vec3) -> Vec3 {
        target + Vec3::new(0.0, 0.0, -self.distance) + self.offset
    }
}
