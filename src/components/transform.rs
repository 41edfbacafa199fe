//! World-space placement of an actor.
//!
//! [`Transform`] replaces separate position/rotation/scale components with a
//! single 3D record. 2D actors keep `translation.z` at 0 and only use the
//! x/y plane; 3D actors move on the x/z plane with +Y up and face +Z when
//! their yaw is 0.

use bevy_ecs::prelude::Component;
use glam::{Quat, Vec3};

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::from_translation(Vec3::new(x, y, z))
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Heading around +Y in degrees, measured from +Z towards +X.
    pub fn yaw_degrees(&self) -> f32 {
        let forward = self.forward();
        forward.x.atan2(forward.z).to_degrees()
    }

    /// Replace the rotation with a pure yaw.
    pub fn set_yaw_degrees(&mut self, degrees: f32) {
        self.rotation = Quat::from_rotation_y(degrees.to_radians());
    }

    /// Local +Z in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn default_faces_forward() {
        let t = Transform::default();
        assert!((t.forward() - Vec3::Z).length() < EPSILON);
        assert!(t.yaw_degrees().abs() < EPSILON);
    }

    #[test]
    fn yaw_round_trips_through_rotation() {
        let mut t = Transform::from_xyz(1.0, 2.0, 3.0);
        t.set_yaw_degrees(90.0);
        assert!((t.yaw_degrees() - 90.0).abs() < EPSILON);
        assert!((t.forward() - Vec3::X).length() < EPSILON);
        assert_eq!(t.translation, Vec3::new(1.0, 2.0, 3.0));
    }
}
