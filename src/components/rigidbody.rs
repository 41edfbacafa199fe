//! Dynamic body integrated by the physics step.
//!
//! The [`RigidBody`] component stores the linear velocity of an actor. The
//! physics schedule adds gravity (scaled by `gravity_scale`), then moves the
//! actor's [`Transform`](super::transform::Transform) one axis at a time
//! against the static colliders of the
//! [`CollisionWorld`](crate::resources::collisionworld::CollisionWorld).
//!
//! Controllers never move the transform directly. They write velocity (or
//! call [`RigidBody::apply_impulse`]) and let the integration step resolve
//! contacts.
//!
//! The `frozen` flag skips gravity and integration for the body, useful while
//! an actor is parked in an entity pool.

use bevy_ecs::prelude::Component;
use glam::Vec3;

#[derive(Component, Clone, Copy, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec3,
    /// Mass used to turn impulses into velocity changes.
    pub mass: f32,
    /// Multiplier applied to the world gravity. 0 disables gravity.
    pub gravity_scale: f32,
    /// When true, gravity and integration skip this body.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Unit mass, full gravity, at rest.
    pub fn new() -> Self {
        Self {
            velocity: Vec3::ZERO,
            mass: 1.0,
            gravity_scale: 1.0,
            frozen: false,
        }
    }

    /// A body unaffected by gravity (projectiles, kinematic movers).
    pub fn kinematic() -> Self {
        Self {
            gravity_scale: 0.0,
            ..Self::new()
        }
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_gravity_scale(mut self, gravity_scale: f32) -> Self {
        self.gravity_scale = gravity_scale;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Instantaneous change of momentum. A non-positive mass is treated as 1.
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        let mass = if self.mass > 0.0 { self.mass } else { 1.0 };
        self.velocity += impulse / mass;
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
