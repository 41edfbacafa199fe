//! ECS components for entities.
//!
//! This module groups all component types that can be attached to actors in
//! the game world: placement, physics bodies, health, movement controllers,
//! projectiles, UI windows and cameras.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned box collider and collision layers
//! - [`camera`] – follow camera with hit shake
//! - [`effect`] – short-lived visual effect entities
//! - [`enemy`] – enemy stats and dropped pickups
//! - [`health`] – hit points, invincibility window and death
//! - [`inputcontrolled`] – movement intent and the player tag
//! - [`persistent`] – marker for entities that persist across scene changes
//! - [`platformer`] – ground check, coyote time, jump buffering and jumps
//! - [`pooled`] – membership in an entity pool
//! - [`projectile`] – pooled projectiles and the pool hooks
//! - [`rigidbody`] – velocity integrated by the physics step
//! - [`tint`] – colour modulation (invincibility flicker)
//! - [`transform`] – world-space translation, rotation and scale
//! - [`ttl`] – delayed removal
//! - [`tween`] – easing curves and scalar fades
//! - [`uiwindow`] – modal UI panels with show/hide fades

pub mod boxcollider;
pub mod camera;
pub mod effect;
pub mod enemy;
pub mod health;
pub mod inputcontrolled;
pub mod persistent;
pub mod platformer;
pub mod pooled;
pub mod projectile;
pub mod rigidbody;
pub mod tint;
pub mod transform;
pub mod ttl;
pub mod tween;
pub mod uiwindow;
