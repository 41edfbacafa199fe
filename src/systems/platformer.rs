//! Platformer controller systems.
//!
//! [`platformer_update_system`] runs in the update schedule and performs, per
//! actor and in this order: input sampling, the ground probe, the coyote
//! timer and the jump buffer. [`platformer_physics_system`] runs once per
//! fixed physics step and sets horizontal velocity, turns the actor, resolves
//! buffered jumps and shapes the vertical velocity.
//!
//! Actors whose [`PlatformerController::config`] is `None` are skipped.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::boxcollider::BoxCollider;
use crate::components::inputcontrolled::ControllerInput;
use crate::components::platformer::{
    Dimension, GroundCheck, MovementState, PlatformerController, rotate_yaw_towards, yaw_of,
};
use crate::components::rigidbody::RigidBody;
use crate::components::transform::Transform;
use crate::resources::collisionworld::{CollisionWorld, Gravity};
use crate::resources::worldtime::WorldTime;
use glam::Vec3;

/// Input, ground detection and grace timers.
pub fn platformer_update_system(
    time: Res<WorldTime>,
    collision: Res<CollisionWorld>,
    mut query: Query<(
        Entity,
        &mut PlatformerController,
        &mut ControllerInput,
        &Transform,
        &BoxCollider,
        Option<&GroundCheck>,
    )>,
) {
    let dt = time.delta;
    for (entity, mut controller, mut input, transform, collider, ground_check) in query.iter_mut()
    {
        let Some(config) = controller.config else {
            continue;
        };
        let dimension = controller.dimension;
        let state = &mut controller.state;

        state.sample_input(input.axis, input.jump_pressed, dimension, &config);
        input.jump_pressed = false;

        let check = ground_check.copied().unwrap_or_default();
        let bounds = collider.aabb(transform.translation);
        let (origin, half) = check.probe_box(&bounds, transform.translation, dimension, &config);
        let hit = collision.probe(
            origin,
            half,
            Vec3::NEG_Y,
            config.ground_check_distance,
            config.ground_mask,
        );
        if state.apply_ground_probe(hit.is_some()) {
            debug!("{:?} landed", entity);
        }

        state.tick_coyote(dt, &config);
        state.tick_jump_buffer(dt);
    }
}

/// Velocity, facing, jump and fall shaping for one physics step.
pub fn platformer_physics_system(
    time: Res<WorldTime>,
    gravity: Res<Gravity>,
    mut query: Query<(
        &mut PlatformerController,
        &ControllerInput,
        &mut RigidBody,
        &mut Transform,
    )>,
) {
    let dt = time.fixed_delta;
    for (mut controller, input, mut body, mut transform) in query.iter_mut() {
        let Some(config) = controller.config else {
            continue;
        };
        let dimension = controller.dimension;
        let rotate = controller.rotate_towards_movement;
        let max_step = controller.rotation_speed * dt;
        let deadzone = controller.rotate_deadzone_sqr;
        let state = &mut controller.state;

        let planar = state.planar_velocity(dimension, &config);
        match dimension {
            Dimension::Planar2D => {
                body.velocity.x = planar.x;
                let axis_x = state.move_axis.x;
                if axis_x.abs() > 0.01 {
                    transform.scale.x = transform.scale.x.abs() * axis_x.signum();
                }
            }
            Dimension::Spatial3D => {
                body.velocity.x = planar.x;
                body.velocity.z = planar.z;
                if rotate {
                    state.update_facing(deadzone);
                    let target = yaw_of(state.facing);
                    let yaw = rotate_yaw_towards(transform.yaw_degrees(), target, max_step);
                    transform.set_yaw_degrees(yaw);
                }
            }
        }

        state.try_jump(&mut body, &config);

        body.velocity.y =
            MovementState::shape_vertical(body.velocity.y, input.jump_held, gravity.0.y, dt, &config);
    }
}
