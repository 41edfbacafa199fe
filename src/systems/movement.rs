//! Rigid body integration for the physics step.
//!
//! [`apply_gravity_system`] accelerates bodies by the world [`Gravity`];
//! [`integrate_bodies_system`] moves them by their velocity, one axis at a
//! time, and pushes solid colliders out of the static level geometry. A body
//! stopped by a static loses its velocity along that axis, which is how a
//! landed actor comes to rest on the floor.
use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::rigidbody::RigidBody;
use crate::components::transform::Transform;
use crate::resources::collisionworld::{CollisionWorld, Gravity};
use crate::resources::worldtime::WorldTime;

pub fn apply_gravity_system(
    time: Res<WorldTime>,
    gravity: Res<Gravity>,
    mut query: Query<&mut RigidBody>,
) {
    let dt = time.fixed_delta;
    for mut body in query.iter_mut() {
        if body.frozen || body.gravity_scale == 0.0 {
            continue;
        }
        let scale = body.gravity_scale;
        body.velocity += gravity.0 * scale * dt;
    }
}

pub fn integrate_bodies_system(
    time: Res<WorldTime>,
    collision: Res<CollisionWorld>,
    mut query: Query<(&mut Transform, &mut RigidBody, Option<&BoxCollider>)>,
) {
    let dt = time.fixed_delta;
    for (mut transform, mut body, collider) in query.iter_mut() {
        if body.frozen {
            continue;
        }
        let solid = collider.filter(|c| !c.is_trigger);
        for axis in 0..3 {
            let step = body.velocity[axis] * dt;
            if step == 0.0 {
                continue;
            }
            transform.translation[axis] += step;
            let Some(collider) = solid else {
                continue;
            };
            let bounds = collider.aabb(transform.translation);
            let mut push: Option<f32> = None;
            for s in collision.overlapping(&bounds, collider.collides_with) {
                let candidate = if step > 0.0 {
                    s.aabb.min[axis] - bounds.max[axis]
                } else {
                    s.aabb.max[axis] - bounds.min[axis]
                };
                push = Some(match push {
                    Some(p) if step > 0.0 => p.min(candidate),
                    Some(p) => p.max(candidate),
                    None => candidate,
                });
            }
            if let Some(p) = push {
                transform.translation[axis] += p;
                body.velocity[axis] = 0.0;
            }
        }
    }
}
