//! Camera follow and hit shake.
use bevy_ecs::prelude::*;

use crate::components::camera::CameraRig;
use crate::components::transform::Transform;
use crate::events::bus::Hit;
use crate::resources::eventbus::EventBusExt;
use crate::resources::worldtime::WorldTime;

/// Move every active rig to its target and apply the shake offset.
/// Rigs whose target is gone stay where they are.
pub fn camera_follow_system(
    time: Res<WorldTime>,
    mut rigs: Query<(&mut CameraRig, &mut Transform)>,
    targets: Query<&Transform, Without<CameraRig>>,
) {
    for (mut rig, mut transform) in rigs.iter_mut() {
        if !rig.active {
            continue;
        }
        rig.tick(time.delta);
        let Some(target) = rig.target.and_then(|t| targets.get(t).ok()) else {
            continue;
        };
        transform.translation = rig.eye(target.translation);
    }
}

pub fn on_hit_shake(In(_): In<Hit>, mut rigs: Query<&mut CameraRig>) {
    for mut rig in rigs.iter_mut() {
        if rig.active {
            rig.shake(None);
        }
    }
}

/// The rig the host should render through: the active one with the highest
/// priority.
pub fn live_camera(world: &mut World) -> Option<Entity> {
    world
        .query::<(Entity, &CameraRig)>()
        .iter(world)
        .filter(|(_, rig)| rig.active)
        .max_by_key(|(_, rig)| rig.priority)
        .map(|(entity, _)| entity)
}

pub fn setup_camera(world: &mut World) {
    world.subscribe(on_hit_shake);
}
