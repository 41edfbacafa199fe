//! Scene switching.
//!
//! Runs at the end of the frame, after every schedule, so a scene requested
//! by any system or observer is swapped in before the next frame starts.
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::persistent::Persistent;
use crate::events::scene::SceneProgress;
use crate::resources::collisionworld::CollisionWorld;
use crate::resources::gamemanager::GameManager;
use crate::resources::pool::EntityPool;
use crate::resources::scene::{SceneLoader, SceneRegistry};
use crate::resources::uistack::UiStack;
use crate::resources::worldtime::WorldTime;

fn report(world: &mut World, scene: &str, progress: f32) {
    world
        .get_resource_or_init::<Messages<SceneProgress>>()
        .write(SceneProgress {
            scene: scene.to_string(),
            progress,
        });
}

pub fn update_scene_progress(mut msgs: ResMut<Messages<SceneProgress>>) {
    msgs.update();
}

/// Despawn every entity that is neither [`Persistent`] nor an observer.
pub fn despawn_scene_entities(world: &mut World) -> usize {
    let doomed: Vec<Entity> = world
        .query_filtered::<Entity, (Without<Persistent>, Without<Observer>)>()
        .iter(world)
        .collect();
    let count = doomed.len();
    for entity in doomed {
        world.despawn(entity);
    }
    count
}

/// Perform the pending [`SceneLoader`] request, if any.
///
/// Order: progress 0.0, despawn the old scene, reset per-scene services
/// (UI stack, level geometry, pool instances, pause and time scale),
/// progress 0.9, run the builder, progress 1.0. A request for a scene with
/// no registered builder is logged and dropped, leaving the current scene
/// untouched.
pub fn apply_scene_transition(world: &mut World) {
    let Some(name) = world
        .get_resource_mut::<SceneLoader>()
        .and_then(|mut loader| loader.take_pending())
    else {
        return;
    };
    let Some(builder) = world
        .get_resource::<SceneRegistry>()
        .and_then(|registry| registry.get(&name))
    else {
        warn!("unknown scene '{}'; staying put", name);
        return;
    };

    report(world, &name, 0.0);
    let removed = despawn_scene_entities(world);

    if world.contains_resource::<UiStack>() {
        world.resource_scope(|world, mut stack: Mut<UiStack>| stack.clear(world));
    }
    if let Some(mut level) = world.get_resource_mut::<CollisionWorld>() {
        level.clear();
    }
    if let Some(mut pool) = world.get_resource_mut::<EntityPool>() {
        pool.clear_instances();
    }
    if let Some(mut time) = world.get_resource_mut::<WorldTime>() {
        time.time_scale = 1.0;
    }
    if let Some(mut gm) = world.get_resource_mut::<GameManager>() {
        gm.paused = false;
    }
    report(world, &name, 0.9);

    if let Err(err) = world.run_system(builder) {
        warn!("scene '{}' builder failed: {}", name, err);
    }
    report(world, &name, 1.0);
    info!("scene '{}' loaded ({} entities removed)", name, removed);
    world.resource_mut::<SceneLoader>().finish(name);
}
