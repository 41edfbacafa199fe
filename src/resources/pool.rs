//! Reuse of short-lived actors (projectiles, pickups) by prefab id.
//!
//! Each prefab registered in the [`EntityPool`] has a builder that creates a
//! fresh instance and a free list of idle ones. [`spawn_pooled`] hands out an
//! idle instance when there is one and builds a new one otherwise;
//! [`despawn_pooled`] parks it again. Both run the [`Poolable`] hooks of the
//! instance's components, so a reused projectile starts with a clean timer.
//!
//! Idle instances stay in the world, marked inactive in their [`Pooled`]
//! component. Systems that act on pooled actors skip inactive ones.

use std::collections::VecDeque;

use bevy_ecs::component::Mutable;
use bevy_ecs::prelude::*;
use bevy_ecs::world::EntityWorldMut;
use glam::{Quat, Vec3};
use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::components::pooled::Pooled;
use crate::components::projectile::{Poolable, Projectile};
use crate::components::rigidbody::RigidBody;
use crate::components::transform::Transform;

pub const DEFAULT_WARM_COUNT: usize = 8;

/// Creates one instance of a prefab and returns it.
pub type PrefabBuilder = fn(&mut World) -> Entity;

/// Calls a component's spawn (true) or despawn (false) hook, if present.
pub type PoolHook = fn(&mut EntityWorldMut, bool);

fn run_hook<T: Component<Mutability = Mutable> + Poolable>(entity: &mut EntityWorldMut, spawned: bool) {
    if let Some(mut component) = entity.get_mut::<T>() {
        if spawned {
            component.on_spawned();
        } else {
            component.on_despawned();
        }
    }
}

struct PoolEntry {
    builder: PrefabBuilder,
    idle: VecDeque<Entity>,
    live: usize,
    created: usize,
}

#[derive(Resource)]
pub struct EntityPool {
    entries: FxHashMap<String, PoolEntry>,
    hooks: Vec<PoolHook>,
}

impl Default for EntityPool {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
            hooks: vec![run_hook::<Projectile>, run_hook::<RigidBody>],
        }
    }
}

impl EntityPool {
    pub fn register(&mut self, prefab: impl Into<String>, builder: PrefabBuilder) {
        self.entries.insert(
            prefab.into(),
            PoolEntry {
                builder,
                idle: VecDeque::new(),
                live: 0,
                created: 0,
            },
        );
    }

    /// Run `T`'s [`Poolable`] hooks on pooled instances from now on.
    pub fn add_hook<T: Component<Mutability = Mutable> + Poolable>(&mut self) {
        self.hooks.push(run_hook::<T>);
    }

    pub fn idle_count(&self, prefab: &str) -> usize {
        self.entries.get(prefab).map_or(0, |e| e.idle.len())
    }

    pub fn live_count(&self, prefab: &str) -> usize {
        self.entries.get(prefab).map_or(0, |e| e.live)
    }

    /// Instances built so far for `prefab`.
    pub fn created(&self, prefab: &str) -> usize {
        self.entries.get(prefab).map_or(0, |e| e.created)
    }

    /// Forget every instance; registrations stay. For when the instances
    /// were despawned by a scene change.
    pub fn clear_instances(&mut self) {
        for entry in self.entries.values_mut() {
            entry.idle.clear();
            entry.live = 0;
        }
    }
}

fn run_hooks(world: &mut World, entity: Entity, spawned: bool) {
    let hooks = world.resource::<EntityPool>().hooks.clone();
    if let Ok(mut entity) = world.get_entity_mut(entity) {
        for hook in &hooks {
            hook(&mut entity, spawned);
        }
    }
}

fn build(world: &mut World, prefab: &str) -> Option<Entity> {
    let mut pool = world.get_resource_mut::<EntityPool>()?;
    let entry = pool.entries.get_mut(prefab)?;
    entry.created += 1;
    let builder = entry.builder;
    let entity = builder(world);
    world.entity_mut(entity).insert(Pooled::new(prefab));
    Some(entity)
}

/// Build `count` idle instances of `prefab` ahead of time. Returns how many
/// were built.
pub fn warm_up(world: &mut World, prefab: &str, count: usize) -> usize {
    let mut built = 0;
    for _ in 0..count {
        let Some(entity) = build(world, prefab) else {
            warn!("warm-up of unknown prefab '{}'", prefab);
            return built;
        };
        run_hooks(world, entity, false);
        if let Some(entry) = world.resource_mut::<EntityPool>().entries.get_mut(prefab) {
            entry.idle.push_back(entity);
        }
        built += 1;
    }
    debug!("pool '{}' warmed with {}", prefab, built);
    built
}

/// Hand out an instance of `prefab` placed at `translation`/`rotation`.
pub fn spawn_pooled(
    world: &mut World,
    prefab: &str,
    translation: Vec3,
    rotation: Quat,
) -> Option<Entity> {
    let reused = loop {
        let Some(mut pool) = world.get_resource_mut::<EntityPool>() else {
            warn!("no EntityPool; cannot spawn '{}'", prefab);
            return None;
        };
        let Some(entry) = pool.entries.get_mut(prefab) else {
            warn!("spawn of unknown prefab '{}'", prefab);
            return None;
        };
        match entry.idle.pop_front() {
            Some(entity) if world.get_entity(entity).is_err() => continue,
            other => break other,
        }
    };
    let entity = match reused {
        Some(entity) => entity,
        None => build(world, prefab)?,
    };

    {
        let mut e = world.entity_mut(entity);
        match e.get_mut::<Transform>() {
            Some(mut t) => {
                t.translation = translation;
                t.rotation = rotation;
            }
            None => {
                e.insert(Transform {
                    translation,
                    rotation,
                    ..Default::default()
                });
            }
        }
        if let Some(mut pooled) = e.get_mut::<Pooled>() {
            pooled.active = true;
        }
    }
    run_hooks(world, entity, true);
    if let Some(entry) = world.resource_mut::<EntityPool>().entries.get_mut(prefab) {
        entry.live += 1;
    }
    Some(entity)
}

/// Return `entity` to its pool. Entities that were not pooled are despawned.
/// Returns false when there was nothing to do (already idle or gone).
pub fn despawn_pooled(world: &mut World, entity: Entity) -> bool {
    let Some(pooled) = world.get::<Pooled>(entity).cloned() else {
        return world.despawn(entity);
    };
    if !pooled.active {
        return false;
    }
    run_hooks(world, entity, false);
    if let Some(mut p) = world.get_mut::<Pooled>(entity) {
        p.active = false;
    }
    if let Some(mut pool) = world.get_resource_mut::<EntityPool>() {
        if let Some(entry) = pool.entries.get_mut(&pooled.prefab) {
            entry.live = entry.live.saturating_sub(1);
            entry.idle.push_back(entity);
        }
    }
    true
}
