//! Scene transitions.
//!
//! [`SceneLoader::load`] only records the request; the exclusive
//! [`apply_scene_transition`](crate::systems::scene::apply_scene_transition)
//! system performs it between frames and reports progress through
//! [`SceneProgress`](crate::events::scene::SceneProgress) messages. Scene
//! contents come from builder systems registered by name in the
//! [`SceneRegistry`].

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemId;
use log::debug;
use rustc_hash::FxHashMap;

use crate::components::persistent::Persistent;

pub const GAMEPLAY_SCENE: &str = "Gameplay";
pub const MAIN_MENU_SCENE: &str = "MainMenu";

#[derive(Resource, Debug, Default)]
pub struct SceneLoader {
    pending: Option<String>,
    current: Option<String>,
    loads: u64,
}

impl SceneLoader {
    /// Request a switch to `name`. A later request in the same frame wins.
    pub fn load(&mut self, name: impl Into<String>) {
        let name = name.into();
        debug!("scene '{}' requested", name);
        self.pending = Some(name);
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn take_pending(&mut self) -> Option<String> {
        self.pending.take()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Completed transitions so far.
    pub fn loads(&self) -> u64 {
        self.loads
    }

    pub(crate) fn finish(&mut self, name: String) {
        self.current = Some(name);
        self.loads += 1;
    }
}

/// Map of scene names to builder systems.
#[derive(Resource, Default)]
pub struct SceneRegistry {
    map: FxHashMap<String, SystemId>,
}

impl SceneRegistry {
    pub fn insert(&mut self, name: impl Into<String>, id: SystemId) {
        self.map.insert(name.into(), id);
    }

    pub fn get(&self, name: impl AsRef<str>) -> Option<SystemId> {
        self.map.get(name.as_ref()).copied()
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.map.contains_key(name.as_ref())
    }
}

/// Register `builder` as the scene called `name`.
///
/// Registered systems are entities, so the builder is marked
/// [`Persistent`] to survive the transitions it is used for.
pub fn register_scene<M>(
    world: &mut World,
    name: impl Into<String>,
    builder: impl IntoSystem<(), (), M> + 'static,
) -> SystemId {
    let id = world.register_system(builder);
    world.entity_mut(id.entity()).insert(Persistent);
    world
        .get_resource_or_init::<SceneRegistry>()
        .insert(name, id);
    id
}
