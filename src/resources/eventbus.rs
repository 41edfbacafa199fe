//! Process-wide publish/subscribe on top of the ECS world.
//!
//! Every [`BusEvent`] type gets a [`Channel`] resource holding its subscriber
//! list. A subscriber is an ordinary system taking the payload as
//! [`In<E>`](bevy_ecs::system::In); it is registered as a one-shot system, so
//! it can use any system parameter (queries, resources, commands).
//!
//! Dispatch contract:
//! - [`EventBusExt::publish`] is synchronous. It runs every subscriber of the
//!   channel, in registration order, before returning.
//! - Commands issued by a subscriber are applied as soon as that subscriber
//!   returns, so a publish from inside a handler is dispatched completely
//!   before the next subscriber of the outer publish runs.
//! - Dispatch walks a snapshot of the list. A subscriber added during a
//!   publish is first called on the next publish. A subscriber removed during
//!   a publish is not called again, even by the publish in progress.
//! - A subscriber that can no longer run (its system was removed, or it
//!   would recursively re-enter itself through a nested publish on its own
//!   channel) is logged with `warn!` and skipped.
//! - A subscriber that panics unwinds through the publisher. Handlers are
//!   not isolated from each other.
//!
//! From ordinary systems and observers use [`BusCommandsExt::publish`] on
//! `Commands`, which performs the same dispatch when commands are applied.
//!
//! ```ignore
//! let sub = world.subscribe(|In(_): In<Hit>, mut rigs: Query<&mut CameraRig>| {
//!     for mut rig in &mut rigs {
//!         rig.shake(None);
//!     }
//! });
//! world.publish(Hit(Vec3::ZERO));
//! world.unsubscribe(sub);
//! ```

use std::marker::PhantomData;

use bevy_ecs::prelude::*;
use bevy_ecs::system::{IntoSystem, SystemId};
use log::{debug, warn};

use crate::components::persistent::Persistent;
use crate::events::bus::BusEvent;

/// Subscriber list and diagnostics of one channel.
#[derive(Resource)]
pub struct Channel<E: BusEvent> {
    subscribers: Vec<SystemId<In<E>>>,
    published: u64,
}

impl<E: BusEvent> Default for Channel<E> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            published: 0,
        }
    }
}

impl<E: BusEvent> Channel<E> {
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Number of publishes on this channel so far.
    pub fn published(&self) -> u64 {
        self.published
    }

    fn contains(&self, id: SystemId<In<E>>) -> bool {
        self.subscribers.contains(&id)
    }
}

/// Handle returned by [`EventBusExt::subscribe`], needed to unsubscribe.
pub struct Subscription<E: BusEvent> {
    id: SystemId<In<E>>,
    _marker: PhantomData<fn(E)>,
}

impl<E: BusEvent> Clone for Subscription<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: BusEvent> Copy for Subscription<E> {}

impl<E: BusEvent> PartialEq for Subscription<E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<E: BusEvent> std::fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscription<{}>({:?})", E::CHANNEL, self.id.entity())
    }
}

impl<E: BusEvent> Subscription<E> {
    pub fn system_id(&self) -> SystemId<In<E>> {
        self.id
    }
}

pub trait EventBusExt {
    /// Register `handler` and append it to the channel of `E`.
    fn subscribe<E: BusEvent, M>(
        &mut self,
        handler: impl IntoSystem<In<E>, (), M> + 'static,
    ) -> Subscription<E>;

    /// Remove a subscriber and drop its system. Returns false when it was
    /// not subscribed.
    fn unsubscribe<E: BusEvent>(&mut self, subscription: Subscription<E>) -> bool;

    /// Deliver `payload` to every subscriber of its channel. Returns how many
    /// subscribers ran.
    fn publish<E: BusEvent>(&mut self, payload: E) -> usize;

    fn subscriber_count<E: BusEvent>(&self) -> usize;

    fn published_count<E: BusEvent>(&self) -> u64;
}

impl EventBusExt for World {
    fn subscribe<E: BusEvent, M>(
        &mut self,
        handler: impl IntoSystem<In<E>, (), M> + 'static,
    ) -> Subscription<E> {
        let id = self.register_system(handler);
        // Registered systems are entities; keep them across scene changes.
        self.entity_mut(id.entity()).insert(Persistent);
        self.get_resource_or_init::<Channel<E>>()
            .subscribers
            .push(id);
        debug!("subscribed {:?} to '{}'", id.entity(), E::CHANNEL);
        Subscription {
            id,
            _marker: PhantomData,
        }
    }

    fn unsubscribe<E: BusEvent>(&mut self, subscription: Subscription<E>) -> bool {
        let id = subscription.id;
        let removed = match self.get_resource_mut::<Channel<E>>() {
            Some(mut channel) => {
                let before = channel.subscribers.len();
                channel.subscribers.retain(|s| *s != id);
                channel.subscribers.len() != before
            }
            None => false,
        };
        if !removed {
            return false;
        }
        // A handler removing itself is still running; despawning its entity
        // drops the system once the run finishes.
        if self.unregister_system(id).is_err() {
            if let Ok(entity) = self.get_entity_mut(id.entity()) {
                entity.despawn();
            }
        }
        debug!("unsubscribed {:?} from '{}'", id.entity(), E::CHANNEL);
        true
    }

    fn publish<E: BusEvent>(&mut self, payload: E) -> usize {
        let snapshot = {
            let mut channel = self.get_resource_or_init::<Channel<E>>();
            channel.published += 1;
            channel.subscribers.clone()
        };
        let mut delivered = 0;
        for id in snapshot {
            let still_subscribed = self
                .get_resource::<Channel<E>>()
                .is_some_and(|c| c.contains(id));
            if !still_subscribed {
                continue;
            }
            match self.run_system_with(id, payload.clone()) {
                Ok(()) => delivered += 1,
                Err(err) => warn!(
                    "'{}' subscriber {:?} skipped: {}",
                    E::CHANNEL,
                    id.entity(),
                    err
                ),
            }
        }
        delivered
    }

    fn subscriber_count<E: BusEvent>(&self) -> usize {
        self.get_resource::<Channel<E>>()
            .map_or(0, Channel::subscriber_count)
    }

    fn published_count<E: BusEvent>(&self) -> u64 {
        self.get_resource::<Channel<E>>()
            .map_or(0, Channel::published)
    }
}

/// Deferred publishing from systems and observers.
pub trait BusCommandsExt {
    fn publish<E: BusEvent>(&mut self, payload: E);
}

impl BusCommandsExt for Commands<'_, '_> {
    fn publish<E: BusEvent>(&mut self, payload: E) {
        self.queue(move |world: &mut World| {
            world.publish(payload);
        });
    }
}
