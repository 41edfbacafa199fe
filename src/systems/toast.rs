//! Toast playback.
use bevy_ecs::prelude::*;

use crate::events::bus::ToastMessage;
use crate::resources::eventbus::EventBusExt;
use crate::resources::toast::ToastQueue;
use crate::resources::worldtime::WorldTime;

pub fn on_toast(In(ToastMessage(text)): In<ToastMessage>, mut queue: ResMut<ToastQueue>) {
    queue.enqueue(text);
}

/// Advance the queue on unscaled time, so toasts play during pause.
pub fn toast_system(time: Res<WorldTime>, mut queue: ResMut<ToastQueue>) {
    if queue.is_displaying() {
        queue.tick(time.unscaled_delta);
    }
}

pub fn setup_toasts(world: &mut World) {
    world.init_resource::<ToastQueue>();
    world.subscribe(on_toast);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::toast::{TOAST_FADE_IN, TOAST_FADE_OUT, TOAST_GAP, TOAST_HOLD};

    #[test]
    fn published_toasts_play_in_order_while_paused() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(0.0));
        setup_toasts(&mut world);
        world.publish(ToastMessage::new("first"));
        world.publish(ToastMessage::new("second"));

        let mut schedule = Schedule::default();
        schedule.add_systems(toast_system);
        let current = |world: &World| {
            world
                .resource::<ToastQueue>()
                .current()
                .map(|v| v.text.to_string())
        };
        assert_eq!(current(&world).as_deref(), Some("first"));

        let cycle = TOAST_FADE_IN + TOAST_HOLD + TOAST_FADE_OUT + TOAST_GAP;
        world.resource_mut::<WorldTime>().unscaled_delta = cycle + 0.05;
        schedule.run(&mut world);
        assert_eq!(current(&world).as_deref(), Some("second"));

        world.resource_mut::<WorldTime>().unscaled_delta = cycle;
        schedule.run(&mut world);
        let queue = world.resource::<ToastQueue>();
        assert!(!queue.is_displaying());
        assert_eq!(queue.shown(), 2);
    }
}
