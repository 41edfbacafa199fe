//! Pause, score and game-over flow.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::persistent::Persistent;
use crate::events::bus::{PauseToggled, PlayerDied, ScoreChanged, ToastMessage};
use crate::events::input::{InputAction, InputEvent};
use crate::resources::eventbus::{BusCommandsExt, EventBusExt};
use crate::resources::gamemanager::GameManager;
use crate::resources::save::SaveService;
use crate::resources::worldtime::WorldTime;

pub const GAME_OVER_TOAST: &str = "Game Over!";

/// Flip the pause flag and announce the new state. Returns it.
pub fn toggle_pause(world: &mut World) -> bool {
    let paused = {
        let mut gm = world.get_resource_or_init::<GameManager>();
        gm.paused = !gm.paused;
        gm.paused
    };
    world.publish(PauseToggled(paused));
    paused
}

/// Add to the score, announce it and record a new high score.
pub fn add_score(world: &mut World, amount: i32) -> i32 {
    let score = {
        let mut gm = world.get_resource_or_init::<GameManager>();
        gm.score = gm.score.saturating_add(amount);
        gm.score
    };
    world.publish(ScoreChanged(score));
    if let Some(mut save) = world.get_resource_mut::<SaveService>() {
        save.update_high_score(score);
    }
    score
}

pub fn game_time_system(time: Res<WorldTime>, mut gm: ResMut<GameManager>) {
    if !gm.paused {
        gm.game_time += time.delta;
    }
}

pub fn on_pause_toggled(In(toggled): In<PauseToggled>, mut gm: ResMut<GameManager>) {
    gm.paused = toggled.0;
}

pub fn on_player_died(
    In(_): In<PlayerDied>,
    save: Option<ResMut<SaveService>>,
    mut commands: Commands,
) {
    info!("Player died!");
    commands.publish(ToastMessage::new(GAME_OVER_TOAST));
    if let Some(mut save) = save {
        save.save();
    }
}

/// The pause button toggles pause.
pub fn pause_input_observer(trigger: On<InputEvent>, mut commands: Commands) {
    let event = trigger.event();
    if event.action == InputAction::Pause && event.pressed {
        commands.queue(|world: &mut World| {
            toggle_pause(world);
        });
    }
}

pub fn setup_game_manager(world: &mut World) {
    world.init_resource::<GameManager>();
    world.subscribe(on_pause_toggled);
    world.subscribe(on_player_died);
    world.spawn((Observer::new(pause_input_observer), Persistent));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::toast::ToastQueue;

    #[derive(Resource, Default)]
    struct Scores(Vec<i32>);

    fn make_world() -> World {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(SaveService::in_memory());
        world.init_resource::<ToastQueue>();
        world.subscribe(|In(msg): In<ToastMessage>, mut q: ResMut<ToastQueue>| q.enqueue(msg.0));
        setup_game_manager(&mut world);
        world
    }

    #[test]
    fn toggle_pause_round_trip() {
        let mut world = make_world();
        assert!(toggle_pause(&mut world));
        assert!(world.resource::<GameManager>().paused);
        assert!(!toggle_pause(&mut world));
        assert_eq!(world.published_count::<PauseToggled>(), 2);
    }

    #[test]
    fn pause_button_toggles() {
        let mut world = make_world();
        world.trigger(InputEvent {
            action: InputAction::Pause,
            pressed: true,
        });
        world.flush();
        assert!(world.resource::<GameManager>().paused);
        world.trigger(InputEvent {
            action: InputAction::Pause,
            pressed: false,
        });
        world.flush();
        assert!(world.resource::<GameManager>().paused, "release does nothing");
    }

    #[test]
    fn game_time_stops_while_paused() {
        let mut world = make_world();
        world.resource_mut::<WorldTime>().delta = 0.5;
        let mut schedule = Schedule::default();
        schedule.add_systems(game_time_system);
        schedule.run(&mut world);
        world.publish(PauseToggled(true));
        schedule.run(&mut world);
        assert_eq!(world.resource::<GameManager>().game_time, 0.5);
    }

    #[test]
    fn score_is_announced_and_recorded() {
        let mut world = make_world();
        world.init_resource::<Scores>();
        world.subscribe(|In(s): In<ScoreChanged>, mut seen: ResMut<Scores>| seen.0.push(s.0));
        add_score(&mut world, 100);
        add_score(&mut world, 50);
        assert_eq!(world.resource::<Scores>().0, vec![100, 150]);
        assert_eq!(world.resource::<SaveService>().data().high_score, 150);
    }

    #[test]
    fn player_death_toasts_and_saves() {
        let mut world = make_world();
        world.publish(PlayerDied);
        assert_eq!(world.resource::<SaveService>().save_count(), 1);
        let queue = world.resource::<ToastQueue>();
        assert_eq!(queue.current().map(|t| t.text), Some(GAME_OVER_TOAST));
    }
}
