//! Developer overlay: frame rate sampling, the readout and the debug actions.
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::health::Health;
use crate::components::inputcontrolled::Player;
use crate::components::persistent::Persistent;
use crate::events::debug::DebugAction;
use crate::events::health::{DamageEvent, HealEvent};
use crate::resources::debughud::{DebugHud, DebugReadout};
use crate::resources::gamemanager::GameManager;
use crate::resources::worldtime::WorldTime;
use crate::systems::gamemanager::add_score;

/// Refresh the overlay while it is visible. Runs on unscaled time so the
/// numbers keep moving while the game is paused.
pub fn debug_hud_system(
    time: Res<WorldTime>,
    gm: Res<GameManager>,
    players: Query<&Health, With<Player>>,
    mut hud: ResMut<DebugHud>,
) {
    if !hud.visible {
        return;
    }
    hud.sample(time.unscaled_delta);
    let readout = DebugReadout {
        score: gm.score,
        health: players
            .iter()
            .next()
            .map(|h| (h.current(), h.state.max())),
        game_time: gm.game_time,
        time_scale: time.time_scale,
    };
    if hud.report_due(time.unscaled_delta) {
        debug!(
            "[hud] FPS {:.0} ({:?}) | {}",
            hud.fps(),
            hud.fps_band(),
            readout.to_string().replace('\n', " | ")
        );
    }
    hud.set_readout(readout);
}

pub fn debug_action_observer(
    trigger: On<DebugAction>,
    mut hud: ResMut<DebugHud>,
    mut time: ResMut<WorldTime>,
    gm: Res<GameManager>,
    players: Query<Entity, With<Player>>,
    mut commands: Commands,
) {
    match *trigger.event() {
        DebugAction::ToggleHud => hud.toggle(),
        DebugAction::SetTimeScale(scale) => {
            if gm.is_paused() {
                warn!("time scale change ignored while paused");
            } else {
                time.time_scale = scale.max(0.0);
            }
        }
        DebugAction::AddScore(amount) => {
            commands.queue(move |world: &mut World| {
                add_score(world, amount);
            });
        }
        DebugAction::DamagePlayer(amount) => {
            for player in players.iter() {
                commands.trigger(DamageEvent::new(player, amount));
            }
        }
        DebugAction::HealPlayer(amount) => {
            for player in players.iter() {
                commands.trigger(HealEvent {
                    entity: player,
                    amount,
                });
            }
        }
    }
}

/// Install the overlay resource and its action observer.
pub fn setup_debug_hud(world: &mut World) {
    world.insert_resource(DebugHud::default());
    world.spawn((Observer::new(debug_action_observer), Persistent));
}
