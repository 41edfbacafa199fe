//! Game configuration change detection system.
//!
//! Pushes [`GameConfig`] values into the clock, the audio manager and the
//! boot sequence whenever the resource is added or modified.

use bevy_ecs::prelude::*;
use log::info;

use crate::resources::audio::AudioManager;
use crate::resources::boot::{BootSequence, BootStage};
use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;

/// System that applies game configuration changes.
///
/// The boot sequence only takes new values while it has not started
/// waiting yet.
pub fn apply_gameconfig_changes(
    maybe_config: Option<Res<GameConfig>>,
    mut time: ResMut<WorldTime>,
    audio: Option<ResMut<AudioManager>>,
    boot: Option<ResMut<BootSequence>>,
) {
    let Some(config) = maybe_config else {
        return;
    };
    if !config.is_changed() {
        return;
    }

    time.fixed_delta = config.fixed_delta;
    time.time_scale = config.time_scale;
    if let Some(mut audio) = audio {
        audio.default_fade = config.bgm_fade;
    }
    if let Some(mut boot) = boot {
        if boot.stage() == BootStage::LoadSave {
            boot.first_scene = config.first_scene.clone();
            boot.delay = config.boot_delay.max(0.0);
        }
    }
    info!("GameConfig changes applied.");
}
