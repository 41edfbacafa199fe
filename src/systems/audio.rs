//! Systems bridging the [`AudioManager`] with the host audio backend.
//!
//! - [`audio_manager_system`] advances the BGM crossfade on unscaled time and
//!   turns the manager's queued commands into `AudioCmd` messages.
//! - [`forward_audio_cmds`] sends those messages across the
//!   [`AudioBridge`] channel.
//! - [`update_audio_cmds`] advances the message queue once per frame.
//!
//! [`audio_log_thread`] is a stand-in backend for headless runs: it logs what
//! a real mixer would do and exits on [`AudioCmd::Shutdown`].

use bevy_ecs::prelude::*;
use crossbeam_channel::Receiver;
use log::{debug, info};

use crate::events::audio::AudioCmd;
use crate::resources::audio::{AudioBridge, AudioManager};
use crate::resources::worldtime::WorldTime;

pub fn audio_manager_system(
    time: Res<WorldTime>,
    mut audio: ResMut<AudioManager>,
    mut writer: MessageWriter<AudioCmd>,
) {
    audio.tick(time.unscaled_delta);
    writer.write_batch(audio.drain_commands());
}

/// Forward ECS AudioCmd messages to the backend via the AudioBridge sender.
pub fn forward_audio_cmds(bridge: Option<Res<AudioBridge>>, mut reader: MessageReader<AudioCmd>) {
    let Some(bridge) = bridge else {
        // Nobody listening; consume so the reader does not lag behind.
        reader.clear();
        return;
    };
    for cmd in reader.read() {
        // ignore send error on shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

pub fn update_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Drain commands until shutdown, logging each one.
pub fn audio_log_thread(rx_cmd: Receiver<AudioCmd>) {
    info!("audio backend starting (id={:?})", std::thread::current().id());
    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::Shutdown => break,
            AudioCmd::PlayLoop { source, clip, volume } => {
                debug!("[audio] loop {:?} clip='{}' vol={:.2}", source, clip, volume)
            }
            AudioCmd::PlayOneShot { voice, clip, volume } => {
                debug!("[audio] one-shot voice={} clip='{}' vol={:.2}", voice, clip, volume)
            }
            other => debug!("[audio] {:?}", other),
        }
    }
    info!("audio backend stopped");
}
