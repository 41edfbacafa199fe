//! Music and sound-effect control, plus the bridge to the host backend.
//!
//! [`AudioManager`] owns the logical audio state: two music sources that
//! crossfade into each other, a fixed pool of sound-effect voices used
//! round-robin, and the master volume of each mixer bus. Every change it
//! makes is queued as an [`AudioCmd`]; the audio systems turn the queue into
//! ECS messages and forward them through the [`AudioBridge`] to whatever
//! backend the host runs on the other end of the channel.
//!
//! Use [`setup_audio`] once during initialization and [`shutdown_audio`]
//! during teardown.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::events::audio::{AudioCmd, BgmSlot, MixerBus};

pub const DEFAULT_SE_VOICES: usize = 8;
pub const DEFAULT_BGM_FADE: f32 = 0.4;

/// Quietest level the mixer is driven to, in linear units.
const MIN_LINEAR_VOLUME: f32 = 0.0001;

/// Linear `[0, 1]` volume to mixer decibels. Zero maps to -80 dB.
pub fn linear_to_db(v: f32) -> f32 {
    20.0 * v.clamp(0.0, 1.0).max(MIN_LINEAR_VOLUME).log10()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BgmSource {
    pub clip: Option<String>,
    pub volume: f32,
    pub playing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Crossfade {
    incoming: BgmSlot,
    elapsed: f32,
    duration: f32,
}

#[derive(Resource, Debug)]
pub struct AudioManager {
    sources: [BgmSource; 2],
    active: BgmSlot,
    crossfade: Option<Crossfade>,
    se_voices: usize,
    se_index: usize,
    bgm_volume: f32,
    se_volume: f32,
    pub default_fade: f32,
    outbox: Vec<AudioCmd>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(DEFAULT_SE_VOICES)
    }
}

impl AudioManager {
    /// A manager with `se_voices` effect voices (at least one).
    pub fn new(se_voices: usize) -> Self {
        Self {
            sources: [BgmSource::default(), BgmSource::default()],
            active: BgmSlot::A,
            crossfade: None,
            se_voices: se_voices.max(1),
            se_index: 0,
            bgm_volume: 1.0,
            se_volume: 1.0,
            default_fade: DEFAULT_BGM_FADE,
            outbox: Vec::new(),
        }
    }

    pub fn with_default_fade(mut self, fade: f32) -> Self {
        self.default_fade = fade;
        self
    }

    /// Switch music to `clip` using the default fade.
    pub fn play_bgm_default(&mut self, clip: Option<&str>) {
        self.play_bgm(clip, self.default_fade);
    }

    /// Switch music to `clip`.
    ///
    /// `None` stops both sources. A non-positive `fade` switches instantly;
    /// otherwise the idle source starts the new clip at volume 0 and the two
    /// crossfade over `fade` seconds of unscaled time. Starting a crossfade
    /// while another runs replaces it.
    pub fn play_bgm(&mut self, clip: Option<&str>, fade: f32) {
        let Some(clip) = clip else {
            self.stop_bgm();
            return;
        };
        let incoming = self.active.other();
        let outgoing = self.active;
        self.active = incoming;

        if fade <= 0.0 {
            self.crossfade = None;
            self.stop_source(outgoing);
            self.start_source(incoming, clip, 1.0);
            return;
        }

        self.start_source(incoming, clip, 0.0);
        self.crossfade = Some(Crossfade {
            incoming,
            elapsed: 0.0,
            duration: fade,
        });
    }

    pub fn stop_bgm(&mut self) {
        self.crossfade = None;
        for slot in [BgmSlot::A, BgmSlot::B] {
            self.stop_source(slot);
            self.sources[slot.index()].volume = 0.0;
        }
    }

    /// Advance a running crossfade by `dt` unscaled seconds.
    pub fn tick(&mut self, dt: f32) {
        let Some(mut fade) = self.crossfade else {
            return;
        };
        fade.elapsed += dt.max(0.0);
        let k = (fade.elapsed / fade.duration).clamp(0.0, 1.0);
        let outgoing = fade.incoming.other();

        if k >= 1.0 {
            self.crossfade = None;
            self.set_source_volume(fade.incoming, 1.0);
            self.stop_source(outgoing);
            self.sources[outgoing.index()].volume = 1.0;
            return;
        }
        self.crossfade = Some(fade);
        self.set_source_volume(fade.incoming, k);
        self.set_source_volume(outgoing, 1.0 - k);
    }

    /// Play a one-shot on the next voice. Returns the voice used.
    pub fn play_se(&mut self, clip: &str, volume: f32) -> usize {
        let voice = self.se_index % self.se_voices;
        self.se_index = self.se_index.wrapping_add(1);
        self.outbox.push(AudioCmd::PlayOneShot {
            voice,
            clip: clip.to_string(),
            volume: volume.clamp(0.0, 1.0),
        });
        voice
    }

    pub fn set_bgm_volume(&mut self, v: f32) {
        self.bgm_volume = v.clamp(0.0, 1.0);
        self.outbox.push(AudioCmd::SetBusVolume {
            bus: MixerBus::Bgm,
            db: linear_to_db(self.bgm_volume),
        });
    }

    pub fn set_se_volume(&mut self, v: f32) {
        self.se_volume = v.clamp(0.0, 1.0);
        self.outbox.push(AudioCmd::SetBusVolume {
            bus: MixerBus::Se,
            db: linear_to_db(self.se_volume),
        });
    }

    pub fn bgm_volume(&self) -> f32 {
        self.bgm_volume
    }

    pub fn se_volume(&self) -> f32 {
        self.se_volume
    }

    pub fn se_voices(&self) -> usize {
        self.se_voices
    }

    /// The source that holds (or is fading in) the current music.
    pub fn active_slot(&self) -> BgmSlot {
        self.active
    }

    pub fn source(&self, slot: BgmSlot) -> &BgmSource {
        &self.sources[slot.index()]
    }

    pub fn is_crossfading(&self) -> bool {
        self.crossfade.is_some()
    }

    /// Take every command queued since the last drain.
    pub fn drain_commands(&mut self) -> Vec<AudioCmd> {
        std::mem::take(&mut self.outbox)
    }

    fn start_source(&mut self, slot: BgmSlot, clip: &str, volume: f32) {
        let source = &mut self.sources[slot.index()];
        source.clip = Some(clip.to_string());
        source.volume = volume;
        source.playing = true;
        self.outbox.push(AudioCmd::PlayLoop {
            source: slot,
            clip: clip.to_string(),
            volume,
        });
    }

    fn stop_source(&mut self, slot: BgmSlot) {
        let source = &mut self.sources[slot.index()];
        if source.playing {
            source.playing = false;
            self.outbox.push(AudioCmd::Stop { source: slot });
        }
    }

    fn set_source_volume(&mut self, slot: BgmSlot, volume: f32) {
        self.sources[slot.index()].volume = volume;
        self.outbox.push(AudioCmd::SetSourceVolume {
            source: slot,
            volume,
        });
    }
}

/// Sending half of the channel to the host audio backend.
#[derive(Resource)]
pub struct AudioBridge {
    pub tx_cmd: Sender<AudioCmd>,
}

/// Insert the [`AudioBridge`], the `Messages<AudioCmd>` queue and a default
/// [`AudioManager`] (unless one is already present). Returns the receiving
/// end for the host backend.
pub fn setup_audio(world: &mut World) -> Receiver<AudioCmd> {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    world.insert_resource(AudioBridge { tx_cmd });
    world.init_resource::<Messages<AudioCmd>>();
    if !world.contains_resource::<AudioManager>() {
        world.insert_resource(AudioManager::default());
    }
    rx_cmd
}

/// Tell the backend to stop and drop the bridge.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_conversion() {
        assert!((linear_to_db(1.0) - 0.0).abs() < 1e-5);
        assert!((linear_to_db(0.1) + 20.0).abs() < 1e-4);
        assert!((linear_to_db(0.0) + 80.0).abs() < 1e-3);
        assert_eq!(linear_to_db(3.0), linear_to_db(1.0));
    }

    #[test]
    fn se_voices_round_robin() {
        let mut audio = AudioManager::new(3);
        let voices: Vec<usize> = (0..5).map(|_| audio.play_se("blip", 2.0)).collect();
        assert_eq!(voices, vec![0, 1, 2, 0, 1]);
        let cmds = audio.drain_commands();
        assert_eq!(cmds.len(), 5);
        assert!(matches!(&cmds[0], AudioCmd::PlayOneShot { volume, .. } if *volume == 1.0));
    }

    #[test]
    fn zero_voices_still_plays() {
        let mut audio = AudioManager::new(0);
        assert_eq!(audio.se_voices(), 1);
        assert_eq!(audio.play_se("x", 0.5), 0);
    }

    #[test]
    fn instant_switch() {
        let mut audio = AudioManager::default();
        audio.play_bgm(Some("title"), 0.0);
        assert_eq!(audio.active_slot(), BgmSlot::B);
        assert_eq!(audio.source(BgmSlot::B).volume, 1.0);
        audio.play_bgm(Some("stage"), 0.0);
        assert_eq!(audio.active_slot(), BgmSlot::A);
        assert!(!audio.source(BgmSlot::B).playing);
        assert_eq!(audio.source(BgmSlot::A).clip.as_deref(), Some("stage"));
        assert!(!audio.is_crossfading());
    }

    #[test]
    fn crossfade_completes() {
        let mut audio = AudioManager::default();
        audio.play_bgm(Some("title"), 0.0);
        audio.drain_commands();
        audio.play_bgm(Some("stage"), 0.4);
        assert!(audio.is_crossfading());
        assert_eq!(audio.source(BgmSlot::A).volume, 0.0);

        audio.tick(0.2);
        assert!((audio.source(BgmSlot::A).volume - 0.5).abs() < 1e-5);
        assert!((audio.source(BgmSlot::B).volume - 0.5).abs() < 1e-5);

        audio.tick(0.3);
        assert!(!audio.is_crossfading());
        assert_eq!(audio.source(BgmSlot::A).volume, 1.0);
        assert!(!audio.source(BgmSlot::B).playing);
        assert!(
            audio
                .drain_commands()
                .contains(&AudioCmd::Stop { source: BgmSlot::B })
        );
    }

    #[test]
    fn none_clip_stops_everything() {
        let mut audio = AudioManager::default();
        audio.play_bgm(Some("title"), 0.4);
        audio.play_bgm(None, 0.4);
        assert!(!audio.is_crossfading());
        for slot in [BgmSlot::A, BgmSlot::B] {
            assert!(!audio.source(slot).playing);
            assert_eq!(audio.source(slot).volume, 0.0);
        }
    }

    #[test]
    fn volumes_are_clamped_and_sent_in_db() {
        let mut audio = AudioManager::default();
        audio.set_bgm_volume(1.5);
        audio.set_se_volume(0.1);
        assert_eq!(audio.bgm_volume(), 1.0);
        let cmds = audio.drain_commands();
        assert_eq!(
            cmds[0],
            AudioCmd::SetBusVolume {
                bus: MixerBus::Bgm,
                db: 0.0
            }
        );
        assert!(matches!(cmds[1], AudioCmd::SetBusVolume { bus: MixerBus::Se, db } if (db + 20.0).abs() < 1e-4));
    }

    #[test]
    fn setup_keeps_existing_manager() {
        let mut world = World::new();
        world.insert_resource(AudioManager::new(2));
        let rx = setup_audio(&mut world);
        assert_eq!(world.resource::<AudioManager>().se_voices(), 2);
        shutdown_audio(&mut world);
        assert_eq!(rx.try_recv().ok(), Some(AudioCmd::Shutdown));
        assert!(!world.contains_resource::<AudioBridge>());
    }
}
