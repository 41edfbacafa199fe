//! Game configuration resource.
//!
//! Settings loaded from an INI file. Every key is optional; missing keys and
//! a missing file keep the defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [time]
//! fixed_delta = 0.02
//! time_scale = 1.0
//! target_fps = 60
//!
//! [player]
//! move_speed = 6.0
//! jump_power = 7.0
//! air_control = 0.8
//! coyote_time = 0.1
//! jump_buffer_time = 0.1
//! max_jumps = 2
//! fall_multiplier = 2.5
//! low_jump_multiplier = 2.0
//!
//! [audio]
//! se_voices = 8
//! bgm_fade = 0.4
//!
//! [save]
//! path = ./save.json
//!
//! [boot]
//! first_scene = Gameplay
//! delay = 1.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::config::movement::MoveConfig;
use crate::resources::audio::{DEFAULT_BGM_FADE, DEFAULT_SE_VOICES};
use crate::resources::boot::DEFAULT_BOOT_DELAY;
use crate::resources::scene::GAMEPLAY_SCENE;

const DEFAULT_FIXED_DELTA: f32 = 0.02;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_SAVE_PATH: &str = "./save.json";

/// Game configuration resource.
///
/// [`apply_gameconfig_changes`] pushes the values into the running services
/// whenever the resource is inserted or modified.
///
/// [`apply_gameconfig_changes`]: crate::systems::gameconfig::apply_gameconfig_changes
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Length of one physics step in seconds.
    pub fixed_delta: f32,
    pub time_scale: f32,
    /// Frame rate the headless driver simulates.
    pub target_fps: u32,
    /// Movement tuning of the player actor.
    pub player: MoveConfig,
    pub se_voices: usize,
    /// Default BGM crossfade in seconds.
    pub bgm_fade: f32,
    pub save_path: PathBuf,
    pub first_scene: String,
    pub boot_delay: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            fixed_delta: DEFAULT_FIXED_DELTA,
            time_scale: 1.0,
            target_fps: DEFAULT_TARGET_FPS,
            player: MoveConfig::default(),
            se_voices: DEFAULT_SE_VOICES,
            bgm_fade: DEFAULT_BGM_FADE,
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            first_scene: GAMEPLAY_SCENE.to_string(),
            boot_delay: DEFAULT_BOOT_DELAY,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Seconds per frame at the target frame rate.
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        let float = |section: &str, key: &str| {
            config
                .getfloat(section, key)
                .ok()
                .flatten()
                .map(|v| v as f32)
        };

        // [time] section
        if let Some(v) = float("time", "fixed_delta") {
            self.fixed_delta = v;
        }
        if let Some(v) = float("time", "time_scale") {
            self.time_scale = v;
        }
        if let Some(fps) = config.getuint("time", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [player] section
        let p = &mut self.player;
        for (key, field) in [
            ("move_speed", &mut p.move_speed),
            ("jump_power", &mut p.jump_power),
            ("air_control", &mut p.air_control),
            ("ground_check_distance", &mut p.ground_check_distance),
            ("coyote_time", &mut p.coyote_time),
            ("jump_buffer_time", &mut p.jump_buffer_time),
            ("fall_multiplier", &mut p.fall_multiplier),
            ("low_jump_multiplier", &mut p.low_jump_multiplier),
        ] {
            if let Some(v) = float("player", key) {
                *field = v;
            }
        }
        if let Some(jumps) = config.getuint("player", "max_jumps").ok().flatten() {
            p.max_jumps = jumps as u32;
        }

        // [audio] section
        if let Some(voices) = config.getuint("audio", "se_voices").ok().flatten() {
            self.se_voices = voices as usize;
        }
        if let Some(v) = float("audio", "bgm_fade") {
            self.bgm_fade = v;
        }

        // [save] section
        if let Some(path) = config.get("save", "path") {
            self.save_path = PathBuf::from(path);
        }

        // [boot] section
        if let Some(scene) = config.get("boot", "first_scene") {
            self.first_scene = scene;
        }
        if let Some(v) = float("boot", "delay") {
            self.boot_delay = v;
        }

        info!(
            "Loaded config: fixed_delta={}, fps={}, se_voices={}, save={:?}, first scene '{}'",
            self.fixed_delta, self.target_fps, self.se_voices, self.save_path, self.first_scene
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [time] section
        config.set("time", "fixed_delta", Some(self.fixed_delta.to_string()));
        config.set("time", "time_scale", Some(self.time_scale.to_string()));
        config.set("time", "target_fps", Some(self.target_fps.to_string()));

        // [player] section
        let p = &self.player;
        config.set("player", "move_speed", Some(p.move_speed.to_string()));
        config.set("player", "jump_power", Some(p.jump_power.to_string()));
        config.set("player", "air_control", Some(p.air_control.to_string()));
        config.set(
            "player",
            "ground_check_distance",
            Some(p.ground_check_distance.to_string()),
        );
        config.set("player", "coyote_time", Some(p.coyote_time.to_string()));
        config.set("player", "jump_buffer_time", Some(p.jump_buffer_time.to_string()));
        config.set("player", "max_jumps", Some(p.max_jumps.to_string()));
        config.set("player", "fall_multiplier", Some(p.fall_multiplier.to_string()));
        config.set(
            "player",
            "low_jump_multiplier",
            Some(p.low_jump_multiplier.to_string()),
        );

        // [audio] section
        config.set("audio", "se_voices", Some(self.se_voices.to_string()));
        config.set("audio", "bgm_fade", Some(self.bgm_fade.to_string()));

        // [save] section
        config.set("save", "path", Some(self.save_path.display().to_string()));

        // [boot] section
        config.set("boot", "first_scene", Some(self.first_scene.clone()));
        config.set("boot", "delay", Some(self.boot_delay.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_an_error_and_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GameConfig::with_path(dir.path().join("nope.ini"));
        assert!(config.load_from_file().is_err());
        assert_eq!(config.fixed_delta, DEFAULT_FIXED_DELTA);
        assert_eq!(config.first_scene, GAMEPLAY_SCENE);
    }

    #[test]
    fn partial_file_overrides_only_present_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[player]\nmax_jumps = 2\nmove_speed = 9.5\n\n[boot]\nfirst_scene = MainMenu\ndelay = 0"
        )
        .unwrap();

        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.player.max_jumps, 2);
        assert_eq!(config.player.move_speed, 9.5);
        assert_eq!(config.player.jump_power, 7.0);
        assert_eq!(config.first_scene, "MainMenu");
        assert_eq!(config.boot_delay, 0.0);
        assert_eq!(config.se_voices, DEFAULT_SE_VOICES);
    }

    #[test]
    fn saved_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        let mut written = GameConfig::with_path(&path);
        written.target_fps = 30;
        written.bgm_fade = 1.5;
        written.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.target_fps, 30);
        assert_eq!(loaded.bgm_fade, 1.5);
        assert!((loaded.frame_delta() - 1.0 / 30.0).abs() < 1e-6);
    }
}
