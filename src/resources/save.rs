//! Save data and the service that loads and stores it.
//!
//! [`SaveService`] keeps the live [`SaveData`] in memory and talks to a
//! [`Persistence`] backend only on `load`/`save`. Failures never escape:
//! they are logged with `warn!` and the in-memory data falls back to (or
//! stays at) its current value. The JSON layout uses camelCase keys.

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resources::audio::AudioManager;

pub const DEFAULT_SAVE_PATH: &str = "./save.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SaveData {
    pub bgm: f32,
    pub se: f32,
    pub sensitivity: f32,
    pub high_score: i32,
    pub fullscreen: bool,
    pub player_name: String,
    pub level: i32,
    pub tutorial_completed: bool,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            bgm: 0.8,
            se: 1.0,
            sensitivity: 1.0,
            high_score: 0,
            fullscreen: true,
            player_name: String::new(),
            level: 1,
            tutorial_completed: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save data is not valid json: {0}")]
    Format(#[from] serde_json::Error),
}

/// Where save data lives.
pub trait Persistence: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<SaveData>, SaveError>;
    fn save(&mut self, data: &SaveData) -> Result<(), SaveError>;
    /// Human-readable location for logs.
    fn location(&self) -> String;
}

/// Pretty-printed JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for JsonFileStore {
    fn load(&self) -> Result<Option<SaveData>, SaveError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&mut self, data: &SaveData) -> Result<(), SaveError> {
        let json = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps the serialized JSON in memory. Used by tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    json: Option<String>,
}

impl MemoryStore {
    /// A store that already holds this text, valid or not.
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            json: Some(json.into()),
        }
    }

    pub fn json(&self) -> Option<&str> {
        self.json.as_deref()
    }
}

impl Persistence for MemoryStore {
    fn load(&self) -> Result<Option<SaveData>, SaveError> {
        match &self.json {
            Some(text) => Ok(Some(serde_json::from_str(text)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, data: &SaveData) -> Result<(), SaveError> {
        self.json = Some(serde_json::to_string(data)?);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[derive(Resource)]
pub struct SaveService {
    store: Box<dyn Persistence>,
    data: SaveData,
    saves: u64,
}

impl SaveService {
    pub fn new(store: impl Persistence + 'static) -> Self {
        Self {
            store: Box::new(store),
            data: SaveData::default(),
            saves: 0,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    /// Replace the in-memory data with what the store holds. Missing data
    /// keeps the current values; unreadable data resets to defaults.
    pub fn load(&mut self) -> &SaveData {
        match self.store.load() {
            Ok(Some(data)) => {
                info!("save loaded from {}", self.store.location());
                self.data = data;
            }
            Ok(None) => info!("no save at {}, using defaults", self.store.location()),
            Err(e) => {
                warn!("save load failed: {}", e);
                self.data = SaveData::default();
            }
        }
        &self.data
    }

    /// Write the in-memory data. Returns false (after logging) on failure.
    pub fn save(&mut self) -> bool {
        match self.store.save(&self.data) {
            Ok(()) => {
                self.saves += 1;
                info!("game saved to {}", self.store.location());
                true
            }
            Err(e) => {
                warn!("save write failed: {}", e);
                false
            }
        }
    }

    /// Record `score` if it beats the high score, saving only then.
    pub fn update_high_score(&mut self, score: i32) -> bool {
        if score <= self.data.high_score {
            return false;
        }
        self.data.high_score = score;
        self.save();
        true
    }

    /// Push the stored volumes to the audio manager.
    pub fn apply_runtime(&self, audio: &mut AudioManager) {
        audio.set_bgm_volume(self.data.bgm);
        audio.set_se_volume(self.data.se);
    }

    pub fn data(&self) -> &SaveData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut SaveData {
        &mut self.data
    }

    /// Successful writes so far.
    pub fn save_count(&self) -> u64 {
        self.saves
    }
}

/// Load the save and apply its runtime settings, for boot.
pub fn load_save(world: &mut World) {
    let Some(mut service) = world.get_resource_mut::<SaveService>() else {
        warn!("no SaveService; skipping save load");
        return;
    };
    service.load();
    world.resource_scope(|world, service: Mut<SaveService>| {
        if let Some(mut audio) = world.get_resource_mut::<AudioManager>() {
            service.apply_runtime(&mut audio);
        }
    });
}
