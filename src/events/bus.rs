//! Payloads carried on the global event bus.
//!
//! Each payload type is its own channel. See
//! [`crate::resources::eventbus`] for subscribing and publishing.
//!
//! | channel          | payload                     | published by            |
//! |------------------|-----------------------------|-------------------------|
//! | `hit`            | [`Hit`] world position      | any damaged actor       |
//! | `pause_toggled`  | [`PauseToggled`] new state  | game manager, back key  |
//! | `toast`          | [`ToastMessage`] text       | anyone                  |
//! | `player_died`    | [`PlayerDied`]              | the player's health     |
//! | `health_changed` | [`HealthChanged`] rounded   | the player's health     |
//! | `score_changed`  | [`ScoreChanged`] new score  | game manager            |

use glam::Vec3;

/// A payload type with its own subscriber list.
pub trait BusEvent: Clone + Send + Sync + 'static {
    /// Name used in logs and diagnostics.
    const CHANNEL: &'static str;
}

/// Something took damage at this world position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit(pub Vec3);

impl BusEvent for Hit {
    const CHANNEL: &'static str = "hit";
}

/// The game was paused (true) or resumed (false).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseToggled(pub bool);

impl BusEvent for PauseToggled {
    const CHANNEL: &'static str = "pause_toggled";
}

/// Request to show a transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessage(pub String);

impl ToastMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl BusEvent for ToastMessage {
    const CHANNEL: &'static str = "toast";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerDied;

impl BusEvent for PlayerDied {
    const CHANNEL: &'static str = "player_died";
}

/// The player's health, rounded to the nearest integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthChanged(pub i32);

impl BusEvent for HealthChanged {
    const CHANNEL: &'static str = "health_changed";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreChanged(pub i32);

impl BusEvent for ScoreChanged {
    const CHANNEL: &'static str = "score_changed";
}
