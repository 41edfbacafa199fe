//! Difficulty modifiers and the time-based difficulty ramp.

use serde::{Deserialize, Serialize};

/// Point on a difficulty curve. `time` is normalized to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

/// Piecewise linear curve, clamped at both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    keys: Vec<CurveKey>,
}

impl Curve {
    /// Keys are sorted by time. An empty curve evaluates to 1.
    pub fn new(mut keys: Vec<CurveKey>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    pub fn linear(start: f32, end: f32) -> Self {
        Self::new(vec![
            CurveKey { time: 0.0, value: start },
            CurveKey { time: 1.0, value: end },
        ])
    }

    pub fn evaluate(&self, t: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 1.0;
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time {
                let span = b.time - a.time;
                if span <= 0.0 {
                    return b.value;
                }
                return a.value + (b.value - a.value) * (t - a.time) / span;
            }
        }
        last.value
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultySettings {
    pub player_health_multiplier: f32,
    pub player_damage_multiplier: f32,
    pub player_speed_multiplier: f32,

    pub enemy_health_multiplier: f32,
    pub enemy_damage_multiplier: f32,
    pub enemy_speed_multiplier: f32,
    pub enemy_spawn_rate_multiplier: f32,

    /// Multiplier over normalized game time.
    pub progression: Curve,
    /// Game time in seconds at which the curve reaches its end.
    pub max_difficulty_time: f32,

    pub score_multiplier: f32,
    pub experience_multiplier: f32,
}

impl Default for DifficultySettings {
    fn default() -> Self {
        Self {
            player_health_multiplier: 1.0,
            player_damage_multiplier: 1.0,
            player_speed_multiplier: 1.0,
            enemy_health_multiplier: 1.0,
            enemy_damage_multiplier: 1.0,
            enemy_speed_multiplier: 1.0,
            enemy_spawn_rate_multiplier: 1.0,
            progression: Curve::linear(1.0, 2.0),
            max_difficulty_time: 300.0,
            score_multiplier: 1.0,
            experience_multiplier: 1.0,
        }
    }
}

impl DifficultySettings {
    /// Ramp value for `game_time` seconds into a run.
    pub fn difficulty_multiplier(&self, game_time: f32) -> f32 {
        let normalized = if self.max_difficulty_time > 0.0 {
            (game_time / self.max_difficulty_time).clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.progression.evaluate(normalized)
    }
}
