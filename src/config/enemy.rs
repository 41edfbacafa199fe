//! Enemy archetype stats.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub name: String,
    pub max_health: f32,
    pub move_speed: f32,
    /// Damage dealt on contact or attack.
    pub damage: f32,

    pub detection_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub patrol_radius: f32,

    pub acceleration: f32,
    pub deceleration: f32,
    /// Turn rate in degrees per second.
    pub rotation_speed: f32,

    /// Score awarded when the enemy dies.
    pub score_value: i32,
    pub experience_value: f32,
    /// Prefab ids of possible drops.
    pub drop_items: Vec<String>,
    /// Chance in [0, 1] that a drop happens at all.
    pub drop_chance: f32,

    pub hit_effect: Option<String>,
    pub hit_sound: Option<String>,
    pub death_effect: Option<String>,
    pub death_sound: Option<String>,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            name: "Basic Enemy".to_string(),
            max_health: 50.0,
            move_speed: 3.0,
            damage: 10.0,
            detection_range: 8.0,
            attack_range: 2.0,
            attack_cooldown: 1.5,
            patrol_radius: 5.0,
            acceleration: 10.0,
            deceleration: 15.0,
            rotation_speed: 180.0,
            score_value: 100,
            experience_value: 25.0,
            drop_items: Vec::new(),
            drop_chance: 0.3,
            hit_effect: None,
            hit_sound: None,
            death_effect: None,
            death_sound: None,
        }
    }
}

impl EnemyConfig {
    /// Pick a drop using `rng`, or `None` when the roll fails or the table is
    /// empty.
    pub fn roll_drop(&self, rng: &mut fastrand::Rng) -> Option<&str> {
        if self.drop_items.is_empty() {
            return None;
        }
        if rng.f32() >= self.drop_chance.clamp(0.0, 1.0) {
            return None;
        }
        let index = rng.usize(..self.drop_items.len());
        self.drop_items.get(index).map(String::as_str)
    }
}
