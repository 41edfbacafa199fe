//! Weapon tuning.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub name: String,
    pub damage: f32,
    /// Shots per second.
    pub fire_rate: f32,
    pub range: f32,

    pub max_ammo: u32,
    /// Ammo loaded when the weapon is handed out.
    pub starting_ammo: u32,
    pub reload_time: f32,
    pub infinite_ammo: bool,

    /// Pool prefab id of the projectile.
    pub projectile_prefab: String,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,

    pub muzzle_flash: Option<String>,
    pub hit_effect: Option<String>,
    pub fire_sound: Option<String>,
    pub reload_sound: Option<String>,

    pub recoil_force: f32,
    pub recoil_recovery_time: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            name: "Basic Weapon".to_string(),
            damage: 10.0,
            fire_rate: 1.0,
            range: 10.0,
            max_ammo: 30,
            starting_ammo: 30,
            reload_time: 2.0,
            infinite_ammo: false,
            projectile_prefab: "projectile".to_string(),
            projectile_speed: 20.0,
            projectile_lifetime: 5.0,
            muzzle_flash: None,
            hit_effect: None,
            fire_sound: None,
            reload_sound: None,
            recoil_force: 5.0,
            recoil_recovery_time: 0.5,
        }
    }
}

impl WeaponConfig {
    /// Whether a shot is possible with `ammo` rounds loaded.
    pub fn can_fire(&self, ammo: u32) -> bool {
        self.infinite_ammo || ammo > 0
    }

    /// Seconds between shots. A non-positive fire rate never refires.
    pub fn fire_interval(&self) -> f32 {
        if self.fire_rate > 0.0 {
            1.0 / self.fire_rate
        } else {
            f32::INFINITY
        }
    }
}
