//! Health, damage and invincibility.
//!
//! [`HealthState`] is the pure state machine with three states:
//!
//! - alive and vulnerable,
//! - alive and invincible (damage is rejected until the window runs out),
//! - dead (terminal; every further call is a no-op).
//!
//! `0 <= current <= max` holds after every operation, and the transition to
//! dead happens exactly once, on the hit that brings health to zero.
//!
//! [`Health`] wraps it as a component together with its [`HealthConfig`]
//! and the cosmetic flicker shown while invincible. Damage and healing reach
//! it through the [`DamageEvent`](crate::events::health::DamageEvent) and
//! [`HealEvent`](crate::events::health::HealEvent) observers in
//! [`crate::systems::health`].

use bevy_ecs::prelude::Component;

/// Seconds between flicker toggles while invincible.
pub const FLICKER_INTERVAL: f32 = 0.1;

/// Delay between death and removal of the actor.
pub const DESTROY_DELAY: f32 = 0.1;

/// Result of [`HealthState::take_damage`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Dead or invincible: nothing changed.
    Ignored,
    /// Health dropped but the actor lives.
    Damaged { health: f32 },
    /// Health reached zero on this hit.
    Killed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthState {
    current: f32,
    max: f32,
    invincible_left: f32,
    dead: bool,
}

impl HealthState {
    /// Full health. Negative maxima are treated as 0.
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: max,
            max,
            invincible_left: 0.0,
            dead: false,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// `current / max`, or 0 for a zero maximum.
    pub fn ratio(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_left > 0.0
    }

    pub fn invincible_left(&self) -> f32 {
        self.invincible_left
    }

    /// Apply `amount` of damage and open an invincibility window of
    /// `invincibility` seconds (none when it is not positive). Negative
    /// amounts count as zero damage but still open the window.
    pub fn take_damage(&mut self, amount: f32, invincibility: f32) -> DamageOutcome {
        if self.dead || self.is_invincible() {
            return DamageOutcome::Ignored;
        }
        self.current = (self.current - amount.max(0.0)).max(0.0);
        if invincibility > 0.0 {
            self.invincible_left = invincibility;
        }
        if self.current <= 0.0 {
            self.dead = true;
            self.invincible_left = 0.0;
            return DamageOutcome::Killed;
        }
        DamageOutcome::Damaged {
            health: self.current,
        }
    }

    /// Restore up to `amount`, capped at the maximum. Returns the new health,
    /// or `None` when the actor is dead.
    pub fn heal(&mut self, amount: f32) -> Option<f32> {
        if self.dead {
            return None;
        }
        self.current = (self.current + amount.max(0.0)).min(self.max);
        Some(self.current)
    }

    /// Change the maximum while keeping the current/max ratio. Ignored once
    /// dead.
    pub fn set_max_health(&mut self, new_max: f32) -> Option<f32> {
        if self.dead {
            return None;
        }
        let ratio = self.ratio();
        self.max = new_max.max(0.0);
        self.current = (self.max * ratio).clamp(0.0, self.max);
        Some(self.current)
    }

    /// Advance the invincibility window. Returns true on the tick it ends.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.invincible_left <= 0.0 {
            return false;
        }
        self.invincible_left -= dt.max(0.0);
        if self.invincible_left <= 0.0 {
            self.invincible_left = 0.0;
            return true;
        }
        false
    }
}

/// Per-actor health tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthConfig {
    pub max_health: f32,
    pub invincibility_duration: f32,
    /// Flicker the actor's [`Tint`](super::tint::Tint) while invincible.
    pub flash_on_hit: bool,
    /// Remove the actor shortly after it dies.
    pub destroy_on_death: bool,
    /// Publish health changes and death on the global event bus.
    pub is_player: bool,
    pub hit_effect: Option<String>,
    pub death_effect: Option<String>,
    pub hit_sound: Option<String>,
    pub death_sound: Option<String>,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            invincibility_duration: 0.5,
            flash_on_hit: true,
            destroy_on_death: true,
            is_player: false,
            hit_effect: None,
            death_effect: None,
            hit_sound: None,
            death_sound: None,
        }
    }
}

impl HealthConfig {
    pub fn player() -> Self {
        Self {
            is_player: true,
            ..Default::default()
        }
    }

    pub fn with_max_health(mut self, max_health: f32) -> Self {
        self.max_health = max_health;
        self
    }

    pub fn with_invincibility(mut self, seconds: f32) -> Self {
        self.invincibility_duration = seconds;
        self
    }
}

/// Flicker phase while invincible.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Flicker {
    pub dimmed: bool,
    /// Time until the next toggle.
    pub next_toggle: f32,
}

#[derive(Component, Debug, Clone)]
pub struct Health {
    pub config: HealthConfig,
    pub state: HealthState,
    pub flicker: Flicker,
}

impl Health {
    pub fn new(config: HealthConfig) -> Self {
        let state = HealthState::new(config.max_health);
        Self {
            config,
            state,
            flicker: Flicker::default(),
        }
    }

    pub fn current(&self) -> f32 {
        self.state.current()
    }

    pub fn is_dead(&self) -> bool {
        self.state.is_dead()
    }

    /// Current over max, in `[0, 1]`.
    pub fn health_ratio(&self) -> f32 {
        self.state.ratio()
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(HealthConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_then_invincible() {
        let mut h = HealthState::new(100.0);
        assert_eq!(h.take_damage(30.0, 0.5), DamageOutcome::Damaged { health: 70.0 });
        assert!(h.is_invincible());
        assert_eq!(h.take_damage(30.0, 0.5), DamageOutcome::Ignored);
        assert_eq!(h.current(), 70.0);
    }

    #[test]
    fn invincibility_expires() {
        let mut h = HealthState::new(100.0);
        h.take_damage(10.0, 0.5);
        assert!(!h.tick(0.3));
        assert!(h.tick(0.3));
        assert!(!h.is_invincible());
        assert!(!h.tick(0.3), "ends only once");
        assert!(matches!(h.take_damage(10.0, 0.5), DamageOutcome::Damaged { .. }));
        assert_eq!(h.current(), 80.0);
    }

    #[test]
    fn zero_window_never_blocks() {
        let mut h = HealthState::new(100.0);
        h.take_damage(10.0, 0.0);
        assert!(!h.is_invincible());
        h.take_damage(10.0, 0.0);
        assert_eq!(h.current(), 80.0);
    }

    #[test]
    fn dies_exactly_once_and_stays_dead() {
        let mut h = HealthState::new(50.0);
        assert_eq!(h.take_damage(80.0, 0.0), DamageOutcome::Killed);
        assert_eq!(h.current(), 0.0);
        assert!(h.is_dead());
        assert_eq!(h.take_damage(10.0, 0.0), DamageOutcome::Ignored);
        assert_eq!(h.heal(10.0), None);
        assert_eq!(h.set_max_health(200.0), None);
        assert_eq!(h.current(), 0.0);
    }

    #[test]
    fn heal_is_clamped_to_max() {
        let mut h = HealthState::new(100.0);
        h.take_damage(30.0, 0.0);
        assert_eq!(h.heal(50.0), Some(100.0));
        assert_eq!(h.heal(-20.0), Some(100.0), "negative heal does nothing");
    }

    #[test]
    fn negative_damage_does_not_heal() {
        let mut h = HealthState::new(100.0);
        h.take_damage(20.0, 0.0);
        h.take_damage(-50.0, 0.0);
        assert_eq!(h.current(), 80.0);
    }

    #[test]
    fn set_max_keeps_ratio() {
        let mut h = HealthState::new(100.0);
        h.take_damage(50.0, 0.0);
        assert_eq!(h.set_max_health(200.0), Some(100.0));
        assert_eq!(h.max(), 200.0);
        assert_eq!(h.ratio(), 0.5);
    }

    #[test]
    fn invariant_holds_under_mixed_sequence() {
        let mut h = HealthState::new(40.0);
        let script = [(true, 15.0), (false, 100.0), (true, 7.5), (false, -3.0), (true, 60.0)];
        for (damage, amount) in script {
            if damage {
                h.take_damage(amount, 0.0);
            } else {
                h.heal(amount);
            }
            assert!(h.current() >= 0.0 && h.current() <= h.max());
        }
        assert!(h.is_dead());
    }
}
