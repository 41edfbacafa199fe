//! Immutable tuning bundles handed to actors when they are created.
//!
//! These are the designer-facing value objects of the game. They are plain
//! data with defaults, `serde`-deserializable so levels can ship them as
//! JSON, and never mutated once an actor holds them.
//!
//! Submodules overview:
//! - [`difficulty`] – global modifiers and time-based difficulty ramp
//! - [`enemy`] – enemy stats, AI ranges and rewards
//! - [`movement`] – platformer movement and jump tuning
//! - [`weapon`] – fire rate, ammo and projectile parameters

pub mod difficulty;
pub mod enemy;
pub mod movement;
pub mod weapon;
