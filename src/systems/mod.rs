//! Game systems.
//!
//! This module groups all ECS systems, observers and bus subscribers that
//! advance the simulation. The frame driver in [`crate::game`] decides which
//! schedule each one runs in.
//!
//! Submodules overview
//! - [`audio`] – audio manager tick and the backend bridge
//! - [`boot`] – startup sequence and screen fade
//! - [`camera`] – camera follow and hit shake
//! - [`debughud`] – developer overlay and its actions
//! - [`enemy`] – score and drops on enemy death
//! - [`gameconfig`] – apply configuration changes
//! - [`gamemanager`] – pause toggling, score and game over
//! - [`health`] – damage/heal observers and invincibility
//! - [`input`] – update [`crate::resources::input::InputState`] and emit action edges
//! - [`movement`] – gravity and body integration
//! - [`platformer`] – ground probe, jump timers and jump resolution
//! - [`projectile`] – projectile lifetime and hits
//! - [`scene`] – scene transitions
//! - [`time`] – update simulation time and fixed steps
//! - [`toast`] – toast playback
//! - [`ttl`] – delayed despawn
//! - [`ui`] – window fades, back action and pause menu

pub mod audio;
pub mod boot;
pub mod camera;
pub mod debughud;
pub mod enemy;
pub mod gameconfig;
pub mod gamemanager;
pub mod health;
pub mod input;
pub mod movement;
pub mod platformer;
pub mod projectile;
pub mod scene;
pub mod time;
pub mod toast;
pub mod ttl;
pub mod ui;
