//! Event types exchanged across systems.
//!
//! Observers react to the entity-targeted events ([`health::DamageEvent`],
//! [`input::InputEvent`]); buffered [`Message`](bevy_ecs::message::Message)
//! types are read by ordinary systems; [`bus`] payloads travel over the
//! global event bus.
//!
//! Submodules:
//! - [`audio`] – commands for the audio backend thread
//! - [`bus`] – global publish/subscribe channels
//! - [`debug`] – developer overlay actions
//! - [`health`] – damage and heal requests, health change notifications
//! - [`input`] – logical input action edges
//! - [`scene`] – scene transition progress
//! - [`ui`] – pause menu buttons
pub mod audio;
pub mod bus;
pub mod debug;
pub mod health;
pub mod input;
pub mod scene;
pub mod ui;
