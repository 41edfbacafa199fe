//! Whaleshark platformer core.
//!
//! This module exposes the game's ECS components, resources, systems, and
//! events for use in integration tests and by host front ends.

pub mod components;
pub mod config;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
