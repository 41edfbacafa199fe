//! ECS resources made available to systems.
//!
//! This module groups the long-lived services injected into the ECS world:
//! timing, input, the event bus, audio, persistence, scenes, UI state and
//! pools. Each submodule documents the semantics and intended usage of its
//! resource(s).
//!
//! Overview
//! - `audio` – BGM crossfade, SE voices and the backend bridge
//! - `boot` – startup sequence state
//! - `collisionworld` – static level geometry, gravity and box probes
//! - `debughud` – developer overlay state
//! - `eventbus` – typed publish/subscribe channels
//! - `gameconfig` – INI configuration
//! - `gamemanager` – pause flag, play time and score
//! - `input` – per-frame input state and input sources
//! - `pool` – reuse of short-lived actors by prefab id
//! - `rng` – shared gameplay randomness
//! - `save` – save data and its persistence backends
//! - `scene` – scene requests and the builder registry
//! - `screenfade` – full-screen fade overlay
//! - `toast` – queued transient notifications
//! - `uistack` – stack of modal windows
//! - `worldtime` – simulation time and delta
pub mod audio;
pub mod boot;
pub mod collisionworld;
pub mod debughud;
pub mod eventbus;
pub mod gameconfig;
pub mod gamemanager;
pub mod input;
pub mod pool;
pub mod rng;
pub mod save;
pub mod scene;
pub mod screenfade;
pub mod toast;
pub mod uistack;
pub mod worldtime;
