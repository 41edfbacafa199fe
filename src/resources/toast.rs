//! Transient notifications shown one at a time.
//!
//! [`ToastQueue`] keeps a FIFO of pending messages and at most one playback
//! in flight. A playback runs fade-in (rising [`TOAST_RISE`] units with a
//! cubic ease-out), hold, fade-out (rising another [`TOAST_RISE`]), then a
//! short gap before the next message starts. Messages are never dropped or
//! merged; a burst just waits its turn.
//!
//! The queue is advanced with unscaled time so toasts keep animating while
//! the game is paused.

use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;
use log::info;

use crate::components::tween::{Easing, lerp_f32};

pub const TOAST_FADE_IN: f32 = 0.3;
pub const TOAST_HOLD: f32 = 2.0;
pub const TOAST_FADE_OUT: f32 = 0.5;
pub const TOAST_GAP: f32 = 0.1;
pub const TOAST_RISE: f32 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    FadeIn,
    Hold,
    FadeOut,
    Gap,
}

impl ToastPhase {
    fn duration(self) -> f32 {
        match self {
            ToastPhase::FadeIn => TOAST_FADE_IN,
            ToastPhase::Hold => TOAST_HOLD,
            ToastPhase::FadeOut => TOAST_FADE_OUT,
            ToastPhase::Gap => TOAST_GAP,
        }
    }
}

#[derive(Clone, Debug)]
struct Playback {
    text: String,
    phase: ToastPhase,
    elapsed: f32,
}

/// What a host UI should draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToastView<'a> {
    pub text: &'a str,
    pub alpha: f32,
    /// Upward offset from the resting position.
    pub offset: f32,
    pub phase: ToastPhase,
}

#[derive(Resource, Debug, Default)]
pub struct ToastQueue {
    pending: VecDeque<String>,
    playing: Option<Playback>,
    shown: u64,
}

impl ToastQueue {
    /// Queue `text`; starts playback right away when idle.
    pub fn enqueue(&mut self, text: impl Into<String>) {
        self.pending.push_back(text.into());
        if self.playing.is_none() {
            self.start_next();
        }
    }

    /// True from the first message until the queue drains, gaps included.
    pub fn is_displaying(&self) -> bool {
        self.playing.is_some()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Messages started so far.
    pub fn shown(&self) -> u64 {
        self.shown
    }

    /// The toast on screen, or `None` when idle or between toasts.
    pub fn current(&self) -> Option<ToastView<'_>> {
        let pb = self.playing.as_ref()?;
        let p = (pb.elapsed / pb.phase.duration()).clamp(0.0, 1.0);
        let rise = Easing::CubicOut.apply(p);
        let (alpha, offset) = match pb.phase {
            ToastPhase::FadeIn => (p, lerp_f32(0.0, TOAST_RISE, rise)),
            ToastPhase::Hold => (1.0, TOAST_RISE),
            ToastPhase::FadeOut => (1.0 - p, lerp_f32(TOAST_RISE, 2.0 * TOAST_RISE, rise)),
            ToastPhase::Gap => return None,
        };
        Some(ToastView {
            text: &pb.text,
            alpha,
            offset,
            phase: pb.phase,
        })
    }

    /// Advance by `dt` seconds, carrying leftover time across phase
    /// boundaries.
    pub fn tick(&mut self, dt: f32) {
        let mut left = dt.max(0.0);
        while let Some(pb) = self.playing.as_mut() {
            let remaining = pb.phase.duration() - pb.elapsed;
            if left < remaining {
                pb.elapsed += left;
                return;
            }
            left -= remaining.max(0.0);
            let next = match pb.phase {
                ToastPhase::FadeIn => Some(ToastPhase::Hold),
                ToastPhase::Hold => Some(ToastPhase::FadeOut),
                ToastPhase::FadeOut => Some(ToastPhase::Gap),
                ToastPhase::Gap => None,
            };
            match next {
                Some(phase) => {
                    pb.phase = phase;
                    pb.elapsed = 0.0;
                }
                None => {
                    self.playing = None;
                    self.start_next();
                }
            }
        }
    }

    fn start_next(&mut self) {
        if let Some(text) = self.pending.pop_front() {
            info!("toast: {}", text);
            self.shown += 1;
            self.playing = Some(Playback {
                text,
                phase: ToastPhase::FadeIn,
                elapsed: 0.0,
            });
        }
    }
}
