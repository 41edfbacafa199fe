//! Full-screen fade overlay.
//!
//! Alpha 1 is a fully covered screen. While a fade runs, and afterwards as
//! long as the overlay is not fully clear, it swallows UI input.

use bevy_ecs::prelude::Resource;

use crate::components::tween::Fade;

pub const SCREEN_FADE_DURATION: f32 = 0.25;

/// Alpha below which the overlay lets input through.
const CLEAR_ALPHA: f32 = 0.001;

#[derive(Resource, Clone, Debug)]
pub struct ScreenFade {
    pub duration: f32,
    alpha: f32,
    fade: Option<Fade>,
    blocks_input: bool,
}

impl Default for ScreenFade {
    fn default() -> Self {
        Self::clear()
    }
}

impl ScreenFade {
    pub fn clear() -> Self {
        Self {
            duration: SCREEN_FADE_DURATION,
            alpha: 0.0,
            fade: None,
            blocks_input: false,
        }
    }

    /// Fully covered, as at startup.
    pub fn opaque() -> Self {
        Self {
            alpha: 1.0,
            blocks_input: true,
            ..Self::clear()
        }
    }

    /// Fade to covered.
    pub fn fade_out(&mut self) {
        self.fade_to(1.0);
    }

    /// Fade to clear.
    pub fn fade_in(&mut self) {
        self.fade_to(0.0);
    }

    fn fade_to(&mut self, target: f32) {
        self.fade = Some(Fade::new(self.alpha, target, self.duration));
        self.blocks_input = true;
    }

    /// Advance with unscaled time. Returns true on the tick the fade ends.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(mut fade) = self.fade else {
            return false;
        };
        self.alpha = fade.advance(dt);
        if !fade.finished() {
            self.fade = Some(fade);
            return false;
        }
        self.fade = None;
        self.blocks_input = self.alpha > CLEAR_ALPHA;
        true
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    pub fn blocks_input(&self) -> bool {
        self.blocks_input
    }
}
