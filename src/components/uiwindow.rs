//! Modal UI panels.
//!
//! A [`UiWindow`] holds the canvas-group state a host UI layer needs: alpha,
//! whether the panel is active at all, and whether it takes input (and
//! blocks pointer rays). Showing and hiding are fades advanced with unscaled
//! time by [`window_fade_system`](crate::systems::ui::window_fade_system).
//! Stack bookkeeping lives in [`UiStack`](crate::resources::uistack::UiStack).

use bevy_ecs::prelude::Component;

use super::tween::Fade;

pub const SHOW_DURATION: f32 = 0.15;
pub const HIDE_DURATION: f32 = 0.12;

#[derive(Clone, Copy, Debug, PartialEq)]
struct WindowFade {
    fade: Fade,
    deactivate_on_end: bool,
}

#[derive(Component, Clone, Debug, PartialEq)]
pub struct UiWindow {
    pub name: String,
    alpha: f32,
    active: bool,
    interactable: bool,
    fade: Option<WindowFade>,
}

impl UiWindow {
    /// A window that starts hidden.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alpha: 0.0,
            active: false,
            interactable: false,
            fade: None,
        }
    }

    /// Activate and fade in from the current alpha. Replaces a running fade.
    pub fn show(&mut self) {
        self.active = true;
        self.fade = Some(WindowFade {
            fade: Fade::new(self.alpha, 1.0, SHOW_DURATION),
            deactivate_on_end: false,
        });
    }

    /// Fade out, then deactivate. Replaces a running fade.
    pub fn hide(&mut self) {
        self.fade = Some(WindowFade {
            fade: Fade::new(self.alpha, 0.0, HIDE_DURATION),
            deactivate_on_end: true,
        });
    }

    pub fn hide_immediate(&mut self) {
        self.fade = None;
        self.alpha = 0.0;
        self.active = false;
    }

    pub fn set_interactable(&mut self, on: bool) {
        self.interactable = on;
    }

    /// Advance the fade. Returns true on the tick it finishes.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(mut running) = self.fade else {
            return false;
        };
        self.alpha = running.fade.advance(dt);
        if !running.fade.finished() {
            self.fade = Some(running);
            return false;
        }
        self.fade = None;
        if running.deactivate_on_end {
            self.active = false;
        }
        true
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_interactable(&self) -> bool {
        self.interactable
    }

    /// Pointer rays stop at interactable windows only.
    pub fn blocks_raycasts(&self) -> bool {
        self.interactable
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }
}

/// Marks the window the pause flow pushes and pops.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PauseMenu;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_fades_in() {
        let mut w = UiWindow::new("inventory");
        w.show();
        assert!(w.is_active());
        assert_eq!(w.alpha(), 0.0);
        assert!(!w.tick(0.075));
        assert!((w.alpha() - 0.5).abs() < 1e-4, "smooth-step midpoint");
        assert!(w.tick(0.1));
        assert_eq!(w.alpha(), 1.0);
        assert!(w.is_active());
    }

    #[test]
    fn hide_deactivates_at_the_end() {
        let mut w = UiWindow::new("inventory");
        w.show();
        w.tick(1.0);
        w.hide();
        w.tick(0.06);
        assert!(w.is_active());
        w.tick(0.06);
        assert!(!w.is_active());
        assert_eq!(w.alpha(), 0.0);
    }

    #[test]
    fn show_cancels_pending_hide() {
        let mut w = UiWindow::new("inventory");
        w.show();
        w.tick(1.0);
        w.hide();
        w.tick(0.05);
        w.show();
        w.tick(1.0);
        assert!(w.is_active());
        assert_eq!(w.alpha(), 1.0);
    }

    #[test]
    fn hide_immediate_drops_fade() {
        let mut w = UiWindow::new("hud");
        w.show();
        w.hide_immediate();
        assert!(!w.is_fading());
        assert!(!w.tick(1.0));
        assert!(!w.is_active());
    }
}
