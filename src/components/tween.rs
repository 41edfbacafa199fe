//! Easing curves and one-shot scalar fades.
//!
//! Window show/hide, the boot screen fade and the toast animation are all
//! driven by a [`Fade`] advanced once per frame with unscaled time, so they
//! keep animating while gameplay is paused. A fade is plain data: when the
//! owning entity is despawned the fade goes with it and nothing resumes.

/// Shapes a normalized time value in [0, 1].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Starts fast, decelerates (cubic).
    CubicOut,
    /// Hermite smooth-step: slow start and end.
    SmoothStep,
}

impl Easing {
    /// Apply the curve. `t` is clamped to [0, 1] first.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicOut => {
                let p = 1.0 - t;
                1.0 - p * p * p
            }
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Linearly interpolate between two floats without clamping `t`.
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolates one value from `from` to `to` over `duration` seconds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fade {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
}

impl Fade {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Fade {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing: Easing::SmoothStep,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Progress in [0, 1]. Zero-length fades are complete immediately.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn value(&self) -> f32 {
        if self.finished() {
            return self.to;
        }
        lerp_f32(self.from, self.to, self.easing.apply(self.progress()))
    }

    pub fn finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance by `dt` seconds and return the new value. The final call lands
    /// exactly on `to`.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt.max(0.0);
        self.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn easing_endpoints() {
        for e in [Easing::Linear, Easing::CubicOut, Easing::SmoothStep] {
            assert!(approx_eq(e.apply(0.0), 0.0));
            assert!(approx_eq(e.apply(1.0), 1.0));
            assert!(approx_eq(e.apply(2.0), 1.0));
        }
    }

    #[test]
    fn smoothstep_midpoint_and_shape() {
        assert!(approx_eq(Easing::SmoothStep.apply(0.5), 0.5));
        assert!(Easing::SmoothStep.apply(0.25) < 0.25);
    }

    #[test]
    fn cubic_out_is_ahead_of_linear() {
        assert!(Easing::CubicOut.apply(0.3) > 0.3);
    }

    #[test]
    fn fade_lands_exactly_on_target() {
        let mut f = Fade::new(0.0, 1.0, 0.15);
        f.advance(0.1);
        assert!(!f.finished());
        assert!(f.value() > 0.0 && f.value() < 1.0);
        let v = f.advance(0.1);
        assert!(f.finished());
        assert_eq!(v, 1.0);
    }

    #[test]
    fn zero_duration_fade_is_instant() {
        let f = Fade::new(1.0, 0.0, 0.0);
        assert!(f.finished());
        assert_eq!(f.value(), 0.0);
    }
}
