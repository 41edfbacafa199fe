//! Colour modulation handed to the host renderer.
//!
//! Only alpha matters to gameplay: the invincibility flicker drops it to
//! [`FLICKER_ALPHA`] on every other interval and restores it when the window
//! ends. Renderers multiply their base colour by this tint.

use bevy_ecs::prelude::Component;

/// Alpha used for the dimmed half of the invincibility flicker.
pub const FLICKER_ALPHA: f32 = 0.5;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Tint {
    pub const WHITE: Tint = Tint {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// White at the given alpha.
    pub fn with_alpha(a: f32) -> Self {
        Self { a, ..Self::WHITE }
    }

    /// Component-wise product, used to stack tints.
    pub fn multiply(&self, other: Tint) -> Tint {
        Tint::new(
            self.r * other.r,
            self.g * other.g,
            self.b * other.b,
            self.a * other.a,
        )
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_opaque_white() {
        assert_eq!(Tint::default(), Tint::WHITE);
    }

    #[test]
    fn multiply_with_white_is_identity() {
        let t = Tint::new(0.2, 0.4, 0.6, 0.8);
        assert_eq!(t.multiply(Tint::WHITE), t);
    }

    #[test]
    fn flicker_tint_only_dims_alpha() {
        let t = Tint::with_alpha(FLICKER_ALPHA);
        assert_eq!(t.r, 1.0);
        assert_eq!(t.a, 0.5);
    }
}
